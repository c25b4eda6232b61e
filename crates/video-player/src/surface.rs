//! Command/event vocabulary between the controller and the playback runtime.
//!
//! The controller never touches a media element directly: it queues
//! `MediaCommand`s for the host to apply, and consumes `MediaEvent`s the
//! runtime reports back.  Events are the authoritative source for the flags
//! the platform itself controls (actual play/pause, fullscreen); commands
//! carry user intent.

/// A request from the controller to the playback runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    Play,
    Pause,
    SeekTo { position_secs: f64 },
    SetVolume { level: f32 },
    SetMuted { muted: bool },
    EnterFullscreen,
    ExitFullscreen,
}

/// What happened on the media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    Play,
    Pause,
    TimeUpdate { position_secs: f64, duration_secs: f64 },
    Ended,
    FullscreenChange { fullscreen: bool },
}

/// An event from the playback runtime.  `seq` increases monotonically in
/// emission order; the controller uses it to discard time updates that were
/// queued before a seek was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub seq: u64,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(seq: u64, kind: MediaEventKind) -> Self {
        Self { seq, kind }
    }
}

/// Stamps events with their emission order.  The host side of the media
/// element owns one of these.
#[derive(Debug, Default)]
pub struct EventStamper {
    next_seq: u64,
}

impl EventStamper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stamp(&mut self, kind: MediaEventKind) -> MediaEvent {
        let seq = self.next_seq;
        self.next_seq += 1;
        MediaEvent { seq, kind }
    }
}

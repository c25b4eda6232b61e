//! Transport state for one media element.
//!
//! One `PlayerController` per mounted watch view.  User operations apply
//! optimistically and queue `MediaCommand`s; native `MediaEvent`s reconcile
//! the flags the platform owns.  Switching to another video tears the
//! controller down and builds a fresh one.

use std::time::{Duration, Instant};

use tracing::debug;
use video_core::format::format_timestamp;

use crate::controls::ControlsVisibility;
use crate::intent::IntentState;
use crate::surface::{MediaCommand, MediaEvent, MediaEventKind};

/// Transport states.
///
/// ```text
///   Idle → Playing ⇄ Paused → Ended
/// ```
///
/// `Ended` is reached only when the reported position catches up with the
/// duration (or the runtime reports end-of-media); `replay()` returns to
/// `Playing`.  Advancing to the next item exits this controller entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Playing,
    Paused,
    Ended,
}

pub struct PlayerController {
    /// Play/pause flag with pending-intent tracking.  The displayed state is
    /// the intended value; native play/pause events confirm it.
    play: IntentState<bool>,
    /// Fullscreen flag.  Never optimistic: the observable value is the
    /// confirmed one, because the platform may deny the request.
    fullscreen: IntentState<bool>,
    position_secs: f64,
    /// 0.0 until the runtime has reported a usable duration.
    duration_secs: f64,
    volume: f32,
    muted: bool,
    last_nonzero_volume: f32,
    /// End-of-media overlay ("up next") is showing.
    overlay_shown: bool,
    /// False until playback has been requested or observed at least once.
    started: bool,
    controls: ControlsVisibility,
    commands: Vec<MediaCommand>,
    /// Highest event sequence number seen so far.
    last_event_seq: Option<u64>,
    /// Time updates with `seq` below this were queued before the latest seek
    /// and must not move the position backwards.
    stale_fence: u64,
}

impl PlayerController {
    pub fn new(default_volume: f32, controls_hide_timeout: Duration) -> Self {
        let volume = default_volume.clamp(0.0, 1.0);
        Self {
            play: IntentState::new(false),
            fullscreen: IntentState::new(false),
            position_secs: 0.0,
            duration_secs: 0.0,
            volume,
            muted: false,
            last_nonzero_volume: if volume > 0.0 { volume } else { 1.0 },
            overlay_shown: false,
            started: false,
            controls: ControlsVisibility::new(controls_hide_timeout),
            commands: Vec::new(),
            last_event_seq: None,
            stale_fence: 0,
        }
    }

    // ── observable state ──────────────────────────────────────────────────────

    pub fn status(&self) -> PlaybackStatus {
        if !self.started {
            PlaybackStatus::Idle
        } else if self.overlay_shown {
            PlaybackStatus::Ended
        } else if *self.play.intended() {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        }
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Percentage progress in [0, 100].  Unknown or zero duration yields 0 —
    /// never NaN.
    pub fn progress_percent(&self) -> f64 {
        if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            (self.position_secs / self.duration_secs * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn formatted_position(&self) -> String {
        format_timestamp(self.position_secs)
    }

    pub fn formatted_duration(&self) -> String {
        format_timestamp(self.duration_secs)
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Confirmed fullscreen state only; a pending request changes nothing
    /// until the runtime reports `FullscreenChange`.
    pub fn is_fullscreen(&self) -> bool {
        *self.fullscreen.confirmed()
    }

    pub fn overlay_shown(&self) -> bool {
        self.overlay_shown
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.visible()
    }

    /// Drain the queued commands for the host to apply to the media element.
    pub fn take_commands(&mut self) -> Vec<MediaCommand> {
        std::mem::take(&mut self.commands)
    }

    // ── user operations ───────────────────────────────────────────────────────

    pub fn toggle_play(&mut self, now: Instant) {
        if self.status() == PlaybackStatus::Playing {
            self.commands.push(MediaCommand::Pause);
            self.play.set_intent(false, now);
            self.controls.pin_visible();
        } else {
            self.commands.push(MediaCommand::Play);
            self.play.set_intent(true, now);
            self.overlay_shown = false;
            self.started = true;
        }
    }

    /// Seek to a percentage of the duration.  The displayed position moves
    /// immediately; time updates already queued before this call are fenced
    /// off so they cannot drag it back.
    pub fn seek_percent(&mut self, percent: f64) {
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let target = if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            percent / 100.0 * self.duration_secs
        } else {
            0.0
        };
        self.position_secs = target;
        self.stale_fence = self.last_event_seq.map_or(0, |s| s + 1);
        self.commands.push(MediaCommand::SeekTo {
            position_secs: target,
        });
    }

    pub fn set_volume(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        let level = level.clamp(0.0, 1.0);
        self.volume = level;
        self.muted = level == 0.0;
        if level > 0.0 {
            self.last_nonzero_volume = level;
        }
        self.commands.push(MediaCommand::SetVolume { level });
        self.commands.push(MediaCommand::SetMuted { muted: self.muted });
    }

    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            if self.volume == 0.0 {
                self.volume = self.last_nonzero_volume;
                self.commands.push(MediaCommand::SetVolume { level: self.volume });
            }
            self.commands.push(MediaCommand::SetMuted { muted: false });
        } else {
            self.muted = true;
            self.commands.push(MediaCommand::SetMuted { muted: true });
        }
    }

    pub fn toggle_fullscreen(&mut self, now: Instant) {
        let want = !*self.fullscreen.confirmed();
        self.fullscreen.set_intent(want, now);
        self.commands.push(if want {
            MediaCommand::EnterFullscreen
        } else {
            MediaCommand::ExitFullscreen
        });
    }

    pub fn pointer_activity(&mut self, now: Instant) {
        let playing = self.status() == PlaybackStatus::Playing;
        self.controls.pointer_activity(now, playing);
    }

    pub fn pointer_leave(&mut self) {
        let playing = self.status() == PlaybackStatus::Playing;
        self.controls.pointer_leave(playing);
    }

    /// From the up-next overlay: back to the start and resume.
    pub fn replay(&mut self, now: Instant) {
        self.position_secs = 0.0;
        self.stale_fence = self.last_event_seq.map_or(0, |s| s + 1);
        self.overlay_shown = false;
        self.started = true;
        self.play.set_intent(true, now);
        self.commands.push(MediaCommand::SeekTo { position_secs: 0.0 });
        self.commands.push(MediaCommand::Play);
    }

    // ── reconciliation ────────────────────────────────────────────────────────

    /// Apply an authoritative event from the playback runtime.
    pub fn handle_event(&mut self, event: MediaEvent) {
        let MediaEvent { seq, kind } = event;
        let fresh = seq >= self.stale_fence;
        self.last_event_seq = Some(self.last_event_seq.map_or(seq, |s| s.max(seq)));

        match kind {
            MediaEventKind::Play => {
                self.started = true;
                self.overlay_shown = false;
                self.play.on_confirmed(true);
            }
            MediaEventKind::Pause => {
                self.play.on_confirmed(false);
                if !self.overlay_shown {
                    self.controls.pin_visible();
                }
            }
            MediaEventKind::TimeUpdate {
                position_secs,
                duration_secs,
            } => {
                if duration_secs.is_finite() && duration_secs > 0.0 {
                    self.duration_secs = duration_secs;
                }
                if !fresh || !position_secs.is_finite() {
                    // Queued before the latest seek — duration is still
                    // trustworthy, the position is not.
                    return;
                }
                self.started = true;
                self.position_secs = position_secs.max(0.0);
                if self.duration_secs > 0.0 && self.position_secs >= self.duration_secs {
                    self.finish();
                }
            }
            MediaEventKind::Ended => {
                // An end-of-media report queued before a seek or replay is
                // just as stale as an old time update.
                if fresh {
                    self.finish();
                }
            }
            MediaEventKind::FullscreenChange { fullscreen } => {
                self.fullscreen.on_confirmed(fullscreen);
            }
        }
    }

    /// Enter the terminal end-of-media sub-state.  Idempotent: repeat
    /// at-end time updates re-trigger nothing.
    fn finish(&mut self) {
        if self.overlay_shown {
            return;
        }
        debug!(position = self.position_secs, "playback finished");
        self.started = true;
        self.overlay_shown = true;
        self.play = IntentState::new(false);
        if self.duration_secs > 0.0 {
            self.position_secs = self.duration_secs;
        }
        self.controls.pin_visible();
    }

    /// Periodic housekeeping: controls hide deadline and intent timeouts.
    /// A fullscreen request the platform never answered is absorbed here —
    /// the flag just stays at its confirmed value.
    pub fn tick(&mut self, now: Instant) {
        self.controls.tick(now);
        self.play.tick(now);
        if self.fullscreen.tick(now) {
            debug!("fullscreen request not granted; keeping confirmed state");
            self.fullscreen.absorb_timeout();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::INTENT_TIMEOUT;
    use crate::surface::EventStamper;

    const HIDE: Duration = Duration::from_secs(3);

    fn controller() -> PlayerController {
        PlayerController::new(1.0, HIDE)
    }

    fn time_update(seq: u64, position: f64, duration: f64) -> MediaEvent {
        MediaEvent::new(
            seq,
            MediaEventKind::TimeUpdate {
                position_secs: position,
                duration_secs: duration,
            },
        )
    }

    #[test]
    fn test_progress_matches_ratio_clamped() {
        let mut c = controller();
        c.handle_event(time_update(0, 30.0, 120.0));
        assert!((c.progress_percent() - 25.0).abs() < 1e-9);

        // Runtime may briefly report a position past the duration.
        c.handle_event(time_update(1, 150.0, 120.0));
        assert_eq!(c.progress_percent(), 100.0);
    }

    #[test]
    fn test_progress_defined_for_unknown_duration() {
        let mut c = controller();
        assert_eq!(c.progress_percent(), 0.0);
        c.handle_event(time_update(0, 5.0, f64::NAN));
        assert_eq!(c.progress_percent(), 0.0);
        assert_eq!(c.formatted_duration(), "0:00");
        c.handle_event(time_update(1, 5.0, 0.0));
        assert_eq!(c.progress_percent(), 0.0);
    }

    #[test]
    fn test_stale_time_update_cannot_revert_seek() {
        let mut c = controller();
        c.handle_event(time_update(0, 10.0, 100.0));

        c.seek_percent(80.0);
        assert_eq!(c.position_secs(), 80.0);
        assert_eq!(
            c.take_commands(),
            vec![MediaCommand::SeekTo { position_secs: 80.0 }]
        );

        // Event queued before the seek (same seq generation) arrives late.
        c.handle_event(time_update(0, 10.5, 100.0));
        assert_eq!(c.position_secs(), 80.0);

        // The next update after the seek is authoritative again.
        c.handle_event(time_update(1, 80.4, 100.0));
        assert_eq!(c.position_secs(), 80.4);
    }

    #[test]
    fn test_end_transition_fires_exactly_once() {
        let mut c = controller();
        let now = Instant::now();
        c.toggle_play(now);
        c.handle_event(MediaEvent::new(0, MediaEventKind::Play));
        assert_eq!(c.status(), PlaybackStatus::Playing);

        c.handle_event(time_update(1, 100.0, 100.0));
        assert_eq!(c.status(), PlaybackStatus::Ended);
        assert!(c.overlay_shown());
        assert!(c.controls_visible());

        // Further at-end updates change nothing.
        c.handle_event(time_update(2, 100.0, 100.0));
        c.handle_event(MediaEvent::new(3, MediaEventKind::Ended));
        assert_eq!(c.status(), PlaybackStatus::Ended);
        assert!(c.overlay_shown());
    }

    #[test]
    fn test_replay_returns_to_playing() {
        let mut c = controller();
        let now = Instant::now();
        c.handle_event(MediaEvent::new(0, MediaEventKind::Play));
        c.handle_event(time_update(1, 60.0, 60.0));
        assert_eq!(c.status(), PlaybackStatus::Ended);

        c.replay(now);
        assert_eq!(c.status(), PlaybackStatus::Playing);
        assert!(!c.overlay_shown());
        assert_eq!(c.position_secs(), 0.0);
        assert_eq!(
            c.take_commands(),
            vec![
                MediaCommand::SeekTo { position_secs: 0.0 },
                MediaCommand::Play
            ]
        );

        // The pre-replay at-end update is stale and must not re-end playback.
        c.handle_event(time_update(1, 60.0, 60.0));
        assert_eq!(c.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn test_stale_ended_event_cannot_revert_replay() {
        let mut c = controller();
        let now = Instant::now();
        c.handle_event(MediaEvent::new(0, MediaEventKind::Play));
        c.handle_event(time_update(1, 60.0, 60.0));
        assert_eq!(c.status(), PlaybackStatus::Ended);

        c.replay(now);
        assert_eq!(c.status(), PlaybackStatus::Playing);

        // An end-of-media report queued before the replay arrives late.
        c.handle_event(MediaEvent::new(1, MediaEventKind::Ended));
        assert_eq!(c.status(), PlaybackStatus::Playing);
        assert!(!c.overlay_shown());

        // A genuine end after the replay still lands.
        c.handle_event(MediaEvent::new(2, MediaEventKind::Ended));
        assert_eq!(c.status(), PlaybackStatus::Ended);
    }

    #[test]
    fn test_toggle_play_requests_and_reconciles() {
        let mut c = controller();
        let now = Instant::now();
        assert_eq!(c.status(), PlaybackStatus::Idle);

        c.toggle_play(now);
        assert_eq!(c.status(), PlaybackStatus::Playing);
        assert_eq!(c.take_commands(), vec![MediaCommand::Play]);

        c.toggle_play(now);
        assert_eq!(c.status(), PlaybackStatus::Paused);
        assert_eq!(c.take_commands(), vec![MediaCommand::Pause]);
        assert!(c.controls_visible());

        // External pause (e.g. media keys) is reflected without a command.
        c.handle_event(MediaEvent::new(0, MediaEventKind::Play));
        assert_eq!(c.status(), PlaybackStatus::Playing);
        c.handle_event(MediaEvent::new(1, MediaEventKind::Pause));
        assert_eq!(c.status(), PlaybackStatus::Paused);
        assert!(c.take_commands().is_empty());
    }

    #[test]
    fn test_fullscreen_is_never_optimistic() {
        let mut c = controller();
        let now = Instant::now();
        c.toggle_fullscreen(now);
        assert!(!c.is_fullscreen());
        assert_eq!(c.take_commands(), vec![MediaCommand::EnterFullscreen]);

        c.handle_event(MediaEvent::new(
            0,
            MediaEventKind::FullscreenChange { fullscreen: true },
        ));
        assert!(c.is_fullscreen());
    }

    #[test]
    fn test_fullscreen_denial_is_silently_absorbed() {
        let mut c = controller();
        let t0 = Instant::now();
        c.toggle_fullscreen(t0);
        c.tick(t0 + INTENT_TIMEOUT);
        assert!(!c.is_fullscreen());

        // A later toggle still requests entering, not exiting.
        c.take_commands();
        c.toggle_fullscreen(t0 + INTENT_TIMEOUT + Duration::from_secs(1));
        assert_eq!(c.take_commands(), vec![MediaCommand::EnterFullscreen]);
    }

    #[test]
    fn test_volume_zero_implies_muted_and_unmute_restores() {
        let mut c = controller();
        c.set_volume(0.4);
        assert!(!c.is_muted());
        c.set_volume(0.0);
        assert!(c.is_muted());

        c.toggle_mute();
        assert!(!c.is_muted());
        assert_eq!(c.volume(), 0.4);

        c.set_volume(f32::NAN);
        assert_eq!(c.volume(), 0.4);
    }

    #[test]
    fn test_controls_hide_only_while_playing() {
        let mut c = controller();
        let t0 = Instant::now();
        c.toggle_play(t0);
        c.handle_event(MediaEvent::new(0, MediaEventKind::Play));

        c.pointer_activity(t0);
        c.tick(t0 + HIDE);
        assert!(!c.controls_visible());

        c.pointer_activity(t0 + HIDE);
        c.toggle_play(t0 + HIDE);
        c.tick(t0 + HIDE + HIDE);
        // Paused: the hide timer is disarmed.
        assert!(c.controls_visible());
    }

    #[test]
    fn test_event_stamper_orders_events() {
        let mut stamper = EventStamper::new();
        let a = stamper.stamp(MediaEventKind::Play);
        let b = stamper.stamp(MediaEventKind::Pause);
        assert!(a.seq < b.seq);
    }
}

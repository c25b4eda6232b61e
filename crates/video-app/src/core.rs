//! AppCore — single-owner event loop for all mutable application state.
//!
//! All inputs (UI commands, native media events, resolved assistant calls,
//! the housekeeping tick) arrive as `AppEvent`s over one mpsc channel.
//! AppCore owns the session context, the feed, and the active watch session
//! exclusively; no other task touches them.  After each event that mutates
//! state it broadcasts `StateUpdated`, and any commands the player queued are
//! broadcast as `Player(..)` for the embedding playback runtime to apply.
//! The runtime feeds the resulting native events back in as
//! `AppEvent::Media`.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use video_assistant::{AskContext, AssistantBridge, AssistantReply};
use video_core::catalog::Catalog;
use video_core::config::Config;
use video_core::feed::Feed;
use video_player::surface::{MediaCommand, MediaEventKind};

use crate::session::SessionContext;
use crate::watch::WatchSession;

/// Which assistant conversation a question or reply belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantSurface {
    Comments,
    VideoChat,
}

/// Commands from the UI layer.
#[derive(Debug, Clone)]
pub enum UiCommand {
    LoadMore,
    OpenVideo { id: String },
    CloseWatch,
    TogglePlay,
    SeekPercent { percent: f64 },
    SetVolume { level: f32 },
    ToggleMute,
    ToggleFullscreen,
    PointerActivity,
    PointerLeave,
    Replay,
    PlayNext,
    AskAssistant { surface: AssistantSurface, text: String },
    AddComment { text: String },
    ToggleSubscribe { channel_id: String },
    ToggleLike { video_id: String },
}

/// All inputs into the AppCore loop.
#[derive(Debug)]
pub enum AppEvent {
    Ui(UiCommand),
    /// Native event from the playback runtime for the active watch session.
    Media(MediaEventKind),
    /// A spawned assistant call resolved (successfully or degraded).
    AssistantResolved {
        surface: AssistantSurface,
        reply: AssistantReply,
    },
    /// Housekeeping: controls auto-hide, intent timeouts.
    Tick,
    Shutdown,
}

/// What the AppCore broadcasts to listeners.
#[derive(Debug, Clone)]
pub enum BroadcastMessage {
    /// State changed; read it from the core's snapshot accessors.
    StateUpdated,
    /// A player command for the embedding playback runtime to apply.
    Player(MediaCommand),
}

pub struct AppCore {
    config: Config,
    catalog: Catalog,
    session: SessionContext,
    feed: Feed,
    watch: Option<WatchSession>,
    bridge: Arc<AssistantBridge>,
    event_tx: mpsc::Sender<AppEvent>,
    broadcast_tx: broadcast::Sender<BroadcastMessage>,
}

impl AppCore {
    pub fn new(
        config: Config,
        broadcast_tx: broadcast::Sender<BroadcastMessage>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let catalog = Catalog::new();
        let bridge = Arc::new(AssistantBridge::new(&config.assistant));
        let user = catalog
            .channel("u1")
            .cloned()
            .unwrap_or_default();

        let mut feed = Feed::new(config.feed.post_interval);
        // Initial page, same as the home view mounting.
        feed.load_more(&catalog);

        Self {
            session: SessionContext::new(user),
            feed,
            watch: None,
            bridge,
            event_tx,
            broadcast_tx,
            catalog,
            config,
        }
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn watch(&self) -> Option<&WatchSession> {
        self.watch.as_ref()
    }

    /// Run the event loop.  Returns when `Shutdown` arrives or the event
    /// channel closes.
    pub async fn run(mut self, mut event_rx: mpsc::Receiver<AppEvent>) -> anyhow::Result<()> {
        info!("AppCore: starting event loop");

        let tick_tx = self.event_tx.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                if tick_tx.send(AppEvent::Tick).await.is_err() {
                    break;
                }
            }
        });

        loop {
            match event_rx.recv().await {
                None => {
                    info!("AppCore: event channel closed, shutting down");
                    break;
                }
                Some(event) => {
                    if !self.handle(event) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply one event.  Returns `false` on shutdown.
    pub fn handle(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Shutdown => {
                info!("AppCore: shutdown requested");
                return false;
            }
            AppEvent::Tick => {
                let now = Instant::now();
                if let Some(watch) = self.watch.as_mut() {
                    watch.tick(now);
                }
            }
            AppEvent::Media(kind) => {
                if let Some(watch) = self.watch.as_mut() {
                    watch.apply_media(kind);
                } else {
                    debug!("media event with no active watch session");
                }
            }
            AppEvent::AssistantResolved { surface, reply } => {
                if let Some(watch) = self.watch.as_mut() {
                    let exchange = match surface {
                        AssistantSurface::Comments => &mut watch.comment_assistant,
                        AssistantSurface::VideoChat => &mut watch.chat_assistant,
                    };
                    exchange.resolve(reply);
                }
            }
            AppEvent::Ui(cmd) => self.handle_ui(cmd),
        }
        self.flush_player_commands();
        let _ = self.broadcast_tx.send(BroadcastMessage::StateUpdated);
        true
    }

    fn handle_ui(&mut self, cmd: UiCommand) {
        let now = Instant::now();
        debug!("AppCore: ui command {:?}", cmd);
        match cmd {
            UiCommand::LoadMore => self.feed.load_more(&self.catalog),
            UiCommand::OpenVideo { id } => match self.catalog.video(&id) {
                Some(video) => {
                    self.watch = Some(WatchSession::new(
                        video.clone(),
                        &self.catalog,
                        &self.config.player,
                    ));
                }
                None => warn!("unknown video id {}", id),
            },
            UiCommand::CloseWatch => {
                // Dropping the session discards the controller and both
                // assistant conversations.
                self.watch = None;
            }
            UiCommand::TogglePlay => {
                if let Some(w) = self.watch.as_mut() {
                    w.controller.toggle_play(now);
                }
            }
            UiCommand::SeekPercent { percent } => {
                if let Some(w) = self.watch.as_mut() {
                    w.controller.seek_percent(percent);
                }
            }
            UiCommand::SetVolume { level } => {
                if let Some(w) = self.watch.as_mut() {
                    w.controller.set_volume(level);
                }
            }
            UiCommand::ToggleMute => {
                if let Some(w) = self.watch.as_mut() {
                    w.controller.toggle_mute();
                }
            }
            UiCommand::ToggleFullscreen => {
                if let Some(w) = self.watch.as_mut() {
                    w.controller.toggle_fullscreen(now);
                }
            }
            UiCommand::PointerActivity => {
                if let Some(w) = self.watch.as_mut() {
                    w.controller.pointer_activity(now);
                }
            }
            UiCommand::PointerLeave => {
                if let Some(w) = self.watch.as_mut() {
                    w.controller.pointer_leave();
                }
            }
            UiCommand::Replay => {
                if let Some(w) = self.watch.as_mut() {
                    w.controller.replay(now);
                }
            }
            UiCommand::PlayNext => {
                let next = self.watch.as_mut().and_then(|w| w.up_next.take());
                match next {
                    Some(next) => {
                        // A fresh session for the new item: new controller,
                        // new duration, clean conversations.
                        self.watch = Some(WatchSession::new(
                            next,
                            &self.catalog,
                            &self.config.player,
                        ));
                    }
                    None => debug!("play-next with no candidate"),
                }
            }
            UiCommand::AskAssistant { surface, text } => self.ask_assistant(surface, &text),
            UiCommand::AddComment { text } => {
                if let Some(w) = self.watch.as_mut() {
                    w.add_comment(self.session.user(), &text);
                }
            }
            UiCommand::ToggleSubscribe { channel_id } => {
                let subscribed = self.session.toggle_subscription(&channel_id);
                debug!(%channel_id, subscribed, "subscription toggled");
            }
            UiCommand::ToggleLike { video_id } => {
                let liked = self.session.toggle_like(&video_id);
                debug!(%video_id, liked, "like toggled");
            }
        }
    }

    /// Gate, record, and spawn one assistant call.  The reply comes back
    /// into the loop as `AssistantResolved`; the busy flag in the exchange
    /// blocks a second submission until then.
    fn ask_assistant(&mut self, surface: AssistantSurface, text: &str) {
        let Some(watch) = self.watch.as_mut() else {
            debug!("assistant ask with no active watch session");
            return;
        };
        let exchange = match surface {
            AssistantSurface::Comments => &mut watch.comment_assistant,
            AssistantSurface::VideoChat => &mut watch.chat_assistant,
        };
        let text = match exchange.begin(text) {
            Ok(text) => text,
            Err(e) => {
                debug!("assistant submission rejected: {}", e);
                return;
            }
        };
        let context = match surface {
            AssistantSurface::Comments => AskContext::Comments {
                comments: watch.comments.clone(),
            },
            AssistantSurface::VideoChat => AskContext::Video {
                video: watch.video.clone(),
            },
        };

        let bridge = Arc::clone(&self.bridge);
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let reply = bridge.ask(&context, &text).await;
            let _ = event_tx
                .send(AppEvent::AssistantResolved { surface, reply })
                .await;
        });
    }

    /// Forward whatever the controller queued to the playback runtime.
    fn flush_player_commands(&mut self) {
        if let Some(watch) = self.watch.as_mut() {
            for command in watch.controller.take_commands() {
                debug!("player command {:?}", command);
                let _ = self.broadcast_tx.send(BroadcastMessage::Player(command));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use video_core::config::AssistantConfig;
    use video_player::PlaybackStatus;

    fn core() -> (AppCore, mpsc::Receiver<AppEvent>, broadcast::Receiver<BroadcastMessage>) {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (broadcast_tx, broadcast_rx) = broadcast::channel(64);
        let config = Config {
            assistant: AssistantConfig {
                // Guarantee the bridge is unavailable so tests never hit the
                // network; asks resolve with the degraded reply.
                api_key_env: "V1DEO_TEST_NO_SUCH_KEY".into(),
                ..AssistantConfig::default()
            },
            ..Config::default()
        };
        (AppCore::new(config, broadcast_tx, event_tx), event_rx, broadcast_rx)
    }

    #[tokio::test]
    async fn test_initial_feed_and_load_more() {
        let (mut core, _rx, _brx) = core();
        let initial = core.feed().entries().len();
        assert!(initial > 0);

        core.handle(AppEvent::Ui(UiCommand::LoadMore));
        assert_eq!(core.feed().entries().len(), initial * 2);
        // First batch untouched by the append.
        assert_eq!(core.feed().entries()[0].id(), "v1-p0");
    }

    #[tokio::test]
    async fn test_open_watch_and_player_commands_broadcast() {
        let (mut core, _rx, mut brx) = core();
        core.handle(AppEvent::Ui(UiCommand::OpenVideo { id: "v1".into() }));
        assert!(core.watch().is_some());

        core.handle(AppEvent::Ui(UiCommand::TogglePlay));
        assert_eq!(
            core.watch().unwrap().controller.status(),
            PlaybackStatus::Playing
        );

        let mut saw_play = false;
        while let Ok(msg) = brx.try_recv() {
            if matches!(msg, BroadcastMessage::Player(MediaCommand::Play)) {
                saw_play = true;
            }
        }
        assert!(saw_play);
    }

    #[tokio::test]
    async fn test_play_next_builds_fresh_session() {
        let (mut core, _rx, _brx) = core();
        core.handle(AppEvent::Ui(UiCommand::OpenVideo { id: "v1".into() }));
        core.handle(AppEvent::Media(MediaEventKind::Play));
        core.handle(AppEvent::Media(MediaEventKind::TimeUpdate {
            position_secs: 605.0,
            duration_secs: 605.0,
        }));
        assert_eq!(
            core.watch().unwrap().controller.status(),
            PlaybackStatus::Ended
        );
        let old_id = core.watch().unwrap().video.id.clone();

        core.handle(AppEvent::Ui(UiCommand::PlayNext));
        let watch = core.watch().unwrap();
        assert_ne!(watch.video.id, old_id);
        assert_eq!(watch.controller.status(), PlaybackStatus::Idle);
        assert_eq!(watch.controller.position_secs(), 0.0);
    }

    #[tokio::test]
    async fn test_assistant_round_trip_with_busy_gate() {
        let (mut core, mut rx, _brx) = core();
        core.handle(AppEvent::Ui(UiCommand::OpenVideo { id: "v1".into() }));

        core.handle(AppEvent::Ui(UiCommand::AskAssistant {
            surface: AssistantSurface::VideoChat,
            text: "what is this video about?".into(),
        }));
        assert!(core.watch().unwrap().chat_assistant.is_busy());

        // Second submission while outstanding is dropped.
        core.handle(AppEvent::Ui(UiCommand::AskAssistant {
            surface: AssistantSurface::VideoChat,
            text: "another question".into(),
        }));
        assert_eq!(core.watch().unwrap().chat_assistant.turns().len(), 1);

        // The spawned call resolves (degraded — no API key) back into the loop.
        let resolved = rx.recv().await.expect("assistant resolution");
        assert!(matches!(resolved, AppEvent::AssistantResolved { .. }));
        core.handle(resolved);

        let watch = core.watch().unwrap();
        assert!(!watch.chat_assistant.is_busy());
        let turns = watch.chat_assistant.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(
            turns[1].text,
            "Sorry, I'm having trouble connecting right now."
        );
        assert!(turns[1].followups.is_empty());
    }

    #[tokio::test]
    async fn test_close_watch_discards_conversations() {
        let (mut core, _rx, _brx) = core();
        core.handle(AppEvent::Ui(UiCommand::OpenVideo { id: "v2".into() }));
        core.handle(AppEvent::Ui(UiCommand::CloseWatch));
        assert!(core.watch().is_none());
    }
}

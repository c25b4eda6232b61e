//! One mounted watch view: a player bound to one video, the visible comment
//! thread, the up-next candidate, and the two assistant conversations.
//!
//! Switching videos replaces the whole session — controller state never
//! leaks from one video to the next.

use std::time::{Duration, Instant};

use chrono::Utc;
use video_assistant::AssistantExchange;
use video_core::catalog::Catalog;
use video_core::config::PlayerConfig;
use video_core::types::{Channel, Comment, MediaItem};
use video_player::surface::{EventStamper, MediaEventKind};
use video_player::PlayerController;

pub struct WatchSession {
    pub video: MediaItem,
    pub controller: PlayerController,
    pub comments: Vec<Comment>,
    pub up_next: Option<MediaItem>,
    pub comment_assistant: AssistantExchange,
    pub chat_assistant: AssistantExchange,
    stamper: EventStamper,
    next_local_comment: u32,
}

impl WatchSession {
    pub fn new(video: MediaItem, catalog: &Catalog, player: &PlayerConfig) -> Self {
        let comments = catalog.comments_for(&video.id);
        let up_next = catalog.random_related(&video);
        Self {
            controller: PlayerController::new(
                player.default_volume,
                Duration::from_secs(player.controls_hide_secs),
            ),
            comments,
            up_next,
            comment_assistant: AssistantExchange::new(),
            chat_assistant: AssistantExchange::new(),
            stamper: EventStamper::new(),
            next_local_comment: 0,
            video,
        }
    }

    /// Stamp and apply a native media event.
    pub fn apply_media(&mut self, kind: MediaEventKind) {
        let event = self.stamper.stamp(kind);
        self.controller.handle_event(event);
    }

    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);
    }

    /// Append a session-local comment from the signed-in user.
    pub fn add_comment(&mut self, author: &Channel, text: &str) -> Option<&Comment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.next_local_comment += 1;
        self.comments.push(Comment {
            id: format!("local-{}", self.next_local_comment),
            author_name: author.name.clone(),
            author_avatar_url: author.avatar_url.clone(),
            text: text.to_string(),
            likes: 0,
            posted_at: Utc::now(),
        });
        self.comments.last()
    }
}

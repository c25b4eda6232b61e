//! Session-scoped user context.
//!
//! One `SessionContext` is created at application start and passed by
//! reference to whatever needs it — there is no ambient global.  It is
//! mutated only through the named operations below.

use std::collections::HashSet;

use video_core::types::Channel;

pub struct SessionContext {
    user: Channel,
    subscriptions: HashSet<String>,
    liked_videos: HashSet<String>,
}

impl SessionContext {
    pub fn new(user: Channel) -> Self {
        Self {
            user,
            subscriptions: HashSet::new(),
            liked_videos: HashSet::new(),
        }
    }

    pub fn user(&self) -> &Channel {
        &self.user
    }

    pub fn is_subscribed(&self, channel_id: &str) -> bool {
        self.subscriptions.contains(channel_id)
    }

    pub fn is_liked(&self, video_id: &str) -> bool {
        self.liked_videos.contains(video_id)
    }

    /// Returns the new subscription state.
    pub fn toggle_subscription(&mut self, channel_id: &str) -> bool {
        if !self.subscriptions.remove(channel_id) {
            self.subscriptions.insert(channel_id.to_string());
            true
        } else {
            false
        }
    }

    /// Returns the new like state.
    pub fn toggle_like(&mut self, video_id: &str) -> bool {
        if !self.liked_videos.remove(video_id) {
            self.liked_videos.insert(video_id.to_string());
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_round_trip() {
        let mut session = SessionContext::new(Channel {
            id: "u1".into(),
            name: "Creative Creator".into(),
            ..Channel::default()
        });
        assert!(session.toggle_subscription("c1"));
        assert!(session.is_subscribed("c1"));
        assert!(!session.toggle_subscription("c1"));
        assert!(!session.is_subscribed("c1"));

        assert!(session.toggle_like("v5"));
        assert!(session.is_liked("v5"));
        assert!(!session.is_liked("v1"));
    }
}

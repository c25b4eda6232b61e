use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A channel (creator) — mock data, immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    #[serde(default)]
    pub banner_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subscribers: u64,
}

/// A playable video's metadata and source reference.  Immutable once fetched;
/// owned by whichever list currently holds it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail_url: String,
    pub media_url: String,
    /// Total duration in seconds as reported by the catalog.  The playback
    /// runtime may report a slightly different value once metadata loads.
    pub duration_secs: f64,
    #[serde(default)]
    pub views: u64,
    pub uploaded_at: DateTime<Utc>,
    pub channel_id: String,
    pub channel_name: String,
    #[serde(default)]
    pub channel_avatar_url: String,
    #[serde(default)]
    pub category: String,
}

/// A short text update shown interleaved with videos in feeds.  Immutable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TextPost {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar_url: String,
    pub body: String,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u64,
}

/// A comment under a video.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Comment {
    pub id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar_url: String,
    pub text: String,
    #[serde(default)]
    pub likes: u64,
    pub posted_at: DateTime<Utc>,
}

/// One entry in a mixed feed.  A closed tagged union — renderers match
/// exhaustively instead of sniffing for a discriminant field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FeedEntry {
    Video(MediaItem),
    Post(TextPost),
}

impl FeedEntry {
    pub fn id(&self) -> &str {
        match self {
            FeedEntry::Video(v) => &v.id,
            FeedEntry::Post(p) => &p.id,
        }
    }

    pub fn is_post(&self) -> bool {
        matches!(self, FeedEntry::Post(_))
    }
}

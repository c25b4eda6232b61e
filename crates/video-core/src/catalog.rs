//! Deterministic mock catalog.
//!
//! Stands in for a real backend: every "fetch" clones the base data with ids
//! suffixed by the page number, so identities are unique per batch and stable
//! across runs.  There are no timestamp-derived ids anywhere.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;

use crate::types::{Channel, Comment, MediaItem, TextPost};

/// One page of freshly fetched feed content, both lists in source order.
#[derive(Debug, Clone, Default)]
pub struct FetchBatch {
    pub videos: Vec<MediaItem>,
    pub posts: Vec<TextPost>,
}

pub struct Catalog {
    channels: Vec<Channel>,
    videos: Vec<MediaItem>,
    posts: Vec<TextPost>,
    comments: Vec<Comment>,
}

impl Catalog {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            channels: base_channels(),
            videos: base_videos(now),
            posts: base_posts(now),
            comments: base_comments(now),
        }
    }

    /// Fetch one page of feed content.  Ids carry a `-p{page}` suffix so each
    /// batch is internally unique while the underlying content repeats.
    pub fn fetch_page(&self, page: u32) -> FetchBatch {
        let videos = self
            .videos
            .iter()
            .map(|v| {
                let mut v = v.clone();
                v.id = page_id(&v.id, page);
                v
            })
            .collect();
        let posts = self
            .posts
            .iter()
            .map(|p| {
                let mut p = p.clone();
                p.id = page_id(&p.id, page);
                p
            })
            .collect();
        FetchBatch { videos, posts }
    }

    /// Look up a video by id.  Page-suffixed ids resolve to their base item.
    pub fn video(&self, id: &str) -> Option<&MediaItem> {
        let base = base_id(id);
        self.videos.iter().find(|v| v.id == base)
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn channel_videos(&self, channel_id: &str) -> Vec<MediaItem> {
        self.videos
            .iter()
            .filter(|v| v.channel_id == channel_id)
            .cloned()
            .collect()
    }

    /// The mock comment thread shown under every video.
    pub fn comments_for(&self, _video_id: &str) -> Vec<Comment> {
        self.comments.clone()
    }

    /// Videos related to `video`: same category or same channel, the video
    /// itself excluded.  Falls back to everything else when nothing matches.
    pub fn related(&self, video: &MediaItem) -> Vec<MediaItem> {
        let base = base_id(&video.id);
        let mut related: Vec<MediaItem> = self
            .videos
            .iter()
            .filter(|v| v.id != base)
            .filter(|v| v.category == video.category || v.channel_id == video.channel_id)
            .cloned()
            .collect();
        if related.is_empty() {
            related = self.videos.iter().filter(|v| v.id != base).cloned().collect();
        }
        related
    }

    /// Pick one related video for the up-next slot.
    pub fn random_related(&self, video: &MediaItem) -> Option<MediaItem> {
        self.related(video).choose(&mut rand::thread_rng()).cloned()
    }

    /// Distinct categories across the catalog, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for v in &self.videos {
            if !out.contains(&v.category) {
                out.push(v.category.clone());
            }
        }
        out
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn page_id(base: &str, page: u32) -> String {
    format!("{}-p{}", base, page)
}

/// Strip a `-p{page}` suffix if present.
fn base_id(id: &str) -> &str {
    match id.rsplit_once("-p") {
        Some((base, page)) if !page.is_empty() && page.bytes().all(|b| b.is_ascii_digit()) => base,
        _ => id,
    }
}

fn avatar(seed: &str, size: u32) -> String {
    format!("https://picsum.photos/seed/{}/{}/{}", seed, size, size)
}

fn thumb(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}/640/360", seed)
}

fn sample(name: &str) -> String {
    format!(
        "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/{}.mp4",
        name
    )
}

fn base_channels() -> Vec<Channel> {
    vec![
        Channel {
            id: "u1".into(),
            name: "Creative Creator".into(),
            avatar_url: avatar("user1", 100),
            banner_url: "https://picsum.photos/seed/banner1/1200/300".into(),
            description: "Tech enthusiast, coder, and filmmaker sharing the journey.".into(),
            subscribers: 1_200_000,
        },
        Channel {
            id: "c1".into(),
            name: "Tech Master".into(),
            avatar_url: avatar("c1", 100),
            subscribers: 890_000,
            ..Channel::default()
        },
        Channel {
            id: "c2".into(),
            name: "Earth Planet".into(),
            avatar_url: avatar("c2", 100),
            subscribers: 4_300_000,
            ..Channel::default()
        },
        Channel {
            id: "c3".into(),
            name: "Chef Mario".into(),
            avatar_url: avatar("c3", 100),
            subscribers: 640_000,
            ..Channel::default()
        },
        Channel {
            id: "c4".into(),
            name: "AI Insider".into(),
            avatar_url: avatar("c4", 100),
            subscribers: 2_700_000,
            ..Channel::default()
        },
    ]
}

fn base_videos(now: DateTime<Utc>) -> Vec<MediaItem> {
    vec![
        MediaItem {
            id: "v1".into(),
            title: "Building a React App in 10 Minutes".into(),
            description: "Learn how to quickly scaffold and build a React application using \
                          modern tools. We cover hooks, state management, and styling."
                .into(),
            thumbnail_url: thumb("v1"),
            media_url: sample("BigBuckBunny"),
            duration_secs: 605.0,
            views: 120_000,
            uploaded_at: now - Duration::days(2),
            channel_id: "c1".into(),
            channel_name: "Tech Master".into(),
            channel_avatar_url: avatar("c1", 100),
            category: "Tech".into(),
        },
        MediaItem {
            id: "v2".into(),
            title: "Nature Documentary: The Hidden Forest".into(),
            description: "Explore the depths of the amazon rainforest and discover species you \
                          never knew existed."
                .into(),
            thumbnail_url: thumb("v2"),
            media_url: sample("ElephantsDream"),
            duration_secs: 2720.0,
            views: 1_500_000,
            uploaded_at: now - Duration::days(7),
            channel_id: "c2".into(),
            channel_name: "Earth Planet".into(),
            channel_avatar_url: avatar("c2", 100),
            category: "Nature".into(),
        },
        MediaItem {
            id: "v3".into(),
            title: "Top 10 Coding Mistakes Beginners Make".into(),
            description: "Avoid these common pitfalls when starting your programming journey. \
                          Tips from a senior engineer."
                .into(),
            thumbnail_url: thumb("v3"),
            media_url: sample("ForBiggerBlazes"),
            duration_secs: 750.0,
            views: 340_000,
            uploaded_at: now - Duration::weeks(3),
            channel_id: "c1".into(),
            channel_name: "Tech Master".into(),
            channel_avatar_url: avatar("c1", 100),
            category: "Education".into(),
        },
        MediaItem {
            id: "v4".into(),
            title: "Delicious Pasta Recipe".into(),
            description: "Cook the most authentic Italian pasta with simple ingredients found \
                          in your kitchen."
                .into(),
            thumbnail_url: thumb("v4"),
            media_url: sample("ForBiggerEscapes"),
            duration_secs: 495.0,
            views: 890_000,
            uploaded_at: now - Duration::days(30),
            channel_id: "c3".into(),
            channel_name: "Chef Mario".into(),
            channel_avatar_url: avatar("c3", 100),
            category: "Food".into(),
        },
        MediaItem {
            id: "v5".into(),
            title: "Future of AI: Gemini & Beyond".into(),
            description: "A deep dive into the capabilities of large language models and what \
                          they mean for the future of software."
                .into(),
            thumbnail_url: thumb("v5"),
            media_url: sample("ForBiggerFun"),
            duration_secs: 900.0,
            views: 2_100_000,
            uploaded_at: now - Duration::days(5),
            channel_id: "c4".into(),
            channel_name: "AI Insider".into(),
            channel_avatar_url: avatar("c4", 100),
            category: "Tech".into(),
        },
    ]
}

fn base_posts(now: DateTime<Utc>) -> Vec<TextPost> {
    vec![
        TextPost {
            id: "t1".into(),
            author_id: "u1".into(),
            author_name: "Creative Creator".into(),
            author_avatar_url: avatar("user1", 100),
            body: "Just dropped a new video on React Performance! Check it out.".into(),
            posted_at: now - Duration::hours(1),
            likes: 540,
        },
        TextPost {
            id: "t2".into(),
            author_id: "c4".into(),
            author_name: "AI Insider".into(),
            author_avatar_url: avatar("c4", 100),
            body: "The new Gemini model is mind-blowing. The reasoning capabilities are off \
                   the charts."
                .into(),
            posted_at: now - Duration::hours(3),
            likes: 1_200,
        },
    ]
}

fn base_comments(now: DateTime<Utc>) -> Vec<Comment> {
    vec![
        Comment {
            id: "cm1".into(),
            author_name: "Alice Dev".into(),
            author_avatar_url: avatar("u2", 50),
            text: "This tutorial was incredibly helpful! Thanks for sharing.".into(),
            likes: 120,
            posted_at: now - Duration::days(2),
        },
        Comment {
            id: "cm2".into(),
            author_name: "Bob Coder".into(),
            author_avatar_url: avatar("u3", 50),
            text: "I disagree with the point about state management, but great video otherwise."
                .into(),
            likes: 45,
            posted_at: now - Duration::days(1),
        },
        Comment {
            id: "cm3".into(),
            author_name: "Charlie".into(),
            author_avatar_url: avatar("u4", 50),
            text: "Can you make a video about Next.js next?".into(),
            likes: 89,
            posted_at: now - Duration::hours(5),
        },
        Comment {
            id: "cm4".into(),
            author_name: "Dave".into(),
            author_avatar_url: avatar("u5", 50),
            text: "Audio quality could be better.".into(),
            likes: 12,
            posted_at: now - Duration::hours(1),
        },
        Comment {
            id: "cm5".into(),
            author_name: "Eve".into(),
            author_avatar_url: avatar("u6", 50),
            text: "Best explanation I have seen so far. Subscribed!".into(),
            likes: 230,
            posted_at: now - Duration::minutes(30),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_page_ids_unique_per_batch() {
        let catalog = Catalog::new();
        let batch = catalog.fetch_page(0);
        assert!(!batch.videos.is_empty());
        assert!(!batch.posts.is_empty());

        let mut ids: Vec<&str> = batch
            .videos
            .iter()
            .map(|v| v.id.as_str())
            .chain(batch.posts.iter().map(|p| p.id.as_str()))
            .collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_fetch_page_is_deterministic() {
        let catalog = Catalog::new();
        let a = catalog.fetch_page(3);
        let b = catalog.fetch_page(3);
        let ids_a: Vec<_> = a.videos.iter().map(|v| v.id.clone()).collect();
        let ids_b: Vec<_> = b.videos.iter().map(|v| v.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(a.videos[0].id, "v1-p3");
    }

    #[test]
    fn test_video_lookup_resolves_page_suffix() {
        let catalog = Catalog::new();
        let batch = catalog.fetch_page(7);
        let fetched = &batch.videos[2];
        let base = catalog.video(&fetched.id).unwrap();
        assert_eq!(base.id, "v3");
        assert_eq!(base.title, fetched.title);
    }

    #[test]
    fn test_related_excludes_self() {
        let catalog = Catalog::new();
        let video = catalog.video("v1").unwrap().clone();
        let related = catalog.related(&video);
        assert!(!related.is_empty());
        assert!(related.iter().all(|v| v.id != "v1"));
        // v1 is Tech/c1; v3 shares the channel, v5 shares the category.
        assert!(related.iter().any(|v| v.id == "v3"));
        assert!(related.iter().any(|v| v.id == "v5"));
    }

    #[test]
    fn test_channel_videos() {
        let catalog = Catalog::new();
        let videos = catalog.channel_videos("c1");
        assert_eq!(videos.len(), 2);
        assert!(videos.iter().all(|v| v.channel_name == "Tech Master"));
        assert!(catalog.channel("c1").is_some());
        assert!(catalog.channel("nope").is_none());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.categories(),
            vec!["Tech", "Nature", "Education", "Food"]
        );
    }
}

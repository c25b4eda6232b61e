//! Feed composition: merge two ordered content streams into one display
//! sequence with a fixed interleave ratio, append-only across pages.

use tracing::debug;

use crate::catalog::{Catalog, FetchBatch};
use crate::types::FeedEntry;

/// Pull-based source of feed pages.  Pagination tokens, retries, and caching
/// are the source's concern, not the composer's.
pub trait FeedSource {
    fn fetch_page(&self, page: u32) -> FetchBatch;
}

impl FeedSource for Catalog {
    fn fetch_page(&self, page: u32) -> FetchBatch {
        Catalog::fetch_page(self, page)
    }
}

/// Interleave one batch: after every `every`-th video, insert the next text
/// post, cycling through the post batch with wraparound.  An empty video
/// batch yields an empty output; an empty post batch yields the videos
/// unchanged.  The video counter is local to this batch.
pub fn interleave(batch: FetchBatch, every: usize) -> Vec<FeedEntry> {
    let FetchBatch { videos, posts } = batch;
    let mut mixed = Vec::with_capacity(videos.len() + videos.len() / every.max(1));
    let mut post_idx = 0usize;
    for (i, video) in videos.into_iter().enumerate() {
        mixed.push(FeedEntry::Video(video));
        if every > 0 && (i + 1) % every == 0 && !posts.is_empty() {
            mixed.push(FeedEntry::Post(posts[post_idx % posts.len()].clone()));
            post_idx += 1;
        }
    }
    mixed
}

/// The displayed feed.  Batches are appended in order; prior entries are
/// never reordered or removed.
pub struct Feed {
    entries: Vec<FeedEntry>,
    post_interval: usize,
    next_page: u32,
}

impl Feed {
    pub fn new(post_interval: usize) -> Self {
        Self {
            entries: Vec::new(),
            post_interval,
            next_page: 0,
        }
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append one pre-fetched batch, interleaved.
    pub fn append_batch(&mut self, batch: FetchBatch) {
        let mixed = interleave(batch, self.post_interval);
        debug!(added = mixed.len(), total = self.entries.len() + mixed.len(), "feed append");
        self.entries.extend(mixed);
    }

    /// Exactly one fetch-and-append cycle.
    pub fn load_more(&mut self, source: &impl FeedSource) {
        let page = self.next_page;
        self.next_page += 1;
        let batch = source.fetch_page(page);
        self.append_batch(batch);
    }

    /// Non-destructive category view: videos in the given category plus all
    /// posts, in feed order.
    pub fn entries_in<'a>(&'a self, category: &str) -> Vec<&'a FeedEntry> {
        self.entries
            .iter()
            .filter(|e| match e {
                FeedEntry::Video(v) => v.category == category,
                FeedEntry::Post(_) => true,
            })
            .collect()
    }
}

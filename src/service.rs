//! Content service boundary.
//!
//! Everything the dashboard needs from the outside world goes through
//! [`ContentService`]: scraping the feed, persisting saved items and
//! generating hook suggestions. [`MockContentService`] answers from the
//! static seed list after an artificial delay; [`crate::fetcher::FeedContentService`]
//! scrapes real RSS/Atom feeds behind the same trait.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::mock_data::mock_feed;
use crate::models::{ContentHook, ContentItem};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no feed source could be reached")]
    Unreachable,
    #[error("scrape returned no items")]
    EmptyResult,
    #[error("hook generation failed: {0}")]
    Generation(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to parse feed: {0}")]
    Parse(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[async_trait]
pub trait ContentService: Send + Sync {
    /// Human-readable name, shown on the settings tab.
    fn name(&self) -> &str;

    /// Fetch the latest feed, in display order.
    async fn scrape_content(&self) -> ServiceResult<Vec<ContentItem>>;

    /// Exactly three hook suggestions for `item_id`.
    async fn generate_hooks(&self, item_id: &str) -> ServiceResult<Vec<ContentHook>>;

    async fn save_to_database(&self, item: &ContentItem) -> ServiceResult<bool>;

    async fn remove_from_database(&self, id: &str) -> ServiceResult<bool>;
}

const HOOK_TEMPLATES: [&str; 3] = [
    "Stop building features nobody wants. Here's why...",
    "I analyzed 500 startups and noticed this one common AI trend.",
    "The future of automation is already here, and it's not what you think.",
];

/// The three canned hooks, each with a fresh id.
pub fn placeholder_hooks() -> Vec<ContentHook> {
    HOOK_TEMPLATES
        .iter()
        .map(|text| ContentHook {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
        })
        .collect()
}

/// Stand-in backend: seed data, canned hooks, no storage.
#[derive(Debug, Clone)]
pub struct MockContentService {
    scrape_delay: Duration,
    hook_delay: Duration,
}

impl MockContentService {
    pub fn new(scrape_delay: Duration, hook_delay: Duration) -> Self {
        Self { scrape_delay, hook_delay }
    }
}

impl Default for MockContentService {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500), Duration::from_millis(2000))
    }
}

#[async_trait]
impl ContentService for MockContentService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn scrape_content(&self) -> ServiceResult<Vec<ContentItem>> {
        tokio::time::sleep(self.scrape_delay).await;
        let items = mock_feed();
        tracing::info!("Mock scrape returned {} items", items.len());
        Ok(items)
    }

    async fn generate_hooks(&self, item_id: &str) -> ServiceResult<Vec<ContentHook>> {
        tokio::time::sleep(self.hook_delay).await;
        tracing::info!("Generated placeholder hooks for item {}", item_id);
        Ok(placeholder_hooks())
    }

    async fn save_to_database(&self, item: &ContentItem) -> ServiceResult<bool> {
        tracing::info!("Saving to database: {}", item.title);
        Ok(true)
    }

    async fn remove_from_database(&self, id: &str) -> ServiceResult<bool> {
        tracing::info!("Removing from database: {}", id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test(start_paused = true)]
    async fn test_mock_scrape_waits_then_returns_seed() {
        let service = MockContentService::default();
        let start = tokio::time::Instant::now();
        let items = service.scrape_content().await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(1500));
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].id, "1");
        assert!(items.iter().all(|i| i.hooks.is_none() && !i.saved()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_hooks_are_three_with_unique_ids() {
        let service = MockContentService::default();
        let hooks = service.generate_hooks("does-not-exist").await.unwrap();

        assert_eq!(hooks.len(), 3);
        let ids: HashSet<_> = hooks.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_mock_persistence_always_succeeds() {
        let service = MockContentService::default();
        let item = mock_feed().remove(0);
        assert!(service.save_to_database(&item).await.unwrap());
        assert!(service.remove_from_database("missing").await.unwrap());
    }
}

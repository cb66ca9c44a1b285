use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::parser;
use std::time::Duration;

use crate::config::Config;
use crate::models::{ContentHook, ContentItem, ContentSource};
use crate::service::{placeholder_hooks, ContentService, ServiceError, ServiceResult};

const SNIPPET_CHARS: usize = 280;

/// Scrapes a fixed list of RSS/Atom feeds.
/// Hooks and persistence keep the placeholder behaviour of the mock service.
pub struct FeedContentService {
    client: reqwest::Client,
    feeds: Vec<String>,
    hook_delay: Duration,
}

impl FeedContentService {
    pub fn new(config: &Config) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            feeds: config.feeds.clone(),
            hook_delay: config.hook_delay(),
        })
    }

    async fn fetch_feed(&self, url: &str) -> ServiceResult<Vec<ContentItem>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        parse_feed(&bytes, url, Utc::now())
    }
}

#[async_trait]
impl ContentService for FeedContentService {
    fn name(&self) -> &str {
        "rss"
    }

    async fn scrape_content(&self) -> ServiceResult<Vec<ContentItem>> {
        let results = futures::future::join_all(self.feeds.iter().map(|url| async move {
            (url, self.fetch_feed(url).await)
        }))
        .await;

        merge_feeds(results.into_iter().map(|(url, result)| (url.as_str(), result)))
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

/// Combines per-feed results. Failed feeds are logged and skipped; the first
/// occurrence of an entry id wins. Fails only when no feed answered, or when
/// the reachable feeds had no entries at all.
pub fn merge_feeds<'a>(
    results: impl IntoIterator<Item = (&'a str, ServiceResult<Vec<ContentItem>>)>,
) -> ServiceResult<Vec<ContentItem>> {
    let mut items: Vec<ContentItem> = Vec::new();
    let mut reachable = 0;

    for (url, result) in results {
        match result {
            Ok(feed_items) => {
                reachable += 1;
                tracing::info!("Fetched {} items from {}", feed_items.len(), url);
                for item in feed_items {
                    if !items.iter().any(|i| i.id == item.id) {
                        items.push(item);
                    }
                }
            }
            Err(e) => tracing::warn!("Failed to fetch {}: {}", url, e),
        }
    }

    if reachable == 0 {
        return Err(ServiceError::Unreachable);
    }
    if items.is_empty() {
        return Err(ServiceError::EmptyResult);
    }
    Ok(items)
}

/// Parses a raw RSS/Atom document into content items, newest-first as the feed lists them.
pub fn parse_feed(bytes: &[u8], url: &str, now: DateTime<Utc>) -> ServiceResult<Vec<ContentItem>> {
    let feed = parser::parse(bytes).map_err(|e| ServiceError::Parse(e.to_string()))?;
    let source = source_for_url(url);

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| "Untitled".to_string());

            let body = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();

            let image_url = entry
                .media
                .iter()
                .flat_map(|m| m.thumbnails.iter())
                .map(|t| t.image.uri.clone())
                .next();

            ContentItem {
                id: entry.id,
                title: title.replace('\n', " "),
                snippet: make_snippet(&body),
                source,
                timestamp: relative_age(entry.published.or(entry.updated), now),
                image_url,
                is_saved: None,
                hooks: None,
                is_generating_hooks: None,
            }
        })
        .collect();

    Ok(items)
}

/// Unparseable URLs count as newsletters.
pub fn source_for_url(feed_url: &str) -> ContentSource {
    let host = url::Url::parse(feed_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()));

    match host {
        Some(h) if h == "reddit.com" || h.ends_with(".reddit.com") => ContentSource::Reddit,
        _ => ContentSource::Newsletter,
    }
}

/// Plain text, whitespace collapsed, cut at `SNIPPET_CHARS`.
pub fn make_snippet(html: &str) -> String {
    let text = html2text::from_read(html.as_bytes(), 10_000);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > SNIPPET_CHARS {
        let cut: String = collapsed.chars().take(SNIPPET_CHARS).collect();
        format!("{}...", cut.trim_end())
    } else {
        collapsed
    }
}

/// Display string like "2 hours ago".
pub fn relative_age(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(published) = published else {
        return "unknown".to_string();
    };

    let age = now.signed_duration_since(published);
    let (n, unit) = if age.num_minutes() < 1 {
        return "just now".to_string();
    } else if age.num_hours() < 1 {
        (age.num_minutes(), "minute")
    } else if age.num_days() < 1 {
        (age.num_hours(), "hour")
    } else {
        (age.num_days(), "day")
    };

    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

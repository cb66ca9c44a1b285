use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentSource {
    Reddit,
    Newsletter,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Reddit => write!(f, "Reddit"),
            ContentSource::Newsletter => write!(f, "Newsletter"),
        }
    }
}

/// A single suggested hook. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentHook {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub source: ContentSource,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_saved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Vec<ContentHook>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_generating_hooks: Option<bool>,
}

impl ContentItem {
    pub fn saved(&self) -> bool {
        self.is_saved.unwrap_or(false)
    }

    pub fn generating_hooks(&self) -> bool {
        self.is_generating_hooks.unwrap_or(false)
    }

    /// Case-insensitive substring match over title and snippet.
    /// `query_lower` must already be lowercased.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.snippet.to_lowercase().contains(query_lower)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppTab {
    #[default]
    Feed,
    Saved,
    Settings,
}

impl AppTab {
    pub fn all() -> [AppTab; 3] {
        [AppTab::Feed, AppTab::Saved, AppTab::Settings]
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppTab::Feed => "Dashboard Feed",
            AppTab::Saved => "Saved Content",
            AppTab::Settings => "Settings",
        }
    }
}

/// Feed-tab filter over `ContentSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFilter {
    #[default]
    All,
    Only(ContentSource),
}

impl SourceFilter {
    pub fn next(self) -> Self {
        match self {
            SourceFilter::All => SourceFilter::Only(ContentSource::Reddit),
            SourceFilter::Only(ContentSource::Reddit) => SourceFilter::Only(ContentSource::Newsletter),
            SourceFilter::Only(ContentSource::Newsletter) => SourceFilter::All,
        }
    }

    pub fn accepts(&self, item: &ContentItem) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Only(source) => item.source == *source,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceFilter::All => "All Sources",
            SourceFilter::Only(ContentSource::Reddit) => "Reddit",
            SourceFilter::Only(ContentSource::Newsletter) => "Newsletter",
        }
    }
}

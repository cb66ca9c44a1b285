use crate::models::{ContentItem, ContentSource};

fn seed(id: &str, title: &str, snippet: &str, source: ContentSource, timestamp: &str, image: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: title.to_string(),
        snippet: snippet.to_string(),
        source,
        timestamp: timestamp.to_string(),
        image_url: Some(format!("https://picsum.photos/seed/{}/400/300", image)),
        is_saved: None,
        hooks: None,
        is_generating_hooks: None,
    }
}

/// Static seed list returned by the mock scraper.
pub fn mock_feed() -> Vec<ContentItem> {
    vec![
        seed(
            "1",
            "The Future of AI Agents in SaaS",
            "Exploring how autonomous agents are reshaping the landscape of customer support and automated workflows in modern tech stacks.",
            ContentSource::Reddit,
            "2 hours ago",
            "ai",
        ),
        seed(
            "2",
            "Growth Hacking Strategies for 2024",
            "This week we dive deep into the specific tactics used by unicorn startups to scale their user base with minimal budget.",
            ContentSource::Newsletter,
            "5 hours ago",
            "growth",
        ),
        seed(
            "3",
            "Modern UI/UX Trends: Glassmorphism vs Bento",
            "Why designers are shifting back to structured layouts and what it means for your next project.",
            ContentSource::Reddit,
            "1 day ago",
            "design",
        ),
        seed(
            "4",
            "The Rise of the Solopreneur",
            "How small, lean teams (or single individuals) are building multi-million dollar empires using AI tools.",
            ContentSource::Newsletter,
            "2 days ago",
            "solo",
        ),
    ]
}

use super::*;
use crate::models::ContentSource;
use crate::service::placeholder_hooks;

fn item(id: &str, title: &str, snippet: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: title.to_string(),
        snippet: snippet.to_string(),
        source: ContentSource::Reddit,
        timestamp: "1 hour ago".to_string(),
        image_url: Some(format!("https://example.com/{}.png", id)),
        is_saved: None,
        hooks: None,
        is_generating_hooks: None,
    }
}

fn state_with_saved(items: Vec<ContentItem>) -> AppState {
    let mut state = AppState::new();
    for i in items {
        state.apply(Action::ItemSaved(i));
    }
    state
}

#[test]
fn test_save_appends_marked_copy() {
    let mut state = state_with_saved(vec![item("a", "First", "one")]);
    let original = item("b", "Second", "two");

    state.apply(Action::ItemSaved(original.clone()));

    assert_eq!(state.saved_items.len(), 2);
    let saved = &state.saved_items[1];
    assert_eq!(saved.id, "b");
    assert_eq!(saved.is_saved, Some(true));
    assert_eq!(saved.title, original.title);
    assert_eq!(saved.snippet, original.snippet);
    assert_eq!(saved.image_url, original.image_url);
    assert_eq!(state.toast.as_ref().unwrap().message, "Saved to library");
}

#[test]
fn test_late_duplicate_save_is_rejected() {
    let mut state = state_with_saved(vec![item("a", "First", "one")]);
    let before = state.saved_items.clone();

    state.apply(Action::ItemSaved(item("a", "First", "one")));

    assert_eq!(state.saved_items, before);
    assert_eq!(state.toast.as_ref().unwrap().message, "Item already saved");
}

#[test]
fn test_delete_removes_only_match() {
    let mut state = state_with_saved(vec![
        item("a", "First", "one"),
        item("b", "Second", "two"),
        item("c", "Third", "three"),
    ]);

    state.apply(Action::ItemRemoved("b".to_string()));

    let ids: Vec<_> = state.saved_items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(state.toast.as_ref().unwrap().message, "Removed from library");
}

#[test]
fn test_delete_missing_id_still_notifies() {
    let mut state = state_with_saved(vec![item("a", "First", "one")]);

    state.apply(Action::ItemRemoved("zzz".to_string()));

    assert_eq!(state.saved_items.len(), 1);
    let toast = state.toast.unwrap();
    assert_eq!(toast.message, "Removed from library");
    assert_eq!(toast.kind, ToastKind::Success);
}

#[test]
fn test_hook_generation_touches_target_only() {
    let mut state = state_with_saved(vec![item("a", "First", "one"), item("b", "Second", "two")]);

    state.apply(Action::HookGenerationStarted("a".to_string()));
    assert!(state.saved_item("a").unwrap().generating_hooks());
    assert!(!state.saved_item("b").unwrap().generating_hooks());

    state.apply(Action::HookGenerationCompleted {
        id: "a".to_string(),
        hooks: placeholder_hooks(),
    });

    let a = state.saved_item("a").unwrap();
    assert_eq!(a.hooks.as_ref().unwrap().len(), 3);
    assert!(!a.generating_hooks());
    let b = state.saved_item("b").unwrap();
    assert!(b.hooks.is_none());
    assert!(b.is_generating_hooks.is_none());
}

#[test]
fn test_regeneration_replaces_hooks() {
    let mut state = state_with_saved(vec![item("a", "First", "one")]);
    let first = placeholder_hooks();
    let second = placeholder_hooks();

    state.apply(Action::HookGenerationCompleted { id: "a".to_string(), hooks: first });
    state.apply(Action::HookGenerationCompleted { id: "a".to_string(), hooks: second.clone() });

    assert_eq!(state.saved_item("a").unwrap().hooks.as_ref().unwrap(), &second);
}

#[test]
fn test_hook_failure_clears_flag_keeps_hooks() {
    let mut state = state_with_saved(vec![item("a", "First", "one")]);
    let hooks = placeholder_hooks();
    state.apply(Action::HookGenerationCompleted { id: "a".to_string(), hooks: hooks.clone() });

    state.apply(Action::HookGenerationStarted("a".to_string()));
    state.apply(Action::HookGenerationFailed("a".to_string()));

    let a = state.saved_item("a").unwrap();
    assert!(!a.generating_hooks());
    assert_eq!(a.hooks.as_ref().unwrap(), &hooks);
    let toast = state.toast.unwrap();
    assert_eq!(toast.message, "Failed to generate hooks");
    assert_eq!(toast.kind, ToastKind::Error);
}

#[test]
fn test_search_filter() {
    let mut state = state_with_saved(vec![
        item("1", "Apple Pie", "grandma's recipe"),
        item("2", "Banana Bread", "moist and easy"),
    ]);

    state.apply(Action::SearchChanged("apple".to_string()));
    let titles: Vec<_> = state.filtered_saved().iter().map(|i| i.title.clone()).collect();
    assert_eq!(titles, vec!["Apple Pie"]);

    state.apply(Action::SearchChanged("BREAD".to_string()));
    let titles: Vec<_> = state.filtered_saved().iter().map(|i| i.title.clone()).collect();
    assert_eq!(titles, vec!["Banana Bread"]);

    state.apply(Action::SearchChanged("MOIST".to_string()));
    assert_eq!(state.filtered_saved().len(), 1);

    state.apply(Action::SearchChanged(String::new()));
    assert_eq!(state.filtered_saved().len(), 2);
    assert_eq!(state.saved_items.len(), 2);
}

#[test]
fn test_scrape_replaces_feed_wholesale() {
    let mut state = AppState::new();
    state.apply(Action::ScrapeStarted);
    assert!(state.is_loading);

    state.apply(Action::ScrapeCompleted(vec![item("1", "a", ""), item("2", "b", "")]));
    state.apply(Action::ScrapeStarted);
    state.apply(Action::ScrapeCompleted(vec![item("3", "c", "")]));

    assert!(!state.is_loading);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "3");
}

#[test]
fn test_scrape_failure_keeps_feed() {
    let mut state = AppState::new();
    state.apply(Action::ScrapeCompleted(vec![item("1", "a", "")]));
    state.apply(Action::ScrapeStarted);
    state.apply(Action::ScrapeFailed);

    assert!(!state.is_loading);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.toast.unwrap().kind, ToastKind::Error);
}

#[test]
fn test_stale_toast_clear_is_ignored() {
    let mut state = AppState::new();
    state.apply(Action::ShowToast { message: "first".to_string(), kind: ToastKind::Success });
    let first_seq = state.toast.as_ref().unwrap().seq;
    state.apply(Action::ShowToast { message: "second".to_string(), kind: ToastKind::Error });

    state.apply(Action::ClearToast(first_seq));
    assert_eq!(state.toast.as_ref().unwrap().message, "second");

    let second_seq = state.toast.as_ref().unwrap().seq;
    state.apply(Action::ClearToast(second_seq));
    assert!(state.toast.is_none());
}

#[test]
fn test_source_filter_cycles() {
    let mut state = AppState::new();
    let mut newsletter = item("2", "b", "");
    newsletter.source = ContentSource::Newsletter;
    state.apply(Action::ScrapeCompleted(vec![item("1", "a", ""), newsletter]));

    assert_eq!(state.visible_feed().len(), 2);
    state.apply(Action::CycleSourceFilter);
    assert_eq!(state.visible_feed()[0].id, "1");
    assert_eq!(state.visible_feed().len(), 1);
    state.apply(Action::CycleSourceFilter);
    assert_eq!(state.visible_feed()[0].id, "2");
    state.apply(Action::CycleSourceFilter);
    assert_eq!(state.visible_feed().len(), 2);
}

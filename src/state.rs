//! Application state and its transitions.
//!
//! All mutation goes through [`AppState::apply`]. The shell feeds it one
//! [`Action`] at a time, in the order service calls resolve.

use crate::models::{AppTab, ContentHook, ContentItem, SourceFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification. `seq` identifies which dismissal timer may clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub seq: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectTab(AppTab),
    ScrapeStarted,
    ScrapeCompleted(Vec<ContentItem>),
    ScrapeFailed,
    /// The item passed the duplicate check and the service accepted it.
    ItemSaved(ContentItem),
    SaveDuplicate,
    SaveFailed,
    ItemRemoved(String),
    RemoveFailed,
    HookGenerationStarted(String),
    HookGenerationCompleted { id: String, hooks: Vec<ContentHook> },
    HookGenerationFailed(String),
    SearchChanged(String),
    CycleSourceFilter,
    ShowToast { message: String, kind: ToastKind },
    /// Dismissal timer fired for toast `seq`. Ignored if a newer toast replaced it.
    ClearToast(u64),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub active_tab: AppTab,
    pub items: Vec<ContentItem>,
    pub saved_items: Vec<ContentItem>,
    pub search_query: String,
    pub source_filter: SourceFilter,
    pub toast: Option<Toast>,
    pub is_loading: bool,
    toast_seq: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved_items.iter().any(|i| i.id == id)
    }

    pub fn saved_item(&self, id: &str) -> Option<&ContentItem> {
        self.saved_items.iter().find(|i| i.id == id)
    }

    /// Saved items matching the search query. Never mutates the saved list.
    pub fn filtered_saved(&self) -> Vec<&ContentItem> {
        let query = self.search_query.to_lowercase();
        self.saved_items.iter().filter(|i| i.matches(&query)).collect()
    }

    /// Feed items passing the source filter.
    pub fn visible_feed(&self) -> Vec<&ContentItem> {
        self.items.iter().filter(|i| self.source_filter.accepts(i)).collect()
    }

    pub fn apply(&mut self, action: Action) {
        tracing::debug!("apply {}", action_name(&action));

        match action {
            Action::SelectTab(tab) => self.active_tab = tab,
            Action::ScrapeStarted => self.is_loading = true,
            Action::ScrapeCompleted(items) => {
                self.is_loading = false;
                self.items = items;
                self.show_toast("Successfully fetched latest content", ToastKind::Success);
            }
            Action::ScrapeFailed => {
                self.is_loading = false;
                self.show_toast("Failed to scrape content", ToastKind::Error);
            }
            Action::ItemSaved(item) => {
                // A second save may have resolved first.
                if self.is_saved(&item.id) {
                    self.show_toast("Item already saved", ToastKind::Success);
                } else {
                    self.saved_items.push(ContentItem {
                        is_saved: Some(true),
                        ..item
                    });
                    self.show_toast("Saved to library", ToastKind::Success);
                }
            }
            Action::SaveDuplicate => self.show_toast("Item already saved", ToastKind::Success),
            Action::SaveFailed => self.show_toast("Failed to save item", ToastKind::Error),
            Action::ItemRemoved(id) => {
                if let Some(pos) = self.saved_items.iter().position(|i| i.id == id) {
                    self.saved_items.remove(pos);
                }
                self.show_toast("Removed from library", ToastKind::Success);
            }
            Action::RemoveFailed => self.show_toast("Failed to remove item", ToastKind::Error),
            Action::HookGenerationStarted(id) => {
                self.update_saved(&id, |item| item.is_generating_hooks = Some(true));
            }
            Action::HookGenerationCompleted { id, hooks } => {
                self.update_saved(&id, |item| {
                    item.hooks = Some(hooks);
                    item.is_generating_hooks = Some(false);
                });
                self.show_toast("Viral hooks generated!", ToastKind::Success);
            }
            Action::HookGenerationFailed(id) => {
                self.update_saved(&id, |item| item.is_generating_hooks = Some(false));
                self.show_toast("Failed to generate hooks", ToastKind::Error);
            }
            Action::SearchChanged(query) => self.search_query = query,
            Action::CycleSourceFilter => self.source_filter = self.source_filter.next(),
            Action::ShowToast { message, kind } => self.show_toast(&message, kind),
            Action::ClearToast(seq) => {
                if self.toast.as_ref().is_some_and(|t| t.seq == seq) {
                    self.toast = None;
                }
            }
        }
    }

    fn update_saved(&mut self, id: &str, f: impl FnOnce(&mut ContentItem)) {
        if let Some(item) = self.saved_items.iter_mut().find(|i| i.id == id) {
            f(item);
        }
    }

    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.toast_seq += 1;
        self.toast = Some(Toast {
            seq: self.toast_seq,
            message: message.to_string(),
            kind,
        });
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::SelectTab(_) => "select-tab",
        Action::ScrapeStarted => "scrape-start",
        Action::ScrapeCompleted(_) => "scrape-complete",
        Action::ScrapeFailed => "scrape-fail",
        Action::ItemSaved(_) => "save",
        Action::SaveDuplicate => "save-duplicate",
        Action::SaveFailed => "save-fail",
        Action::ItemRemoved(_) => "delete",
        Action::RemoveFailed => "delete-fail",
        Action::HookGenerationStarted(_) => "hook-generation-start",
        Action::HookGenerationCompleted { .. } => "hook-generation-complete",
        Action::HookGenerationFailed(_) => "hook-generation-fail",
        Action::SearchChanged(_) => "search-query-change",
        Action::CycleSourceFilter => "source-filter",
        Action::ShowToast { .. } => "toast-show",
        Action::ClearToast(_) => "toast-clear",
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

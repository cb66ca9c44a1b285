use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::models::ContentItem;
use crate::service::ContentService;
use crate::state::{Action, AppState};

/// Owns the [`AppState`] and turns user intents into service calls.
///
/// Service calls run on spawned tasks and report back over a channel, so
/// results are applied in the order they resolve, one at a time.
pub struct Shell {
    state: AppState,
    service: Arc<dyn ContentService>,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    toast_duration: Duration,
    toast_timer: Option<JoinHandle<()>>,
    last_toast_seq: Option<u64>,
}

impl Shell {
    pub fn new(service: Arc<dyn ContentService>, toast_duration: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(),
            service,
            tx,
            rx,
            toast_duration,
            toast_timer: None,
            last_toast_seq: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    /// Applies an action and (re)arms the dismissal timer if it raised a new toast.
    pub fn dispatch(&mut self, action: Action) {
        self.state.apply(action);

        if let Some(seq) = self.state.toast.as_ref().map(|t| t.seq) {
            if self.last_toast_seq != Some(seq) {
                self.last_toast_seq = Some(seq);
                self.arm_toast_timer(seq);
            }
        }
    }

    fn arm_toast_timer(&mut self, seq: u64) {
        if let Some(timer) = self.toast_timer.take() {
            timer.abort();
        }
        let tx = self.tx.clone();
        let duration = self.toast_duration;
        self.toast_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = tx.send(Action::ClearToast(seq));
        }));
    }

    pub fn scrape(&mut self) {
        self.dispatch(Action::ScrapeStarted);
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match service.scrape_content().await {
                Ok(items) => Action::ScrapeCompleted(items),
                Err(e) => {
                    tracing::warn!("Scrape failed: {}", e);
                    Action::ScrapeFailed
                }
            };
            let _ = tx.send(action);
        });
    }

    pub fn save(&mut self, item: ContentItem) {
        if self.state.is_saved(&item.id) {
            self.dispatch(Action::SaveDuplicate);
            return;
        }

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let item = ContentItem {
                is_saved: Some(true),
                ..item
            };
            let result = service.save_to_database(&item).await;
            let action = match result {
                Ok(_) => Action::ItemSaved(item),
                Err(e) => {
                    tracing::warn!("Save of {} failed: {}", item.id, e);
                    Action::SaveFailed
                }
            };
            let _ = tx.send(action);
        });
    }

    pub fn delete(&mut self, id: String) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.remove_from_database(&id).await;
            let action = match result {
                Ok(_) => Action::ItemRemoved(id),
                Err(e) => {
                    tracing::warn!("Removal of {} failed: {}", id, e);
                    Action::RemoveFailed
                }
            };
            let _ = tx.send(action);
        });
    }

    /// Requests for the same id are not deduplicated; each one toggles the flag on its own.
    pub fn generate_hooks(&mut self, id: String) {
        self.dispatch(Action::HookGenerationStarted(id.clone()));
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.generate_hooks(&id).await;
            let action = match result {
                Ok(hooks) => Action::HookGenerationCompleted { id, hooks },
                Err(e) => {
                    tracing::warn!("Hook generation for {} failed: {}", id, e);
                    Action::HookGenerationFailed(id)
                }
            };
            let _ = tx.send(action);
        });
    }

    /// Waits for the next resolved call (or toast expiry) and applies it.
    pub async fn next(&mut self) -> Option<Action> {
        let action = self.rx.recv().await?;
        self.dispatch(action.clone());
        Some(action)
    }

    /// Receives without applying. Pair with [`Shell::dispatch`].
    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        if let Some(timer) = self.toast_timer.take() {
            timer.abort();
        }
    }
}

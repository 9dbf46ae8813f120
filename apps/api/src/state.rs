use std::sync::Arc;

use tokio::sync::Mutex;

use crate::assistant::AssistantBackend;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Every store operation runs under this lock and never awaits while
    /// holding it.
    pub store: Arc<Mutex<DocumentStore>>,
    /// `None` when no API key is configured.
    pub assistant: Option<Arc<dyn AssistantBackend>>,
}

impl AppState {
    pub fn new(store: DocumentStore, assistant: Option<Arc<dyn AssistantBackend>>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            assistant,
        }
    }
}

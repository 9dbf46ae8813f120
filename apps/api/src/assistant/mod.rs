//! AI assistant boundary.
//!
//! The assistant only ever sees a read-only snapshot of the current document,
//! taken under the store lock and released before the backend is awaited.

pub mod client;
pub mod handlers;
pub mod prompts;

use async_trait::async_trait;

use crate::assistant::client::LlmError;
use crate::models::document::Document;
use crate::sections::ordering;

/// Text-generation backend. Carried in `AppState` as `Arc<dyn AssistantBackend>`
/// so tests can swap in a canned implementation.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

/// The user message followed by the CV as JSON. Hidden sections are left
/// out, matching what the preview shows.
pub fn build_prompt(message: &str, document: Option<&Document>) -> String {
    let Some(document) = document else {
        return format!("{}\n\n{message}", prompts::NO_DOCUMENT_NOTE);
    };
    let visible: Vec<_> = ordering::visible_in_order(&document.sections);
    let snapshot = serde_json::json!({
        "title": document.title,
        "sections": visible,
    });
    let cv = serde_json::to_string_pretty(&snapshot).unwrap_or_default();
    format!("Here is my current CV:\n<cv>\n{cv}\n</cv>\n\n{message}")
}

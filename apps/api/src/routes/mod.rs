pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::render::handlers as render;
use crate::sections::handlers as sections;
use crate::state::AppState;
use crate::store::handlers as store;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalogue
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route("/api/v1/sections/types/:type", get(sections::handle_section_type))
        // Documents
        .route(
            "/api/v1/documents",
            get(store::handle_list_documents).post(store::handle_create_document),
        )
        .route(
            "/api/v1/documents/:id",
            get(store::handle_get_document)
                .put(store::handle_update_document)
                .delete(store::handle_delete_document),
        )
        .route(
            "/api/v1/documents/:id/duplicate",
            post(store::handle_duplicate_document),
        )
        .route("/api/v1/documents/:id/preview", get(render::handle_preview))
        .route(
            "/api/v1/documents/:id/preview.html",
            get(render::handle_preview_html),
        )
        // Current document
        .route(
            "/api/v1/current",
            get(store::handle_get_current).put(store::handle_set_current),
        )
        .route(
            "/api/v1/current/sections",
            put(store::handle_reorder_sections).post(store::handle_add_section),
        )
        .route(
            "/api/v1/current/sections/move",
            post(store::handle_move_section),
        )
        .route(
            "/api/v1/current/sections/:section_id",
            delete(store::handle_remove_section),
        )
        .route(
            "/api/v1/current/sections/:section_id/data",
            put(store::handle_update_section_data),
        )
        .route(
            "/api/v1/current/sections/:section_id/visibility",
            post(store::handle_toggle_visibility),
        )
        // Assistant
        .route(
            "/api/v1/assistant/messages",
            post(assistant::handle_message),
        )
        .route(
            "/api/v1/assistant/prompts",
            get(assistant::handle_quick_prompts),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::build_router;
    use crate::assistant::client::LlmError;
    use crate::assistant::AssistantBackend;
    use crate::state::AppState;
    use crate::store::storage::MemoryStorage;
    use crate::store::DocumentStore;

    /// Echoes a canned reply and records the prompt it was given.
    #[derive(Default)]
    struct CannedAssistant {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AssistantBackend for CannedAssistant {
        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("Lead with measurable outcomes.".to_string())
        }
    }

    fn app() -> Router {
        let store = DocumentStore::load(Box::new(MemoryStorage::new()));
        build_router(AppState::new(store, None))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    async fn create(app: &Router) -> Value {
        let (status, doc) = send(app, Method::POST, "/api/v1/documents", None).await;
        assert_eq!(status, StatusCode::CREATED);
        doc
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "folio-api");
    }

    #[tokio::test]
    async fn test_create_list_and_current() {
        let app = app();
        let doc = create(&app).await;
        assert_eq!(doc["title"], "Untitled Resume");
        assert_eq!(doc["templateId"], "minimal");
        assert_eq!(doc["themeSettings"]["accentColor"], "#7C5CFF");
        assert_eq!(doc["sections"].as_array().unwrap().len(), 5);

        let (_, list) = send(&app, Method::GET, "/api/v1/documents", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (_, current) = send(&app, Method::GET, "/api/v1/current", None).await;
        assert_eq!(current["id"], doc["id"]);

        let (status, cleared) = send(&app, Method::PUT, "/api/v1/current", Some(json!({ "id": null }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(cleared["document"].is_null());

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/current",
            Some(json!({ "id": "00000000-0000-0000-0000-000000000001" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_document_replaces_and_stamps() {
        let app = app();
        let mut doc = create(&app).await;
        let id = doc["id"].as_str().unwrap().to_string();
        doc["title"] = json!("Staff Engineer");
        doc["templateId"] = json!("modern");

        let (status, updated) = send(&app, Method::PUT, &format!("/api/v1/documents/{id}"), Some(doc.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Staff Engineer");
        assert_eq!(updated["templateId"], "modern");
        assert_eq!(updated["createdAt"], doc["createdAt"]);
        assert_ne!(updated["updatedAt"], doc["updatedAt"]);

        doc["sections"][1]["id"] = json!("contact");
        let (status, body) = send(&app, Method::PUT, &format!("/api/v1/documents/{id}"), Some(doc)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_document_is_404() {
        let app = app();
        let missing = "/api/v1/documents/00000000-0000-0000-0000-000000000009";
        let (status, body) = send(&app, Method::GET, missing, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        let (status, _) = send(&app, Method::DELETE, missing, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::POST, &format!("{missing}/duplicate"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_and_delete() {
        let app = app();
        let doc = create(&app).await;
        let id = doc["id"].as_str().unwrap();

        let (status, copy) = send(&app, Method::POST, &format!("/api/v1/documents/{id}/duplicate"), None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_ne!(copy["id"], doc["id"]);
        assert_eq!(copy["title"], "Untitled Resume (Copy)");
        assert_eq!(copy["sections"], doc["sections"]);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, current) = send(&app, Method::GET, "/api/v1/current", None).await;
        assert!(current["id"].is_null());
    }

    #[tokio::test]
    async fn test_section_data_is_normalized() {
        let app = app();
        create(&app).await;

        let (status, section) = send(
            &app,
            Method::PUT,
            "/api/v1/current/sections/experience/data",
            Some(json!({ "items": [{ "company": "Acme", "position": "Engineer", "current": true }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let item = &section["data"]["items"][0];
        assert_eq!(item["company"], "Acme");
        assert!(!item["id"].as_str().unwrap().is_empty());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/current/sections/summary/data",
            Some(json!(["not", "a", "summary"])),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/current/sections/nope/data",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_section_ordering_endpoints() {
        let app = app();
        create(&app).await;

        let (status, doc) = send(
            &app,
            Method::POST,
            "/api/v1/current/sections/move",
            Some(json!({ "from": 4, "to": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["sections"][0]["id"], "skills");
        assert_eq!(doc["sections"][0]["order"], 0);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/current/sections/move",
            Some(json!({ "from": 0, "to": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, section) = send(&app, Method::POST, "/api/v1/current/sections/summary/visibility", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(section["visible"], false);

        let (status, added) = send(
            &app,
            Method::POST,
            "/api/v1/current/sections",
            Some(json!({ "type": "projects" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(added["title"], "Projects");
        assert_eq!(added["order"], 5);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/current/sections",
            Some(json!({ "type": "awards" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut sections = doc["sections"].as_array().unwrap().clone();
        sections.reverse();
        let (status, reordered) = send(&app, Method::PUT, "/api/v1/current/sections", Some(json!(sections))).await;
        assert_eq!(status, StatusCode::OK);
        let orders: Vec<i64> = reordered["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["order"].as_i64().unwrap())
            .collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);

        let (status, _) = send(&app, Method::DELETE, "/api/v1/current/sections/skills", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, "/api/v1/current/sections/skills", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_section_endpoints_need_current() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/api/v1/current/sections/summary/visibility", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "No current document");
    }

    #[tokio::test]
    async fn test_preview_endpoints() {
        let app = app();
        let doc = create(&app).await;
        let id = doc["id"].as_str().unwrap();

        let (status, tree) = send(&app, Method::GET, &format!("/api/v1/documents/{id}/preview"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tree["kind"], "element");
        assert_eq!(tree["attrs"]["id"], "cv-preview");
        assert_eq!(tree["attrs"]["data-template"], "minimal");

        let (status, html) = send(&app, Method::GET, &format!("/api/v1/documents/{id}/preview.html"), None).await;
        assert_eq!(status, StatusCode::OK);
        let html = html.as_str().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id=\"cv-preview\""));
        assert!(html.contains("Your Name"));
    }

    #[tokio::test]
    async fn test_catalogue_endpoints() {
        let app = app();
        let (_, templates) = send(&app, Method::GET, "/api/v1/templates", None).await;
        let ids: Vec<&str> = templates
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["minimal", "modern", "creative"]);

        let (status, facet) = send(&app, Method::GET, "/api/v1/sections/types/skills", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(facet["defaultData"], json!({ "items": [] }));
        assert_eq!(facet["editor"]["implemented"], true);

        let (status, facet) = send(&app, Method::GET, "/api/v1/sections/types/awards", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(facet["editor"]["implemented"], false);
        assert_eq!(facet["editor"]["notice"], "Section type not implemented");
    }

    #[tokio::test]
    async fn test_assistant_unavailable_without_backend() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/assistant/messages",
            Some(json!({ "message": "Help" })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "ASSISTANT_UNAVAILABLE");

        let (_, prompts) = send(&app, Method::GET, "/api/v1/assistant/prompts", None).await;
        assert_eq!(prompts.as_array().unwrap().len(), 6);
        assert_eq!(prompts[0]["title"], "Improve Summary");
    }

    #[tokio::test]
    async fn test_assistant_sends_current_document() {
        let backend = Arc::new(CannedAssistant::default());
        let store = DocumentStore::load(Box::new(MemoryStorage::new()));
        let assistant: Arc<dyn AssistantBackend> = backend.clone();
        let app = build_router(AppState::new(store, Some(assistant)));
        create(&app).await;
        send(
            &app,
            Method::PUT,
            "/api/v1/current/sections/contact/data",
            Some(json!({ "fullName": "Katherine Johnson" })),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/assistant/messages",
            Some(json!({ "message": "Improve my summary" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "Lead with measurable outcomes.");
        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Katherine Johnson"));

        drop(prompts);
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/assistant/messages",
            Some(json!({ "message": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

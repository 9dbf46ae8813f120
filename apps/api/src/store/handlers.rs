use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{Document, Section, SectionType};
use crate::sections::registry;
use crate::state::AppState;
use crate::store::DocumentStore;

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Document {id} not found"))
}

fn no_current() -> AppError {
    AppError::NotFound("No current document".to_string())
}

fn section_not_found(section_id: &str) -> AppError {
    AppError::NotFound(format!("Section {section_id} not found"))
}

/// Owned copy of the current document, for responses.
fn current_document(store: &DocumentStore) -> Result<Document, AppError> {
    store.get_current().map(|d| (*d).clone()).ok_or_else(no_current)
}

// ────────────────────────────────────────────────────────────────────────────
// Documents
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/documents
pub async fn handle_list_documents(State(state): State<AppState>) -> Json<Vec<Document>> {
    let store = state.store.lock().await;
    Json(store.list().iter().map(|d| (**d).clone()).collect())
}

/// POST /api/v1/documents
pub async fn handle_create_document(State(state): State<AppState>) -> (StatusCode, Json<Document>) {
    let document = state.store.lock().await.create();
    (StatusCode::CREATED, Json((*document).clone()))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, AppError> {
    let document = state.store.lock().await.get(id).ok_or_else(|| not_found(id))?;
    Ok(Json((*document).clone()))
}

/// PUT /api/v1/documents/:id
///
/// Whole-document replace. `createdAt` is kept from the stored copy and
/// `updatedAt` is stamped by the store, whatever the body says.
pub async fn handle_update_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(document): Json<Document>,
) -> Result<Json<Document>, AppError> {
    if document.id != id {
        return Err(AppError::Validation(format!(
            "Body id {} does not match path id {id}",
            document.id
        )));
    }
    if !document.has_unique_section_ids() {
        return Err(AppError::Validation("Section ids must be unique".to_string()));
    }
    let mut store = state.store.lock().await;
    if !store.update(document) {
        return Err(not_found(id));
    }
    let updated = store.get(id).ok_or_else(|| not_found(id))?;
    Ok(Json((*updated).clone()))
}

/// DELETE /api/v1/documents/:id
pub async fn handle_delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.lock().await.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/documents/:id/duplicate
pub async fn handle_duplicate_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let copy = state.store.lock().await.duplicate(id).ok_or_else(|| not_found(id))?;
    Ok((StatusCode::CREATED, Json((*copy).clone())))
}

// ────────────────────────────────────────────────────────────────────────────
// Current document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CurrentResponse {
    pub id: Option<Uuid>,
    pub document: Option<Document>,
}

impl CurrentResponse {
    fn from_store(store: &DocumentStore) -> Self {
        let document = store.get_current().map(|d| (*d).clone());
        Self {
            id: document.as_ref().map(|d| d.id),
            document,
        }
    }
}

#[derive(Deserialize)]
pub struct SelectCurrent {
    pub id: Option<Uuid>,
}

/// GET /api/v1/current
pub async fn handle_get_current(State(state): State<AppState>) -> Json<CurrentResponse> {
    Json(CurrentResponse::from_store(&*state.store.lock().await))
}

/// PUT /api/v1/current
pub async fn handle_set_current(
    State(state): State<AppState>,
    Json(req): Json<SelectCurrent>,
) -> Result<Json<CurrentResponse>, AppError> {
    let mut store = state.store.lock().await;
    if !store.set_current(req.id) {
        return Err(req.id.map_or_else(no_current, not_found));
    }
    Ok(Json(CurrentResponse::from_store(&store)))
}

// ────────────────────────────────────────────────────────────────────────────
// Sections of the current document
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/current/sections
///
/// Takes the full list in its new order; `order` is renumbered to match.
pub async fn handle_reorder_sections(
    State(state): State<AppState>,
    Json(sections): Json<Vec<Section>>,
) -> Result<Json<Document>, AppError> {
    let mut store = state.store.lock().await;
    current_document(&store)?;
    if !store.reorder_sections(sections) {
        return Err(AppError::Validation("Section ids must be unique".to_string()));
    }
    Ok(Json(current_document(&store)?))
}

#[derive(Deserialize)]
pub struct AddSection {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub title: Option<String>,
}

/// POST /api/v1/current/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
    Json(req): Json<AddSection>,
) -> Result<(StatusCode, Json<Section>), AppError> {
    if !req.section_type.is_known() {
        return Err(AppError::Validation(format!(
            "Unknown section type '{}'",
            req.section_type
        )));
    }
    let title = req.title.filter(|t| !t.trim().is_empty());
    let section = state
        .store
        .lock()
        .await
        .add_section(req.section_type, title)
        .ok_or_else(no_current)?;
    Ok((StatusCode::CREATED, Json(section)))
}

#[derive(Deserialize)]
pub struct MoveSection {
    pub from: usize,
    pub to: usize,
}

/// POST /api/v1/current/sections/move
pub async fn handle_move_section(
    State(state): State<AppState>,
    Json(req): Json<MoveSection>,
) -> Result<Json<Document>, AppError> {
    let mut store = state.store.lock().await;
    let count = current_document(&store)?.sections.len();
    if !store.move_section(req.from, req.to) {
        return Err(AppError::Validation(format!(
            "Cannot move {} to {}: document has {count} sections",
            req.from, req.to
        )));
    }
    Ok(Json(current_document(&store)?))
}

/// PUT /api/v1/current/sections/:section_id/data
///
/// The payload goes through the section type's editor normalization first;
/// a payload of the wrong shape is rejected before the store sees it.
pub async fn handle_update_section_data(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Json(data): Json<Value>,
) -> Result<Json<Section>, AppError> {
    let mut store = state.store.lock().await;
    let current = current_document(&store)?;
    let section_type = current
        .section(&section_id)
        .map(|s| s.section_type.clone())
        .ok_or_else(|| section_not_found(&section_id))?;
    let data = (registry::get_editor(&section_type).normalize)(&section_type, data)?;
    if !store.update_section_data(&section_id, data) {
        return Err(section_not_found(&section_id));
    }
    current_document(&store)?
        .section(&section_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| section_not_found(&section_id))
}

/// POST /api/v1/current/sections/:section_id/visibility
pub async fn handle_toggle_visibility(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> Result<Json<Section>, AppError> {
    let mut store = state.store.lock().await;
    current_document(&store)?;
    if !store.toggle_section_visibility(&section_id) {
        return Err(section_not_found(&section_id));
    }
    current_document(&store)?
        .section(&section_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| section_not_found(&section_id))
}

/// DELETE /api/v1/current/sections/:section_id
pub async fn handle_remove_section(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    current_document(&store)?;
    if store.remove_section(&section_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(section_not_found(&section_id))
    }
}

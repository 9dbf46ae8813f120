use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{Document, TemplateId};
use crate::render::node::{escape_html, Node};
use crate::render::project;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: &'static str,
    pub category: &'static str,
}

fn category(template: TemplateId) -> &'static str {
    match template {
        TemplateId::Minimal => "Professional",
        TemplateId::Modern => "Modern",
        TemplateId::Creative => "Creative",
    }
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(
        TemplateId::ALL
            .into_iter()
            .map(|id| TemplateInfo {
                id,
                name: id.display_name(),
                category: category(id),
            })
            .collect(),
    )
}

async fn snapshot(state: &AppState, id: Uuid) -> Result<std::sync::Arc<Document>, AppError> {
    state
        .store
        .lock()
        .await
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))
}

/// GET /api/v1/documents/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Node>, AppError> {
    let document = snapshot(&state, id).await?;
    Ok(Json(project(&document)))
}

/// GET /api/v1/documents/:id/preview.html
pub async fn handle_preview_html(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let document = snapshot(&state, id).await?;
    let body = project(&document).to_html();
    Ok(Html(format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head><body>{body}</body></html>",
        escape_html(&document.title)
    )))
}

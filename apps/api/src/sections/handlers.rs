use axum::{extract::Path, Json};
use serde::Serialize;
use serde_json::Value;

use crate::models::document::SectionType;
use crate::sections::editor::EditorForm;
use crate::sections::registry;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTypeResponse {
    pub default_data: Value,
    pub editor: EditorForm,
}

/// GET /api/v1/sections/types/:type
///
/// Unknown types answer with the placeholder facets rather than 404, the
/// same way the editor treats them.
pub async fn handle_section_type(Path(tag): Path<String>) -> Json<SectionTypeResponse> {
    let section_type = SectionType::parse(&tag);
    Json(SectionTypeResponse {
        default_data: registry::get_default_data(&section_type),
        editor: registry::get_editor(&section_type).form(&section_type),
    })
}

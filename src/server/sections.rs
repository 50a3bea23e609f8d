use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::CreateSectionRequest;
use crate::server::response::{ApiError, MessageResponse, StoreResultExt};
use crate::server::validation::normalize_key;
use crate::types::Section;

pub async fn list_sections(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.as_ref();

    let sections = store.list_sections().api_err("Failed to list sections")?;
    let names: Vec<String> = sections.into_iter().map(|s| s.name).collect();

    Ok::<_, ApiError>(Json(names))
}

pub async fn create_section(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSectionRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    if req.name.is_empty() {
        return Err(ApiError::bad_request("Section name is required"));
    }

    let name = normalize_key(&req.name);

    if store
        .get_section(&name)
        .api_err("Failed to check section")?
        .is_some()
    {
        return Err(ApiError::conflict("Section already exists"));
    }

    store
        .create_section(&Section { name })
        .api_err("Failed to create section")?;

    Ok(Json(MessageResponse::new("Section added successfully")))
}

pub async fn delete_section(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let name = normalize_key(&name);

    // Idempotent by design: no existence check, and the cascade runs
    // regardless so stale children are cleared too
    store
        .delete_section(&name)
        .api_err("Failed to delete section")?;
    store
        .delete_section_students(&name)
        .api_err("Failed to delete section students")?;
    store
        .delete_section_attendance(&name)
        .api_err("Failed to delete section attendance")?;

    Ok::<_, ApiError>(Json(MessageResponse::new(
        "Section and all related data deleted permanently",
    )))
}

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::CreateStudentRequest;
use crate::server::response::{ApiError, MessageResponse, StoreResultExt};
use crate::server::validation::normalize_key;
use crate::types::Student;

pub async fn list_students(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let section = normalize_key(&section);

    let students = store
        .list_students(&section)
        .api_err("Failed to list students")?;

    Ok::<_, ApiError>(Json(students))
}

pub async fn create_student(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    if req.id.is_empty() || req.name.is_empty() || req.section.is_empty() {
        return Err(ApiError::bad_request("ID, Name, and Section are required"));
    }

    let id = normalize_key(&req.id);
    let section = normalize_key(&req.section);

    if store
        .get_student(&id, &section)
        .api_err("Failed to check student")?
        .is_some()
    {
        return Err(ApiError::conflict("Student already exists in this section"));
    }

    let student = Student {
        id,
        name: req.name,
        section,
    };

    store
        .create_student(&student)
        .api_err("Failed to create student")?;

    Ok(Json(MessageResponse::new("Student added successfully")))
}

pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path((id, section)): Path<(String, String)>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let id = normalize_key(&id);
    let section = normalize_key(&section);

    // Idempotent: no existence check. Attendance cleanup is scoped to the
    // (id, section) pair so a same-id student elsewhere keeps their records
    store
        .delete_student(&id, &section)
        .api_err("Failed to delete student")?;
    store
        .delete_student_attendance(&id, &section)
        .api_err("Failed to delete student attendance")?;

    Ok::<_, ApiError>(Json(MessageResponse::new(
        "Student and all related attendance records deleted permanently",
    )))
}

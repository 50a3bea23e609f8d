use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::{MarkAttendanceRequest, RosterEntry};
use crate::server::response::{ApiError, MessageResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::{normalize_key, parse_day};
use crate::types::{AttendanceRecord, AttendanceStatus};

pub async fn mark_attendance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MarkAttendanceRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let Ok(status) = req.status.parse::<AttendanceStatus>() else {
        return Err(ApiError::bad_request("Valid attendance status is required"));
    };

    let id = normalize_key(&id);
    let section = normalize_key(&req.section);
    let day = parse_day(&req.date)?;

    store
        .get_student(&id, &section)
        .api_err("Failed to check student")?
        .or_not_found("Student not found")?;

    let existing = store
        .get_attendance(&id, &section, day)
        .api_err("Failed to check attendance")?;

    if existing.is_some() {
        store
            .update_attendance_status(&id, &section, day, status)
            .api_err("Failed to update attendance")?;
        return Ok(Json(MessageResponse::new("Attendance updated successfully")));
    }

    let record = AttendanceRecord {
        student_id: id,
        section,
        day,
        status,
    };

    store
        .create_attendance(&record)
        .api_err("Failed to mark attendance")?;

    Ok(Json(MessageResponse::new("Attendance marked successfully")))
}

/// Daily roster for a section: one entry per student, filled from that
/// day's attendance records, defaulting to "Not Marked".
pub async fn day_status(
    State(state): State<Arc<AppState>>,
    Path((section, date)): Path<(String, String)>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let section = normalize_key(&section);
    let day = parse_day(&date)?;

    let students = store
        .list_students(&section)
        .api_err("Failed to list students")?;
    let records = store
        .list_day_attendance(&section, day)
        .api_err("Failed to list attendance")?;

    let by_student: HashMap<String, AttendanceStatus> = records
        .into_iter()
        .map(|r| (r.student_id, r.status))
        .collect();

    let roster: Vec<RosterEntry> = students
        .into_iter()
        .map(|stu| {
            let status = by_student
                .get(&stu.id)
                .map_or("Not Marked", AttendanceStatus::as_str);
            RosterEntry {
                id: stu.id,
                name: stu.name,
                status: status.to_string(),
            }
        })
        .collect();

    Ok::<_, ApiError>(Json(roster))
}

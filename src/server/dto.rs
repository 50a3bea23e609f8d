use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateSectionRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub section: String,
}

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub section: String,
    // Kept as a raw string so unknown statuses get the documented 400
    // message instead of a deserialization rejection; status is validated
    // before the other fields are used
    #[serde(default)]
    pub status: String,
}

/// Roster entry for the daily attendance view. `status` is the recorded
/// status, or "Not Marked" when no record exists for the day.
#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub status: String,
}

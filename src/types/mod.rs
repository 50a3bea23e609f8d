use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named group of students (a class). Names are stored lowercase so
/// lookups are case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
}

/// A student enrolled in a section. The `(id, section)` pair is unique;
/// the same id may appear in different sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub section: String,
}

/// One attendance entry for a student on a calendar day. At most one
/// record exists per `(student_id, section, day)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: String,
    pub section: String,
    pub day: NaiveDate,
    pub status: AttendanceStatus,
}

/// Recorded attendance status. A student without a record for a day is
/// reported as "Not Marked" by the roster endpoint; that pseudo-state is
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(AttendanceStatus::Present),
            "Absent" => Ok(AttendanceStatus::Absent),
            _ => Err(()),
        }
    }
}

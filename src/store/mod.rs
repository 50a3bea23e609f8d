mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::NaiveDate;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface. All string keys (section names,
/// student ids) are expected pre-normalized to lowercase by the caller.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Section operations
    fn create_section(&self, section: &Section) -> Result<()>;
    fn get_section(&self, name: &str) -> Result<Option<Section>>;
    fn list_sections(&self) -> Result<Vec<Section>>;
    fn delete_section(&self, name: &str) -> Result<bool>;

    // Student operations
    fn create_student(&self, student: &Student) -> Result<()>;
    fn get_student(&self, id: &str, section: &str) -> Result<Option<Student>>;
    fn list_students(&self, section: &str) -> Result<Vec<Student>>;
    fn delete_student(&self, id: &str, section: &str) -> Result<bool>;
    fn delete_section_students(&self, section: &str) -> Result<usize>;

    // Attendance operations
    fn create_attendance(&self, record: &AttendanceRecord) -> Result<()>;
    fn get_attendance(
        &self,
        student_id: &str,
        section: &str,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>>;
    fn update_attendance_status(
        &self,
        student_id: &str,
        section: &str,
        day: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<()>;
    fn list_day_attendance(&self, section: &str, day: NaiveDate) -> Result<Vec<AttendanceRecord>>;
    fn delete_student_attendance(&self, student_id: &str, section: &str) -> Result<usize>;
    fn delete_section_attendance(&self, section: &str) -> Result<usize>;
}

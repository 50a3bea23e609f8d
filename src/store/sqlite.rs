use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

const DAY_FORMAT: &str = "%Y-%m-%d";

fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

fn parse_day(idx: usize, s: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&s, DAY_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("invalid day '{s}': {e}").into(),
        )
    })
}

fn parse_status(idx: usize, s: String) -> rusqlite::Result<AttendanceStatus> {
    s.parse().map_err(|()| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("invalid attendance status '{s}'").into(),
        )
    })
}

/// Unique-constraint violations become `AlreadyExists` so racing duplicate
/// inserts surface as conflicts rather than raw database errors.
fn map_insert_err(e: rusqlite::Error) -> Error {
    match e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::AlreadyExists
        }
        other => Error::Database(other),
    }
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Section operations

    fn create_section(&self, section: &Section) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO sections (name) VALUES (?1)",
                params![section.name],
            )
            .map_err(map_insert_err)?;
        Ok(())
    }

    fn get_section(&self, name: &str) -> Result<Option<Section>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT name FROM sections WHERE name = ?1",
            params![name],
            |row| Ok(Section { name: row.get(0)? }),
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_sections(&self) -> Result<Vec<Section>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT name FROM sections ORDER BY rowid")?;

        let rows = stmt.query_map([], |row| Ok(Section { name: row.get(0)? }))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_section(&self, name: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM sections WHERE name = ?1", params![name])?;
        Ok(rows > 0)
    }

    // Student operations

    fn create_student(&self, student: &Student) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO students (id, name, section) VALUES (?1, ?2, ?3)",
                params![student.id, student.name, student.section],
            )
            .map_err(map_insert_err)?;
        Ok(())
    }

    fn get_student(&self, id: &str, section: &str) -> Result<Option<Student>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, section FROM students WHERE id = ?1 AND section = ?2",
            params![id, section],
            |row| {
                Ok(Student {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    section: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_students(&self, section: &str) -> Result<Vec<Student>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id, name, section FROM students WHERE section = ?1 ORDER BY rowid")?;

        let rows = stmt.query_map(params![section], |row| {
            Ok(Student {
                id: row.get(0)?,
                name: row.get(1)?,
                section: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_student(&self, id: &str, section: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM students WHERE id = ?1 AND section = ?2",
            params![id, section],
        )?;
        Ok(rows > 0)
    }

    fn delete_section_students(&self, section: &str) -> Result<usize> {
        let rows = self
            .conn()
            .execute("DELETE FROM students WHERE section = ?1", params![section])?;
        Ok(rows)
    }

    // Attendance operations

    fn create_attendance(&self, record: &AttendanceRecord) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO attendance (student_id, section, day, status)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.student_id,
                    record.section,
                    format_day(record.day),
                    record.status.as_str(),
                ],
            )
            .map_err(map_insert_err)?;
        Ok(())
    }

    fn get_attendance(
        &self,
        student_id: &str,
        section: &str,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT student_id, section, day, status FROM attendance
             WHERE student_id = ?1 AND section = ?2 AND day = ?3",
            params![student_id, section, format_day(day)],
            |row| {
                Ok(AttendanceRecord {
                    student_id: row.get(0)?,
                    section: row.get(1)?,
                    day: parse_day(2, row.get(2)?)?,
                    status: parse_status(3, row.get(3)?)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_attendance_status(
        &self,
        student_id: &str,
        section: &str,
        day: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE attendance SET status = ?1
             WHERE student_id = ?2 AND section = ?3 AND day = ?4",
            params![status.as_str(), student_id, section, format_day(day)],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn list_day_attendance(&self, section: &str, day: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT student_id, section, day, status FROM attendance
             WHERE section = ?1 AND day = ?2 ORDER BY rowid",
        )?;

        let rows = stmt.query_map(params![section, format_day(day)], |row| {
            Ok(AttendanceRecord {
                student_id: row.get(0)?,
                section: row.get(1)?,
                day: parse_day(2, row.get(2)?)?,
                status: parse_status(3, row.get(3)?)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_student_attendance(&self, student_id: &str, section: &str) -> Result<usize> {
        let rows = self.conn().execute(
            "DELETE FROM attendance WHERE student_id = ?1 AND section = ?2",
            params![student_id, section],
        )?;
        Ok(rows)
    }

    fn delete_section_attendance(&self, section: &str) -> Result<usize> {
        let rows = self
            .conn()
            .execute("DELETE FROM attendance WHERE section = ?1", params![section])?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(temp: &TempDir) -> SqliteStore {
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        store
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn student(id: &str, name: &str, section: &str) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
            section: section.to_string(),
        }
    }

    #[test]
    fn test_initialize_creates_schema() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let conn = store.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"sections".to_string()));
        assert!(tables.contains(&"students".to_string()));
        assert!(tables.contains(&"attendance".to_string()));
    }

    #[test]
    fn test_section_crud() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store
            .create_section(&Section {
                name: "a".to_string(),
            })
            .unwrap();

        let fetched = store.get_section("a").unwrap().unwrap();
        assert_eq!(fetched.name, "a");

        let all = store.list_sections().unwrap();
        assert_eq!(all.len(), 1);

        assert!(store.delete_section("a").unwrap());
        assert!(store.get_section("a").unwrap().is_none());
        assert!(!store.delete_section("a").unwrap());
    }

    #[test]
    fn test_duplicate_section_is_conflict() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let section = Section {
            name: "a".to_string(),
        };
        store.create_section(&section).unwrap();

        let result = store.create_section(&section);
        assert!(matches!(result, Err(Error::AlreadyExists)));
    }

    #[test]
    fn test_sections_list_in_insertion_order() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        for name in ["zeta", "alpha", "mid"] {
            store
                .create_section(&Section {
                    name: name.to_string(),
                })
                .unwrap();
        }

        let names: Vec<String> = store
            .list_sections()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_student_unique_per_section() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_student(&student("s1", "Alice", "a")).unwrap();

        // Same id in a different section is a different student
        store.create_student(&student("s1", "Alice", "b")).unwrap();

        let result = store.create_student(&student("s1", "Someone", "a"));
        assert!(matches!(result, Err(Error::AlreadyExists)));

        assert_eq!(store.list_students("a").unwrap().len(), 1);
        assert_eq!(store.list_students("b").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_student_is_scoped_to_section() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_student(&student("s1", "Alice", "a")).unwrap();
        store.create_student(&student("s1", "Alice", "b")).unwrap();

        assert!(store.delete_student("s1", "a").unwrap());

        assert!(store.get_student("s1", "a").unwrap().is_none());
        assert!(store.get_student("s1", "b").unwrap().is_some());
    }

    #[test]
    fn test_attendance_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let record = AttendanceRecord {
            student_id: "s1".to_string(),
            section: "a".to_string(),
            day: day("2024-01-01"),
            status: AttendanceStatus::Present,
        };
        store.create_attendance(&record).unwrap();

        let fetched = store
            .get_attendance("s1", "a", day("2024-01-01"))
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status, AttendanceStatus::Present);
        assert_eq!(fetched.day, day("2024-01-01"));

        assert!(
            store
                .get_attendance("s1", "a", day("2024-01-02"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_attendance_unique_per_day() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let record = AttendanceRecord {
            student_id: "s1".to_string(),
            section: "a".to_string(),
            day: day("2024-01-01"),
            status: AttendanceStatus::Present,
        };
        store.create_attendance(&record).unwrap();

        let result = store.create_attendance(&record);
        assert!(matches!(result, Err(Error::AlreadyExists)));
    }

    #[test]
    fn test_update_attendance_status() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store
            .create_attendance(&AttendanceRecord {
                student_id: "s1".to_string(),
                section: "a".to_string(),
                day: day("2024-01-01"),
                status: AttendanceStatus::Present,
            })
            .unwrap();

        store
            .update_attendance_status("s1", "a", day("2024-01-01"), AttendanceStatus::Absent)
            .unwrap();

        let fetched = store
            .get_attendance("s1", "a", day("2024-01-01"))
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status, AttendanceStatus::Absent);

        let missing =
            store.update_attendance_status("s2", "a", day("2024-01-01"), AttendanceStatus::Absent);
        assert!(matches!(missing, Err(Error::NotFound)));
    }

    #[test]
    fn test_cascade_deletes_are_scoped() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        for (id, section) in [("s1", "a"), ("s2", "a"), ("s1", "b")] {
            store.create_student(&student(id, "X", section)).unwrap();
            store
                .create_attendance(&AttendanceRecord {
                    student_id: id.to_string(),
                    section: section.to_string(),
                    day: day("2024-01-01"),
                    status: AttendanceStatus::Present,
                })
                .unwrap();
        }

        assert_eq!(store.delete_student_attendance("s1", "a").unwrap(), 1);
        assert!(store.get_attendance("s1", "a", day("2024-01-01")).unwrap().is_none());
        assert!(store.get_attendance("s1", "b", day("2024-01-01")).unwrap().is_some());

        assert_eq!(store.delete_section_students("a").unwrap(), 2);
        assert_eq!(store.delete_section_attendance("a").unwrap(), 1);
        assert_eq!(store.list_students("b").unwrap().len(), 1);
        assert!(store.get_attendance("s1", "b", day("2024-01-01")).unwrap().is_some());
    }
}

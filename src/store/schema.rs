pub const SCHEMA: &str = r#"
-- Sections group students; names are stored lowercase
CREATE TABLE IF NOT EXISTS sections (
    name TEXT PRIMARY KEY,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Students are identified by (id, section); the same id may exist in
-- different sections
CREATE TABLE IF NOT EXISTS students (
    id TEXT NOT NULL,
    name TEXT NOT NULL,
    section TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),

    UNIQUE(id, section)
);

-- One row per student per calendar day; day is an ISO date (YYYY-MM-DD)
CREATE TABLE IF NOT EXISTS attendance (
    student_id TEXT NOT NULL,
    section TEXT NOT NULL,
    day TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),

    UNIQUE(student_id, section, day)
);

-- No foreign keys between tables: handlers perform cascading deletes
-- scoped by section / (student, section)

CREATE INDEX IF NOT EXISTS idx_students_section ON students(section);
CREATE INDEX IF NOT EXISTS idx_attendance_section_day ON attendance(section, day);
"#;

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use crate::roster::{EnrollmentRecord, PersonRecord};

pub const ENROLLMENT_TABLE: &str = "inscripciones";
pub const PERSON_TABLE: &str = "personas";
pub const NOTIFICATION_TABLE: &str = "notificaciones";
pub const EVENT_TABLE: &str = "eventos";

// Fixed column positions per table. Row 0 is always a header row. The
// positions mirror the sheet layout and are only consulted here; the rest
// of the daemon works with the named-field records below.
mod enrollment_col {
    pub const ENROLLMENT_ID: usize = 0;
    pub const STUDENT_DNI: usize = 1;
    pub const SUBJECT_ID: usize = 2;
    pub const SCHOOL_ID: usize = 3;
    pub const YEAR: usize = 4;
    pub const CONDITION: usize = 5;
    pub const ENROLLMENT_DATE: usize = 6;
    pub const ACTIVE: usize = 7;
    pub const WIDTH: usize = 8;
}

mod person_col {
    pub const PERSON_KEY: usize = 0;
    pub const DNI: usize = 1;
    pub const FIRST_NAME: usize = 2;
    pub const LAST_NAME: usize = 3;
    // Index 4 is the birth date; no record field reads it.
    pub const SCHOOL_ID: usize = 5;
    pub const COURSE: usize = 6;
    pub const DIVISION: usize = 7;
    pub const CONDITION: usize = 8;
    pub const ACTIVE: usize = 9;
    pub const WIDTH: usize = 10;
}

mod notification_col {
    pub const NOTIF_ID: usize = 0;
    pub const DNI: usize = 1;
    pub const DATE: usize = 2;
    pub const TITLE: usize = 3;
    pub const READ: usize = 4;
    pub const WIDTH: usize = 5;
}

mod event_col {
    pub const EVENT_ID: usize = 0;
    pub const SCHOOL_ID: usize = 1;
    pub const DATE: usize = 2;
    pub const TITLE: usize = 3;
    pub const WIDTH: usize = 4;
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub notif_id: String,
    pub dni: String,
    pub date: String,
    pub title: String,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub event_id: String,
    pub school_id: String,
    pub date: String,
    pub title: String,
}

/// Loads a sheet-export table as raw rows. `Ok(None)` means the table file
/// is absent; whether that is "no data" or a fault is the caller's call.
pub fn load_table(workspace: &Path, name: &str) -> anyhow::Result<Option<Vec<Vec<Value>>>> {
    let path = workspace.join(format!("{name}.json"));
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = std::fs::read(&path)
        .with_context(|| format!("failed to read table {}", path.to_string_lossy()))?;
    let rows: Vec<Vec<Value>> = serde_json::from_slice(&bytes)
        .with_context(|| format!("table {name} is not an array of rows"))?;
    Ok(Some(rows))
}

// Sheets freely re-type cells: a DNI column comes back as a number once
// someone clears the text format. Accept string/number/bool for text
// cells and bool or "true"/"false" text for flags.
fn cell_str(row: &[Value], idx: usize) -> String {
    match row.get(idx) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn cell_bool(row: &[Value], idx: usize) -> bool {
    match row.get(idx) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn cell_i32(row: &[Value], idx: usize) -> i32 {
    match row.get(idx) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0) as i32,
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Converts raw enrollment rows to records. Skips the header row, rows
/// narrower than the sheet layout, and rows with a blank id or student
/// key (exports pad the tail with blank rows).
pub fn enrollments_from_table(rows: &[Vec<Value>]) -> Vec<EnrollmentRecord> {
    let mut out = Vec::new();
    for row in rows.iter().skip(1) {
        if row.len() < enrollment_col::WIDTH {
            continue;
        }
        let enrollment_id = cell_str(row, enrollment_col::ENROLLMENT_ID);
        let student_key = cell_str(row, enrollment_col::STUDENT_DNI);
        if enrollment_id.is_empty() || student_key.is_empty() {
            continue;
        }
        out.push(EnrollmentRecord {
            enrollment_id,
            student_key,
            subject_id: cell_str(row, enrollment_col::SUBJECT_ID),
            school_id: cell_str(row, enrollment_col::SCHOOL_ID),
            year: cell_i32(row, enrollment_col::YEAR),
            condition: cell_str(row, enrollment_col::CONDITION),
            enrollment_date: cell_str(row, enrollment_col::ENROLLMENT_DATE),
            active: cell_bool(row, enrollment_col::ACTIVE),
        });
    }
    out
}

pub fn persons_from_table(rows: &[Vec<Value>]) -> Vec<PersonRecord> {
    let mut out = Vec::new();
    for row in rows.iter().skip(1) {
        if row.len() < person_col::WIDTH {
            continue;
        }
        let person_key = cell_str(row, person_col::PERSON_KEY);
        if person_key.is_empty() {
            continue;
        }
        out.push(PersonRecord {
            person_key,
            dni: cell_str(row, person_col::DNI),
            first_name: cell_str(row, person_col::FIRST_NAME),
            last_name: cell_str(row, person_col::LAST_NAME),
            school_id: cell_str(row, person_col::SCHOOL_ID),
            course: cell_str(row, person_col::COURSE),
            division: cell_str(row, person_col::DIVISION),
            condition: cell_str(row, person_col::CONDITION),
            active: cell_bool(row, person_col::ACTIVE),
        });
    }
    out
}

pub fn notifications_from_table(rows: &[Vec<Value>]) -> Vec<NotificationRecord> {
    let mut out = Vec::new();
    for row in rows.iter().skip(1) {
        if row.len() < notification_col::WIDTH {
            continue;
        }
        let notif_id = cell_str(row, notification_col::NOTIF_ID);
        if notif_id.is_empty() {
            continue;
        }
        out.push(NotificationRecord {
            notif_id,
            dni: cell_str(row, notification_col::DNI),
            date: cell_str(row, notification_col::DATE),
            title: cell_str(row, notification_col::TITLE),
            read: cell_bool(row, notification_col::READ),
        });
    }
    out
}

pub fn events_from_table(rows: &[Vec<Value>]) -> Vec<EventRecord> {
    let mut out = Vec::new();
    for row in rows.iter().skip(1) {
        if row.len() < event_col::WIDTH {
            continue;
        }
        let event_id = cell_str(row, event_col::EVENT_ID);
        if event_id.is_empty() {
            continue;
        }
        out.push(EventRecord {
            event_id,
            school_id: cell_str(row, event_col::SCHOOL_ID),
            date: cell_str(row, event_col::DATE),
            title: cell_str(row, event_col::TITLE),
        });
    }
    out
}

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

/// One row of the enrollment sheet: a person/subject link for a given
/// year, which may be active or historical.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentRecord {
    pub enrollment_id: String,
    pub student_key: String,
    pub subject_id: String,
    pub school_id: String,
    pub year: i32,
    pub condition: String,
    pub enrollment_date: String,
    pub active: bool,
}

/// One row of the person sheet. `active` marks current enrollment at the
/// institution, independent of any subject-level flag.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    pub person_key: String,
    pub dni: String,
    pub first_name: String,
    pub last_name: String,
    pub school_id: String,
    pub course: String,
    pub division: String,
    pub condition: String,
    pub active: bool,
}

/// Derived roster row. `condition` is the enrollment's, not the person's.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub person_key: String,
    pub enrollment_id: String,
    pub dni: String,
    pub first_name: String,
    pub last_name: String,
    pub course: String,
    pub division: String,
    pub condition: String,
}

struct EnrollmentSlot<'a> {
    enrollment_id: &'a str,
    condition: &'a str,
}

fn active_index<'a>(
    subject_id: &str,
    enrollments: &'a [EnrollmentRecord],
) -> HashMap<&'a str, EnrollmentSlot<'a>> {
    let mut index: HashMap<&str, EnrollmentSlot> = HashMap::new();
    for e in enrollments {
        if !e.active || e.subject_id != subject_id {
            continue;
        }
        // The sheet keeps historical re-enrollment rows; the later row in
        // scan order wins. Storage order is the only precedence the data
        // carries, so no date-based tie-break here.
        index.insert(
            e.student_key.as_str(),
            EnrollmentSlot {
                enrollment_id: &e.enrollment_id,
                condition: &e.condition,
            },
        );
    }
    index
}

/// True when at least one active enrollment row exists for the subject,
/// i.e. when a roster would have candidates to join against.
pub fn subject_has_active(subject_id: &str, enrollments: &[EnrollmentRecord]) -> bool {
    enrollments
        .iter()
        .any(|e| e.active && e.subject_id == subject_id)
}

/// Joins active enrollments for `subject_id` against active persons and
/// returns the roster sorted ascending by last name.
pub fn roster_for(
    subject_id: &str,
    enrollments: &[EnrollmentRecord],
    persons: &[PersonRecord],
) -> Vec<RosterEntry> {
    let index = active_index(subject_id, enrollments);
    if index.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<RosterEntry> = Vec::new();
    for p in persons {
        if !p.active {
            continue;
        }
        let Some(slot) = index.get(p.person_key.as_str()) else {
            continue;
        };
        out.push(RosterEntry {
            person_key: p.person_key.clone(),
            enrollment_id: slot.enrollment_id.to_string(),
            dni: p.dni.clone(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            course: p.course.clone(),
            division: p.division.clone(),
            condition: slot.condition.to_string(),
        });
    }

    // sort_by is stable, so equal last names keep person scan order.
    out.sort_by(|a, b| compare_last_names(&a.last_name, &b.last_name));
    out
}

// Primary collation weight: case and accents folded, with ñ kept as its
// own letter between n and o. '~' sorts after 'z' in ASCII, which is what
// puts "Ñandú" after every plain-n surname.
fn collation_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.to_lowercase().chars() {
        match c {
            'á' | 'à' | 'ä' | 'â' => key.push('a'),
            'é' | 'è' | 'ë' | 'ê' => key.push('e'),
            'í' | 'ì' | 'ï' | 'î' => key.push('i'),
            'ó' | 'ò' | 'ö' | 'ô' => key.push('o'),
            'ú' | 'ù' | 'ü' | 'û' => key.push('u'),
            'ñ' => key.push_str("n~"),
            'ç' => key.push('c'),
            _ => key.push(c),
        }
    }
    key
}

/// Spanish-collation comparison for surnames: accent-insensitive on the
/// primary pass, with the unaccented form first on exact primary ties.
pub fn compare_last_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

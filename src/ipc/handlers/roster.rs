use std::path::Path;

use serde_json::json;

use crate::ipc::error::{fail, ok};
use crate::ipc::types::{AppState, Request};
use crate::roster;
use crate::sheets;

fn workspace<'a>(state: &'a AppState) -> Result<&'a Path, serde_json::Value> {
    state
        .workspace
        .as_deref()
        .ok_or_else(|| fail("select a workspace first"))
}

fn handle_roster(state: &mut AppState, req: &Request) -> serde_json::Value {
    let workspace = match workspace(state) {
        Ok(p) => p,
        Err(e) => return e,
    };
    let Some(subject_id) = req.str_param("subjectId") else {
        return fail("missing subjectId");
    };

    // A missing enrollment table is "no data yet", same as a sheet with
    // only its header row.
    let enrollments = match sheets::load_table(workspace, sheets::ENROLLMENT_TABLE) {
        Ok(Some(rows)) => sheets::enrollments_from_table(&rows),
        Ok(None) => Vec::new(),
        Err(e) => return fail(format!("failed to read enrollment table: {e}")),
    };
    if !roster::subject_has_active(&subject_id, &enrollments) {
        return ok(json!({ "roster": [] }));
    }

    // With live enrollments on file, a missing person table is a data
    // integrity fault and must surface, not read as an empty course.
    let persons = match sheets::load_table(workspace, sheets::PERSON_TABLE) {
        Ok(Some(rows)) => sheets::persons_from_table(&rows),
        Ok(None) => return fail("person table missing"),
        Err(e) => return fail(format!("failed to read person table: {e}")),
    };

    let entries = roster::roster_for(&subject_id, &enrollments, &persons);
    match serde_json::to_value(&entries) {
        Ok(roster_json) => ok(json!({ "roster": roster_json })),
        Err(e) => fail(format!("failed to serialize roster: {e}")),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.action.as_str() {
        "roster" => Some(handle_roster(state, req)),
        _ => None,
    }
}

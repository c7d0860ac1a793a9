use std::path::Path;

use chrono::NaiveDate;
use serde_json::json;

use crate::ipc::error::{fail, ok};
use crate::ipc::types::{AppState, Request};
use crate::sheets;

fn workspace<'a>(state: &'a AppState) -> Result<&'a Path, serde_json::Value> {
    state
        .workspace
        .as_deref()
        .ok_or_else(|| fail("select a workspace first"))
}

fn handle_notifications_unread(state: &mut AppState, req: &Request) -> serde_json::Value {
    let workspace = match workspace(state) {
        Ok(p) => p,
        Err(e) => return e,
    };
    let Some(dni) = req.str_param("dni") else {
        return fail("missing dni");
    };

    let notifications = match sheets::load_table(workspace, sheets::NOTIFICATION_TABLE) {
        Ok(Some(rows)) => sheets::notifications_from_table(&rows),
        Ok(None) => Vec::new(),
        Err(e) => return fail(format!("failed to read notification table: {e}")),
    };
    let count = notifications
        .iter()
        .filter(|n| n.dni == dni && !n.read)
        .count();

    ok(json!({ "count": count }))
}

fn handle_events_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let workspace = match workspace(state) {
        Ok(p) => p,
        Err(e) => return e,
    };
    let Some(school_id) = req.str_param("schoolId") else {
        return fail("missing schoolId");
    };

    let mut events: Vec<_> = match sheets::load_table(workspace, sheets::EVENT_TABLE) {
        Ok(Some(rows)) => sheets::events_from_table(&rows),
        Ok(None) => Vec::new(),
        Err(e) => return fail(format!("failed to read event table: {e}")),
    };
    events.retain(|e| e.school_id == school_id);

    // Sheet dates are hand-typed; rows that don't parse keep their scan
    // position at the end instead of failing the whole list.
    events.sort_by_key(|e| match NaiveDate::parse_from_str(&e.date, "%Y-%m-%d") {
        Ok(d) => (0, d),
        Err(_) => (1, NaiveDate::MAX),
    });

    let events_json: Vec<serde_json::Value> = events
        .iter()
        .map(|e| {
            json!({
                "eventId": e.event_id,
                "date": e.date,
                "title": e.title,
            })
        })
        .collect();

    ok(json!({ "events": events_json }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.action.as_str() {
        "notifications.unread" => Some(handle_notifications_unread(state, req)),
        "events.list" => Some(handle_events_list(state, req)),
        _ => None,
    }
}

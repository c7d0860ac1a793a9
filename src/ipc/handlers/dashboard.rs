use rusqlite::Connection;
use serde_json::json;

use crate::cards;
use crate::db;
use crate::ipc::error::{fail, ok};
use crate::ipc::types::{AppState, Request};
use crate::prefs;
use crate::roles::RoleSet;

fn db_conn<'a>(state: &'a AppState) -> Result<&'a Connection, serde_json::Value> {
    state
        .db
        .as_ref()
        .ok_or_else(|| fail("select a workspace first"))
}

fn handle_dashboard(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state) {
        Ok(c) => c,
        Err(e) => return e,
    };

    let roles = RoleSet::parse(
        req.param("roles")
            .and_then(|v| v.as_str())
            .unwrap_or_default(),
    );
    let eligible = cards::eligible_cards(&roles);

    // The preference only exists once the user has saved one; everyone
    // else gets catalog order with nothing hidden.
    let config = match req.str_param("user") {
        Some(user) => match db::config_get(conn, &user) {
            Ok(v) => v,
            Err(e) => return fail(format!("failed to read config: {e}")),
        },
        None => None,
    };

    let merged = prefs::apply_config(&eligible, config.as_ref());
    let cards_json: Vec<serde_json::Value> = merged
        .iter()
        .map(|p| json!({ "key": p.card.key, "visible": p.visible }))
        .collect();

    ok(json!({
        "roles": roles.to_raw(),
        "cards": cards_json,
    }))
}

fn handle_config_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let Some(user) = req.str_param("user") else {
        return fail("missing user");
    };

    match db::config_get(conn, &user) {
        Ok(Some(cfg)) => {
            let mut hidden: Vec<&String> = cfg.hidden.iter().collect();
            hidden.sort();
            ok(json!({
                "config": {
                    "dashboardOrder": cfg.order,
                    "hiddenCards": hidden,
                }
            }))
        }
        Ok(None) => ok(json!({ "config": null })),
        Err(e) => fail(format!("failed to read config: {e}")),
    }
}

fn handle_config_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let Some(user) = req.str_param("user") else {
        return fail("missing user");
    };
    let Some(order) = req.string_array_param("dashboardOrder") else {
        return fail("dashboardOrder must be an array of card keys");
    };
    // An omitted hidden set means "nothing hidden", same as a fresh save.
    let hidden = match req.param("hiddenCards") {
        None => Vec::new(),
        Some(v) if v.is_null() => Vec::new(),
        Some(_) => match req.string_array_param("hiddenCards") {
            Some(v) => v,
            None => return fail("hiddenCards must be an array of card keys"),
        },
    };

    match db::config_save(conn, &user, &order, &hidden) {
        Ok(()) => ok(json!({})),
        Err(e) => fail(format!("failed to save config: {e}")),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.action.as_str() {
        "dashboard" => Some(handle_dashboard(state, req)),
        "config.get" => Some(handle_config_get(state, req)),
        "config.save" => Some(handle_config_save(state, req)),
        _ => None,
    }
}

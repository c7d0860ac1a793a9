use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension};

use crate::prefs::UiConfig;

pub const DB_FILE: &str = "escuela.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS ui_configs(
            user TEXT PRIMARY KEY,
            dashboard_order TEXT NOT NULL,
            hidden_cards TEXT NOT NULL,
            updated_at TEXT
        )",
        [],
    )?;

    Ok(conn)
}

fn now_ts() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

fn json_array_string(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn parse_json_array_string(raw: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_default()
}

pub fn config_get(conn: &Connection, user: &str) -> anyhow::Result<Option<UiConfig>> {
    let row = conn
        .query_row(
            "SELECT dashboard_order, hidden_cards FROM ui_configs WHERE user = ?",
            [user],
            |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)),
        )
        .optional()?;

    let Some((order_raw, hidden_raw)) = row else {
        return Ok(None);
    };
    Ok(Some(UiConfig {
        order: parse_json_array_string(&order_raw),
        hidden: parse_json_array_string(&hidden_raw).into_iter().collect(),
    }))
}

/// Wholesale replacement of a user's saved preference. There is no patch
/// path: the client always sends the full rendered order and hidden set.
pub fn config_save(
    conn: &Connection,
    user: &str,
    order: &[String],
    hidden: &[String],
) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO ui_configs(user, dashboard_order, hidden_cards, updated_at)
         VALUES(?, ?, ?, ?)
         ON CONFLICT(user) DO UPDATE SET
            dashboard_order = excluded.dashboard_order,
            hidden_cards = excluded.hidden_cards,
            updated_at = excluded.updated_at",
        rusqlite::params![
            user,
            json_array_string(order),
            json_array_string(hidden),
            now_ts()
        ],
    )?;
    Ok(())
}

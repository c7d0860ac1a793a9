use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One request line: `{"action": "...", ...action-specific fields}`.
#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub action: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl Request {
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Non-empty, trimmed string param.
    pub fn str_param(&self, key: &str) -> Option<String> {
        self.param(key)
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn string_array_param(&self, key: &str) -> Option<Vec<String>> {
        let arr = self.param(key)?.as_array()?;
        let mut out = Vec::with_capacity(arr.len());
        for item in arr {
            out.push(item.as_str()?.trim().to_string());
        }
        Some(out)
    }
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
}

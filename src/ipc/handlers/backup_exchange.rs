use std::path::PathBuf;

use serde_json::json;

use crate::backup;
use crate::ipc::error::{fail, ok};
use crate::ipc::types::{AppState, Request};

fn handle_backup_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    // Default to the selected workspace so the client can export without
    // repeating the path it already chose.
    let workspace = req
        .str_param("workspacePath")
        .map(PathBuf::from)
        .or_else(|| state.workspace.clone());
    let Some(workspace) = workspace else {
        return fail("missing workspacePath");
    };
    let Some(out_path) = req.str_param("outPath").map(PathBuf::from) else {
        return fail("missing outPath");
    };

    match backup::export_workspace_bundle(&workspace, &out_path) {
        Ok(summary) => ok(json!({
            "bundleFormat": summary.bundle_format,
            "entryCount": summary.entry_count,
            "outPath": out_path.to_string_lossy(),
        })),
        Err(e) => fail(format!("export failed: {e}")),
    }
}

fn handle_backup_import(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(in_path) = req.str_param("inPath").map(PathBuf::from) else {
        return fail("missing inPath");
    };
    let workspace = req
        .str_param("workspacePath")
        .map(PathBuf::from)
        .or_else(|| state.workspace.clone());
    let Some(workspace) = workspace else {
        return fail("missing workspacePath");
    };

    // The restored database replaces the open one, so drop the handle
    // before overwriting and reopen afterwards.
    let reopen = state
        .workspace
        .as_ref()
        .map(|w| w == &workspace)
        .unwrap_or(false);
    if reopen {
        state.db = None;
    }

    let result = backup::import_workspace_bundle(&in_path, &workspace);

    // Reopen whether or not the import went through; a rejected bundle
    // leaves the previous database in place.
    if reopen {
        match crate::db::open_db(&workspace) {
            Ok(conn) => state.db = Some(conn),
            Err(e) => return fail(format!("workspace failed to reopen: {e}")),
        }
    }

    match result {
        Ok(summary) => ok(json!({
            "bundleFormat": summary.bundle_format_detected,
            "sheetCount": summary.sheet_count,
        })),
        Err(e) => fail(format!("import failed: {e}")),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.action.as_str() {
        "backup.export" => Some(handle_backup_export(state, req)),
        "backup.import" => Some(handle_backup_import(state, req)),
        _ => None,
    }
}

use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_escuelad");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn escuelad");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    payload: serde_json::Value,
) -> serde_json::Value {
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    serde_json::from_str(line.trim()).expect("parse response json")
}

fn write_table(workspace: &Path, name: &str, rows: serde_json::Value) {
    std::fs::write(
        workspace.join(format!("{name}.json")),
        serde_json::to_string(&rows).expect("serialize table"),
    )
    .expect("write table");
}

fn select_workspace(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    workspace: &Path,
) {
    let resp = request(
        stdin,
        reader,
        json!({ "action": "workspace.select", "path": workspace.to_string_lossy() }),
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(true));
}

#[test]
fn unread_count_filters_by_dni_and_read_flag() {
    let workspace = temp_dir("escuelad-agenda-unread");
    write_table(
        &workspace,
        "notificaciones",
        json!([
            ["id", "dni", "fecha", "titulo", "leida"],
            ["n1", "100", "2025-04-01", "Acto escolar", false],
            ["n2", "100", "2025-04-02", "Reunión de padres", true],
            ["n3", "100", "2025-04-03", "Entrega de boletines", "FALSE"],
            ["n4", "200", "2025-04-03", "Otro destinatario", false]
        ]),
    );

    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);

    let resp = request(
        &mut stdin,
        &mut reader,
        json!({ "action": "notifications.unread", "dni": "100" }),
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(resp.get("count").and_then(|v| v.as_u64()), Some(2));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn missing_notification_table_counts_zero() {
    let workspace = temp_dir("escuelad-agenda-no-table");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);

    let resp = request(
        &mut stdin,
        &mut reader,
        json!({ "action": "notifications.unread", "dni": "100" }),
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(resp.get("count").and_then(|v| v.as_u64()), Some(0));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn events_sort_by_date_with_unparseable_dates_last() {
    let workspace = temp_dir("escuelad-agenda-events");
    write_table(
        &workspace,
        "eventos",
        json!([
            ["id", "escuela", "fecha", "titulo"],
            ["e1", "esc1", "2025-08-18", "Jornada institucional"],
            ["e2", "esc1", "a confirmar", "Campamento"],
            ["e3", "esc1", "2025-05-25", "Acto del 25 de Mayo"],
            ["e4", "esc2", "2025-03-01", "Otra escuela"],
            ["e5", "esc1", "2025-07-09", "Acto del 9 de Julio"]
        ]),
    );

    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    select_workspace(&mut stdin, &mut reader, &workspace);

    let resp = request(
        &mut stdin,
        &mut reader,
        json!({ "action": "events.list", "schoolId": "esc1" }),
    );
    let ids: Vec<&str> = resp
        .get("events")
        .and_then(|v| v.as_array())
        .expect("events array")
        .iter()
        .map(|e| e.get("eventId").and_then(|v| v.as_str()).expect("eventId"))
        .collect();
    assert_eq!(ids, ["e3", "e5", "e1", "e2"]);

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

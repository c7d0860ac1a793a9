use serde_json::{json, Value};

/// Success envelope: `{"ok": true}` merged over the action's own fields.
pub fn ok(fields: Value) -> Value {
    let mut obj = match fields {
        Value::Object(m) => m,
        _ => serde_json::Map::new(),
    };
    obj.insert("ok".to_string(), Value::Bool(true));
    Value::Object(obj)
}

/// Failure envelope. Faults travel as data; nothing here ever panics the
/// request loop.
pub fn fail(msg: impl Into<String>) -> Value {
    json!({
        "ok": false,
        "msg": msg.into(),
    })
}

/// Envelope for a payload that could not be parsed as JSON at all, on
/// either side of the wire.
pub fn format_error() -> Value {
    fail("format error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_merges_fields_under_the_flag() {
        let env = ok(json!({ "count": 3 }));
        assert_eq!(env.get("ok"), Some(&Value::Bool(true)));
        assert_eq!(env.get("count").and_then(|v| v.as_i64()), Some(3));
    }

    #[test]
    fn fail_carries_msg() {
        let env = fail("select a workspace first");
        assert_eq!(env.get("ok"), Some(&Value::Bool(false)));
        assert_eq!(
            env.get("msg").and_then(|v| v.as_str()),
            Some("select a workspace first")
        );
    }

    #[test]
    fn format_error_is_the_generic_parse_envelope() {
        assert_eq!(
            format_error().get("msg").and_then(|v| v.as_str()),
            Some("format error")
        );
    }
}

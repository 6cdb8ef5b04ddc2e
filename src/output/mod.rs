pub mod human;

use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Standard JSON envelope for successful commands.
pub fn success(command: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "command": command,
        "data": data,
        "error": null
    })
}

pub fn error(command: &str, code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Error envelope for a rejected submission, carrying one message per field.
pub fn validation_error(command: &str, message: &str, fields: &BTreeMap<String, String>) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": "validation_error",
            "message": message,
            "fields": fields
        }
    })
}

//! Mapping of loosely-structured webhook payloads into fixed shapes.
//!
//! Every field lookup walks an ordered list of candidate names and takes the
//! first one holding a non-empty value. A value is empty when it is null,
//! `false`, zero, or an empty string.

use hookchat_core::{FileReference, NormalizedReply};
use serde_json::{Map, Value};

/// Reply used when the payload carries none of [`REPLY_FIELDS`].
pub const FALLBACK_REPLY: &str =
    "The webhook answered, but the response had no reply/answer/text/output field.";

pub const REPLY_FIELDS: &[&str] = &["reply", "answer", "text", "output"];
pub const FILE_LIST_FIELDS: &[&str] = &["files", "references", "citations"];
pub const FILE_NAME_FIELDS: &[&str] = &["name", "fileName"];
pub const FILE_SOURCE_FIELDS: &[&str] = &["source", "url", "path"];
pub const FILE_SNIPPET_FIELDS: &[&str] = &["snippet", "content"];
pub const ERROR_DETAIL_FIELDS: &[&str] = &["message", "error", "reason", "description"];

/// Server phrases that mean the auth header did not match what the webhook
/// expects. Matched case-insensitively with whitespace removed.
const AUTH_MISMATCH_PHRASES: &[(&str, &str)] = &[
    (
        "authorizationdataiswrong",
        "the webhook rejected the credentials: check that the auth header name and token \
         format match the webhook's Header Auth credential",
    ),
    (
        "authorizationisrequired",
        "the webhook expects an auth header it did not receive: check that the configured \
         auth mode and header name match the webhook's Header Auth credential",
    ),
];

/// Normalize a success payload into a [`NormalizedReply`].
///
/// The payload may be an object or an array wrapping one; only the first
/// array element is considered.
pub fn normalize_reply(payload: &Value) -> NormalizedReply {
    let data = unwrap_envelope(payload);

    let reply = data
        .and_then(|obj| first_text(obj, REPLY_FIELDS))
        .unwrap_or_else(|| FALLBACK_REPLY.to_owned());

    let files = data
        .and_then(|obj| first_present(obj, FILE_LIST_FIELDS))
        .map(normalize_files)
        .unwrap_or_default();

    NormalizedReply { reply, files }
}

/// Pull a human-readable detail out of an error payload.
///
/// Strings are used as-is, arrays are joined with `"; "`, and objects yield
/// the first of [`ERROR_DETAIL_FIELDS`] (recursively). Anything else yields
/// an empty string.
pub fn extract_error_detail(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(extract_error_detail)
            .filter(|detail| !detail.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(obj) => first_present(obj, ERROR_DETAIL_FIELDS)
            .map(extract_error_detail)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Replace known auth-mismatch phrases with an operator-facing explanation.
pub fn clarify_error_detail(detail: String) -> String {
    let compact: String = detail
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    AUTH_MISMATCH_PHRASES
        .iter()
        .find(|(phrase, _)| compact.contains(*phrase))
        .map_or(detail, |(_, clarified)| (*clarified).to_owned())
}

fn unwrap_envelope(payload: &Value) -> Option<&Map<String, Value>> {
    match payload {
        Value::Array(items) => items.first().and_then(Value::as_object),
        other => other.as_object(),
    }
}

fn normalize_files(raw: &Value) -> Vec<FileReference> {
    let Value::Array(items) = raw else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| file_reference(index, item))
        .collect()
}

fn file_reference(index: usize, item: &Value) -> FileReference {
    let obj = item.as_object();
    let field = |fields: &[&str]| obj.and_then(|o| first_text(o, fields));

    FileReference {
        name: field(FILE_NAME_FIELDS).unwrap_or_else(|| format!("Reference file {}", index + 1)),
        source: field(FILE_SOURCE_FIELDS).unwrap_or_default(),
        snippet: field(FILE_SNIPPET_FIELDS).unwrap_or_default(),
    }
}

fn first_present<'a>(obj: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| obj.get(*field))
        .find(|value| is_present(value))
}

fn first_text(obj: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    first_present(obj, fields).map(render_text)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Response shape detection and record normalization.
//!
//! The upstream API does not guarantee a response shape to this tool, so the
//! payload is probed against a fixed list of known list-bearing shapes, first
//! match wins. Extracted records are then annotated with the source label, a
//! resolved creation timestamp, a display name, and the fetch time.

use crate::models::{NormalizedModel, Source};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use std::fmt;

/// Candidate fields for the creation timestamp, in precedence order.
const CREATED_FIELDS: [&str; 3] = ["created", "created_at", "updated_at"];

/// Candidate fields for the display name, in precedence order.
const NAME_FIELDS: [&str; 3] = ["name", "short_name", "id"];

/// Placeholder when no name candidate is usable.
const UNKNOWN_NAME: &str = "Unknown Model";

/// Keys owned by the annotation step; raw fields under these names are
/// replaced, never duplicated.
const ANNOTATED_KEYS: [&str; 4] = ["architecture", "created", "displayName", "fetchedAt"];

/// Recognized payload shapes, in detection order.
///
/// The precedence mirrors what the upstream API has been observed to return;
/// it is not a documented contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{"data": [...]}`
    DataList,
    /// `{"data": {"models": [...]}}`
    DataModels,
    /// `[...]`
    BareList,
    /// `{"models": [...]}`
    ModelsList,
    /// None of the above; yields zero records.
    Unrecognized,
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseShape::DataList => "data[]",
            ResponseShape::DataModels => "data.models[]",
            ResponseShape::BareList => "[]",
            ResponseShape::ModelsList => "models[]",
            ResponseShape::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}

/// Detect which shape a payload has. First match wins.
pub fn detect_shape(payload: &Value) -> ResponseShape {
    if payload.get("data").is_some_and(Value::is_array) {
        ResponseShape::DataList
    } else if payload.pointer("/data/models").is_some_and(Value::is_array) {
        ResponseShape::DataModels
    } else if payload.is_array() {
        ResponseShape::BareList
    } else if payload.get("models").is_some_and(Value::is_array) {
        ResponseShape::ModelsList
    } else {
        ResponseShape::Unrecognized
    }
}

/// Extract the raw record list from a payload.
///
/// Non-object entries in a recognized list are skipped. An unrecognized
/// shape yields an empty list; the caller decides how to report that.
pub fn extract_records(mut payload: Value) -> (ResponseShape, Vec<Map<String, Value>>) {
    let shape = detect_shape(&payload);

    let list = match shape {
        ResponseShape::DataList => match payload {
            Value::Object(mut obj) => obj.remove("data"),
            _ => None,
        },
        ResponseShape::DataModels => payload.pointer_mut("/data/models").map(Value::take),
        ResponseShape::BareList => Some(payload),
        ResponseShape::ModelsList => match payload {
            Value::Object(mut obj) => obj.remove("models"),
            _ => None,
        },
        ResponseShape::Unrecognized => None,
    };

    let records = match list {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    (shape, records)
}

/// Annotate a raw record with source, timestamps, and display name.
pub fn normalize_record(
    mut raw: Map<String, Value>,
    source: Source,
    now: DateTime<Utc>,
) -> NormalizedModel {
    let created = resolve_created(&raw, now);
    let display_name = resolve_display_name(&raw);

    for key in ANNOTATED_KEYS {
        raw.remove(key);
    }

    NormalizedModel {
        architecture: source,
        created,
        display_name,
        fetched_at: now,
        extra: raw,
    }
}

/// Resolve the creation timestamp from the first usable candidate field.
///
/// Null, empty, and unparseable values fall through to the next candidate;
/// if no candidate is usable, the normalization time is used.
fn resolve_created(record: &Map<String, Value>, now: DateTime<Utc>) -> DateTime<Utc> {
    CREATED_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .find_map(parse_timestamp)
        .unwrap_or(now)
}

/// Resolve the display name from the first non-empty string candidate.
fn resolve_display_name(record: &Map<String, Value>) -> String {
    NAME_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

/// Parse a JSON value as a timestamp, if possible.
///
/// Accepts RFC 3339 strings (with or without a trailing offset) and unix
/// epoch numbers in seconds or milliseconds.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) if !s.is_empty() => parse_timestamp_str(s),
        Value::Number(n) => {
            let epoch = n.as_i64()?;
            // Epoch values this large are milliseconds, not seconds.
            if epoch >= 100_000_000_000 {
                Utc.timestamp_millis_opt(epoch).single()
            } else {
                Utc.timestamp_opt(epoch, 0).single()
            }
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    None
}

//! Record-level normalization from provider JSON into canonical records.
//!
//! Adapters describe *where* each field lives using JSON pointers; the
//! helpers here read those paths and classify failures. Batch functions
//! drop any record that fails and log it, so one malformed record never
//! discards the rest of a response.

use serde_json::Value;
use tracing::warn;

use crate::data_source::ProviderAdapter;
use crate::domain::{League, Match, RecordId};
use crate::error::NormalizeError;

/// Normalizes every raw match, dropping malformed records.
pub fn normalize_matches(adapter: &dyn ProviderAdapter, records: &[&Value]) -> Vec<Match> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match adapter.normalize_match(raw) {
            Ok(item) => Some(item),
            Err(error) => {
                warn!(
                    provider = adapter.id().as_str(),
                    index,
                    %error,
                    "dropping malformed match record"
                );
                None
            }
        })
        .collect()
}

/// Normalizes every raw league, dropping malformed records.
pub fn normalize_leagues(adapter: &dyn ProviderAdapter, records: &[&Value]) -> Vec<League> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match adapter.normalize_league(raw) {
            Ok(item) => Some(item),
            Err(error) => {
                warn!(
                    provider = adapter.id().as_str(),
                    index,
                    %error,
                    "dropping malformed league record"
                );
                None
            }
        })
        .collect()
}

fn field_name(pointer: &'static str) -> &'static str {
    pointer.trim_start_matches('/')
}

fn present<'v>(raw: &'v Value, pointer: &str) -> Option<&'v Value> {
    raw.pointer(pointer).filter(|value| !value.is_null())
}

pub(crate) fn required_str(raw: &Value, pointer: &'static str) -> Result<String, NormalizeError> {
    let value = present(raw, pointer).ok_or(NormalizeError::MissingField {
        field: field_name(pointer),
    })?;
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(NormalizeError::InvalidType {
            field: field_name(pointer),
            expected: "string",
        })
}

pub(crate) fn required_id(raw: &Value, pointer: &'static str) -> Result<RecordId, NormalizeError> {
    let value = present(raw, pointer).ok_or(NormalizeError::MissingField {
        field: field_name(pointer),
    })?;
    to_record_id(value).ok_or(NormalizeError::InvalidType {
        field: field_name(pointer),
        expected: "integer or string",
    })
}

pub(crate) fn optional_id(raw: &Value, pointer: &str) -> Option<RecordId> {
    present(raw, pointer).and_then(to_record_id)
}

pub(crate) fn optional_str(raw: &Value, pointer: &str) -> Option<String> {
    present(raw, pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

pub(crate) fn string_or_empty(raw: &Value, pointer: &str) -> String {
    optional_str(raw, pointer).unwrap_or_default()
}

/// Non-negative integer that may legitimately be null (scores before
/// kick-off, minute outside play).
pub(crate) fn optional_u32(raw: &Value, pointer: &'static str) -> Result<Option<u32>, NormalizeError> {
    let Some(value) = present(raw, pointer) else {
        return Ok(None);
    };
    value
        .as_u64()
        .and_then(|number| u32::try_from(number).ok())
        .map(Some)
        .ok_or(NormalizeError::InvalidType {
            field: field_name(pointer),
            expected: "non-negative integer",
        })
}

/// Integer carried as a string, where absent or empty means zero.
pub(crate) fn numeric_string_or_zero(raw: &Value, pointer: &'static str) -> Result<u32, NormalizeError> {
    let invalid = NormalizeError::InvalidType {
        field: field_name(pointer),
        expected: "numeric string",
    };
    match present(raw, pointer) {
        None => Ok(0),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(0),
        Some(Value::String(text)) => text.trim().parse::<u32>().map_err(|_| invalid),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|number| u32::try_from(number).ok())
            .ok_or(invalid),
        Some(_) => Err(invalid),
    }
}

fn to_record_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(number) => number.as_i64().map(RecordId::Number),
        Value::String(text) if !text.is_empty() => Some(RecordId::Text(text.clone())),
        _ => None,
    }
}

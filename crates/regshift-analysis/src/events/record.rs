//! Field access over loosely-typed raw records.
//!
//! A raw record is a JSON object. Required fields fail with a
//! [`MalformedReason`]; optional fields degrade to `None`.

use regshift_core::errors::MalformedReason;
use serde_json::{Map, Value};

/// One raw diff record as delivered by the extraction collaborator.
pub type RawRecord = Value;

/// Result of reading an optional numeric side-channel field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericField {
    Absent,
    Value(f64),
    /// Present but not a finite non-negative number.
    Unparsable,
}

/// Placeholder CoNLL-U uses for "no value".
const CONLLU_EMPTY: &str = "_";

pub fn as_object(record: &RawRecord) -> Result<&Map<String, Value>, MalformedReason> {
    record.as_object().ok_or(MalformedReason::NotAnObject)
}

/// First alias present with a non-null value.
fn lookup<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .find(|value| !value.is_null())
}

pub fn pair_index(fields: &Map<String, Value>) -> Result<u64, MalformedReason> {
    let value = lookup(fields, &["pair_index"])
        .ok_or_else(|| MalformedReason::MissingField("pair_index".to_string()))?;
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(v);
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(f as u64),
                _ => Err(MalformedReason::InvalidPairIndex(n.to_string())),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| MalformedReason::InvalidPairIndex(s.clone())),
        other => Err(MalformedReason::InvalidPairIndex(other.to_string())),
    }
}

pub fn event_type(fields: &Map<String, Value>) -> Result<&str, MalformedReason> {
    match lookup(fields, &["event_type"]) {
        None => Err(MalformedReason::MissingField("event_type".to_string())),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(MalformedReason::InvalidEventType),
    }
}

/// Text attribute. Missing, `null` and `_` are absent; an empty string is
/// kept as a value of its own. Scalars are stringified.
pub fn text(fields: &Map<String, Value>, names: &[&str]) -> Option<String> {
    let raw = match lookup(fields, names)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if raw == CONLLU_EMPTY {
        None
    } else {
        Some(raw)
    }
}

pub fn flag(fields: &Map<String, Value>, names: &[&str]) -> Option<bool> {
    match lookup(fields, names)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn numeric(fields: &Map<String, Value>, names: &[&str]) -> NumericField {
    let parsed = match lookup(fields, names) {
        None => return NumericField::Absent,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return NumericField::Absent,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => NumericField::Value(v),
        _ => NumericField::Unparsable,
    }
}

/// Normalize a `Name=Value|Name=Value` bundle to name order so the same
/// features always produce the same key. An empty bundle stays empty.
pub fn normalize_features(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return Some(String::new());
    }
    let mut parts: Vec<&str> = raw
        .split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty() && *p != CONLLU_EMPTY)
        .collect();
    if parts.is_empty() {
        return None;
    }
    parts.sort_by(|a, b| {
        let name_a = a.split('=').next().unwrap_or(a);
        let name_b = b.split('=').next().unwrap_or(b);
        name_a.cmp(name_b).then_with(|| a.cmp(b))
    });
    parts.dedup();
    Some(parts.join("|"))
}

/// Proper-noun status implied by a UD or Penn POS tag.
pub fn proper_noun_from_pos(pos: &str) -> bool {
    matches!(pos, "PROPN" | "NNP" | "NNPS")
}

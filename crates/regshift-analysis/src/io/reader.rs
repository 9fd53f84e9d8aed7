//! Record files: JSON Lines or a single JSON array.

use std::path::Path;

use regshift_core::errors::IngestError;
use serde_json::Value;

use crate::events::RawRecord;

/// Read every record in `path`.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, IngestError> {
    let label = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::ReadFailed {
        path: label.clone(),
        message: e.to_string(),
    })?;
    let records = parse_records(&content, &label)?;
    tracing::debug!(path = %label, records = records.len(), "records read");
    Ok(records)
}

/// Parse records from text. A document whose first non-blank character is
/// `[` is a JSON array; anything else is JSON Lines with blank lines ignored.
///
/// Records are not validated here; shape problems are the extractor's to
/// count and reject.
pub fn parse_records(content: &str, label: &str) -> Result<Vec<RawRecord>, IngestError> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str::<Vec<Value>>(content).map_err(|e| {
            IngestError::ParseFailed {
                path: label.to_string(),
                line: e.line(),
                message: e.to_string(),
            }
        });
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Value>(line).map_err(|e| IngestError::ParseFailed {
                path: label.to_string(),
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

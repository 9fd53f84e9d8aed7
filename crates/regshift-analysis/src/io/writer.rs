//! Run-document output as pretty JSON.

use std::io::Write;
use std::path::Path;

use regshift_core::errors::AnalysisError;

use crate::pipeline::AnalysisReport;

pub fn to_json_pretty(report: &AnalysisReport) -> Result<String, AnalysisError> {
    serde_json::to_string_pretty(report).map_err(|e| output_error("<string>", e))
}

/// Write `report` followed by a newline.
pub fn write_report<W: Write>(report: &AnalysisReport, mut writer: W) -> Result<(), AnalysisError> {
    serde_json::to_writer_pretty(&mut writer, report).map_err(|e| output_error("<writer>", e))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| output_error("<writer>", e))
}

/// Create or truncate `path` and write `report` into it.
pub fn write_report_file(report: &AnalysisReport, path: &Path) -> Result<(), AnalysisError> {
    let label = path.display().to_string();
    let file = std::fs::File::create(path).map_err(|e| output_error(&label, e))?;
    write_report(report, std::io::BufWriter::new(file)).map_err(|e| match e {
        AnalysisError::Output { message, .. } => AnalysisError::Output {
            path: label.clone(),
            message,
        },
        other => other,
    })?;
    tracing::info!(path = %label, "report written");
    Ok(())
}

fn output_error(path: &str, err: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Output {
        path: path.to_string(),
        message: err.to_string(),
    }
}

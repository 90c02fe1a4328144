//! Result sink: one file per analyzed recording.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisReport;
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

pub const CSV_HEADER: &str = "source,window,metric,emotion,value";

/// Render rows as comma-separated text with a header line.
pub fn to_csv(report: &AnalysisReport) -> String {
    let mut out = String::with_capacity(32 * (report.rows.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in &report.rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            csv_field(&report.source),
            row.window,
            row.metric,
            row.emotion,
            row.value
        );
    }
    out
}

/// Quote a field when it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// `<out_dir>/<source stem>.<ext>`
pub fn output_path(out_dir: &Path, source: &str, format: OutputFormat) -> PathBuf {
    let stem = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("results");
    out_dir.join(format!("{stem}.{}", format.extension()))
}

/// Write a report, creating `out_dir` if needed. Returns the file written.
pub fn write_report(report: &AnalysisReport, out_dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir).map_err(|e| AnalysisError::io(out_dir, e))?;
    let path = output_path(out_dir, &report.source, format);
    let body = match format {
        OutputFormat::Csv => to_csv(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
    };
    std::fs::write(&path, body).map_err(|e| AnalysisError::io(&path, e))?;
    tracing::info!("wrote {} rows to {}", report.rows.len(), path.display());
    Ok(path)
}

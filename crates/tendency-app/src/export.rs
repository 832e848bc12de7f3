// Export of generated tendencies to CSV or JSON files.

use std::io::Write;
use std::path::{Path, PathBuf};

use tendency_core::TendencyMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ExportFormat;
use crate::generate::PlayerTendencies;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// `<name>_tendencies.<ext>`, where every character of the name other than
/// letters, digits, `-`, `.` and `'` becomes `_`. The stem is always a single
/// plain path component; a name with nothing usable becomes `player`.
pub fn export_file_name(name: &str, format: ExportFormat) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '.' | '\'') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.replace("..", "__");
    let stem = stem.trim_start_matches('.');
    let stem = if stem.is_empty() { "player" } else { stem };
    format!("{stem}_tendencies.{}", format.extension())
}

/// Write `Tendency,Value` rows in canonical order.
pub fn write_csv<W: Write>(writer: W, tendencies: &TendencyMap) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Tendency", "Value"])?;
    for (name, value) in tendencies.iter() {
        out.write_record([name, value.to_string().as_str()])?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the full player result as pretty JSON.
pub fn write_json<W: Write>(writer: W, result: &PlayerTendencies) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}

/// Write one player's export into `output_dir`, returning the file path.
pub fn export_player(
    result: &PlayerTendencies,
    output_dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ExportError::Io { path, source }
    };
    std::fs::create_dir_all(output_dir).map_err(io_err(output_dir))?;

    let path = output_dir.join(export_file_name(&result.name, format));
    let file = std::fs::File::create(&path).map_err(io_err(&path))?;
    let mut writer = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(&mut writer, &result.tendencies)?,
        ExportFormat::Json => write_json(&mut writer, result)?,
    }
    writer.flush().map_err(io_err(&path))?;

    info!(player = %result.name, path = %path.display(), "tendencies exported");
    Ok(path)
}

/// Export every result, logging and skipping the ones that fail. Returns the
/// written paths paired with player names, in input order.
pub fn export_all<'a>(
    results: &'a [PlayerTendencies],
    output_dir: &Path,
    format: ExportFormat,
) -> Vec<(&'a str, PathBuf)> {
    results
        .iter()
        .filter_map(|result| match export_player(result, output_dir, format) {
            Ok(path) => Some((result.name.as_str(), path)),
            Err(e) => {
                warn!(player = %result.name, error = %e, "export failed, skipping");
                None
            }
        })
        .collect()
}

//! Export of annotations and reports to CSV or JSON files.

use crate::core::reconcile::stop_label;
use crate::errors::{AppError, AppResult};
use crate::models::annotation::Annotation;
use crate::models::event::Event;
use crate::models::stop::Stop;
use crate::ui::messages::{info, warning};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    Annotations,
    Reports,
}

/// Report row as exported: the event plus its resolved stop label.
#[derive(Debug, Serialize)]
pub struct ReportExport<'a> {
    pub id: &'a str,
    pub stop_id: &'a str,
    pub stop_name: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub description: &'a str,
    pub timestamp: i64,
    pub created: String,
    pub likes: u32,
    pub dislikes: u32,
}

pub fn report_rows<'a>(stops: &'a [Stop], events: &'a [Event]) -> Vec<ReportExport<'a>> {
    events
        .iter()
        .map(|e| ReportExport {
            id: &e.id,
            stop_id: &e.stop_id,
            stop_name: stop_label(stops, &e.stop_id),
            kind: &e.kind,
            description: &e.description,
            timestamp: e.timestamp,
            created: e.created_str(),
            likes: e.likes,
            dislikes: e.dislikes,
        })
        .collect()
}

/// Check whether a file may be created or overwritten.
///
/// - file does not exist → Ok
/// - file exists and `force` → Ok
/// - file exists, no `force` → ask the user.
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "existing file not overwritten".to_string(),
        ))
    }
}

pub struct ExportLogic;

impl ExportLogic {
    pub fn write_annotations(
        path: &Path,
        format: ExportFormat,
        annotations: &[Annotation],
    ) -> AppResult<()> {
        match format {
            ExportFormat::Json => write_json(path, annotations),
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_path(path)?;
                for a in annotations {
                    wtr.serialize(a)?;
                }
                wtr.flush()?;
                Ok(())
            }
        }
    }

    pub fn write_reports(
        path: &Path,
        format: ExportFormat,
        stops: &[Stop],
        events: &[Event],
    ) -> AppResult<()> {
        let rows = report_rows(stops, events);
        match format {
            ExportFormat::Json => write_json(path, &rows),
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_path(path)?;
                for r in &rows {
                    wtr.serialize(r)?;
                }
                wtr.flush()?;
                Ok(())
            }
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

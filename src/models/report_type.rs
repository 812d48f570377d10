use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Known report types. The backend stores the Polish label as free text.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ReportType {
    Breakdown,
    Accident,
    TicketControl,
}

impl ReportType {
    pub const ALL: [ReportType; 3] = [
        ReportType::Breakdown,
        ReportType::Accident,
        ReportType::TicketControl,
    ];

    /// Convert enum → wire label
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Breakdown => "Awaria",
            ReportType::Accident => "Wypadek",
            ReportType::TicketControl => "Kontrola biletów",
        }
    }

    /// Convert wire label → enum
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == s)
    }

    /// Helper: accept the Polish label or the English keyword from the CLI.
    pub fn from_input(s: &str) -> AppResult<Self> {
        let norm = s.trim().to_lowercase();
        let found = match norm.as_str() {
            "breakdown" | "awaria" => Some(ReportType::Breakdown),
            "accident" | "wypadek" => Some(ReportType::Accident),
            "ticket-control" | "ticket_control" | "control" | "kontrola biletów"
            | "kontrola biletow" | "kontrola" => Some(ReportType::TicketControl),
            _ => None,
        };
        found.ok_or_else(|| AppError::InvalidReportType(s.to_string()))
    }
}

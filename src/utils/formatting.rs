//! Formatting utilities used for CLI and export outputs.

use crate::models::report_type::ReportType;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Cut `s` to at most `max` visible chars, ending with "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max < 3 {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Human-readable label and ANSI color for a report kind.
/// Unknown kinds are shown as-is.
pub fn describe_report_kind(kind: &str) -> (String, &'static str) {
    match ReportType::from_label(kind) {
        Some(ReportType::Breakdown) => ("Breakdown".into(), "\x1b[33m"),
        Some(ReportType::Accident) => ("Accident".into(), "\x1b[31m"),
        Some(ReportType::TicketControl) => ("Ticket control".into(), "\x1b[35m"),
        None => (kind.to_string(), "\x1b[0m"),
    }
}

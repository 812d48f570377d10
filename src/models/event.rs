use super::report_type::ReportType;
use crate::utils::time;
use serde::Serialize;

/// A user-submitted incident report tied to a stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    pub stop_id: String, // may dangle if the stop is not in the current snapshot
    pub kind: String,    // "Awaria" | "Wypadek" | "Kontrola biletów" | anything the backend sends
    pub description: String,
    pub timestamp: i64, // epoch millis
    pub created_by: Option<String>,
    pub likes: u32,
    pub dislikes: u32,
}

impl Event {
    /// Known report type, if the free-text kind is one of the standard labels.
    pub fn report_type(&self) -> Option<ReportType> {
        ReportType::from_label(&self.kind)
    }

    pub fn created_str(&self) -> String {
        time::format_millis(self.timestamp)
    }

    /// Net score used when ranking reports.
    pub fn score(&self) -> i64 {
        self.likes as i64 - self.dislikes as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: &str) -> Event {
        Event {
            id: "e1".into(),
            stop_id: "1".into(),
            kind: kind.into(),
            description: "Tram stuck".into(),
            timestamp: 0,
            created_by: None,
            likes: 3,
            dislikes: 5,
        }
    }

    #[test]
    fn known_and_unknown_kinds() {
        assert_eq!(event("Wypadek").report_type(), Some(ReportType::Accident));
        assert_eq!(event("Inne").report_type(), None);
    }

    #[test]
    fn score_is_likes_minus_dislikes() {
        assert_eq!(event("Awaria").score(), -2);
    }
}

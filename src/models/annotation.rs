use serde::Serialize;

/// Renderable marker for one visible stop. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub stop_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub has_open_report: bool,
}

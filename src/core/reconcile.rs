//! Stop/report reconciliation: derive the map annotations to display from
//! the current stops, events and filter.

use crate::core::classify;
use crate::models::annotation::Annotation;
use crate::models::event::Event;
use crate::models::filter::Filter;
use crate::models::stop::Stop;
use std::collections::HashSet;

pub const UNKNOWN_STOP_LABEL: &str = "Unknown stop";

/// Annotations for every stop visible under `filter`, in input order.
///
/// `has_open_report` is set when at least one event references the stop.
/// Events pointing at stops outside `stops` mark nothing.
pub fn compute_annotations(stops: &[Stop], events: &[Event], filter: Filter) -> Vec<Annotation> {
    let reported: HashSet<&str> = events.iter().map(|e| e.stop_id.as_str()).collect();

    stops
        .iter()
        .filter(|s| classify::passes(s, filter))
        .map(|s| Annotation {
            stop_id: s.id.clone(),
            latitude: s.latitude,
            longitude: s.longitude,
            title: s.name.clone(),
            has_open_report: reported.contains(s.id.as_str()),
        })
        .collect()
}

/// Display name for `stop_id`, or the fallback label when it dangles.
pub fn stop_label<'a>(stops: &'a [Stop], stop_id: &str) -> &'a str {
    stops
        .iter()
        .find(|s| s.id == stop_id)
        .map(|s| s.name.as_str())
        .unwrap_or(UNKNOWN_STOP_LABEL)
}

/// Events attached to `stop_id`, newest first.
pub fn reports_for_stop<'a>(events: &'a [Event], stop_id: &str) -> Vec<&'a Event> {
    let mut out: Vec<&Event> = events.iter().filter(|e| e.stop_id == stop_id).collect();
    out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    out
}

/// Holds the three reconciliation inputs and the annotations derived from
/// them. Replacing any input recomputes the annotations.
#[derive(Debug, Clone, Default)]
pub struct MapState {
    stops: Vec<Stop>,
    events: Vec<Event>,
    filter: Filter,
    annotations: Vec<Annotation>,
}

impl MapState {
    pub fn new(stops: Vec<Stop>, events: Vec<Event>, filter: Filter) -> Self {
        let annotations = compute_annotations(&stops, &events, filter);
        Self {
            stops,
            events,
            filter,
            annotations,
        }
    }

    fn recompute(&mut self) {
        self.annotations = compute_annotations(&self.stops, &self.events, self.filter);
    }

    pub fn set_stops(&mut self, stops: Vec<Stop>) -> &[Annotation] {
        self.stops = stops;
        self.recompute();
        &self.annotations
    }

    pub fn set_events(&mut self, events: Vec<Event>) -> &[Annotation] {
        self.events = events;
        self.recompute();
        &self.annotations
    }

    pub fn set_filter(&mut self, filter: Filter) -> &[Annotation] {
        self.filter = filter;
        self.recompute();
        &self.annotations
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Number of visible stops with at least one report.
    pub fn reported_count(&self) -> usize {
        self.annotations.iter().filter(|a| a.has_open_report).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, headsigns: &str) -> Stop {
        Stop {
            id: id.into(),
            name: format!("Stop {id}"),
            latitude: 52.4 + id.len() as f64 / 100.0,
            longitude: 16.9,
            zone: "A".into(),
            route_type: String::new(),
            headsigns: headsigns.into(),
        }
    }

    fn event(id: &str, stop_id: &str) -> Event {
        Event {
            id: id.into(),
            stop_id: stop_id.into(),
            kind: "Awaria".into(),
            description: String::new(),
            timestamp: 0,
            created_by: None,
            likes: 0,
            dislikes: 0,
        }
    }

    fn sample_stops() -> Vec<Stop> {
        vec![
            stop("1", "4,8"),
            stop("2", "148"),
            stop("3", "2,174"),
            stop("4", ""),
            stop("5", "N21,abc"),
        ]
    }

    #[test]
    fn tram_filter_with_no_events() {
        let out = compute_annotations(&[stop("1", "4,8")], &[], Filter::Tram);
        assert_eq!(out.len(), 1);
        assert!(!out[0].has_open_report);
    }

    #[test]
    fn no_filter_marks_reported_stop() {
        let out = compute_annotations(&[stop("1", "4,8")], &[event("e1", "1")], Filter::None);
        assert_eq!(out.len(), 1);
        assert!(out[0].has_open_report);
    }

    #[test]
    fn bus_stop_under_bus_and_tram_filters() {
        let stops = [stop("2", "148")];
        assert_eq!(compute_annotations(&stops, &[], Filter::Bus).len(), 1);
        assert!(compute_annotations(&stops, &[], Filter::Tram).is_empty());
    }

    #[test]
    fn no_filter_keeps_every_stop_in_order() {
        let stops = sample_stops();
        let out = compute_annotations(&stops, &[event("e", "3")], Filter::None);
        let ids: Vec<&str> = out.iter().map(|a| a.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn specific_filters_respect_headsign_predicate() {
        let stops = sample_stops();
        for filter in [Filter::Tram, Filter::Bus] {
            for a in compute_annotations(&stops, &[], filter) {
                let s = stops.iter().find(|s| s.id == a.stop_id).unwrap();
                match filter {
                    Filter::Tram => assert!(classify::is_tram_stop(s)),
                    Filter::Bus => assert!(classify::is_bus_stop(s)),
                    Filter::None => unreachable!(),
                }
            }
        }
        let trams: Vec<String> = compute_annotations(&stops, &[], Filter::Tram)
            .into_iter()
            .map(|a| a.stop_id)
            .collect();
        assert_eq!(trams, vec!["1", "3"]);
    }

    #[test]
    fn open_report_iff_some_event_references_stop() {
        let stops = sample_stops();
        let events = vec![event("a", "2"), event("b", "2"), event("c", "5"), event("d", "99")];
        for a in compute_annotations(&stops, &events, Filter::None) {
            let expected = events.iter().any(|e| e.stop_id == a.stop_id);
            assert_eq!(a.has_open_report, expected, "stop {}", a.stop_id);
        }
    }

    #[test]
    fn recomputation_is_idempotent() {
        let stops = sample_stops();
        let events = vec![event("a", "1")];
        assert_eq!(
            compute_annotations(&stops, &events, Filter::Bus),
            compute_annotations(&stops, &events, Filter::Bus)
        );
    }

    #[test]
    fn dangling_reports_get_fallback_label() {
        let stops = sample_stops();
        assert_eq!(stop_label(&stops, "2"), "Stop 2");
        assert_eq!(stop_label(&stops, "404"), UNKNOWN_STOP_LABEL);
    }

    #[test]
    fn reports_for_stop_newest_first() {
        let mut older = event("old", "1");
        older.timestamp = 10;
        let mut newer = event("new", "1");
        newer.timestamp = 20;
        let events = vec![older, event("x", "2"), newer];
        let ids: Vec<&str> = reports_for_stop(&events, "1")
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn map_state_recomputes_on_every_input_change() {
        let mut state = MapState::new(sample_stops(), Vec::new(), Filter::None);
        assert_eq!(state.annotations().len(), 5);
        assert_eq!(state.reported_count(), 0);

        assert_eq!(state.set_filter(Filter::Bus).len(), 2);

        state.set_events(vec![event("e", "2")]);
        assert_eq!(state.reported_count(), 1);

        let left = state.set_stops(vec![stop("1", "4")]);
        assert!(left.is_empty());
        assert_eq!(state.set_filter(Filter::Tram).len(), 1);
        assert_eq!(state.filter(), Filter::Tram);
    }
}

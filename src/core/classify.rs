//! Vehicle-type classification of stops from their headsign list.
//!
//! Poznań numbers tram lines with one or two digits and bus lines with
//! three. Tokens that match neither pattern are ignored.

use crate::models::filter::Filter;
use crate::models::stop::Stop;
use regex::Regex;
use std::sync::LazyLock;

static TRAM_HEADSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}$").expect("tram headsign pattern"));
static BUS_HEADSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("bus headsign pattern"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopClass {
    pub tram: bool,
    pub bus: bool,
}

pub fn classify(stop: &Stop) -> StopClass {
    let mut class = StopClass::default();
    for token in stop.headsign_tokens() {
        class.tram |= TRAM_HEADSIGN.is_match(token);
        class.bus |= BUS_HEADSIGN.is_match(token);
        if class.tram && class.bus {
            break;
        }
    }
    class
}

pub fn is_tram_stop(stop: &Stop) -> bool {
    classify(stop).tram
}

pub fn is_bus_stop(stop: &Stop) -> bool {
    classify(stop).bus
}

/// Whether `stop` is visible under `filter`.
pub fn passes(stop: &Stop, filter: Filter) -> bool {
    match filter {
        Filter::None => true,
        Filter::Tram => is_tram_stop(stop),
        Filter::Bus => is_bus_stop(stop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(headsigns: &str) -> Stop {
        Stop {
            id: "s".into(),
            name: "Półwiejska".into(),
            latitude: 52.40,
            longitude: 16.93,
            zone: "A".into(),
            route_type: String::new(),
            headsigns: headsigns.into(),
        }
    }

    #[test]
    fn one_and_two_digits_are_tram() {
        assert_eq!(classify(&stop("4,16")), StopClass { tram: true, bus: false });
    }

    #[test]
    fn three_digits_are_bus() {
        assert_eq!(classify(&stop("148, 174")), StopClass { tram: false, bus: true });
    }

    #[test]
    fn mixed_stop_is_both() {
        assert_eq!(classify(&stop("8,148")), StopClass { tram: true, bus: true });
    }

    #[test]
    fn malformed_tokens_are_ignored() {
        assert_eq!(classify(&stop("N21,T1,1234,4a, ,")), StopClass::default());
        assert_eq!(classify(&stop("N21, 7")), StopClass { tram: true, bus: false });
    }

    #[test]
    fn empty_headsigns_pass_only_none() {
        let s = stop("");
        assert!(passes(&s, Filter::None));
        assert!(!passes(&s, Filter::Tram));
        assert!(!passes(&s, Filter::Bus));
    }
}

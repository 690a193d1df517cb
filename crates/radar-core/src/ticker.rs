//! Marquee ticker lines.

use chrono::{DateTime, Utc};

use crate::models::{Signal, SignalStatus};
use crate::timefmt;

/// One marquee line for a signal.
pub fn ticker_line(signal: &Signal, now: DateTime<Utc>) -> String {
    let age = timefmt::age_short(signal.last_updated, now);
    match signal.status {
        SignalStatus::Active => format!(
            ">> {} — {} ({} pax) [{}]",
            signal.name, signal.food_desc, signal.pax, age
        ),
        SignalStatus::Finished => format!(">> {} — HABIS [{}]", signal.name, age),
    }
}

/// Lines for the whole collection, in collection order.
pub fn ticker_lines(signals: &[Signal], now: DateTime<Utc>) -> Vec<String> {
    signals.iter().map(|s| ticker_line(s, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 21, 0, 0).unwrap()
    }

    fn signal(status: SignalStatus, minutes_ago: i64) -> Signal {
        Signal {
            id: 1,
            name: "MASJID JAMEK".to_string(),
            lat: 3.1491,
            lng: 101.6945,
            food_desc: "Bubur Lambuk".to_string(),
            pax: 30,
            status,
            last_updated: base() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_active_line() {
        let line = ticker_line(&signal(SignalStatus::Active, 15), base());
        assert_eq!(line, ">> MASJID JAMEK — Bubur Lambuk (30 pax) [15m]");
    }

    #[test]
    fn test_finished_line_hides_food() {
        let line = ticker_line(&signal(SignalStatus::Finished, 90), base());
        assert_eq!(line, ">> MASJID JAMEK — HABIS [1j]");
    }

    #[test]
    fn test_lines_keep_collection_order() {
        let signals = vec![
            signal(SignalStatus::Active, 5),
            signal(SignalStatus::Finished, 90),
        ];
        let lines = ticker_lines(&signals, base());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("pax"));
        assert!(lines[1].contains("HABIS"));
    }
}

//! The demo dataset: real Kuala Lumpur mosque locations.

use chrono::{DateTime, Duration, Utc};

use radar_core::{Signal, SignalStatus};

/// Fixed demo signals, aged relative to `now`.
pub fn seed_signals(now: DateTime<Utc>) -> Vec<Signal> {
    vec![
        Signal {
            id: 1,
            name: "MASJID WILAYAH PERSEKUTUAN".to_string(),
            lat: 3.1710,
            lng: 101.6935,
            food_desc: "Nasi Lemak + Ayam Rendang".to_string(),
            pax: 120,
            status: SignalStatus::Active,
            last_updated: now - Duration::minutes(10),
        },
        Signal {
            id: 2,
            name: "MASJID NEGARA".to_string(),
            lat: 3.1415,
            lng: 101.6919,
            food_desc: "Bihun Goreng + Karipap".to_string(),
            pax: 80,
            status: SignalStatus::Active,
            last_updated: now - Duration::minutes(25),
        },
        Signal {
            id: 3,
            name: "SURAU KLCC".to_string(),
            lat: 3.1577,
            lng: 101.7119,
            food_desc: "Mee Goreng Mamak + Teh Tarik".to_string(),
            pax: 50,
            status: SignalStatus::Active,
            last_updated: now - Duration::minutes(5),
        },
        Signal {
            id: 4,
            name: "MASJID AS-SYAKIRIN".to_string(),
            lat: 3.1558,
            lng: 101.7137,
            food_desc: "Roti Canai + Dal".to_string(),
            pax: 200,
            status: SignalStatus::Active,
            last_updated: now - Duration::minutes(3),
        },
        Signal {
            id: 5,
            name: "SURAU BANGSAR".to_string(),
            lat: 3.1300,
            lng: 101.6710,
            food_desc: "Nasi Briyani Kambing".to_string(),
            pax: 0,
            status: SignalStatus::Finished,
            last_updated: now - Duration::minutes(90),
        },
        Signal {
            id: 6,
            name: "MASJID JAMEK".to_string(),
            lat: 3.1491,
            lng: 101.6945,
            food_desc: "Bubur Lambuk + Kuih Muih".to_string(),
            pax: 30,
            status: SignalStatus::Active,
            last_updated: now - Duration::minutes(15),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let now = Utc::now();
        let signals = seed_signals(now);
        assert_eq!(signals.len(), 6);

        // Ids are unique
        let mut ids: Vec<_> = signals.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);

        // Exactly one exhausted entry, and it carries no capacity
        let finished: Vec<_> = signals.iter().filter(|s| !s.is_active()).collect();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].name, "SURAU BANGSAR");
        assert_eq!(finished[0].pax, 0);

        // All aged into the past
        assert!(signals.iter().all(|s| s.last_updated < now));
    }
}

//! Relative-age labels.
//!
//! Both variants take `now` explicitly so callers decide the cadence and
//! tests stay deterministic. Elapsed time is floored, never rounded.

use chrono::{DateTime, Utc};

/// Short tag for compact surfaces: `Baru`, `{n}m`, `{h}j`.
///
/// Hours never roll into days.
pub fn age_short(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        "Baru".to_string()
    } else if minutes < 60 {
        format!("{minutes}m")
    } else {
        format!("{}j", minutes / 60)
    }
}

/// Long phrase for detail surfaces: `BARU SAHAJA`, `{n} MINIT LALU`,
/// `{h} JAM LALU`, `{d} HARI LALU`.
pub fn age_long(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "BARU SAHAJA".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} MINIT LALU");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} JAM LALU");
    }
    format!("{} HARI LALU", hours / 24)
}

//! New-signal alerting.

use tracing::info;

use radar_core::Signal;

/// Receiver for new-signal alerts.
///
/// Implementations deliver the notification however the platform allows.
/// When no channel is available, use [`NullAlerts`]; alerting is skipped
/// silently, never retried.
pub trait AlertSink: Send + Sync {
    /// Deliver an alert for a newly active signal.
    fn notify(&self, signal: &Signal);
}

/// Alert body text.
pub fn alert_body(signal: &Signal) -> String {
    format!(
        "{} baru siar {} ({} pax)!",
        signal.name, signal.food_desc, signal.pax
    )
}

/// Delivers alerts through the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn notify(&self, signal: &Signal) {
        info!(id = signal.id, "Rezeki alert: {}", alert_body(signal));
    }
}

/// Drops alerts. Used when the notification channel is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAlerts;

impl AlertSink for NullAlerts {
    fn notify(&self, _signal: &Signal) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use radar_core::SignalStatus;

    #[test]
    fn test_alert_body() {
        let signal = Signal {
            id: 3,
            name: "SURAU KLCC".to_string(),
            lat: 3.1577,
            lng: 101.7119,
            food_desc: "Mee Goreng Mamak".to_string(),
            pax: 50,
            status: SignalStatus::Active,
            last_updated: Utc::now(),
        };
        assert_eq!(
            alert_body(&signal),
            "SURAU KLCC baru siar Mee Goreng Mamak (50 pax)!"
        );
    }
}

//! Outbound navigation and share links.
//!
//! Fire-and-forget side effects: the core hands the URL to the caller and
//! never hears back.

use radar_core::{Coordinate, Signal};

/// Where a navigation link will be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Handheld devices get the Waze deep link.
    Mobile,
    /// Everything else gets Google Maps directions.
    Desktop,
}

/// Waze deep link for turn-by-turn navigation.
pub fn waze_url(position: Coordinate) -> String {
    format!(
        "https://www.waze.com/ul?ll={},{}&navigate=yes",
        position.lat, position.lng
    )
}

/// Google Maps directions link.
pub fn gmaps_url(position: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        position.lat, position.lng
    )
}

/// Navigation link keyed off the device platform.
pub fn navigation_url(platform: Platform, position: Coordinate) -> String {
    match platform {
        Platform::Mobile => waze_url(position),
        Platform::Desktop => gmaps_url(position),
    }
}

/// Share text for messaging apps.
pub fn share_text(signal: &Signal) -> String {
    format!(
        "🕌 {} ada {} untuk {} orang!\n\n📍 Pergi sekarang: {}\n\n🟢 Rezeki Radar — Kill Hunger. Kill Waste.",
        signal.name,
        signal.food_desc,
        signal.pax,
        waze_url(signal.position())
    )
}

/// WhatsApp share link carrying the templated text.
pub fn whatsapp_url(signal: &Signal) -> String {
    format!(
        "https://wa.me/?text={}",
        urlencoding::encode(&share_text(signal))
    )
}

//! Telephony and mapping deep links
//!
//! Phone numbers and captured coordinates are exposed to the device as
//! opaque deep-link strings and consumed verbatim by the platform.

/// `tel:` deep link for a stored (digits-only) phone number
pub fn tel_link(phone: &str) -> String {
    format!("tel:{phone}")
}

/// Maps deep link for a captured `latitude,longitude` pair
pub fn maps_link(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps?q={latitude},{longitude}")
}

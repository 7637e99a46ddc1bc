//! Display-ready site records derived from raw map features.

use serde::Serialize;

use crate::geo::Location;

/// Display radius assigned to a site at distance zero, in pixels.
pub const MIN_DISTANCE_PIXEL: f64 = 20.0;
/// Display radius assigned to a site at the configured maximum distance.
pub const MAX_DISTANCE_PIXEL: f64 = 50.0;

/// One point of interest, positioned relative to the user's location.
///
/// Serializes as the wire shape consumed by the compass frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    pub bearing: f64,
    pub distance: f64,
    pub distance_text: String,
    pub distance_pixel: f64,
    pub name: String,
    pub website: String,
    pub lon: f64,
    pub lat: f64,
    pub address: String,
}

impl Site {
    /// Derive a site record from a point and the user's reference location.
    ///
    /// `max_distance_km` must be positive; the display radius interpolation
    /// divides by it. The radius is deliberately unclamped: a site beyond the
    /// configured maximum lands outside the `20..=50` pixel band.
    #[must_use]
    pub fn new(site_location: Location, reference: Location, max_distance_km: f64) -> Self {
        let distance = reference.distance_km(site_location);

        let mut bearing = reference.bearing_deg(site_location);
        if bearing < 0.0 {
            bearing += 360.0;
        }

        // Show the first decimal place for distances under 2 km.
        let distance_text = if distance < 2.0 {
            format!("{distance:.1}")
        } else {
            format!("{distance:.0}")
        };

        let distance_pixel = MIN_DISTANCE_PIXEL
            + (MAX_DISTANCE_PIXEL - MIN_DISTANCE_PIXEL) * distance / max_distance_km;

        Self {
            bearing,
            distance,
            distance_text,
            distance_pixel,
            name: String::new(),
            website: String::new(),
            lon: site_location.lon.0,
            lat: site_location.lat.0,
            address: String::new(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// A geographic position in `(latitude, longitude)` order.
///
/// This is the order used everywhere inside the locator. Services that speak
/// `[lng, lat]` go through [`LngLat`] and must convert explicitly.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn as_lat_lng(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// A position in service order: `[longitude, latitude]`.
///
/// Serializes as a bare two-element array, matching route payloads.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Swaps into `(lat, lng)` order.
    pub fn to_coordinate(self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

impl From<Coordinate> for LngLat {
    fn from(c: Coordinate) -> Self {
        Self::new(c.lng, c.lat)
    }
}

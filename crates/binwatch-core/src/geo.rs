//! Geographic types shared by the geolocation and reverse-geocoding helpers.

use serde::{Deserialize, Serialize};

/// A position reported by the platform's geolocation facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A normalized address produced by reverse geocoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Full display string for the location.
    pub adresse: String,
    /// Street name, falling back through coarser subdivisions when the
    /// geocoder has no street-level data.
    pub rue: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
}

//! Best-effort reverse geocoding against the public Nominatim service.

use binwatch_core::error::{BinwatchError, Result};
use binwatch_core::geo::Address;
use serde_json::Value;
use tracing::warn;

/// The public OpenStreetMap Nominatim reverse endpoint.
pub const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

// Nominatim's usage policy requires an identifying user agent.
const USER_AGENT: &str = "binwatch/0.1 (waste-bin monitoring client)";

/// Reverse geocoder turning coordinates into a normalized address.
///
/// This is address enrichment, not a core operation: every failure is
/// swallowed and reported as an absent result.
#[derive(Clone)]
pub struct Geocoder {
    http: reqwest::Client,
    base_url: String,
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder {
    /// Creates a geocoder against the public Nominatim service.
    pub fn new() -> Self {
        Self::with_base_url(NOMINATIM_REVERSE_URL)
    }

    /// Creates a geocoder against a custom endpoint (tests, self-hosted
    /// Nominatim).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolves coordinates to an address.
    ///
    /// Returns `None` on any failure (network error, non-success status,
    /// malformed response); a warning is logged but no error propagates.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Option<Address> {
        match self.try_reverse(latitude, longitude).await {
            Ok(address) => Some(address),
            Err(err) => {
                warn!(%err, latitude, longitude, "reverse geocoding failed");
                None
            }
        }
    }

    async fn try_reverse(&self, latitude: f64, longitude: f64) -> Result<Address> {
        let response = self
            .http
            .get(&self.base_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", "18".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BinwatchError::http(
                status.as_u16(),
                "reverse geocoding request rejected",
            ));
        }

        let data: Value = response.json().await?;
        parse_address(&data).ok_or_else(|| {
            BinwatchError::transport("geocoder response carried no display_name")
        })
    }
}

/// Extracts the normalized address from a Nominatim response.
///
/// The street name falls back through increasingly coarse subdivisions
/// (road, suburb, neighbourhood, city district) and the city through
/// city then town.
fn parse_address(data: &Value) -> Option<Address> {
    let adresse = data.get("display_name")?.as_str()?.to_string();
    let address = data.get("address");

    let pick = |names: &[&str]| -> Option<String> {
        let fields = address?;
        names
            .iter()
            .find_map(|name| fields.get(name).and_then(Value::as_str))
            .map(str::to_string)
    };

    Some(Address {
        adresse,
        rue: pick(&["road", "suburb", "neighbourhood", "city_district"]),
        ville: pick(&["city", "town"]),
        code_postal: pick(&["postcode"]),
    })
}

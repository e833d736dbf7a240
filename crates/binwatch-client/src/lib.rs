//! HTTP client for the waste-bin monitoring backend.
//!
//! [`ApiClient`] is the single point of outbound communication: it attaches
//! the stored authentication token, normalizes request/response encoding,
//! and owns the session lifecycle (login persists, logout always clears).
//! Endpoint wrappers live in the `auth`, `images`, `dashboard`, and `dl`
//! modules; geolocation and reverse geocoding helpers are standalone.
//!
//! ```no_run
//! use std::sync::Arc;
//! use binwatch_client::{ApiClient, Credentials};
//! use binwatch_core::{ClientConfig, MemorySessionStore};
//!
//! # async fn run() -> binwatch_core::Result<()> {
//! let client = ApiClient::new(ClientConfig::default(), Arc::new(MemorySessionStore::new()));
//! client.login(&Credentials::new("marie", "secret")).await?;
//! let images = client.get_images(&Default::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod dl;
pub mod geocode;
pub mod geolocation;
pub mod images;
pub mod request;

pub use crate::auth::{Credentials, RegisterRequest};
pub use crate::client::ApiClient;
pub use crate::geocode::Geocoder;
pub use crate::geolocation::{GeolocationOptions, LocationProvider, current_location};
pub use crate::images::UploadFile;
pub use crate::request::{ApiResponse, Method, MultipartForm, RequestBody, RequestOptions};

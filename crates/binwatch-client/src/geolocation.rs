//! Geolocation seam.
//!
//! The platform's position-query facility (a browser-style
//! capability-check-then-callback API, a GPS daemon, ...) is wrapped behind
//! the [`LocationProvider`] trait so the client stays testable. The helper
//! turns the provider call into a single awaitable result with the options
//! the original client used: high accuracy preferred, a 10 second timeout,
//! and acceptance of a cached position up to 60 seconds old.

use std::time::Duration;

use async_trait::async_trait;
use binwatch_core::error::{BinwatchError, Result};
use binwatch_core::geo::Coordinates;

/// Options forwarded to the platform's position query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    /// Prefer a high-accuracy reading when the platform offers the choice.
    pub enable_high_accuracy: bool,
    /// How long to wait for a position before giving up.
    pub timeout: Duration,
    /// Maximum acceptable age of a cached position.
    pub maximum_age: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

/// A platform position source.
///
/// Implementations report their own failures (permission denied, position
/// unavailable) as errors; the timeout is enforced by
/// [`current_location`], not by the provider.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self, options: &GeolocationOptions) -> Result<Coordinates>;
}

/// Queries the current position through the given provider.
///
/// # Errors
///
/// Returns a [`BinwatchError::Capability`] error when no provider is
/// available (the platform has no geolocation facility) or when the provider
/// does not answer within `options.timeout`. Provider-reported failures
/// propagate unchanged.
pub async fn current_location(
    provider: Option<&dyn LocationProvider>,
    options: GeolocationOptions,
) -> Result<Coordinates> {
    let Some(provider) = provider else {
        return Err(BinwatchError::capability(
            "geolocation is not supported on this platform",
        ));
    };

    match tokio::time::timeout(options.timeout, provider.current_position(&options)).await {
        Ok(result) => result,
        Err(_) => Err(BinwatchError::capability(format!(
            "geolocation timed out after {:?}",
            options.timeout
        ))),
    }
}

//! Dashboard statistics, per-street analysis, and CSV export endpoints.

use binwatch_core::error::Result;
use binwatch_core::image::{ImageFilters, StatsFilters};

use crate::client::ApiClient;
use crate::request::{ApiResponse, RequestOptions};

impl ApiClient {
    /// Fetches the dashboard statistics, optionally filtered by city and
    /// neighborhood.
    pub async fn get_dashboard_stats(&self, filters: &StatsFilters) -> Result<ApiResponse> {
        self.request(
            "/dashboard-stats/",
            RequestOptions::get().query(filters.to_query_pairs()),
        )
        .await
    }

    /// Fetches the per-street analysis.
    pub async fn get_rue_analysis(&self) -> Result<ApiResponse> {
        self.request("/rue-analysis/", RequestOptions::get()).await
    }

    /// Fetches the most recent uploads.
    pub async fn get_recent_uploads(&self) -> Result<ApiResponse> {
        self.request("/recent-uploads/", RequestOptions::get())
            .await
    }

    /// Fetches the city-hall dashboard data (with coordinates).
    pub async fn get_dashboard_mairie(&self) -> Result<ApiResponse> {
        self.request("/dashboard/mairie/", RequestOptions::get())
            .await
    }

    /// Downloads the CSV export as raw bytes.
    ///
    /// Bypasses JSON decoding entirely; the bytes are handed to the caller
    /// untouched.
    pub async fn export_csv(&self, filters: &ImageFilters) -> Result<Vec<u8>> {
        self.request_bytes("/export-csv/", &filters.to_query_pairs())
            .await
    }
}

//! Deep-learning endpoints: opaque remote calls to the backend's image
//! classifier.

use binwatch_core::error::Result;

use crate::client::ApiClient;
use crate::request::{ApiResponse, RequestBody, RequestOptions};

/// Default number of images for a batch-processing run.
pub const DEFAULT_BATCH_PROCESS_LIMIT: u32 = 50;
/// Default number of recent predictions to fetch.
pub const DEFAULT_RECENT_PREDICTIONS_LIMIT: u32 = 20;

impl ApiClient {
    /// Fetches the deep-learning model statistics.
    pub async fn get_dl_stats(&self) -> Result<ApiResponse> {
        self.request("/dl/stats/", RequestOptions::get()).await
    }

    /// Runs the model on a single image.
    pub async fn process_dl_image(&self, image_id: u64) -> Result<ApiResponse> {
        self.request(
            "/dl/process-image/",
            RequestOptions::post(RequestBody::Json(
                serde_json::json!({ "image_id": image_id }),
            )),
        )
        .await
    }

    /// Runs the model on a batch of unprocessed images.
    ///
    /// `limit` caps the batch size; `None` uses
    /// [`DEFAULT_BATCH_PROCESS_LIMIT`].
    pub async fn batch_process_dl(&self, limit: Option<u32>) -> Result<ApiResponse> {
        let limit = limit.unwrap_or(DEFAULT_BATCH_PROCESS_LIMIT);
        self.request(
            "/dl/batch-process/",
            RequestOptions::post(RequestBody::Json(serde_json::json!({ "limit": limit }))),
        )
        .await
    }

    /// Fetches the model's most recent predictions.
    ///
    /// `limit` caps the count; `None` uses
    /// [`DEFAULT_RECENT_PREDICTIONS_LIMIT`].
    pub async fn get_recent_dl_predictions(&self, limit: Option<u32>) -> Result<ApiResponse> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_PREDICTIONS_LIMIT);
        self.request(
            "/dl/recent-predictions/",
            RequestOptions::get().query(vec![("limit", limit.to_string())]),
        )
        .await
    }

    /// Fetches the model accuracy report.
    pub async fn get_dl_accuracy_report(&self) -> Result<ApiResponse> {
        self.request("/dl/accuracy-report/", RequestOptions::get())
            .await
    }
}

//! Image upload, listing, and annotation endpoints.

use std::path::Path;

use binwatch_core::error::Result;
use binwatch_core::image::{Annotation, ImageFilters, UploadMetadata};

use crate::client::ApiClient;
use crate::request::{ApiResponse, MultipartForm, RequestBody, RequestOptions};

/// A file to upload, held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, guessing its content type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

impl ApiClient {
    /// Uploads a single bin photo with its annotation and optional address
    /// metadata.
    ///
    /// Sent as a multipart form: `image`, `annotation`, plus only the
    /// metadata fields that are present.
    pub async fn upload_image(
        &self,
        file: UploadFile,
        annotation: Annotation,
        metadata: &UploadMetadata,
    ) -> Result<ApiResponse> {
        let mut form = MultipartForm::new()
            .file("image", file.file_name, file.content_type, file.bytes)
            .text("annotation", annotation.as_str());
        for (name, value) in metadata.to_form_fields() {
            form = form.text(name, value);
        }

        self.request("/upload/", RequestOptions::post(RequestBody::Multipart(form)))
            .await
    }

    /// Uploads a ZIP of images in one batch.
    ///
    /// `quartier` and `ville` tag every image in the archive and are always
    /// sent.
    pub async fn upload_batch_zip(
        &self,
        file: UploadFile,
        quartier: &str,
        ville: &str,
    ) -> Result<ApiResponse> {
        let form = MultipartForm::new()
            .file("zip_file", file.file_name, file.content_type, file.bytes)
            .text("quartier", quartier)
            .text("ville", ville);

        self.request(
            "/batch-upload-zip/",
            RequestOptions::post(RequestBody::Multipart(form)),
        )
        .await
    }

    /// Lists images, with only the defined filters encoded as query
    /// parameters.
    pub async fn get_images(&self, filters: &ImageFilters) -> Result<ApiResponse> {
        self.request(
            "/images/",
            RequestOptions::get().query(filters.to_query_pairs()),
        )
        .await
    }

    /// Fetches the details of a single image.
    pub async fn get_image_detail(&self, image_id: u64) -> Result<ApiResponse> {
        self.request(&format!("/images/{}/", image_id), RequestOptions::get())
            .await
    }

    /// Updates an image's annotation.
    pub async fn annotate_image(
        &self,
        image_id: u64,
        annotation: Annotation,
    ) -> Result<ApiResponse> {
        self.request(
            &format!("/annotate/{}/", image_id),
            RequestOptions::put(RequestBody::Json(
                serde_json::json!({ "annotation": annotation }),
            )),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binwatch_core::config::ClientConfig;
    use binwatch_core::session::MemorySessionStore;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_uri: &str) -> ApiClient {
        ApiClient::new(
            ClientConfig::new(server_uri),
            Arc::new(MemorySessionStore::new()),
        )
    }

    #[tokio::test]
    async fn test_upload_image_is_multipart_without_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let file = UploadFile::new("bin.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
        client
            .upload_image(file, Annotation::Pleine, &UploadMetadata::default())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
        assert!(!content_type.contains("application/json"));
    }

    #[tokio::test]
    async fn test_upload_image_body_carries_annotation_and_present_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let metadata = UploadMetadata {
            ville: Some("Sarcelles".to_string()),
            ..Default::default()
        };
        let file = UploadFile::new("bin.jpg", "image/jpeg", vec![1, 2, 3]);
        client
            .upload_image(file, Annotation::Vide, &metadata)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"annotation\""));
        assert!(body.contains("vide"));
        assert!(body.contains("name=\"ville\""));
        assert!(body.contains("Sarcelles"));
        // Absent metadata fields leave no part behind.
        assert!(!body.contains("name=\"adresse\""));
        assert!(!body.contains("name=\"latitude\""));
    }

    #[tokio::test]
    async fn test_batch_zip_always_sends_quartier_and_ville() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/batch-upload-zip/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"processed": 10})))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let file = UploadFile::new("lot.zip", "application/zip", vec![0x50, 0x4B]);
        client
            .upload_batch_zip(file, "Les Flanades", "Sarcelles")
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"zip_file\""));
        assert!(body.contains("name=\"quartier\""));
        assert!(body.contains("name=\"ville\""));
    }

    #[tokio::test]
    async fn test_get_images_encodes_only_defined_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let filters = ImageFilters {
            ville: Some("Paris".to_string()),
            search: None,
            ..Default::default()
        };
        client.get_images(&filters).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("ville=Paris"));
    }

    #[tokio::test]
    async fn test_get_images_without_filters_has_no_query_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        client.get_images(&ImageFilters::default()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_annotate_image_puts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/annotate/7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        client.annotate_image(7, Annotation::Pleine).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body, json!({"annotation": "pleine"}));
        assert_eq!(
            requests[0].headers.get("content-type").unwrap(),
            "application/json"
        );
    }
}

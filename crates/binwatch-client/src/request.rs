//! Typed request configuration for the API client.
//!
//! The original options object was a bag of dynamic fields; here the method
//! set is enumerated and the body is a sum type, so the encoding rules (a
//! multipart body never carries the default JSON content type) are enforced
//! by construction rather than by runtime inspection.

use binwatch_core::error::{BinwatchError, Result};
use serde_json::Value;

/// The HTTP methods the backend API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single part of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// An inspectable multipart form, converted to the reqwest wire form at send
/// time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    fields: Vec<MultipartField>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(MultipartField::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a file field.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.fields.push(MultipartField::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        });
        self
    }

    /// The fields appended so far, in order.
    pub fn fields(&self) -> &[MultipartField] {
        &self.fields
    }

    /// Converts into a `reqwest` multipart form.
    ///
    /// # Errors
    ///
    /// Returns an error if a file field carries an unparsable content type.
    pub(crate) fn into_form(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for field in self.fields {
            form = match field {
                MultipartField::Text { name, value } => form.text(name, value),
                MultipartField::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let part = reqwest::multipart::Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&content_type)?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

/// The request body: absent, a JSON value, or a multipart form.
///
/// The two non-empty encodings are mutually exclusive per request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// Configuration for a single request: method, body, query parameters, and
/// header overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: RequestBody,
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: RequestBody) -> Self {
        Self {
            method: Method::Post,
            body,
            ..Self::default()
        }
    }

    pub fn put(body: RequestBody) -> Self {
        Self {
            method: Method::Put,
            body,
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            ..Self::default()
        }
    }

    /// Sets the query parameters.
    pub fn query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    /// Adds a header override. Caller-supplied headers win over the client's
    /// defaults on conflict.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A decoded response: a parsed JSON value or raw text, selected by the
/// response's declared content type. Never a mix.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

impl ApiResponse {
    /// Returns the JSON value, failing on a text response.
    pub fn into_json(self) -> Result<Value> {
        match self {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Text(_) => Err(BinwatchError::transport(
                "expected a JSON response but the backend sent non-JSON content",
            )),
        }
    }

    /// Returns the raw text, rendering a JSON response back to a string.
    pub fn into_text(self) -> String {
        match self {
            ApiResponse::Json(value) => value.to_string(),
            ApiResponse::Text(text) => text,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Text(_) => None,
        }
    }
}

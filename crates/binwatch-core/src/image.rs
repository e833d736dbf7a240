//! Domain types for bin images: annotations, listing filters, and upload
//! metadata.

use serde::{Deserialize, Serialize};

/// Human-assigned label on a bin photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Annotation {
    /// The bin is full.
    Pleine,
    /// The bin is empty.
    Vide,
}

impl Annotation {
    /// The wire value for this annotation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Annotation::Pleine => "pleine",
            Annotation::Vide => "vide",
        }
    }
}

/// Keeps a parameter only when it has a defined, non-empty value.
fn push_param(params: &mut Vec<(&'static str, String)>, name: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            params.push((name, value.clone()));
        }
    }
}

/// Filters for the image listing endpoint.
///
/// Absent and empty-string filters are omitted from the query string
/// entirely; the backend never sees empty or null parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageFilters {
    pub annotation: Option<Annotation>,
    pub classification: Option<String>,
    pub rue: Option<String>,
    pub ville: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl ImageFilters {
    /// Renders the filters as query pairs, skipping undefined values.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(annotation) = self.annotation {
            params.push(("annotation", annotation.as_str().to_string()));
        }
        push_param(&mut params, "classification", &self.classification);
        push_param(&mut params, "rue", &self.rue);
        push_param(&mut params, "ville", &self.ville);
        push_param(&mut params, "search", &self.search);
        push_param(&mut params, "ordering", &self.ordering);
        params
    }
}

/// Optional address metadata attached to a single-image upload.
///
/// String fields follow the same omission rule as filters; coordinates are
/// sent whenever they are present, including a legitimate `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadMetadata {
    pub adresse: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rue: Option<String>,
    pub ville: Option<String>,
}

impl UploadMetadata {
    /// Renders the metadata as multipart text fields, skipping absent values.
    pub fn to_form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_param(&mut fields, "adresse", &self.adresse);
        if let Some(latitude) = self.latitude {
            fields.push(("latitude", latitude.to_string()));
        }
        if let Some(longitude) = self.longitude {
            fields.push(("longitude", longitude.to_string()));
        }
        push_param(&mut fields, "rue", &self.rue);
        push_param(&mut fields, "ville", &self.ville);
        fields
    }
}

/// Filters for the dashboard statistics endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsFilters {
    pub ville: Option<String>,
    pub quartier: Option<String>,
}

impl StatsFilters {
    /// Renders the filters as query pairs, skipping undefined values.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "ville", &self.ville);
        push_param(&mut params, "quartier", &self.quartier);
        params
    }
}

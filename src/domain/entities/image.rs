use std::path::Path;

use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use serde::{Deserialize, Serialize};

#[derive(MultipartForm)]
pub struct ImageUploadForm {
    pub image: Option<TempFile>,
}

/// An upload that passed validation and is ready to be stored.
#[derive(Debug)]
pub struct ValidatedImage<'a> {
    pub source: &'a Path,
    pub extension: String,
    pub mime_type: String,
    pub size: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub success: bool,
    pub url: String,
    /// Same as `url`; the name the site's admin page reads.
    #[serde(rename = "secure_url")]
    pub secure_url: String,
    pub file_name: String,
}

impl ImageUploadResponse {
    pub fn new(url: String, file_name: String) -> Self {
        ImageUploadResponse {
            success: true,
            secure_url: url.clone(),
            url,
            file_name,
        }
    }
}

//! File uploads and file references on the Swarm network.

use std::path::{Path, PathBuf};

use reqwest::multipart;
use serde_json::Value;

use super::client::{read_json, ApiClient};
use super::error::ApiError;
use super::types::FileReference;

/// A file to upload, optionally published as a website bundle.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub path: PathBuf,
    /// Serve the uploaded archive as a website.
    pub website: bool,
}

impl FileUpload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            website: false,
        }
    }

    pub fn as_website(mut self) -> Self {
        self.website = true;
        self
    }
}

/// Build the multipart body for POST /files.
///
/// Part `file` carries the bytes under the original file name; the text part
/// `website=true` is only present for website uploads.
pub fn upload_form(file_name: &str, data: Vec<u8>, website: bool) -> Result<multipart::Form, ApiError> {
    let part = multipart::Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_str("application/octet-stream")?;

    let mut form = multipart::Form::new().part("file", part);
    if website {
        form = form.text("website", "true");
    }
    Ok(form)
}

/// Upload a file from disk.
///
/// POST /files with multipart form data. The backend's response is returned
/// as-is.
pub async fn upload_file(client: &ApiClient, upload: &FileUpload) -> Result<Value, ApiError> {
    let data = tokio::fs::read(&upload.path).await?;
    let file_name = file_name_of(&upload.path);
    log::info!(
        "Uploading {} ({} bytes{})",
        file_name,
        data.len(),
        if upload.website { ", website" } else { "" }
    );

    let form = upload_form(&file_name, data, upload.website)?;
    let resp = client.post_multipart("/files", form).await?;
    read_json(resp).await
}

/// GET /file-references.
pub async fn get_file_references(client: &ApiClient) -> Result<Vec<FileReference>, ApiError> {
    client.get_json("/file-references").await
}

/// DELETE /files/id/{id}.
pub async fn delete_file(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    client.delete(&format!("/files/id/{}", id)).await?;
    Ok(())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

//! Helpers shared by the HTML upload page and the JSON build API.

use axum::{
    body::Body,
    extract::{Multipart, multipart::MultipartError},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use build_manager::BuildRequest;
use std::path::Path;
use tokio_util::io::ReaderStream;
use util::filename::secure_filename;
use util::paths::{artifact_path, ensure_parent_dir, upload_path};
use uuid::Uuid;

use crate::state::AppState;

/// A file taken from the `file` part of a multipart form.
#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub bytes: axum::body::Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("Invalid filename")]
    InvalidFilename,

    #[error("{0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to save file")]
    Save(#[from] std::io::Error),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::NoFilePart | UploadError::NoSelectedFile | UploadError::InvalidFilename => {
                StatusCode::BAD_REQUEST
            }
            // 413 when the body limit was hit
            UploadError::Multipart(e) => e.status(),
            UploadError::Save(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Reads the first `file` part and sanitizes its client-side name.
///
/// Other fields are skipped. A `file` part without a filename counts as
/// missing, an empty filename as "no selected file".
pub async fn read_upload(multipart: &mut Multipart) -> Result<Upload, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let original = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        if original.is_empty() {
            return Err(UploadError::NoSelectedFile);
        }

        let filename = secure_filename(&original);
        if filename.is_empty() {
            return Err(UploadError::InvalidFilename);
        }

        let bytes = field.bytes().await?;
        return Ok(Upload { filename, bytes });
    }

    Err(UploadError::NoFilePart)
}

/// Writes the upload to `{uploads}/{random id}/{filename}` and returns the
/// build request for it. The build manager removes the random-id folder once
/// the build is over.
pub async fn save_upload(state: &AppState, upload: Upload) -> Result<BuildRequest, UploadError> {
    let upload_id = Uuid::new_v4().simple().to_string();
    let source = upload_path(state.upload_dir(), &upload_id, &upload.filename);

    ensure_parent_dir(&source)?;
    tokio::fs::write(&source, &upload.bytes).await?;

    tracing::info!(
        filename = %upload.filename,
        bytes = upload.bytes.len(),
        path = %source.display(),
        "Saved upload"
    );

    Ok(BuildRequest {
        scratch_dir: source.parent().map(Path::to_path_buf),
        source,
        source_name: upload.filename,
    })
}

/// Streams `{dir}/{filename}` as an attachment, or `None` if it is not a file.
pub async fn stream_artifact(dir: &Path, filename: &str) -> std::io::Result<Option<Response>> {
    let path = artifact_path(dir, filename);

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(m) if m.is_file() => m,
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let file = tokio::fs::File::open(&path).await?;
    let body = Body::from_stream(ReaderStream::new(file));

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(metadata.len()));

    Ok(Some((StatusCode::OK, headers, body).into_response()))
}

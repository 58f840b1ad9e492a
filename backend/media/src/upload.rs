//! Upload validation.
//!
//! Every image passes through [`validate_upload`] before an analyzer sees it:
//! the MIME type must be accepted and the payload must fit the size cap.
//! Rejected uploads never reach the analysis service.

use std::path::Path;

use bytes::Bytes;
use placefinder_core::{ImageUpload, PlacefinderError, UploadLimits};
use tokio::fs;
use tracing::{debug, warn};

use crate::mime_detect::{detect_mime_type, sniff_image_mime};

const OCTET_STREAM: &str = "application/octet-stream";

/// Validate raw upload bytes against `limits`. The type is checked before the size.
pub fn validate_upload(
    source: &str,
    mime: &str,
    bytes: impl Into<Bytes>,
    limits: &UploadLimits,
) -> Result<ImageUpload, PlacefinderError> {
    let bytes = bytes.into();
    check_type(mime, limits)?;
    check_size(bytes.len() as u64, limits)?;

    let mime = normalize_mime(mime);
    debug!(source, mime = %mime, size = bytes.len(), "Upload accepted");
    Ok(ImageUpload::new(source, mime, bytes))
}

/// Read an image from disk and validate it.
///
/// The size cap is enforced from file metadata, so oversized files are
/// rejected without being read.
pub async fn read_upload_file(
    path: &Path,
    limits: &UploadLimits,
) -> Result<ImageUpload, PlacefinderError> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|e| PlacefinderError::FileReadError(format!("{}: {e}", path.display())))?;

    let by_extension = detect_mime_type(path);
    if by_extension != OCTET_STREAM {
        check_type(by_extension, limits)?;
    }
    check_size(metadata.len(), limits)?;

    let bytes = fs::read(path)
        .await
        .map_err(|e| PlacefinderError::FileReadError(format!("{}: {e}", path.display())))?;

    let mime = if by_extension == OCTET_STREAM {
        sniff_image_mime(&bytes).unwrap_or(OCTET_STREAM)
    } else {
        by_extension
    };
    validate_upload(&path.display().to_string(), mime, bytes, limits)
}

fn check_type(mime: &str, limits: &UploadLimits) -> Result<(), PlacefinderError> {
    if limits.accepts(mime) {
        return Ok(());
    }
    warn!(mime, "Rejected upload with unsupported type");
    Err(PlacefinderError::InvalidFileType {
        mime: mime.to_string(),
    })
}

fn check_size(size: u64, limits: &UploadLimits) -> Result<(), PlacefinderError> {
    if size <= limits.max_bytes {
        return Ok(());
    }
    warn!(size, max = limits.max_bytes, "Rejected oversized upload");
    Err(PlacefinderError::FileTooLarge {
        size,
        max: limits.max_bytes,
    })
}

/// Lowercase essence with `image/jpg` folded into `image/jpeg`.
fn normalize_mime(mime: &str) -> String {
    let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    if essence == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        essence
    }
}

//! Default landing image.
//!
//! The image is compiled into the binary so the landing page always has
//! something to show. Deployments may point at a different file instead.

use std::path::Path;

use placefinder_core::{ImageUpload, PlacefinderError};
use tokio::fs;
use tracing::{info, warn};

use crate::mime_detect::{detect_mime_type, is_image, sniff_image_mime};

pub const DEFAULT_IMAGE_BYTES: &[u8] = include_bytes!("../assets/default-location.png");
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Load the landing image: the configured override if any, else the bundled one.
///
/// Any problem with the override surfaces as `DefaultAssetLoadError`; the
/// bundled image is not substituted silently.
pub async fn load_default_image(override_path: Option<&Path>) -> Result<ImageUpload, PlacefinderError> {
    let Some(path) = override_path else {
        return Ok(ImageUpload::new("default", DEFAULT_IMAGE_MIME, DEFAULT_IMAGE_BYTES));
    };

    let bytes = fs::read(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to read default image");
        PlacefinderError::DefaultAssetLoadError(format!("{}: {e}", path.display()))
    })?;

    let mime = sniff_image_mime(&bytes).unwrap_or_else(|| detect_mime_type(path));
    if !is_image(mime) {
        return Err(PlacefinderError::DefaultAssetLoadError(format!(
            "{} is not an image ({mime})",
            path.display()
        )));
    }

    info!(path = %path.display(), mime, size = bytes.len(), "Loaded default image");
    Ok(ImageUpload::new("default", mime, bytes))
}

//! Image acquisition: MIME detection, upload validation and the bundled
//! default landing image.

pub mod default_asset;
pub mod mime_detect;
pub mod upload;

pub use default_asset::{load_default_image, DEFAULT_IMAGE_BYTES, DEFAULT_IMAGE_MIME};
pub use mime_detect::{detect_mime_type, is_image, sniff_image_mime};
pub use upload::{read_upload_file, validate_upload};

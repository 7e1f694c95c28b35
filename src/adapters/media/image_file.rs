//! Reads an image file and encodes it as a base64 data URI.

use crate::domain::DomainError;
use base64::{Engine, engine::general_purpose};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// MIME type from the file extension. Unknown extensions default to JPEG.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

/// Load `path` and return `data:<mime>;base64,<payload>`.
///
/// # Errors
/// `DomainError::Image` if the file is unreadable, empty, or larger than `max_bytes`.
pub async fn load_image_data_uri(path: &Path, max_bytes: u64) -> Result<String, DomainError> {
    let meta = fs::metadata(path)
        .await
        .map_err(|e| DomainError::Image(format!("{}: {}", path.display(), e)))?;
    if !meta.is_file() {
        return Err(DomainError::Image(format!(
            "{} is not a file",
            path.display()
        )));
    }
    if meta.len() == 0 {
        return Err(DomainError::Image(format!("{} is empty", path.display())));
    }
    if meta.len() > max_bytes {
        return Err(DomainError::Image(format!(
            "{} is {} bytes, limit is {}",
            path.display(),
            meta.len(),
            max_bytes
        )));
    }

    let bytes = fs::read(path)
        .await
        .map_err(|e| DomainError::Image(format!("{}: {}", path.display(), e)))?;
    let encoded = general_purpose::STANDARD.encode(&bytes);
    let mime = mime_for_path(path);

    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        encoded_len = encoded.len(),
        mime,
        "image encoded"
    );

    Ok(format!("data:{};base64,{}", mime, encoded))
}

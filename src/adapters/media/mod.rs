//! Media adapter. Turns a photo on disk into an inline image payload.

pub mod image_file;

pub use image_file::{load_image_data_uri, mime_for_path};

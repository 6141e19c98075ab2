//! Uploaded file metadata and the image upload predicates.
//!
//! File storage happens elsewhere; validation only sees what the upload
//! layer reports about the file.

use serde::{Deserialize, Serialize};

/// Largest accepted image upload, in bytes (around 2 MB).
pub const MAX_IMAGE_BYTES: u64 = 2_000_000;

const IMAGE_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Metadata describing a file attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub size: u64,
}

impl UploadedFile {
    /// Describe an upload with a declared MIME type.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: Some(mime_type.into()),
            size,
        }
    }

    fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Whether the attached file, if any, is a JPEG or PNG image.
///
/// The declared MIME type wins; the file extension is only consulted when
/// the upload layer could not determine one. A missing file passes.
pub fn file_is_image(file: Option<&UploadedFile>) -> bool {
    let Some(file) = file else {
        return true;
    };
    match file.mime_type.as_deref().map(str::trim) {
        Some(mime) if !mime.is_empty() => IMAGE_MIME_TYPES
            .iter()
            .any(|allowed| mime.eq_ignore_ascii_case(allowed)),
        _ => file
            .extension()
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str())),
    }
}

/// Whether the attached file, if any, fits within `limit_bytes`.
pub fn file_max_size(file: Option<&UploadedFile>, limit_bytes: u64) -> bool {
    file.is_none_or(|file| file.size <= limit_bytes)
}

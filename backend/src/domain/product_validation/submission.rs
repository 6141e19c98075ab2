//! Raw product submission as received from an inbound adapter.

use serde_json::{Map, Value};

use crate::domain::upload::UploadedFile;

use super::rules::ProductField;

/// Request body fields plus the optional uploaded image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSubmission {
    fields: Map<String, Value>,
    image: Option<UploadedFile>,
}

impl ProductSubmission {
    /// Wrap request body fields.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            image: None,
        }
    }

    /// Attach uploaded image metadata.
    #[must_use]
    pub fn with_image(mut self, image: UploadedFile) -> Self {
        self.image = Some(image);
        self
    }

    /// Raw value of `field`, if sent.
    pub fn field(&self, field: ProductField) -> Option<&Value> {
        self.fields.get(field.as_str())
    }

    /// Uploaded image metadata, if any.
    pub fn image(&self) -> Option<&UploadedFile> {
        self.image.as_ref()
    }
}

impl From<Map<String, Value>> for ProductSubmission {
    fn from(value: Map<String, Value>) -> Self {
        Self::new(value)
    }
}

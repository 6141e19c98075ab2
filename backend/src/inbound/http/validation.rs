//! Request-shape helpers for the product endpoints.
//!
//! These reject requests the rule runner cannot even look at: a path
//! identifier that is not a positive integer, or an `image` entry that does not
//! describe an upload. Field-level product rules live in the domain.

use serde_json::{Value, json};

use crate::domain::{Error, ProductId, UploadedFile};

/// Machine-readable codes attached to request-shape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidIdentifier,
    InvalidUpload,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidIdentifier => "invalid_identifier",
            ErrorCode::InvalidUpload => "invalid_upload",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const PRODUCT_ID: FieldName = FieldName::new("productId");
pub(crate) const IMAGE: FieldName = FieldName::new("image");

fn request_shape_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse the `{productId}` path segment.
pub(crate) fn parse_product_id(raw: &str) -> Result<ProductId, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| ProductId::new(value).ok())
        .ok_or_else(|| {
            request_shape_error(
                PRODUCT_ID,
                ErrorCode::InvalidIdentifier,
                format!("{} must be a positive integer", PRODUCT_ID.as_str()),
                raw,
            )
        })
}

/// Interpret the optional `image` entry of a request body.
///
/// `null` counts as no upload.
pub(crate) fn parse_uploaded_image(value: Option<Value>) -> Result<Option<UploadedFile>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => serde_json::from_value::<UploadedFile>(raw.clone())
            .map(Some)
            .map_err(|err| {
                request_shape_error(
                    IMAGE,
                    ErrorCode::InvalidUpload,
                    format!("{} must describe an uploaded file: {err}", IMAGE.as_str()),
                    &raw.to_string(),
                )
            }),
    }
}

//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialized shape and register under the domain
//! type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or a product rule rejected it.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Rejected product submissions list every failure under
/// `details.errors` as `{field, kind, message}` objects.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Product validation failed")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::UploadedFile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UploadedFile, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UploadedFileSchema {
    #[schema(example = "gazpacho.jpg")]
    file_name: String,
    /// Declared MIME type; the file extension is used when absent.
    #[schema(example = "image/jpeg")]
    mime_type: Option<String>,
    /// Size in bytes.
    #[schema(example = 154_000)]
    size: u64,
}

/// OpenAPI schema for a product submission body.
///
/// Fields are checked by the product rules rather than by deserialization,
/// so every entry accepts any JSON value on the wire.
#[derive(ToSchema)]
#[schema(as = crate::domain::ProductSubmission, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductSubmissionSchema {
    #[schema(example = "Gazpacho")]
    name: Option<String>,
    description: Option<String>,
    #[schema(example = 5.5)]
    price: Option<f64>,
    order: Option<i64>,
    availability: Option<bool>,
    highlighted: Option<bool>,
    product_category_id: Option<i64>,
    /// Creation only; update requests must not send it.
    restaurant_id: Option<i64>,
    image: Option<UploadedFileSchema>,
}

/// OpenAPI schema for [`crate::domain::ProductDraft`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ProductDraft, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductDraftSchema {
    #[schema(example = "Gazpacho")]
    name: String,
    description: Option<String>,
    #[schema(example = 5.5)]
    price: f64,
    order: Option<i64>,
    availability: Option<bool>,
    highlighted: bool,
    product_category_id: i64,
    restaurant_id: Option<i64>,
    image: Option<UploadedFileSchema>,
}

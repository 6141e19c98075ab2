//! Domain primitives, validation rules and ports.
//!
//! Purpose: define the product validation rules and the record lookups they
//! depend on, independent of HTTP and database concerns.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic error payload.
//! - Product, Restaurant and their identifiers: read-only records.
//! - product_validation: rule sets and the validator service.
//! - ports: lookup traits implemented by outbound adapters.

pub mod error;
pub mod ports;
pub mod product;
pub mod product_validation;
pub mod trace_id;
pub mod upload;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::product::{
    IdentifierError, Product, ProductCategoryId, ProductId, Restaurant, RestaurantId,
};
pub use self::product_validation::{
    FailureKind, FieldFailure, ProductDraft, ProductField, ProductSubmission,
    ProductValidationError, ProductValidator, ValidationFailures,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::{MAX_IMAGE_BYTES, UploadedFile};

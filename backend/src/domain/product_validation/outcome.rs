//! Results produced by running a product rule set.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::domain::upload::UploadedFile;
use crate::domain::{Error, ProductCategoryId, RestaurantId};

use super::rules::ProductField;

/// Category of a rejected rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Presence, type, length or range mismatch on a simple field.
    Format,
    /// Highlight quota reached or referenced restaurant missing.
    BusinessRule,
    /// Wrong image format or file too large.
    Upload,
    /// A record lookup failed.
    Lookup,
}

/// One rejected rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFailure {
    pub field: ProductField,
    pub kind: FailureKind,
    pub message: String,
}

impl FieldFailure {
    pub(super) fn new(field: ProductField, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// Every failure reported for a submission, in rule order.
///
/// ## Invariants
/// - Never empty: a passing submission yields a [`ProductDraft`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("product submission rejected with {} failure(s)", .0.len())]
pub struct ValidationFailures(Vec<FieldFailure>);

impl ValidationFailures {
    pub(super) fn from_failures(failures: Vec<FieldFailure>) -> Option<Self> {
        (!failures.is_empty()).then_some(Self(failures))
    }

    /// All failures in rule order.
    pub fn failures(&self) -> &[FieldFailure] {
        &self.0
    }

    /// Failures reported against `field`.
    pub fn for_field(&self, field: ProductField) -> impl Iterator<Item = &FieldFailure> {
        self.0.iter().filter(move |failure| failure.field == field)
    }

    /// Whether any failure was reported against `field`.
    pub fn has_field(&self, field: ProductField) -> bool {
        self.for_field(field).next().is_some()
    }

    /// Whether any failure carries exactly `message`.
    pub fn has_message(&self, message: &str) -> bool {
        self.0.iter().any(|failure| failure.message == message)
    }
}

impl From<ValidationFailures> for Error {
    fn from(value: ValidationFailures) -> Self {
        Error::invalid_request("Product validation failed").with_details(json!({
            "errors": value.0,
        }))
    }
}

/// Sanitized product fields from a submission that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
    pub highlighted: bool,
    pub product_category_id: ProductCategoryId,
    /// Present on creation only; updates may not move a product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<RestaurantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<UploadedFile>,
}

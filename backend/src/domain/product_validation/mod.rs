//! Product field validation for create and update submissions.
//!
//! [`ProductValidator`] runs a [`ProductRuleSet`] against a
//! [`ProductSubmission`]:
//!
//! 1. Rules are walked in order. Syntactic checks validate and sanitize the
//!    field; the sanitized value is what later rules and the resulting
//!    [`ProductDraft`] see. A rule stops at its first failing check.
//! 2. Checks that read existing records (restaurant existence, highlight
//!    quota) are deferred and awaited concurrently once the walk is done.
//!    They only run when the fields they read passed their own rules.
//! 3. Every failure is collected and reported in rule order.
//!
//! The highlight quota is a read-then-decide check. Two submissions racing
//! through validation for the same restaurant can both observe four
//! highlighted products and both pass; only a storage-level constraint
//! closes that gap.

mod coerce;
mod outcome;
mod rules;
mod submission;

use std::sync::Arc;

use futures_util::future::join_all;
use serde_json::{Map, Value};
use thiserror::Error as ThisError;
use tracing::{debug, error, warn};

use crate::domain::Error;
use crate::domain::ports::{ProductRepository, RestaurantRepository};
use crate::domain::upload::{file_is_image, file_max_size};
use crate::domain::{ProductId, RestaurantId};

pub use outcome::{FailureKind, FieldFailure, ProductDraft, ValidationFailures};
pub use rules::{
    CustomCheck, FieldCheck, FieldRule, HIGHLIGHTED_PRODUCT_QUOTA, IMAGE_FORMAT_MESSAGE,
    NAME_MAX_CHARS, Presence, ProductField, ProductRuleSet, QuotaMode, RESTAURANT_MISSING_MESSAGE,
};
pub use submission::ProductSubmission;

/// Message reported when the product being updated cannot be found.
pub const PRODUCT_MISSING_MESSAGE: &str = "The productId does not exist.";

/// Errors returned by [`ProductValidator`].
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ProductValidationError {
    /// One or more rules rejected the submission.
    #[error(transparent)]
    Rejected(#[from] ValidationFailures),
    /// Every rule passed but the sanitized fields did not form a draft.
    #[error("sanitized product fields could not be assembled: {message}")]
    Assembly { message: String },
}

impl From<ProductValidationError> for Error {
    fn from(value: ProductValidationError) -> Self {
        match value {
            ProductValidationError::Rejected(failures) => failures.into(),
            ProductValidationError::Assembly { message } => Error::internal(message),
        }
    }
}

/// Which operation a submission belongs to.
#[derive(Debug, Clone, Copy)]
enum Target {
    Create,
    Update(ProductId),
}

/// Record lookup deferred until the syntactic walk completes.
#[derive(Debug, Clone, Copy)]
enum PendingLookup {
    RestaurantExists(RestaurantId),
    QuotaForRestaurant(RestaurantId),
    QuotaForProduct {
        product_id: ProductId,
        restaurant_override: Option<RestaurantId>,
    },
}

/// Lookup requested by a rule during the walk.
///
/// The create quota rule runs before `restaurantId` is sanitized, so its
/// target restaurant is only known once every rule has been walked.
#[derive(Debug, Clone, Copy)]
enum DeferredLookup {
    Ready(PendingLookup),
    QuotaForCreate,
}

impl DeferredLookup {
    /// Pin the lookup to a record, or drop it when `restaurantId` did not
    /// survive its own rules.
    fn bind(self, sanitized: &Map<String, Value>) -> Option<PendingLookup> {
        match self {
            Self::Ready(lookup) => Some(lookup),
            Self::QuotaForCreate => {
                sanitized_restaurant_id(sanitized).map(PendingLookup::QuotaForRestaurant)
            }
        }
    }
}

#[derive(Debug)]
struct PendingCheck {
    position: usize,
    field: ProductField,
    lookup: PendingLookup,
    message: String,
}

enum RuleOutcome {
    Passed,
    Failed(FieldFailure),
    Deferred(DeferredLookup, String),
}

/// Validates product submissions against the create and update rule sets.
#[derive(Clone)]
pub struct ProductValidator {
    restaurants: Arc<dyn RestaurantRepository>,
    products: Arc<dyn ProductRepository>,
    create_rules: Arc<ProductRuleSet>,
    update_rules: Arc<ProductRuleSet>,
}

impl ProductValidator {
    /// Build a validator over the given lookup ports.
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            restaurants,
            products,
            create_rules: Arc::new(ProductRuleSet::create()),
            update_rules: Arc::new(ProductRuleSet::update()),
        }
    }

    /// Validate a product creation submission.
    pub async fn validate_create(
        &self,
        submission: &ProductSubmission,
    ) -> Result<ProductDraft, ProductValidationError> {
        self.run(&self.create_rules, Target::Create, submission).await
    }

    /// Validate an update submission for the product `product_id`.
    pub async fn validate_update(
        &self,
        product_id: ProductId,
        submission: &ProductSubmission,
    ) -> Result<ProductDraft, ProductValidationError> {
        self.run(&self.update_rules, Target::Update(product_id), submission)
            .await
    }

    async fn run(
        &self,
        rules: &ProductRuleSet,
        target: Target,
        submission: &ProductSubmission,
    ) -> Result<ProductDraft, ProductValidationError> {
        let mut sanitized = Map::new();
        let mut failures: Vec<(usize, FieldFailure)> = Vec::new();
        let mut deferred = Vec::new();

        for (position, rule) in rules.rules().iter().enumerate() {
            match evaluate_rule(rule, target, submission, &mut sanitized) {
                RuleOutcome::Passed => {}
                RuleOutcome::Failed(failure) => failures.push((position, failure)),
                RuleOutcome::Deferred(lookup, message) => {
                    deferred.push((position, rule.field, lookup, message));
                }
            }
        }

        let pending: Vec<PendingCheck> = deferred
            .into_iter()
            .filter_map(|(position, field, lookup, message)| {
                lookup.bind(&sanitized).map(|lookup| PendingCheck {
                    position,
                    field,
                    lookup,
                    message,
                })
            })
            .collect();

        let resolved = join_all(pending.iter().map(|check| async move {
            self.resolve(check)
                .await
                .map(|failure| (check.position, failure))
        }))
        .await;
        failures.extend(resolved.into_iter().flatten());
        failures.sort_by_key(|(position, _)| *position);

        let failures: Vec<_> = failures.into_iter().map(|(_, failure)| failure).collect();
        if let Some(rejected) = ValidationFailures::from_failures(failures) {
            debug!(
                failures = rejected.failures().len(),
                "product submission rejected"
            );
            return Err(rejected.into());
        }

        let mut draft: ProductDraft =
            serde_json::from_value(Value::Object(sanitized)).map_err(|err| {
                error!(error = %err, "sanitized product fields did not form a draft");
                ProductValidationError::Assembly {
                    message: err.to_string(),
                }
            })?;
        draft.image = submission.image().cloned();
        Ok(draft)
    }

    async fn resolve(&self, check: &PendingCheck) -> Option<FieldFailure> {
        let result = match check.lookup {
            PendingLookup::RestaurantExists(id) => self.restaurant_exists(id).await,
            PendingLookup::QuotaForRestaurant(id) => self.quota_reached(id).await,
            PendingLookup::QuotaForProduct {
                product_id,
                restaurant_override,
            } => match restaurant_override {
                Some(id) => self.quota_reached(id).await,
                None => self.product_quota_reached(product_id).await,
            },
        };

        match result {
            Ok(Verdict::Pass) => None,
            Ok(Verdict::Reject) => Some(FieldFailure::new(
                check.field,
                FailureKind::BusinessRule,
                check.message.clone(),
            )),
            Err(message) => {
                warn!(field = %check.field, error = %message, "product validation lookup failed");
                Some(FieldFailure::new(check.field, FailureKind::Lookup, message))
            }
        }
    }

    async fn restaurant_exists(&self, id: RestaurantId) -> Result<Verdict, String> {
        match self.restaurants.find_by_id(id).await {
            Ok(Some(_)) => Ok(Verdict::Pass),
            Ok(None) => Ok(Verdict::Reject),
            Err(err) => Err(err.to_string()),
        }
    }

    async fn quota_reached(&self, restaurant_id: RestaurantId) -> Result<Verdict, String> {
        let count = self
            .products
            .count_highlighted(restaurant_id)
            .await
            .map_err(|err| err.to_string())?;
        // Only an exact match rejects; a count already above the quota passes.
        if count == HIGHLIGHTED_PRODUCT_QUOTA {
            Ok(Verdict::Reject)
        } else {
            Ok(Verdict::Pass)
        }
    }

    async fn product_quota_reached(&self, product_id: ProductId) -> Result<Verdict, String> {
        let product = self
            .products
            .find_by_id(product_id)
            .await
            .map_err(|err| err.to_string())?
            .ok_or_else(|| PRODUCT_MISSING_MESSAGE.to_owned())?;
        self.quota_reached(product.restaurant_id).await
    }
}

enum Verdict {
    Pass,
    Reject,
}

fn evaluate_rule(
    rule: &FieldRule,
    target: Target,
    submission: &ProductSubmission,
    sanitized: &mut Map<String, Value>,
) -> RuleOutcome {
    let field = rule.field;
    let raw = submission.field(field).cloned();

    let mut value = match (rule.presence, raw) {
        (Presence::Required, None) => {
            return format_failure(field, format!("{field} is required"));
        }
        (Presence::Optional { .. }, None) | (Presence::Forbidden, None) => {
            return RuleOutcome::Passed;
        }
        (Presence::Optional { nullable, falsy }, Some(value))
            if (nullable && value.is_null()) || (falsy && coerce::is_falsy(&value)) =>
        {
            sanitized.insert(field.as_str().to_owned(), Value::Null);
            return RuleOutcome::Passed;
        }
        (Presence::DefaultNull, raw)
            if raw.as_ref().is_none_or(|value| {
                value.is_null() || value.as_str().is_some_and(str::is_empty)
            }) =>
        {
            sanitized.insert(field.as_str().to_owned(), Value::Null);
            return RuleOutcome::Passed;
        }
        (Presence::Forbidden, Some(_)) => {
            return format_failure(field, format!("{field} must not be present"));
        }
        (Presence::Any, raw) => raw.unwrap_or(Value::Null),
        (_, Some(value)) => value,
        (_, None) => Value::Null,
    };

    for check in &rule.checks {
        if let FieldCheck::Custom(custom) = check {
            return evaluate_custom(*custom, field, target, submission, sanitized);
        }
        value = match coerce::apply(field, *check, value) {
            Ok(next) => next,
            Err(message) => return format_failure(field, message),
        };
    }

    if rule.presence != Presence::Any {
        sanitized.insert(field.as_str().to_owned(), value);
    }
    RuleOutcome::Passed
}

fn evaluate_custom(
    check: CustomCheck,
    field: ProductField,
    target: Target,
    submission: &ProductSubmission,
    sanitized: &Map<String, Value>,
) -> RuleOutcome {
    let lookup = match check {
        CustomCheck::FileIsImage => {
            return upload_outcome(field, check, file_is_image(submission.image()));
        }
        CustomCheck::FileMaxSize { limit_bytes } => {
            return upload_outcome(
                field,
                check,
                file_max_size(submission.image(), limit_bytes),
            );
        }
        CustomCheck::RestaurantExists => sanitized_restaurant_id(sanitized)
            .map(|id| DeferredLookup::Ready(PendingLookup::RestaurantExists(id))),
        CustomCheck::HighlightQuota(_) if !is_highlighted(sanitized) => None,
        CustomCheck::HighlightQuota(QuotaMode::Create) => Some(DeferredLookup::QuotaForCreate),
        CustomCheck::HighlightQuota(QuotaMode::Update) => match target {
            Target::Update(product_id) => {
                Some(DeferredLookup::Ready(PendingLookup::QuotaForProduct {
                    product_id,
                    restaurant_override: requested_restaurant_id(submission),
                }))
            }
            Target::Create => None,
        },
    };

    match lookup {
        Some(lookup) => RuleOutcome::Deferred(lookup, check.message()),
        None => RuleOutcome::Passed,
    }
}

fn format_failure(field: ProductField, message: String) -> RuleOutcome {
    RuleOutcome::Failed(FieldFailure::new(field, FailureKind::Format, message))
}

fn upload_outcome(field: ProductField, check: CustomCheck, passed: bool) -> RuleOutcome {
    if passed {
        RuleOutcome::Passed
    } else {
        RuleOutcome::Failed(FieldFailure::new(
            field,
            FailureKind::Upload,
            check.message(),
        ))
    }
}

fn is_highlighted(sanitized: &Map<String, Value>) -> bool {
    sanitized
        .get(ProductField::Highlighted.as_str())
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn sanitized_restaurant_id(sanitized: &Map<String, Value>) -> Option<RestaurantId> {
    sanitized
        .get(ProductField::RestaurantId.as_str())
        .and_then(Value::as_i64)
        .and_then(|raw| RestaurantId::new(raw).ok())
}

/// Restaurant named by the raw submission, used as the update quota target.
///
/// The update rule set rejects any `restaurantId`, so a submission that
/// reaches this override is already failing; the quota is still reported
/// against the restaurant the client asked for.
fn requested_restaurant_id(submission: &ProductSubmission) -> Option<RestaurantId> {
    let raw = submission.field(ProductField::RestaurantId)?.clone();
    coerce::apply(
        ProductField::RestaurantId,
        FieldCheck::Int { min: Some(1) },
        raw,
    )
    .ok()
    .and_then(|value| value.as_i64())
    .and_then(|id| RestaurantId::new(id).ok())
}

#[cfg(test)]
mod tests;

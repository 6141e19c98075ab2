//! Declarative rule sets for product create and update submissions.
//!
//! A rule set is data: an ordered list of [`FieldRule`]s, each naming a
//! field, how its presence is treated, and the checks applied to it. The
//! runner in [`super::ProductValidator`] interprets the list; adding a rule
//! never needs new branching logic.

use std::fmt;

use serde::Serialize;

use crate::domain::upload::MAX_IMAGE_BYTES;

/// Most products a restaurant may flag as highlighted.
pub const HIGHLIGHTED_PRODUCT_QUOTA: u64 = 5;

/// Longest accepted product name, in characters.
pub const NAME_MAX_CHARS: usize = 255;

/// Failure message for the restaurant existence check.
pub const RESTAURANT_MISSING_MESSAGE: &str = "The restaurantId does not exist.";

/// Failure message for the image format check.
pub const IMAGE_FORMAT_MESSAGE: &str = "Please upload an image with format (jpeg, png).";

/// Request fields understood by the product rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductField {
    Name,
    Description,
    Price,
    Order,
    Availability,
    Highlighted,
    ProductCategoryId,
    RestaurantId,
    Image,
}

impl ProductField {
    /// Wire name of the field in request bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Order => "order",
            Self::Availability => "availability",
            Self::Highlighted => "highlighted",
            Self::ProductCategoryId => "productCategoryId",
            Self::RestaurantId => "restaurantId",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule treats a missing, null or falsy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The field must be present; `null` counts as present.
    Required,
    /// Absent values skip the checks. `nullable` also skips `null`;
    /// `falsy` skips `null`, `false`, `0` and `""`.
    Optional { nullable: bool, falsy: bool },
    /// Absent, `null` or `""` values become `null` and skip the checks.
    DefaultNull,
    /// The field must be absent.
    Forbidden,
    /// Checks always run; used by custom checks that read other state.
    Any,
}

/// Which product the highlight quota is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaMode {
    /// Use the submitted `restaurantId`.
    Create,
    /// Use the stored restaurant of the product being updated.
    Update,
}

/// Checks that need more than the field's own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomCheck {
    /// Reject a highlighted product once the restaurant reaches its quota.
    HighlightQuota(QuotaMode),
    /// The referenced restaurant must exist.
    RestaurantExists,
    /// The attached file must be a JPEG or PNG image.
    FileIsImage,
    /// The attached file must not exceed `limit_bytes`.
    FileMaxSize { limit_bytes: u64 },
}

impl CustomCheck {
    /// Message reported when the check rejects a submission.
    pub fn message(self) -> String {
        match self {
            Self::HighlightQuota(_) => {
                format!("There are already {HIGHLIGHTED_PRODUCT_QUOTA} highlighted products")
            }
            Self::RestaurantExists => RESTAURANT_MISSING_MESSAGE.to_owned(),
            Self::FileIsImage => IMAGE_FORMAT_MESSAGE.to_owned(),
            Self::FileMaxSize { limit_bytes } => {
                format!("Maximum file size of {}MB", limit_bytes / 1_000_000)
            }
        }
    }
}

/// Single step of a field rule. Validators reject; sanitizers rewrite the
/// value seen by later steps and by the sanitized output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldCheck {
    IsString,
    /// Character count bounds, inclusive.
    Length { min: usize, max: Option<usize> },
    /// Strip surrounding whitespace.
    Trim,
    /// Parse as a finite float no smaller than `min`.
    Float { min: f64 },
    /// Parse as an integer, optionally bounded below.
    Int { min: Option<i64> },
    /// Accept `true`/`false`/`1`/`0` in native or string form.
    Boolean,
    Custom(CustomCheck),
}

/// Ordered checks applied to one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: ProductField,
    pub presence: Presence,
    pub checks: Vec<FieldCheck>,
}

impl FieldRule {
    fn new(field: ProductField, presence: Presence, checks: Vec<FieldCheck>) -> Self {
        Self {
            field,
            presence,
            checks,
        }
    }

    fn custom(field: ProductField, check: CustomCheck) -> Self {
        Self::new(field, Presence::Any, vec![FieldCheck::Custom(check)])
    }
}

/// Ordered list of field rules for one kind of submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRuleSet {
    rules: Vec<FieldRule>,
}

impl ProductRuleSet {
    /// Rules applied to product creation requests.
    pub fn create() -> Self {
        use FieldCheck::{Boolean, Custom, Float, Int, IsString, Length, Trim};
        use ProductField as F;

        Self {
            rules: vec![
                FieldRule::new(
                    F::Name,
                    Presence::Required,
                    vec![IsString, Length { min: 1, max: Some(NAME_MAX_CHARS) }, Trim],
                ),
                description_rule(),
                FieldRule::new(F::Price, Presence::Required, vec![Float { min: 0.0 }]),
                FieldRule::new(F::Order, Presence::DefaultNull, vec![Int { min: None }]),
                availability_rule(),
                FieldRule::new(F::Highlighted, Presence::Required, vec![Boolean]),
                FieldRule::custom(F::Highlighted, CustomCheck::HighlightQuota(QuotaMode::Create)),
                FieldRule::new(F::ProductCategoryId, Presence::Required, vec![Int { min: Some(1) }]),
                FieldRule::new(F::RestaurantId, Presence::Required, vec![Int { min: Some(1) }]),
                FieldRule::new(F::RestaurantId, Presence::Any, vec![Custom(CustomCheck::RestaurantExists)]),
                FieldRule::custom(F::Image, CustomCheck::FileIsImage),
                FieldRule::custom(F::Image, CustomCheck::FileMaxSize { limit_bytes: MAX_IMAGE_BYTES }),
            ],
        }
    }

    /// Rules applied to product update requests.
    ///
    /// Unlike creation, the name is not trimmed and `restaurantId` may not
    /// be sent at all.
    pub fn update() -> Self {
        use FieldCheck::{Boolean, Float, Int, IsString, Length};
        use ProductField as F;

        Self {
            rules: vec![
                FieldRule::new(
                    F::Name,
                    Presence::Required,
                    vec![IsString, Length { min: 1, max: Some(NAME_MAX_CHARS) }],
                ),
                description_rule(),
                FieldRule::new(F::Price, Presence::Required, vec![Float { min: 0.0 }]),
                FieldRule::new(F::Order, Presence::DefaultNull, vec![Int { min: None }]),
                availability_rule(),
                FieldRule::new(F::Highlighted, Presence::Required, vec![Boolean]),
                FieldRule::custom(F::Highlighted, CustomCheck::HighlightQuota(QuotaMode::Update)),
                FieldRule::new(F::ProductCategoryId, Presence::Required, vec![Int { min: Some(1) }]),
                FieldRule::new(F::RestaurantId, Presence::Forbidden, Vec::new()),
                FieldRule::custom(F::Image, CustomCheck::FileIsImage),
                FieldRule::custom(F::Image, CustomCheck::FileMaxSize { limit_bytes: MAX_IMAGE_BYTES }),
            ],
        }
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Rules that apply to `field`, in evaluation order.
    pub fn rules_for(&self, field: ProductField) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter().filter(move |rule| rule.field == field)
    }
}

fn description_rule() -> FieldRule {
    FieldRule::new(
        ProductField::Description,
        Presence::Optional {
            nullable: true,
            falsy: true,
        },
        vec![
            FieldCheck::IsString,
            FieldCheck::Length { min: 1, max: None },
            FieldCheck::Trim,
        ],
    )
}

fn availability_rule() -> FieldRule {
    FieldRule::new(
        ProductField::Availability,
        Presence::Optional {
            nullable: false,
            falsy: false,
        },
        vec![FieldCheck::Boolean],
    )
}

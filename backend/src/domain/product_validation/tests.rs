//! Behaviour of the create and update product rule sets.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::{Map, Value, json};

use super::*;
use crate::domain::ports::{
    FixtureCatalogue, MockProductRepository, MockRestaurantRepository, ProductPersistenceError,
    RestaurantPersistenceError,
};
use crate::domain::upload::UploadedFile;
use crate::domain::{Product, ProductCategoryId, Restaurant};

const QUOTA_MESSAGE: &str = "There are already 5 highlighted products";

fn restaurant_id(raw: i64) -> RestaurantId {
    RestaurantId::new(raw).expect("valid restaurant id")
}

fn product_id(raw: i64) -> ProductId {
    ProductId::new(raw).expect("valid product id")
}

fn product(id: i64, restaurant: i64, highlighted: bool) -> Product {
    Product {
        id: product_id(id),
        restaurant_id: restaurant_id(restaurant),
        product_category_id: ProductCategoryId::new(1).expect("valid category id"),
        name: format!("Product {id}"),
        description: None,
        price: 3.0,
        order: Some(id),
        availability: true,
        highlighted,
    }
}

/// Restaurant 1 has `highlighted` highlighted products (ids from 100).
fn catalogue_with_highlighted(highlighted: i64) -> FixtureCatalogue {
    let mut catalogue = FixtureCatalogue::default()
        .with_restaurant(Restaurant {
            id: restaurant_id(1),
            name: "Casa Félix".to_owned(),
        })
        .with_restaurant(Restaurant {
            id: restaurant_id(2),
            name: "La Trattoria".to_owned(),
        })
        .with_product(product(1, 1, false));
    for offset in 0..highlighted {
        catalogue = catalogue.with_product(product(100 + offset, 1, true));
    }
    catalogue
}

fn validator_over(catalogue: FixtureCatalogue) -> ProductValidator {
    let catalogue = Arc::new(catalogue);
    ProductValidator::new(catalogue.clone(), catalogue)
}

fn mocked_validator(
    restaurants: MockRestaurantRepository,
    products: MockProductRepository,
) -> ProductValidator {
    ProductValidator::new(Arc::new(restaurants), Arc::new(products))
}

fn submission(body: Value) -> ProductSubmission {
    let Value::Object(fields) = body else {
        panic!("submission bodies must be JSON objects");
    };
    ProductSubmission::new(fields)
}

#[fixture]
fn create_body() -> Map<String, Value> {
    let Value::Object(fields) = json!({
        "name": "  Paella valenciana  ",
        "description": "Rice with chicken and rabbit",
        "price": "12.50",
        "availability": "true",
        "highlighted": false,
        "productCategoryId": "3",
        "restaurantId": 1,
    }) else {
        unreachable!("literal is an object");
    };
    fields
}

#[fixture]
fn update_body(create_body: Map<String, Value>) -> Map<String, Value> {
    let mut fields = create_body;
    fields.remove("restaurantId");
    fields
}

fn with_field(mut fields: Map<String, Value>, key: &str, value: Value) -> ProductSubmission {
    fields.insert(key.to_owned(), value);
    ProductSubmission::new(fields)
}

fn without_field(mut fields: Map<String, Value>, key: &str) -> ProductSubmission {
    fields.remove(key);
    ProductSubmission::new(fields)
}

fn rejected(result: Result<ProductDraft, ProductValidationError>) -> ValidationFailures {
    match result {
        Err(ProductValidationError::Rejected(failures)) => failures,
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn valid_create_submission_yields_sanitized_draft(create_body: Map<String, Value>) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let draft = validator
        .validate_create(&ProductSubmission::new(create_body))
        .await
        .expect("submission is valid");

    assert_eq!(draft.name, "Paella valenciana");
    assert_eq!(draft.price, 12.5);
    assert_eq!(draft.order, None);
    assert_eq!(draft.availability, Some(true));
    assert!(!draft.highlighted);
    assert_eq!(draft.product_category_id.get(), 3);
    assert_eq!(draft.restaurant_id, Some(restaurant_id(1)));
}

#[rstest]
#[case("name")]
#[case("price")]
#[case("highlighted")]
#[case("productCategoryId")]
#[case("restaurantId")]
#[tokio::test]
async fn create_rejects_missing_required_fields(
    create_body: Map<String, Value>,
    #[case] key: &str,
) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let failures = rejected(
        validator
            .validate_create(&without_field(create_body, key))
            .await,
    );

    let failure = failures
        .failures()
        .iter()
        .find(|failure| failure.field.as_str() == key)
        .expect("missing field is reported");
    assert_eq!(failure.kind, FailureKind::Format);
    assert_eq!(failure.message, format!("{key} is required"));
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_restaurant(create_body: Map<String, Value>) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let failures = rejected(
        validator
            .validate_create(&with_field(create_body, "restaurantId", json!(42)))
            .await,
    );

    assert_eq!(
        failures.failures(),
        &[FieldFailure::new(
            ProductField::RestaurantId,
            FailureKind::BusinessRule,
            RESTAURANT_MISSING_MESSAGE,
        )]
    );
}

#[rstest]
#[case(5, false)]
#[case(4, true)]
#[case(6, true)]
#[tokio::test]
async fn create_enforces_highlight_quota_at_exactly_five(
    create_body: Map<String, Value>,
    #[case] already_highlighted: i64,
    #[case] accepted: bool,
) {
    let validator = validator_over(catalogue_with_highlighted(already_highlighted));

    let result = validator
        .validate_create(&with_field(create_body, "highlighted", json!("true")))
        .await;

    if accepted {
        let draft = result.expect("quota not reached");
        assert!(draft.highlighted);
    } else {
        let failures = rejected(result);
        assert!(failures.has_message(QUOTA_MESSAGE));
        assert!(failures.has_field(ProductField::Highlighted));
    }
}

#[rstest]
#[tokio::test]
async fn create_quota_counts_the_submitted_restaurant(create_body: Map<String, Value>) {
    let mut restaurants = MockRestaurantRepository::new();
    restaurants.expect_find_by_id().returning(|id| {
        Ok(Some(Restaurant {
            id,
            name: "Casa Félix".to_owned(),
        }))
    });
    let mut products = MockProductRepository::new();
    products
        .expect_count_highlighted()
        .with(eq(restaurant_id(1)))
        .times(1)
        .returning(|_| Ok(5));
    let validator = mocked_validator(restaurants, products);

    let failures = rejected(
        validator
            .validate_create(&with_field(create_body, "highlighted", json!(true)))
            .await,
    );

    assert_eq!(
        failures.failures(),
        &[FieldFailure::new(
            ProductField::Highlighted,
            FailureKind::BusinessRule,
            QUOTA_MESSAGE,
        )]
    );
}

#[rstest]
#[tokio::test]
async fn quota_is_not_queried_for_unhighlighted_products(create_body: Map<String, Value>) {
    let mut restaurants = MockRestaurantRepository::new();
    restaurants
        .expect_find_by_id()
        .with(eq(restaurant_id(1)))
        .times(1)
        .returning(|id| {
            Ok(Some(Restaurant {
                id,
                name: "Casa Félix".to_owned(),
            }))
        });
    let mut products = MockProductRepository::new();
    products.expect_count_highlighted().never();

    let validator = mocked_validator(restaurants, products);

    validator
        .validate_create(&ProductSubmission::new(create_body))
        .await
        .expect("submission is valid");
}

#[rstest]
#[tokio::test]
async fn business_checks_skip_when_restaurant_id_is_malformed(create_body: Map<String, Value>) {
    let mut restaurants = MockRestaurantRepository::new();
    restaurants.expect_find_by_id().never();
    let mut products = MockProductRepository::new();
    products.expect_count_highlighted().never();
    let validator = mocked_validator(restaurants, products);

    let mut fields = create_body;
    fields.insert("highlighted".to_owned(), json!(true));
    let failures = rejected(
        validator
            .validate_create(&with_field(fields, "restaurantId", json!("abc")))
            .await,
    );

    assert_eq!(failures.failures().len(), 1);
    assert_eq!(failures.failures()[0].field, ProductField::RestaurantId);
    assert_eq!(failures.failures()[0].kind, FailureKind::Format);
}

#[rstest]
#[tokio::test]
async fn lookup_errors_surface_as_failures(create_body: Map<String, Value>) {
    let mut restaurants = MockRestaurantRepository::new();
    restaurants
        .expect_find_by_id()
        .returning(|_| Err(RestaurantPersistenceError::connection("pool exhausted")));
    let mut products = MockProductRepository::new();
    products
        .expect_count_highlighted()
        .returning(|_| Err(ProductPersistenceError::query("relation missing")));
    let validator = mocked_validator(restaurants, products);

    let failures = rejected(
        validator
            .validate_create(&with_field(create_body, "highlighted", json!(true)))
            .await,
    );

    let messages: Vec<_> = failures
        .failures()
        .iter()
        .map(|failure| (failure.field, failure.kind, failure.message.as_str()))
        .collect();
    assert_eq!(
        messages,
        vec![
            (
                ProductField::Highlighted,
                FailureKind::Lookup,
                "product repository query failed: relation missing",
            ),
            (
                ProductField::RestaurantId,
                FailureKind::Lookup,
                "restaurant repository connection failed: pool exhausted",
            ),
        ]
    );
}

#[rstest]
#[case(json!(-1), false)]
#[case(json!(0), true)]
#[case(json!("0.99"), true)]
#[case(json!("free"), false)]
#[tokio::test]
async fn price_must_be_non_negative(
    create_body: Map<String, Value>,
    #[case] price: Value,
    #[case] accepted: bool,
) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let result = validator
        .validate_create(&with_field(create_body, "price", price))
        .await;

    if accepted {
        result.expect("price is acceptable");
    } else {
        assert!(rejected(result).has_field(ProductField::Price));
    }
}

#[rstest]
#[case(json!(null), None)]
#[case(json!(""), None)]
#[case(json!("7"), Some(7))]
#[case(json!(2), Some(2))]
#[tokio::test]
async fn order_defaults_to_null_and_coerces_integers(
    create_body: Map<String, Value>,
    #[case] order: Value,
    #[case] expected: Option<i64>,
) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let draft = validator
        .validate_create(&with_field(create_body, "order", order))
        .await
        .expect("order is acceptable");

    assert_eq!(draft.order, expected);
}

#[rstest]
#[tokio::test]
async fn order_rejects_non_integers(create_body: Map<String, Value>) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let failures = rejected(
        validator
            .validate_create(&with_field(create_body, "order", json!("abc")))
            .await,
    );

    assert!(failures.has_field(ProductField::Order));
}

#[rstest]
#[case(json!(null))]
#[case(json!(""))]
#[case(json!(false))]
#[tokio::test]
async fn description_accepts_falsy_values(
    create_body: Map<String, Value>,
    #[case] description: Value,
) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let draft = validator
        .validate_create(&with_field(create_body, "description", description))
        .await
        .expect("falsy description is skipped");

    assert_eq!(draft.description, None);
}

#[rstest]
#[tokio::test]
async fn description_must_be_text_when_present(create_body: Map<String, Value>) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let failures = rejected(
        validator
            .validate_create(&with_field(create_body, "description", json!(12)))
            .await,
    );

    assert!(failures.has_field(ProductField::Description));
}

#[rstest]
#[tokio::test]
async fn name_longer_than_limit_is_rejected(create_body: Map<String, Value>) {
    let validator = validator_over(catalogue_with_highlighted(0));
    let long_name = "x".repeat(NAME_MAX_CHARS + 1);

    let failures = rejected(
        validator
            .validate_create(&with_field(create_body, "name", json!(long_name)))
            .await,
    );

    assert!(failures.has_field(ProductField::Name));
}

#[rstest]
#[case(UploadedFile::new("anim.gif", "image/gif", 1_000), Some(IMAGE_FORMAT_MESSAGE))]
#[case(UploadedFile::new("huge.png", "image/png", 2_500_000), Some("Maximum file size of 2MB"))]
#[case(UploadedFile::new("photo.jpg", "image/jpeg", 1_500_000), None)]
#[tokio::test]
async fn image_uploads_are_checked(
    create_body: Map<String, Value>,
    #[case] image: UploadedFile,
    #[case] expected: Option<&str>,
) {
    let validator = validator_over(catalogue_with_highlighted(0));
    let submission = ProductSubmission::new(create_body).with_image(image.clone());

    let result = validator.validate_create(&submission).await;

    match expected {
        Some(message) => {
            let failures = rejected(result);
            assert_eq!(
                failures.failures(),
                &[FieldFailure::new(
                    ProductField::Image,
                    FailureKind::Upload,
                    message
                )]
            );
        }
        None => {
            let draft = result.expect("image is acceptable");
            assert_eq!(draft.image, Some(image));
        }
    }
}

#[rstest]
#[tokio::test]
async fn failures_are_aggregated_in_rule_order() {
    let validator = validator_over(catalogue_with_highlighted(0));
    let body = submission(json!({
        "price": -3,
        "highlighted": "maybe",
        "restaurantId": 99,
    }))
    .with_image(UploadedFile::new("anim.gif", "image/gif", 3_000_000));

    let failures = rejected(validator.validate_create(&body).await);

    let fields: Vec<_> = failures.failures().iter().map(|f| f.field).collect();
    assert_eq!(
        fields,
        vec![
            ProductField::Name,
            ProductField::Price,
            ProductField::Highlighted,
            ProductField::ProductCategoryId,
            ProductField::RestaurantId,
            ProductField::Image,
            ProductField::Image,
        ]
    );
}

#[rstest]
#[tokio::test]
async fn valid_update_keeps_name_untrimmed(update_body: Map<String, Value>) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let draft = validator
        .validate_update(product_id(1), &ProductSubmission::new(update_body))
        .await
        .expect("update is valid");

    assert_eq!(draft.name, "  Paella valenciana  ");
    assert_eq!(draft.restaurant_id, None);
}

#[rstest]
#[case(json!(1))]
#[case(json!(null))]
#[case(json!("2"))]
#[tokio::test]
async fn update_rejects_any_restaurant_id(
    update_body: Map<String, Value>,
    #[case] restaurant: Value,
) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let failures = rejected(
        validator
            .validate_update(
                product_id(1),
                &with_field(update_body, "restaurantId", restaurant),
            )
            .await,
    );

    assert_eq!(
        failures.failures(),
        &[FieldFailure::new(
            ProductField::RestaurantId,
            FailureKind::Format,
            "restaurantId must not be present",
        )]
    );
}

#[rstest]
#[tokio::test]
async fn update_quota_uses_the_stored_restaurant(update_body: Map<String, Value>) {
    let validator = validator_over(catalogue_with_highlighted(5));

    let failures = rejected(
        validator
            .validate_update(
                product_id(1),
                &with_field(update_body, "highlighted", json!(true)),
            )
            .await,
    );

    assert_eq!(
        failures.failures(),
        &[FieldFailure::new(
            ProductField::Highlighted,
            FailureKind::BusinessRule,
            QUOTA_MESSAGE,
        )]
    );
}

#[rstest]
#[tokio::test]
async fn update_quota_counts_the_override_restaurant(update_body: Map<String, Value>) {
    let mut products = MockProductRepository::new();
    products.expect_find_by_id().never();
    products
        .expect_count_highlighted()
        .with(eq(restaurant_id(2)))
        .times(1)
        .returning(|_| Ok(0));
    let validator = mocked_validator(MockRestaurantRepository::new(), products);

    let mut fields = update_body;
    fields.insert("highlighted".to_owned(), json!(true));
    let failures = rejected(
        validator
            .validate_update(product_id(1), &with_field(fields, "restaurantId", json!(2)))
            .await,
    );

    assert!(!failures.has_field(ProductField::Highlighted));
    assert!(failures.has_field(ProductField::RestaurantId));
}

#[rstest]
#[tokio::test]
async fn update_of_missing_product_reports_lookup_failure(update_body: Map<String, Value>) {
    let validator = validator_over(catalogue_with_highlighted(0));

    let failures = rejected(
        validator
            .validate_update(
                product_id(404),
                &with_field(update_body, "highlighted", json!(true)),
            )
            .await,
    );

    assert_eq!(
        failures.failures(),
        &[FieldFailure::new(
            ProductField::Highlighted,
            FailureKind::Lookup,
            PRODUCT_MISSING_MESSAGE,
        )]
    );
}

//! Product validation HTTP handlers.
//!
//! ```text
//! POST /api/v1/products/validation
//! PUT  /api/v1/products/{productId}/validation
//! ```
//!
//! Both endpoints run the product rule sets against a JSON body and answer
//! with the sanitized draft. Nothing is persisted.

use actix_web::{post, put, web};
use serde_json::{Map, Value};

use crate::domain::{ProductDraft, ProductField, ProductSubmission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ProductDraftSchema, ProductSubmissionSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_product_id, parse_uploaded_image};

/// Split the `image` entry out of a request body.
fn into_submission(mut body: Map<String, Value>) -> ApiResult<ProductSubmission> {
    let image = parse_uploaded_image(body.remove(ProductField::Image.as_str()))?;
    let submission = ProductSubmission::new(body);
    Ok(match image {
        Some(image) => submission.with_image(image),
        None => submission,
    })
}

/// Validate a product creation request.
#[utoipa::path(
    post,
    path = "/api/v1/products/validation",
    description = "Run the product creation rules without storing anything.",
    request_body = ProductSubmissionSchema,
    responses(
        (status = 200, description = "Sanitized product fields", body = ProductDraftSchema),
        (status = 400, description = "Rejected submission", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "validateProductCreation"
)]
#[post("/products/validation")]
pub async fn validate_product_creation(
    state: web::Data<HttpState>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<ProductDraft>> {
    let submission = into_submission(payload.into_inner())?;
    let draft = state.products.validate_create(&submission).await?;
    Ok(web::Json(draft))
}

/// Validate an update request for an existing product.
#[utoipa::path(
    put,
    path = "/api/v1/products/{productId}/validation",
    description = "Run the product update rules without storing anything.",
    params(("productId" = i64, Path, description = "Product being updated")),
    request_body = ProductSubmissionSchema,
    responses(
        (status = 200, description = "Sanitized product fields", body = ProductDraftSchema),
        (status = 400, description = "Rejected submission", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "validateProductUpdate"
)]
#[put("/products/{product_id}/validation")]
pub async fn validate_product_update(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<ProductDraft>> {
    let product_id = parse_product_id(&path.into_inner())?;
    let submission = into_submission(payload.into_inner())?;
    let draft = state
        .products
        .validate_update(product_id, &submission)
        .await?;
    Ok(web::Json(draft))
}

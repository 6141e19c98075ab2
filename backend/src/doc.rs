//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the product validation and health endpoints together
//! with the schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI
//! serves it in debug builds and `cargo run --bin openapi-dump` prints it.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ProductDraftSchema, ProductSubmissionSchema, UploadedFileSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DeliverUS backend API",
        description = "Product request validation and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::validate_product_creation,
        crate::inbound::http::products::validate_product_update,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ProductDraftSchema,
        ProductSubmissionSchema,
        UploadedFileSchema
    )),
    tags(
        (name = "products", description = "Product request validation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

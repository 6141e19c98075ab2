//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use deliverus_backend::Trace;
#[cfg(debug_assertions)]
use deliverus_backend::doc::ApiDoc;
use deliverus_backend::domain::ports::FixtureCatalogue;
use deliverus_backend::inbound::http::error::route_not_found;
use deliverus_backend::inbound::http::health::{HealthState, live, ready};
use deliverus_backend::inbound::http::products::{
    validate_product_creation, validate_product_update,
};
use deliverus_backend::inbound::http::state::HttpState;
use deliverus_backend::outbound::persistence::{
    DieselProductRepository, DieselRestaurantRepository,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the validator to the Diesel adapters when a pool is configured,
/// otherwise to an empty in-memory catalogue.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("product lookups backed by PostgreSQL");
            HttpState::from_ports(
                Arc::new(DieselRestaurantRepository::new(pool.clone())),
                Arc::new(DieselProductRepository::new(pool.clone())),
            )
        }
        None => {
            warn!("no database configured; product lookups use the in-memory catalogue");
            let catalogue = Arc::new(FixtureCatalogue::default());
            HttpState::from_ports(catalogue.clone(), catalogue)
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(validate_product_creation)
        .service(validate_product_update);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig { bind_addr, .. } = config;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .disable_signals()
    .run();

    info!(%bind_addr, "server listening");
    health_state.mark_ready();
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    Ok(server)
}

/// Fail liveness as soon as `signal` resolves, then stop accepting
/// connections and let in-flight requests finish.
async fn drain_on<F>(signal: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        warn!(error = %err, "shutdown signal listener failed; draining now");
    }
    health_state.mark_unhealthy();
    info!("shutdown requested, draining connections");
    handle.stop(true).await;
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

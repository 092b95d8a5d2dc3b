//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{AppSettings, ServerConfig, SettingsError};
pub use state_builders::build_http_state;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pantry::Trace;
use pantry::doc::ApiDoc;
use pantry::inbound::http::clock_in::clock_in_scope;
use pantry::inbound::http::error::{json_config, query_config};
use pantry::inbound::http::health::{HealthState, live, ready};
use pantry::inbound::http::items::items_scope;
use pantry::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    swagger_ui: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        swagger_ui,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(items_scope())
        .service(clock_in_scope())
        .service(ready)
        .service(live)
        .configure(|cfg| {
            if swagger_ui {
                cfg.service(
                    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
                );
            }
        })
}

/// Construct an Actix HTTP server using the provided health state, handler
/// state and configuration.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        bind_addr,
        swagger_ui,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            swagger_ui,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

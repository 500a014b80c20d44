use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::user_service::UserService;
use crate::application::workflow_relay::WorkflowRelay;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::presentation::handlers;
use crate::presentation::middleware::RequestTrace;

/// JSON extractor settings that answer bad bodies with an envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| DomainError::InvalidBody(err.to_string()).into())
}

/// Everything mounted under `/api`.
pub fn configure_api<R: UserRepository + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health))
        .configure(handlers::users::configure::<R>)
        .configure(handlers::relay::configure);
}

pub async fn start_server<R: UserRepository + 'static>(
    config: AppConfig,
    users: UserService<R>,
    relay: WorkflowRelay,
) -> std::io::Result<()> {
    let bind_address = (config.host.clone(), config.port);
    tracing::info!(host = %bind_address.0, port = bind_address.1, "HTTP server starting");

    let users = web::Data::new(users);
    let relay = web::Data::new(relay);

    HttpServer::new(move || {
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(build_cors(&config))
            .wrap(RequestTrace)
            .app_data(users.clone())
            .app_data(relay.clone())
            .service(web::scope("/api").configure(configure_api::<R>))
    })
    .bind(bind_address)?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }

    cors
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}

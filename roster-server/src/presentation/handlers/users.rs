use actix_web::{HttpRequest, HttpResponse, web};
use roster_core::Envelope;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::request_id;
use crate::application::user_service::UserService;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;

pub fn configure<R: UserRepository + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(list_users::<R>))
            .route(web::post().to(create_user::<R>)),
    )
    .service(
        web::resource("/users/{id}")
            .route(web::get().to(get_user::<R>))
            .route(web::put().to(update_user::<R>))
            .route(web::delete().to(delete_user::<R>)),
    );
}

// A path segment that is not a UUID cannot name a stored user.
fn parse_user_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::UserNotFound(raw.to_string()))
}

async fn list_users<R: UserRepository + 'static>(
    req: HttpRequest,
    users: web::Data<UserService<R>>,
) -> Result<HttpResponse, DomainError> {
    let all = users.list_users().await?;

    info!(request_id = %request_id(&req), count = all.len(), "users listed");

    Ok(HttpResponse::Ok().json(Envelope::ok(all)))
}

async fn get_user<R: UserRepository + 'static>(
    users: web::Data<UserService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let id = parse_user_id(&path)?;
    let user = users.get_user(id).await?;
    Ok(HttpResponse::Ok().json(Envelope::ok(user)))
}

async fn create_user<R: UserRepository + 'static>(
    req: HttpRequest,
    users: web::Data<UserService<R>>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, DomainError> {
    let user = users.create_user(&payload).await?;

    info!(request_id = %request_id(&req), user_id = %user.id, "user created");

    Ok(HttpResponse::Created().json(Envelope::ok(user)))
}

async fn update_user<R: UserRepository + 'static>(
    req: HttpRequest,
    users: web::Data<UserService<R>>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, DomainError> {
    let id = parse_user_id(&path)?;
    let user = users.update_user(id, &payload).await?;

    info!(request_id = %request_id(&req), user_id = %id, "user updated");

    Ok(HttpResponse::Ok().json(Envelope::ok(user)))
}

async fn delete_user<R: UserRepository + 'static>(
    req: HttpRequest,
    users: web::Data<UserService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let id = parse_user_id(&path)?;
    users.delete_user(id).await?;

    info!(request_id = %request_id(&req), user_id = %id, "user deleted");

    Ok(HttpResponse::Ok().json(Envelope::<()>::empty()))
}

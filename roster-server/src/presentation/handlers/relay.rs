use actix_web::{HttpRequest, HttpResponse, web};
use roster_core::Envelope;
use serde_json::Value;
use tracing::info;

use super::request_id;
use crate::application::workflow_relay::WorkflowRelay;
use crate::domain::error::DomainError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/n8n-test", web::post().to(trigger_workflow));
}

async fn trigger_workflow(
    req: HttpRequest,
    relay: web::Data<WorkflowRelay>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, DomainError> {
    let data = relay.trigger(&payload).await?;

    info!(request_id = %request_id(&req), "submission relayed");

    Ok(HttpResponse::Ok().json(Envelope::ok(data)))
}

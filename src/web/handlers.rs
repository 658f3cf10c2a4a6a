use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::{json, Map, Value};
use tera::Context;
use uuid::Uuid;

use crate::web::error::ProxyError;
use crate::web::models::ChatRequest;
use crate::web::profiles::EndpointProfile;
use crate::AppState;

// Index page handler
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    let endpoints: Vec<Value> = data
        .profiles
        .iter()
        .map(|p| json!({ "name": p.name, "path": format!("/api{}", p.path) }))
        .collect();

    let mut context = Context::new();
    context.insert("endpoints", &endpoints);
    match data.tera.render("index.html", &context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(e) => {
            error!("Template error: {}", e);
            HttpResponse::InternalServerError().body("Template error")
        }
    }
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Chat proxy endpoint. The per-route [`EndpointProfile`] decides which field
/// is required, which persona and provider are used and how the reply is
/// named.
pub async fn chat(
    data: web::Data<AppState>,
    profile: web::Data<EndpointProfile>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let request: ChatRequest = serde_json::from_slice(&body)
        .map_err(|_| ProxyError::bad_request("Invalid request body"))?;
    let completion = profile.build_completion(&request, &data.cv)?;

    let request_id = Uuid::new_v4();
    let provider = data.providers.get(profile.provider);
    info!(
        "[{}] {} request via {} (model: {}, max_tokens: {})",
        request_id,
        profile.name,
        provider.name(),
        completion.model,
        completion.max_tokens
    );

    match provider.complete(&completion).await {
        Ok(text) => {
            let mut reply = Map::new();
            reply.insert(
                profile.response_field.to_string(),
                Value::String(text.trim().to_string()),
            );
            Ok(HttpResponse::Ok().json(reply))
        }
        Err(e) => {
            let err = ProxyError::from_provider(profile.failure_message, e);
            error!("[{}] {} failed: {}", request_id, profile.name, err);
            Err(err)
        }
    }
}

pub async fn method_not_allowed() -> Result<HttpResponse, ProxyError> {
    Err(ProxyError::MethodNotAllowed)
}

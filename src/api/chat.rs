//! REST API endpoint for the FAQ chatbot

use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiError;
use crate::service::ChatService;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

/// Answer a chat message from the FAQ store
#[utoipa::path(
    post,
    path = "/api/chat/db-response",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Response produced", body = ChatResponse),
        (status = 400, description = "Missing message")
    ),
    tag = "chat"
)]
#[post("/api/chat/db-response")]
pub async fn chat_response(
    service: web::Data<Arc<ChatService>>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let response = service.respond(&body.message).await?;
    Ok(HttpResponse::Ok().json(ChatResponse { response }))
}

/// Configure chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chat_response);
}

//! Live admin alert stream over server-sent events
//!
//! Connecting registers a listener with the alert registry; disconnecting
//! (dropping the response stream) removes it again.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::{get, web, HttpRequest, HttpResponse};
use futures::Stream;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::{require_admin, ApiError};
use crate::service::alert::{AdminAlert, AlertDispatcher};
use crate::service::AuthService;

/// One registered listener rendered as a server-sent event stream
struct AlertStream {
    listener_id: Uuid,
    rx: mpsc::UnboundedReceiver<AdminAlert>,
    dispatcher: Arc<AlertDispatcher>,
}

impl Stream for AlertStream {
    type Item = Result<web::Bytes, actix_web::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        this.rx.poll_recv(cx).map(|next| {
            next.map(|alert| {
                let payload = serde_json::to_string(&alert).unwrap_or_else(|_| "{}".to_string());
                Ok(web::Bytes::from(format!("data: {}\n\n", payload)))
            })
        })
    }
}

impl Drop for AlertStream {
    fn drop(&mut self) {
        self.dispatcher.registry().unsubscribe(self.listener_id);
        tracing::debug!(listener_id = %self.listener_id, "Admin alert stream closed");
    }
}

/// Stream flagged-record alerts to a connected admin
#[utoipa::path(
    get,
    path = "/api/admin/alerts/stream",
    responses(
        (status = 200, description = "Server-sent event stream of admin alerts"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "admin"
)]
#[get("/api/admin/alerts/stream")]
pub async fn alert_stream(
    dispatcher: web::Data<Arc<AlertDispatcher>>,
    auth: web::Data<Arc<AuthService>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_admin(auth.get_ref(), &req).await?;

    let (listener_id, rx) = dispatcher.registry().subscribe();

    tracing::info!(
        listener_id = %listener_id,
        listeners = dispatcher.registry().listener_count(),
        "Admin alert listener connected"
    );

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(AlertStream {
            listener_id,
            rx,
            dispatcher: Arc::clone(dispatcher.get_ref()),
        }))
}

/// Configure admin alert routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(alert_stream);
}

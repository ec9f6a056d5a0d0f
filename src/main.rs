use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod db;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");

    let db_pool = web::Data::from(Arc::clone(&state.db_pool));
    let auth_service = web::Data::new(Arc::clone(&state.auth_service));
    let journal_service = web::Data::new(Arc::clone(&state.journal_service));
    let assessment_service = web::Data::new(Arc::clone(&state.assessment_service));
    let chat_service = web::Data::new(Arc::clone(&state.chat_service));
    let directory_service = web::Data::new(Arc::clone(&state.directory_service));
    let alert_dispatcher = web::Data::new(Arc::clone(&state.alert_dispatcher));

    tracing::info!("Starting ChildGuard server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(db_pool.clone())
            .app_data(auth_service.clone())
            .app_data(journal_service.clone())
            .app_data(assessment_service.clone())
            .app_data(chat_service.clone())
            .app_data(directory_service.clone())
            .app_data(alert_dispatcher.clone())
            .configure(api::auth::configure)
            .configure(api::journal::configure)
            .configure(api::assessment::configure)
            .configure(api::chat::configure)
            .configure(api::directory::configure)
            .configure(api::alerts::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}

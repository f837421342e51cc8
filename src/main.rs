use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tokio::sync::watch;

use nutrak::config;
use nutrak::feed::FeedClient;
use nutrak::routes;
use nutrak::services::StatsAggregator;
use nutrak::tracker::{driver, StatsState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load configuration
    let config = config::Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("Starting nutrak on {}:{}", config.host, config.port);

    // Feed API client
    let feed = Arc::new(FeedClient::new(&config.feed).map_err(|e| {
        log::error!("Feed client error: {}", e);
        std::io::Error::other(e.to_string())
    })?);

    // Identity channel: routes write, the polling driver and snapshot
    // state read
    let (identity_tx, identity_rx) = watch::channel(config.fid);

    let state = Arc::new(StatsState::new(
        identity_rx.clone(),
        config.allowance.clone(),
    ));
    let aggregator = Arc::new(StatsAggregator::new(feed, state.clone(), &config));

    // Background refresh loop
    let driver_task = tokio::spawn(driver::run(
        aggregator,
        identity_rx,
        config.poll_interval,
    ));

    let state_data = web::Data::from(state);
    let identity_data = web::Data::new(identity_tx);
    let config_data = web::Data::new(config.clone());

    // Clone values for the closure
    let host = config.host.clone();
    let port = config.port;

    let server = HttpServer::new(move || {
        // CORS configuration - permissive, the snapshot surface is meant to
        // be consumed by frame frontends served from any origin
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            // Share snapshot state, identity channel and config with handlers
            .app_data(state_data.clone())
            .app_data(identity_data.clone())
            .app_data(config_data.clone())
            // Middleware
            .wrap(middleware::Logger::default())
            .wrap(cors)
            // Health check routes
            .service(
                web::scope("/health")
                    .route("", web::get().to(routes::health::liveness))
                    .route("/ready", web::get().to(routes::health::readiness)),
            )
            // API routes
            .configure(routes::stats::configure)
            .configure(routes::identity::configure)
    })
    .bind((host.as_str(), port))?
    .shutdown_timeout(30)
    .run();

    // Spawn graceful shutdown handler
    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        log::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    let result = server.await;

    // Stop future timer fires; results of fetches still in flight are
    // dropped with the task
    driver_task.abort();

    result
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                // Wait forever if signal handler fails
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

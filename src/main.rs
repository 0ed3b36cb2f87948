//! CaseDesk Server: case records, serial numbering and push fan-out.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing_subscriber::{EnvFilter, fmt};

use casedesk_api::AppState;
use casedesk_core::config::AppConfig;
use casedesk_core::error::AppError;
use casedesk_core::traits::{EndpointDirectory, PushGateway, SerialAllocator, UserDirectory};
use casedesk_database::repositories::{
    CaseRepository, EndpointRepository, PgSerialAllocator, UserRepository,
};
use casedesk_database::{CaseStore, DatabasePool};
use casedesk_service::{
    CaseEventPublisher, CaseService, CreationNotifier, EndpointService, HttpPushGateway,
    NotificationDispatcher, NotificationFormatter, NotificationRules,
};
use casedesk_worker::handlers::CaseCreatedNotificationHandler;
use casedesk_worker::{EventExecutor, EventRunner};

#[tokio::main]
async fn main() {
    let env = std::env::var("CASEDESK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CaseDesk v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let database = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        casedesk_database::migration::run_migrations(database.pool()).await?;
        tracing::info!("Database migrations complete");
    }

    // ── Step 2: Initialize repositories ──────────────────────────
    let pool = database.pool().clone();
    let case_store: Arc<dyn CaseStore> = Arc::new(CaseRepository::new(pool.clone()));
    let serials: Arc<dyn SerialAllocator> = Arc::new(PgSerialAllocator::new(pool.clone()));
    let directory: Arc<dyn UserDirectory> = Arc::new(UserRepository::new(pool.clone()));
    let endpoints: Arc<dyn EndpointDirectory> = Arc::new(EndpointRepository::new(pool));

    // ── Step 3: Event channel ────────────────────────────────────
    let (event_tx, event_rx) = mpsc::channel(config.worker.event_buffer.max(1));
    let events = if config.worker.enabled {
        CaseEventPublisher::new(event_tx)
    } else {
        tracing::info!("Background worker disabled; case events will not be published");
        CaseEventPublisher::disabled()
    };

    // ── Step 4: Initialize services ──────────────────────────────
    tracing::info!("Initializing services...");
    let case_service = Arc::new(CaseService::new(
        Arc::clone(&case_store),
        Arc::clone(&serials),
        Arc::clone(&directory),
        events,
    ));
    let endpoint_service = Arc::new(EndpointService::new(Arc::clone(&endpoints)));
    tracing::info!("Services initialized");

    // ── Step 5: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 6: Start background worker ──────────────────────────
    let worker_handle = if config.worker.enabled {
        tracing::info!("Starting background worker...");
        let mut executor = EventExecutor::new();

        if config.push.enabled {
            let gateway: Arc<dyn PushGateway> = Arc::new(HttpPushGateway::from_config(&config.push)?);
            let notifier = CreationNotifier::new(
                NotificationRules::new(Arc::clone(&directory)),
                NotificationDispatcher::from_config(gateway, Arc::clone(&endpoints), &config.push),
                NotificationFormatter::new(config.push.click_base_url.clone()),
            );
            executor.register(Arc::new(CaseCreatedNotificationHandler::new(notifier)));
            tracing::info!(gateway = %config.push.gateway_url, "Push notifications enabled");
        } else {
            tracing::info!("Push notifications disabled");
        }

        let runner = EventRunner::new(event_rx, Arc::new(executor), config.worker.clone());
        let worker_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            runner.run(worker_cancel).await;
        });

        tracing::info!("Background worker started");
        Some(handle)
    } else {
        drop(event_rx);
        None
    };

    // ── Step 7: Build and start HTTP server ──────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        database: Some(database.clone()),
        serials,
        case_service,
        endpoint_service,
    };

    let app = casedesk_api::build_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("CaseDesk server listening on {}", addr);

    // ── Step 8: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 9: Wait for background tasks ────────────────────────
    if let Some(handle) = worker_handle {
        tracing::info!("Waiting for background worker to drain...");
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Background worker did not stop within the grace period");
        }
    }

    database.close().await;
    tracing::info!("CaseDesk server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

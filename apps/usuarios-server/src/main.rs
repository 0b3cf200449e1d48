use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use usuarios_api::{build_router, AppState};
use usuarios_core::repositories::UserRepository;
use usuarios_core::services::ServiceOptions;
use usuarios_infrastructure::{create_pool, InMemoryUserRepository, PgUserRepository};
use usuarios_security::PasswordService;
use usuarios_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env included)
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = usuarios_shared::telemetry::init_telemetry(&config.log)?;

    info!(
        "{} starting ({} env, identifier: {})",
        config.app.name, config.app.env, config.service.identifier
    );

    let passwords = PasswordService::new(config.service.bcrypt_cost)?;
    let identifier = config.service.identifier;

    let (repo, pool) = if config.database.in_memory {
        info!("Using in-memory user storage");
        let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new(identifier));
        (repo, None)
    } else {
        info!("Connecting to database at {}...", config.database.display_target());
        let pool = create_pool(&config.database)
            .await
            .context("failed to create database pool")?;
        info!("Database connection established.");
        let repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone(), identifier));
        (repo, Some(pool))
    };

    let options = ServiceOptions {
        identifier,
        list_active_only: config.service.list_active_only,
        allow_delete: config.service.allow_delete,
        photo_url_prefix: config.service.photo_url_prefix.clone(),
    };
    let state = AppState::new(repo, passwords, options, &config.service.photo_dir);
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server.host '{}'", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
///
/// The SIGTERM handler is installed on call, before the future is polled.
fn shutdown_signal() -> impl Future<Output = ()> {
    #[cfg(unix)]
    let sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(|e| error!("Failed to install SIGTERM handler: {}", e))
        .ok();

    async move {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async move {
            match sigterm {
                Some(mut stream) => {
                    stream.recv().await;
                }
                None => std::future::pending::<()>().await,
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
            _ = terminate => info!("Received SIGTERM, shutting down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sigterm_triggers_shutdown() {
        let shutdown = shutdown_signal();

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), shutdown)
            .await
            .expect("shutdown future did not resolve on SIGTERM");
    }
}

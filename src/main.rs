use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use swiftmove_api::auth::{AuthConfig, AuthService};
use swiftmove_api::config::{init_tracing, load_config};
use swiftmove_api::services::AppServices;
use swiftmove_api::store::{DocumentStore, JsonFileStore, MemoryStore, Store};
use swiftmove_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    init_tracing(&config.log_level, config.log_json);

    info!(
        environment = %config.environment,
        backend = %config.store_backend,
        "starting swiftmove-api"
    );

    let backend: Arc<dyn DocumentStore> = match config.store_backend.as_str() {
        "json-file" => Arc::new(JsonFileStore::new(&config.data_dir)),
        _ => Arc::new(MemoryStore::new()),
    };
    let store = Store::new(backend);

    let auth = Arc::new(AuthService::new(
        AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            issuer: config.auth_issuer.clone(),
            token_expiry: Duration::from_secs(config.jwt_expiration_secs.max(0) as u64),
        },
        store.clone(),
    ));

    if config.seed_admin {
        let created = auth
            .seed_admin(
                &config.admin_name,
                &config.admin_username,
                &config.admin_password,
            )
            .await
            .context("failed to seed admin user")?;
        if !created {
            info!("users collection already populated, skipping admin seed");
        }
    }

    let services = AppServices::new(store.clone());
    let state = AppState {
        config: config.clone(),
        store,
        auth,
        services,
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(address = %addr, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c"),
        _ = terminate => info!("received terminate signal"),
    }
}

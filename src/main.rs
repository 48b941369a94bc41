use std::sync::Arc;

use burnbox::{
    api::{start_api_server, ApiState},
    auth::IdentityProviderClient,
    observability::{init_observability, log_config_info},
    services::SecretService,
    storage::{
        check_connection, create_pool, get_pool_stats, SqlxSecretRepository, SqlxUserRepository,
    },
    Config, Result, APP_NAME, VERSION,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from this same config, so report directly.
            eprintln!("{}: invalid configuration: {}", APP_NAME, e);
            return Err(e);
        }
    };

    init_observability(&config.observability)?;
    info!(app_name = APP_NAME, version = VERSION, "Starting burnbox");
    log_config_info(&config);

    let pool = create_pool(&config.database).await?;
    check_connection(&pool).await?;

    if let Some(idp) = IdentityProviderClient::from_config(&config.identity_provider)? {
        if let Err(e) = idp.handshake().await {
            error!(error = %e, "Identity provider handshake failed");
            pool.close().await;
            return Err(e);
        }
    }

    let service = SecretService::new(
        Arc::new(SqlxSecretRepository::new(pool.clone())),
        Arc::new(SqlxUserRepository::new(pool.clone())),
    )
    .with_storage_timeout(Some(config.database.storage_timeout()));

    let result = start_api_server(config.api.clone(), ApiState::new(service)).await;
    if let Err(e) = &result {
        error!(error = %e, "API server terminated with error");
    }

    let stats = get_pool_stats(&pool);
    info!(size = stats.size, idle = stats.idle, active = stats.active(), "Closing database pool");
    pool.close().await;
    info!("Shutdown complete");
    result
}

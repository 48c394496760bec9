use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cm_api::app::{create_app, AppState, ServiceConfigs};
use cm_api::config::Config;
use cm_infra::database::{DatabasePool, MySqlAccountRepository, MySqlProfileRepository};
use cm_infra::{FsAvatarStore, GravatarLocator, SmtpMailTransport};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    // `log` records from handlers are bridged into the subscriber by `init`
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.app.logging.level)),
        )
        .init();

    tracing::info!(environment = %config.environment(), "Starting Contacts API server");

    if config.app.jwt.is_using_default_secret() {
        if config.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        tracing::warn!("JWT_SECRET is not set; using the development default");
    }

    let pool = DatabasePool::new(&config.app.database)
        .await
        .context("failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("failed to apply database migrations")?;
    tracing::info!(pool = %pool.get_statistics(), "Database ready");

    let accounts = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));
    let profiles = Arc::new(MySqlProfileRepository::new(pool.get_pool().clone()));
    let mail_transport = Arc::new(
        SmtpMailTransport::new(&config.app.mail).context("failed to configure the SMTP transport")?,
    );
    let avatar_store = Arc::new(FsAvatarStore::new(config.app.avatar.media_root.clone()));
    let avatar_locator = Arc::new(GravatarLocator::default());

    let configs =
        ServiceConfigs::from_app_config(&config.app).context("invalid service configuration")?;
    let app_state = web::Data::new(
        AppState::build(
            accounts,
            profiles,
            mail_transport,
            avatar_locator,
            avatar_store,
            configs,
        )
        .context("failed to build application services")?,
    );

    let bind_address = config.bind_address();
    let environment = config.environment();
    let max_payload_size = config.max_payload_size();
    tracing::info!(address = %bind_address, "Binding HTTP server");

    HttpServer::new(move || create_app(app_state.clone(), environment, max_payload_size))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}

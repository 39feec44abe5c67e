use bazaar_core::application::{
    commands::users::CreateSuperuserCommand,
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
        util::SlugGenerator,
    },
    services::{ApplicationServices, ServiceDependencies},
};
use bazaar_core::config::AppConfig;
use bazaar_core::infrastructure::{
    database,
    repositories::{
        PostgresAddressRepository, PostgresCategoryRepository, PostgresProductRepository,
        PostgresTagRepository, PostgresUserRepository, PostgresUserSettingsRepository,
    },
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    system::{DefaultSlugGenerator, SystemClock},
};
use bazaar_core::presentation::http::{routes::build_router, state::HttpState};
use anyhow::{Context, Result, bail};
use sqlx::PgPool;
use std::{env, net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: bazaar_core [serve | create-superuser]";

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let command = env::args().nth(1);
    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.database_max_connections())
        .await
        .context("connecting to the database")?;
    database::run_migrations(&pool)
        .await
        .context("running migrations")?;

    let services = Arc::new(build_services(&config, &pool)?);

    match command.as_deref() {
        None | Some("serve") => serve(&config, services).await,
        Some("create-superuser") => create_superuser(&services).await,
        Some(other) => bail!("unknown command '{other}'\n{USAGE}"),
    }
}

fn build_services(config: &AppConfig, pool: &PgPool) -> Result<ApplicationServices> {
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::default());
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator::default());

    Ok(ApplicationServices::new(ServiceDependencies {
        user_repo: Arc::new(PostgresUserRepository::new(pool.clone())),
        address_repo: Arc::new(PostgresAddressRepository::new(pool.clone())),
        settings_repo: Arc::new(PostgresUserSettingsRepository::new(pool.clone())),
        category_repo: Arc::new(PostgresCategoryRepository::new(pool.clone())),
        tag_repo: Arc::new(PostgresTagRepository::new(pool.clone())),
        product_repo: Arc::new(PostgresProductRepository::new(pool.clone())),
        password_hasher,
        token_manager,
        clock,
        slugger,
    }))
}

async fn serve(config: &AppConfig, services: Arc<ApplicationServices>) -> Result<()> {
    let app = build_router(HttpState { services });

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn create_superuser(services: &ApplicationServices) -> Result<()> {
    let required = |key: &'static str| {
        env::var(key).with_context(|| format!("{key} must be set to create a superuser"))
    };

    let command = CreateSuperuserCommand {
        email: required("SUPERUSER_EMAIL")?,
        password: required("SUPERUSER_PASSWORD")?,
        first_name: required("SUPERUSER_FIRST_NAME")?,
    };

    let user = services.user_commands.create_superuser(command).await?;
    tracing::info!(user_id = user.id, email = %user.email, "superuser created");
    println!("superuser {} created (id {})", user.email, user.id);
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}

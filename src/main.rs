use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use startup_blueprint::adapters::ai::{
    AiContentGenerator, AnthropicConfig, AnthropicProvider, MockContentGenerator,
};
use startup_blueprint::adapters::http::{app_router, JourneyAppState};
use startup_blueprint::adapters::postgres::PostgresProjectRepository;
use startup_blueprint::adapters::prompts::StaticPromptCatalog;
use startup_blueprint::adapters::storage::{FileProjectRepository, InMemoryProjectRepository};
use startup_blueprint::application::handlers::OpenJourneyHandler;
use startup_blueprint::application::journey::JourneyRegistry;
use startup_blueprint::config::{AiConfig, AiProvider, AppConfig, StorageBackend, ValidationError};
use startup_blueprint::ports::{ContentGenerator, ProjectRepository, PromptCatalog};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let repository = build_repository(&config).await?;
    let generator = build_generator(&config.ai)?;
    let prompts: Arc<dyn PromptCatalog> = Arc::new(StaticPromptCatalog::embedded()?);

    let opener = OpenJourneyHandler::new(repository.clone(), generator, prompts.clone());
    let registry = Arc::new(JourneyRegistry::new(opener, config.journey.default_locale));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = tokio::spawn(Arc::clone(&registry).run_eviction(
        config.journey.eviction_interval(),
        config.journey.idle_timeout(),
        shutdown_rx,
    ));

    let state = JourneyAppState {
        registry,
        repository,
        prompts,
        default_locale: config.journey.default_locale,
    };
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, storage = ?config.journey.storage, provider = ?config.ai.provider, "startup blueprint listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "journey eviction task ended abnormally");
    }
    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

async fn build_repository(config: &AppConfig) -> Result<Arc<dyn ProjectRepository>, BoxError> {
    let repository: Arc<dyn ProjectRepository> = match config.journey.storage {
        StorageBackend::Memory => Arc::new(InMemoryProjectRepository::new()),
        StorageBackend::File => Arc::new(FileProjectRepository::new(&config.journey.data_dir)),
        StorageBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or(ValidationError::MissingRequired("DATABASE__URL"))?;
            let pool = PgPoolOptions::new()
                .min_connections(database.min_connections)
                .max_connections(database.max_connections)
                .acquire_timeout(database.acquire_timeout())
                .idle_timeout(database.idle_timeout())
                .max_lifetime(database.max_lifetime())
                .connect(&database.url)
                .await?;
            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("database migrations applied");
            }
            Arc::new(PostgresProjectRepository::new(pool))
        }
    };
    Ok(repository)
}

fn build_generator(config: &AiConfig) -> Result<Arc<dyn ContentGenerator>, BoxError> {
    match config.provider {
        AiProvider::Mock => Ok(Arc::new(MockContentGenerator::new())),
        AiProvider::Anthropic => {
            let key = config
                .anthropic_api_key
                .clone()
                .ok_or(ValidationError::MissingRequired("AI__ANTHROPIC_API_KEY"))?;
            let mut anthropic = AnthropicConfig::from_secret(key)
                .with_model(config.model.clone())
                .with_timeout(config.timeout());
            if let Some(base_url) = &config.base_url {
                anthropic = anthropic.with_base_url(base_url.clone());
            }
            let provider = AnthropicProvider::new(anthropic)?;
            Ok(Arc::new(AiContentGenerator::new(
                Arc::new(provider),
                config.timeout(),
            )))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

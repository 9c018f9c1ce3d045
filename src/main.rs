use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use skillmatch_algo::config::{LoggingSettings, Settings, StorageBackend};
use skillmatch_algo::core::Matcher;
use skillmatch_algo::models::ScoringWeights;
use skillmatch_algo::routes::{self, handle_query_payload_error, AppState};
use skillmatch_algo::services::{CandidateStore, InMemoryStore, JwtVerifier, PostgresStore};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.is_pretty() {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

async fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn CandidateStore>> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory demo data; no database will be queried");
            Ok(Arc::new(InMemoryStore::with_demo_data()))
        }
        StorageBackend::Postgres => {
            let url = settings.database.url.as_deref().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "database.url is required for the postgres backend")
            })?;

            let store = PostgresStore::from_settings(
                url,
                settings.database.max_connections,
                settings.database.min_connections,
                settings.database.acquire_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;

            info!("PostgreSQL store initialized");
            Ok(Arc::new(store))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Logging settings live in the config, so load it first and report failures once logging is up
    let loaded = Settings::load();
    let logging = loaded
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default()
        .with_env_overrides();
    init_logging(&logging);

    info!("Starting SkillMatch matching service...");

    let settings = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let store = build_store(&settings).await?;

    let weights = ScoringWeights::from(&settings.scoring.weights);
    if (weights.sum() - 100.0).abs() > f64::EPSILON {
        warn!("Scoring weights sum to {}, scores will still be clamped to 0-100", weights.sum());
    }
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState {
        store,
        matcher,
        verification_states: settings.matching.verification_states.clone(),
    };
    let verifier = web::Data::new(JwtVerifier::new(&settings.auth.jwt_secret));

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(verifier.clone())
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

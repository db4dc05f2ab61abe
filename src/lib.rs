pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod preferences;

use std::sync::Arc;
use std::time::Duration;
use actix_web::{web, HttpResponse};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthService, InMemorySessionStore, SessionStore, StaticUserDirectory};
pub use catalog::{
    ContentOptimizer, ExtractorRegistry, ImportHistory, ImportPipeline, MockShopifyImporter,
};
pub use preferences::{PreferencesStore, StoreSettings};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
    pub pipeline: Arc<ImportPipeline>,
    pub history: Arc<ImportHistory>,
    pub preferences: Arc<PreferencesStore>,
}

impl AppState {
    /// Wires the in-memory session store and the simulated integrations.
    pub fn new(config: Settings) -> Result<Self> {
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        Self::with_session_store(config, sessions)
    }

    pub fn with_session_store(config: Settings, sessions: Arc<dyn SessionStore>) -> Result<Self> {
        let users = Arc::new(StaticUserDirectory::from_demo_user(&config.demo_user)?);
        let auth_service = Arc::new(AuthService::new(sessions, users, &config.auth)?);

        let preferences = Arc::new(PreferencesStore::new(StoreSettings::from_config(&config)));
        let sim = &config.simulation;
        let pipeline = Arc::new(ImportPipeline::new(
            Arc::new(ExtractorRegistry::with_fixtures(Duration::from_millis(sim.extract_delay_ms))),
            Arc::new(ContentOptimizer::new(
                preferences.clone(),
                Duration::from_millis(sim.optimize_delay_ms),
            )),
            Arc::new(MockShopifyImporter::new(
                preferences.clone(),
                Duration::from_millis(sim.import_delay_ms),
            )),
        ));
        let history = Arc::new(ImportHistory::with_fixtures(&config.shopify.store_url));

        Ok(Self {
            config: Arc::new(config),
            auth_service,
            pipeline,
            history,
            preferences,
        })
    }
}

/// Malformed or mistyped JSON bodies are validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    })
}

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/auth/login", web::post().to(auth::handlers::login))
                .route("/auth/logout", web::post().to(auth::handlers::logout))
                .route("/auth/me", web::get().to(auth::handlers::me))
                .route("/extract", web::post().to(catalog::handlers::extract))
                .route("/optimize", web::post().to(catalog::handlers::optimize))
                .route("/import", web::post().to(catalog::handlers::import))
                .route("/batch-import", web::post().to(catalog::handlers::batch_import))
                .route("/products", web::get().to(catalog::handlers::list_products))
                .route("/products/{id}", web::get().to(catalog::handlers::get_product))
                .route("/settings", web::get().to(preferences::handlers::get_settings))
                .route("/settings", web::put().to(preferences::handlers::update_settings)),
        );
}

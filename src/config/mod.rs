use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allow_any_origin: bool,
    pub allowed_origins: Vec<String>,
    pub max_age: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub cookie_name: String,
    pub session_ttl_seconds: i64,
    pub secure_cookie: bool,
    /// Skips the password hash check for directory users. Demo deployments only.
    pub demo_mode: bool,
    pub sweep_interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoUserConfig {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

/// Artificial latency of the mocked integrations, in milliseconds.
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub extract_delay_ms: u64,
    pub optimize_delay_ms: u64,
    pub import_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShopifyConfig {
    pub store_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OptimizationConfig {
    pub max_title_length: usize,
    pub min_description_length: usize,
    pub keyword_density: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
    pub demo_user: DemoUserConfig,
    pub simulation: SimulationConfig,
    pub shopify: ShopifyConfig,
    pub optimization: OptimizationConfig,
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("environment", "development")?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("server.workers", num_cpus::get() as i64)?
        .set_default("cors.enabled", true)?
        .set_default("cors.allow_any_origin", false)?
        .set_default("cors.allowed_origins", vec!["http://localhost:3000".to_string()])?
        .set_default("cors.max_age", 3600)?
        .set_default("auth.cookie_name", "session_token")?
        .set_default("auth.session_ttl_seconds", 60 * 60 * 24 * 7)?
        .set_default("auth.secure_cookie", false)?
        .set_default("auth.demo_mode", false)?
        .set_default("auth.sweep_interval_seconds", 300)?
        .set_default("demo_user.id", "1")?
        .set_default("demo_user.email", "demo@example.com")?
        .set_default("demo_user.name", "Demo User")?
        .set_default("demo_user.password", "demo-password")?
        .set_default("simulation.extract_delay_ms", 1500)?
        .set_default("simulation.optimize_delay_ms", 1000)?
        .set_default("simulation.import_delay_ms", 2000)?
        .set_default("shopify.store_url", "your-store.myshopify.com")?
        .set_default("optimization.max_title_length", 70)?
        .set_default("optimization.min_description_length", 500)?
        .set_default("optimization.keyword_density", 5.0)
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // `APP_SERVER__PORT=5001` sets `server.port`
            .add_source(
                Environment::with_prefix("app")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        s.try_deserialize()
    }

    /// Defaults with the simulated latency turned off.
    pub fn new_for_test() -> Result<Self, ConfigError> {
        with_defaults(Config::builder())?
            .set_override("environment", "test")?
            .set_override("server.workers", 1)?
            .set_override("simulation.extract_delay_ms", 0)?
            .set_override("simulation.optimize_delay_ms", 0)?
            .set_override("simulation.import_delay_ms", 0)?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new_for_test().expect("Failed to load settings");
        assert_eq!(settings.environment, "test");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.auth.cookie_name, "session_token");
        assert_eq!(settings.auth.session_ttl_seconds, 604_800);
        assert!(!settings.auth.demo_mode);
        assert_eq!(settings.demo_user.email, "demo@example.com");
        assert_eq!(settings.simulation.extract_delay_ms, 0);
        assert_eq!(settings.optimization.max_title_length, 70);
        assert_eq!(settings.cors.allowed_origins, vec!["http://localhost:3000".to_string()]);
    }

    #[test]
    fn test_override_source() {
        let settings = with_defaults(Config::builder())
            .unwrap()
            .set_override("server.port", 9000)
            .unwrap()
            .set_override("auth.demo_mode", true)
            .unwrap()
            .build()
            .expect("Failed to build config")
            .try_deserialize::<Settings>()
            .expect("Failed to deserialize settings");

        assert_eq!(settings.server.port, 9000);
        assert!(settings.auth.demo_mode);
        assert_eq!(settings.simulation.import_delay_ms, 2000);
    }

    #[test]
    fn test_invalid_port() {
        let result = with_defaults(Config::builder())
            .unwrap()
            .set_override("server.port", "invalid")
            .unwrap()
            .build()
            .and_then(|config| config.try_deserialize::<Settings>());

        assert!(result.is_err(), "Expected error for invalid port");
    }
}

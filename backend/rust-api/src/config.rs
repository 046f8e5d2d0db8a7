use serde::Deserialize;
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Allow cross-origin requests from any origin.
    pub cors_allow_any: bool,
    /// Serve `/metrics` when enabled.
    pub metrics_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allow_any: true,
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/*.toml, then APP__ prefixed overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let defaults = Config::default();

        let host = settings
            .get_string("server.host")
            .or_else(|_| env::var("HOST"))
            .unwrap_or(defaults.host);

        let port = match settings.get_int("server.port") {
            Ok(port) => u16::try_from(port)
                .map_err(|_| config::ConfigError::Message(format!("invalid port {}", port)))?,
            Err(_) => match env::var("PORT") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| config::ConfigError::Message(format!("invalid PORT {}", raw)))?,
                Err(_) => defaults.port,
            },
        };

        let cors_allow_any = settings
            .get_bool("server.cors_allow_any")
            .ok()
            .or_else(|| env_flag("CORS_ALLOW_ANY"))
            .unwrap_or(defaults.cors_allow_any);

        let metrics_enabled = settings
            .get_bool("metrics.enabled")
            .ok()
            .or_else(|| env_flag("METRICS_ENABLED"))
            .unwrap_or(defaults.metrics_enabled);

        Ok(Config {
            host,
            port,
            cors_allow_any,
            metrics_enabled,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

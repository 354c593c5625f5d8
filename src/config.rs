use std::env;

use crate::domain::services::SingleActorPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_batch_size: usize,
    pub single_actor_policy: SingleActorPolicy,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            max_batch_size: 500,
            single_actor_policy: SingleActorPolicy::default(),
            otel_exporter_endpoint: None,
            service_name: "notifold".to_string(),
            metrics_port: 9000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let max_batch_size = env::var("MAX_BATCH_SIZE")
            .unwrap_or_else(|_| "500".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidBatchSize)?;
        if max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }

        let single_actor_policy = match env::var("SINGLE_ACTOR_POLICY") {
            Ok(value) => value.parse().map_err(ConfigError::InvalidSingleActorPolicy)?,
            Err(_) => SingleActorPolicy::default(),
        };

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "notifold".to_string());

        let metrics_port = env::var("METRICS_PORT")
            .unwrap_or_else(|_| "9000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidMetricsPort)?;

        Ok(Config {
            server_host,
            server_port,
            max_batch_size,
            single_actor_policy,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid metrics port number")]
    InvalidMetricsPort,

    #[error("MAX_BATCH_SIZE must be a positive integer")]
    InvalidBatchSize,

    #[error("Invalid SINGLE_ACTOR_POLICY: {0}")]
    InvalidSingleActorPolicy(String),
}

use crate::modules::shifts::core::validate::ValidationRules;
use crate::modules::shifts::use_cases::submit_receipt::handler::PipelineConfig;
use crate::shared::infrastructure::vision::http::VisionConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Everything the service reads from its environment, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// JSON seed for the in-memory master data directory.
    pub master_data_path: Option<PathBuf>,
    pub pipeline: PipelineConfig,
    pub vision: VisionConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vision_defaults = VisionConfig::default();
        let rule_defaults = ValidationRules::default();

        Ok(Self {
            bind_addr: parsed(&lookup, "SHIFTS_BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            master_data_path: lookup("SHIFTS_MASTER_DATA")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            pipeline: PipelineConfig {
                reject_uninterpretable: parsed(&lookup, "SHIFTS_REJECT_UNINTERPRETABLE", true)?,
                rules: ValidationRules {
                    max_trips: parsed(&lookup, "SHIFTS_MAX_TRIPS", rule_defaults.max_trips)?,
                    ..rule_defaults
                },
            },
            vision: VisionConfig {
                api_key: lookup("VISION_API_KEY").unwrap_or_default(),
                endpoint: lookup("VISION_ENDPOINT").unwrap_or(vision_defaults.endpoint),
                model: lookup("VISION_MODEL").unwrap_or(vision_defaults.model),
                timeout: Duration::from_millis(parsed(
                    &lookup,
                    "VISION_TIMEOUT_MS",
                    vision_defaults.timeout.as_millis() as u64,
                )?),
                max_retries: parsed(&lookup, "VISION_MAX_RETRIES", vision_defaults.max_retries)?,
                retry_delay: Duration::from_millis(parsed(
                    &lookup,
                    "VISION_RETRY_DELAY_MS",
                    vision_defaults.retry_delay.as_millis() as u64,
                )?),
            },
        })
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

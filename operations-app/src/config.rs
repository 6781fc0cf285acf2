//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use operations_hex::RecallProcesses;
use operations_hex::outbound::DEFAULT_START_PATH;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub channel_connector_url: String,
    pub channel_connector_transfer_path: String,
    pub workflow_engine_url: String,
    pub workflow_start_path: String,
    pub recall_processes: RecallProcesses,
    /// Deadline for every call to the channel connector or workflow engine
    pub upstream_timeout: Duration,
    pub database_acquire_timeout: Duration,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .ok_or_else(|| anyhow::anyhow!("{} environment variable is required", name))
        };
        let or_default = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.into());

        let defaults = RecallProcesses::default();

        Ok(Self {
            port: parse_or(&lookup, "PORT", 3000)?,
            database_url: required("DATABASE_URL")?,
            channel_connector_url: required("CHANNEL_CONNECTOR_URL")?,
            channel_connector_transfer_path: or_default(
                "CHANNEL_CONNECTOR_TRANSFER_PATH",
                "/channel/transfer",
            ),
            workflow_engine_url: required("WORKFLOW_ENGINE_URL")?,
            workflow_start_path: or_default("WORKFLOW_START_PATH", DEFAULT_START_PATH),
            recall_processes: RecallProcesses {
                instant: or_default("RECALL_BPMN_INSTANT", defaults.instant.as_str()),
                batch: or_default("RECALL_BPMN_BATCH", defaults.batch.as_str()),
            },
            upstream_timeout: Duration::from_secs(parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 30)?),
            database_acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
            rate_limit_per_minute: parse_or(&lookup, "RATE_LIMIT_PER_MINUTE", 100)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has invalid value {:?}: {}", name, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "sqlite::memory:"),
        ("CHANNEL_CONNECTOR_URL", "http://channel:8080"),
        ("WORKFLOW_ENGINE_URL", "http://zeebe:8080"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.channel_connector_transfer_path, "/channel/transfer");
        assert_eq!(config.workflow_start_path, "/v2/process-instances");
        assert_eq!(config.recall_processes, RecallProcesses::default());
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert_eq!(config.database_acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.rate_limit_per_minute, 100);
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "8081"),
            ("RECALL_BPMN_INSTANT", "recall_inst_rhino"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ]);
        let config = Config::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.recall_processes.instant, "recall_inst_rhino");
        assert_eq!(config.recall_processes.batch, "recall_batch");
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_missing_required_variable() {
        let err = Config::from_lookup(lookup(&REQUIRED[..2])).unwrap_err();
        assert!(err.to_string().contains("WORKFLOW_ENGINE_URL"));
    }

    #[test]
    fn test_invalid_number() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}

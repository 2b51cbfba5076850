//! Runtime configuration read from the environment.
//!
//! - `NEWTON_SERVER_BIND`: listen address (default `0.0.0.0`)
//! - `NEWTON_SERVER_PORT`: listen port (default `5000`)
//! - `NEWTON_KNOWLEDGE`: knowledge base file or directory, `none` to disable

use miette::Diagnostic;
use thiserror::Error;

use crate::knowledge::KnowledgeConfig;

pub const BIND_VAR: &str = "NEWTON_SERVER_BIND";
pub const PORT_VAR: &str = "NEWTON_SERVER_PORT";
pub const KNOWLEDGE_VAR: &str = "NEWTON_KNOWLEDGE";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid port \"{value}\"")]
    #[diagnostic(
        code(newton::config::port),
        help("Set NEWTON_SERVER_PORT to a number between 0 and 65535.")
    )]
    InvalidPort { value: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub knowledge: KnowledgeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 5000,
            knowledge: KnowledgeConfig::Bundled,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();
        if let Some(bind) = lookup(BIND_VAR) {
            config.bind = bind;
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value: port })?;
        }
        if let Some(kb) = lookup(KNOWLEDGE_VAR) {
            config.knowledge = KnowledgeConfig::from_setting(&kb);
        }
        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn overrides_from_environment() {
        let config = ServerConfig::from_lookup(lookup(&[
            (BIND_VAR, "127.0.0.1"),
            (PORT_VAR, "8080"),
            (KNOWLEDGE_VAR, "none"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.knowledge, KnowledgeConfig::Disabled);
    }

    #[test]
    fn bad_port_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[(PORT_VAR, "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }
}

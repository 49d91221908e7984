//! Environment-driven server configuration.

use std::env;

use crate::scenarios::DEFAULT_SCENARIO;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8888;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Scenario the state store is built from at startup.
    pub scenario: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            scenario: DEFAULT_SCENARIO.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read `MOCK_HOST`, `MOCK_PORT` and `MOCK_SCENARIO`, falling back to
    /// the defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("MOCK_HOST").unwrap_or(defaults.host),
            port: env::var("MOCK_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.port),
            scenario: env::var("MOCK_SCENARIO").unwrap_or(defaults.scenario),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_environment() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8888);
        assert_eq!(config.scenario, "baseline");
        assert_eq!(config.bind_addr(), "127.0.0.1:8888");
    }
}

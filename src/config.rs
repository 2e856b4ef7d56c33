use serde::{Deserialize, Serialize};

use crate::errors::{BridgeError, BridgeResult};
use crate::node_store::NodeConnection;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub daemon: DaemonTimeouts,
    /// Static server-to-node assignments for deployments without a metadata
    /// store. Panels backed by a database supply their own [`NodeStore`]
    /// implementation instead.
    ///
    /// [`NodeStore`]: crate::node_store::NodeStore
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

/// Timeouts applied to every outbound daemon call. A call that exceeds the
/// request timeout surfaces as a connection error, never a hang.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct DaemonTimeouts {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for DaemonTimeouts {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    5
}

fn default_connect_timeout() -> u64 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerEntry {
    pub uuid: String,
    pub node: NodeConnection,
}

impl BridgeConfig {
    pub fn from_file(path: &str) -> BridgeResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::Config(format!("Failed to read config: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| BridgeError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> Self {
        let read_secs = |key: &str, fallback: u64| {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };
        Self {
            daemon: DaemonTimeouts {
                request_timeout_secs: read_secs("DAEMON_REQUEST_TIMEOUT", default_request_timeout()),
                connect_timeout_secs: read_secs("DAEMON_CONNECT_TIMEOUT", default_connect_timeout()),
            },
            servers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let raw = r#"
            [daemon]
            request_timeout_secs = 10

            [[servers]]
            uuid = "0c29740b"
            [servers.node]
            scheme = "http"
            host = "10.0.0.2"
            port = 8080
            token = "node-secret"
        "#;
        let config: BridgeConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.daemon.request_timeout_secs, 10);
        // Connect timeout falls back to its default when omitted.
        assert_eq!(config.daemon.connect_timeout_secs, 3);
        assert_eq!(config.servers.len(), 1);
        assert_eq!(config.servers[0].node.port, 8080);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: BridgeConfig = toml::from_str("").unwrap();
        assert_eq!(config.daemon.request_timeout_secs, 5);
        assert!(config.servers.is_empty());
    }

    #[test]
    fn debug_output_redacts_node_tokens() {
        let raw = r#"
            [[servers]]
            uuid = "0c29740b"
            [servers.node]
            scheme = "http"
            host = "10.0.0.2"
            port = 8080
            token = "node-secret"
        "#;
        let config: BridgeConfig = toml::from_str(raw).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("node-secret"));
    }
}

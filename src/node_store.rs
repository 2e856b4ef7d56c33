use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BridgeConfig;

/// Connection details for one node's daemon. Held as a transient, read-only
/// copy per call; nothing in this crate caches it across calls, so a rotated
/// credential takes effect on the very next request.
#[derive(Clone, Deserialize, Serialize)]
pub struct NodeConnection {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub token: String,
}

impl NodeConnection {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl fmt::Debug for NodeConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeConnection")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Read-only lookup from a server identity to its owning node.
///
/// Implementations must be pure lookups: no network I/O, safe to call
/// repeatedly and concurrently. Unknown identities return `None`, never a
/// default connection.
pub trait NodeStore: Send + Sync {
    fn lookup(&self, server: &str) -> Option<NodeConnection>;
}

/// In-memory store built from the static `servers` table in [`BridgeConfig`].
pub struct StaticNodeStore {
    servers: HashMap<String, NodeConnection>,
}

impl StaticNodeStore {
    pub fn new(servers: HashMap<String, NodeConnection>) -> Self {
        Self { servers }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        let servers = config
            .servers
            .iter()
            .map(|entry| (entry.uuid.clone(), entry.node.clone()))
            .collect();
        Self { servers }
    }
}

impl NodeStore for StaticNodeStore {
    fn lookup(&self, server: &str) -> Option<NodeConnection> {
        self.servers.get(server).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> NodeConnection {
        NodeConnection {
            scheme: "https".to_string(),
            host: "node1.example.com".to_string(),
            port: 8080,
            token: "super-secret".to_string(),
        }
    }

    #[test]
    fn base_url_includes_scheme_host_and_port() {
        assert_eq!(connection().base_url(), "https://node1.example.com:8080");
    }

    #[test]
    fn debug_never_prints_the_token() {
        let rendered = format!("{:?}", connection());
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn unknown_server_yields_none() {
        let store = StaticNodeStore::new(HashMap::new());
        assert!(store.lookup("nope").is_none());
    }

    #[test]
    fn known_server_yields_its_node() {
        let mut servers = HashMap::new();
        servers.insert("abc123".to_string(), connection());
        let store = StaticNodeStore::new(servers);
        let conn = store.lookup("abc123").unwrap();
        assert_eq!(conn.host, "node1.example.com");
    }
}

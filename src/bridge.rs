use std::sync::Arc;

use tracing::warn;

use crate::config::DaemonTimeouts;
use crate::daemon_client::DaemonClient;
use crate::errors::{BridgeError, BridgeResult};
use crate::file_browser::{DirectoryListing, FileBrowser};
use crate::node_store::{NodeConnection, NodeStore};
use crate::system_info::SystemInfo;
use crate::{status, system_info};

/// Panel-facing facade over the daemon proxies.
///
/// Each operation is a single call chain: resolve the owning node, build a
/// fresh client bound to it, issue one HTTP call, decode, return. No state is
/// shared between calls, so concurrent operations are fully independent.
///
/// Precondition: the caller has already authenticated and authorized the
/// acting principal for the given server. No permission checks happen here.
pub struct DaemonBridge {
    store: Arc<dyn NodeStore>,
    timeouts: DaemonTimeouts,
}

impl DaemonBridge {
    pub fn new(store: Arc<dyn NodeStore>, timeouts: DaemonTimeouts) -> Self {
        Self { store, timeouts }
    }

    /// Resolve the node connection owning a server. Unknown identities fail
    /// with a distinct error, never a default connection.
    pub fn resolve(&self, server: &str) -> BridgeResult<NodeConnection> {
        self.store
            .lookup(server)
            .ok_or_else(|| BridgeError::ServerNotFound(server.to_string()))
    }

    fn server_client(&self, server: &str) -> BridgeResult<DaemonClient> {
        let conn = self.resolve(server)?;
        DaemonClient::for_server(&conn, server, self.timeouts)
    }

    /// Advisory running check; failures of any kind, including an unknown
    /// server identity, resolve to `false`.
    pub async fn check_status(&self, server: &str) -> bool {
        match self.server_client(server) {
            Ok(client) => status::is_running(&client).await,
            Err(e) => {
                warn!(server = server, "status check could not resolve server: {}", e);
                false
            }
        }
    }

    pub async fn list_directory(
        &self,
        server: &str,
        raw_path: &str,
    ) -> BridgeResult<DirectoryListing> {
        let browser = FileBrowser::new(self.server_client(server)?);
        browser.list_directory(raw_path).await
    }

    pub async fn read_file(&self, server: &str, raw_path: &str) -> BridgeResult<String> {
        let browser = FileBrowser::new(self.server_client(server)?);
        browser.read_file(raw_path).await
    }

    pub async fn save_file(
        &self,
        server: &str,
        raw_path: &str,
        contents: &str,
    ) -> BridgeResult<()> {
        let browser = FileBrowser::new(self.server_client(server)?);
        browser.save_file(raw_path, contents).await
    }

    /// Node-level diagnostics; takes a connection directly since this call is
    /// not scoped to any one server.
    pub async fn node_system_info(&self, conn: &NodeConnection) -> BridgeResult<SystemInfo> {
        let client = DaemonClient::for_node(conn, self.timeouts)?;
        system_info::node_system_info(&client).await
    }
}

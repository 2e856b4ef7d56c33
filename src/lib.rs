//! Panel-side bridge to per-node daemon agents.
//!
//! The admin panel never touches a hosted server's filesystem or process
//! state directly. Every operation (status check, directory listing, file
//! read/write, node system information) is translated into an authenticated
//! HTTP call to the daemon owning that server's node, and the daemon's
//! response is translated back into a panel-friendly result or typed error.
//!
//! Entry points are on [`DaemonBridge`]; callers are expected to have already
//! authenticated and authorized the acting principal for the given server.

mod bridge;
mod config;
mod daemon_client;
mod errors;
mod file_browser;
mod node_store;
mod path;
mod status;
mod system_info;

pub use bridge::DaemonBridge;
pub use config::{BridgeConfig, DaemonTimeouts, ServerEntry};
pub use daemon_client::DaemonClient;
pub use errors::{BridgeError, BridgeResult};
pub use file_browser::{DirectoryListing, FileBrowser, FileEntry};
pub use node_store::{NodeConnection, NodeStore, StaticNodeStore};
pub use path::PathSpec;
pub use status::is_running;
pub use system_info::{node_system_info, SystemInfo};

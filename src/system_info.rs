use serde_json::{Map, Value};
use tracing::debug;

use crate::daemon_client::DaemonClient;
use crate::errors::BridgeResult;

/// Node-level system information as reported by the daemon. The schema is
/// owned by the daemon and decoded opaquely, not validated field-by-field.
pub type SystemInfo = Map<String, Value>;

/// Fetch system information from a node's daemon.
///
/// Both transport failures and non-2xx responses surface as connection
/// errors; there is no partial decode.
pub async fn node_system_info(client: &DaemonClient) -> BridgeResult<SystemInfo> {
    let response = client.get("/api/system").await?.error_for_status()?;
    let info = response.json::<SystemInfo>().await?;
    debug!(fields = info.len(), "node system information fetched");
    Ok(info)
}

use serde::Deserialize;
use tracing::{debug, warn};

use crate::daemon_client::DaemonClient;

#[derive(Debug, Deserialize)]
struct StatusBody {
    #[serde(default)]
    status: Option<i64>,
}

/// Whether the daemon reports the server's managed process as running.
///
/// Advisory and UI-facing: this is polled frequently, so every failure mode
/// (unreachable daemon, non-200 status, malformed body, `status != 1`)
/// collapses to `false` rather than an error. Anomalies are logged for
/// diagnostics but never change the boolean contract.
pub async fn is_running(client: &DaemonClient) -> bool {
    let response = match client.get("/server").await {
        Ok(response) => response,
        Err(e) => {
            warn!("status check failed to reach daemon: {}", e);
            return false;
        }
    };

    if response.status() != reqwest::StatusCode::OK {
        debug!(status = %response.status(), "status check got non-200 from daemon");
        return false;
    }

    match response.json::<StatusBody>().await {
        Ok(body) => body.status == Some(1),
        Err(e) => {
            debug!("status check got malformed body: {}", e);
            false
        }
    }
}

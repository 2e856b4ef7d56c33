use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::daemon_client::DaemonClient;
use crate::errors::{BridgeError, BridgeResult};
use crate::path::PathSpec;

/// One entry in a daemon directory listing.
///
/// Only `name` is required; the daemon owns the rest of the schema, and any
/// fields beyond the common set pass through untouched in `extra`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts either an RFC 3339 string or unix seconds; anything else decodes
/// to `None` rather than failing the whole listing.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }))
}

/// Directory contents as reported by the daemon, split per its own type tag.
/// Transient: produced per request, never cached.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectoryListing {
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub folders: Vec<FileEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FileContents {
    contents: String,
}

#[derive(Deserialize)]
struct DaemonErrorBody {
    error: Option<String>,
}

/// File browsing proxy for one server, combining path normalization with the
/// daemon client. All paths are normalized (and traversal-rejected) before a
/// request leaves this layer, for writes as well as reads.
pub struct FileBrowser {
    client: DaemonClient,
}

impl FileBrowser {
    pub fn new(client: DaemonClient) -> Self {
        Self { client }
    }

    /// List a directory's contents. Never returns partial data: any daemon
    /// error or malformed body fails the whole call.
    pub async fn list_directory(&self, raw_path: &str) -> BridgeResult<DirectoryListing> {
        let path = PathSpec::normalize(raw_path)?;
        let response = self
            .client
            .get(&format!("/server/directory{}", path.encoded()))
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(daemon_error(response).await);
        }

        let listing = response.json::<DirectoryListing>().await.map_err(|e| {
            warn!(path = %path, "malformed directory listing from daemon: {}", e);
            BridgeError::FileOperation { message: None }
        })?;

        debug!(
            path = %path,
            files = listing.files.len(),
            folders = listing.folders.len(),
            "directory listed"
        );
        Ok(listing)
    }

    /// Fetch a file's contents from the daemon.
    pub async fn read_file(&self, raw_path: &str) -> BridgeResult<String> {
        let path = PathSpec::normalize(raw_path)?;
        let response = self
            .client
            .get(&format!("/server/file{}", path.encoded()))
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(daemon_error(response).await);
        }

        let body = response.json::<FileContents>().await.map_err(|e| {
            warn!(path = %path, "malformed file response from daemon: {}", e);
            BridgeError::FileOperation { message: None }
        })?;
        Ok(body.contents)
    }

    /// Write a file on the node. Mutates remote state; no retry and no
    /// idempotency guarantee — a partition after the daemon-side write but
    /// before the response is indistinguishable from a failed write, and
    /// surfaces as an error.
    pub async fn save_file(&self, raw_path: &str, contents: &str) -> BridgeResult<()> {
        let path = PathSpec::normalize(raw_path)?;
        let response = self
            .client
            .post_json(
                &format!("/server/file{}", path.encoded()),
                &FileContents {
                    contents: contents.to_string(),
                },
            )
            .await?;

        if !response.status().is_success() {
            return Err(daemon_error(response).await);
        }

        info!(path = %path, bytes = contents.len(), "file saved");
        Ok(())
    }
}

/// Extract the daemon's error detail, if any, from a failed response.
async fn daemon_error(response: reqwest::Response) -> BridgeError {
    let status = response.status();
    let message = match response.json::<DaemonErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => None,
    };
    warn!(
        status = %status,
        detail = message.as_deref().unwrap_or("<none>"),
        "daemon rejected file operation"
    );
    BridgeError::FileOperation { message }
}

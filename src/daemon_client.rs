use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::Serialize;
use tracing::debug;

use crate::config::DaemonTimeouts;
use crate::errors::BridgeResult;
use crate::node_store::NodeConnection;

const ACCESS_SERVER_HEADER: &str = "X-Access-Server";
const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

/// HTTP client bound to a single node's daemon.
///
/// Every request carries that node's credential header and is bounded by the
/// configured timeouts. Constructed per call and discarded afterwards; no
/// connection state is shared between operations. Status codes are not
/// interpreted here — callers apply their own success criteria.
pub struct DaemonClient {
    http: Client,
    base_url: String,
    token: String,
    server: Option<String>,
}

impl DaemonClient {
    /// Client for server-scoped endpoints; attaches both the server identity
    /// and the node token headers.
    pub fn for_server(
        conn: &NodeConnection,
        server: &str,
        timeouts: DaemonTimeouts,
    ) -> BridgeResult<Self> {
        Self::build(conn, Some(server.to_string()), timeouts)
    }

    /// Client for node-level endpoints; attaches the node token only.
    pub fn for_node(conn: &NodeConnection, timeouts: DaemonTimeouts) -> BridgeResult<Self> {
        Self::build(conn, None, timeouts)
    }

    fn build(
        conn: &NodeConnection,
        server: Option<String>,
        timeouts: DaemonTimeouts,
    ) -> BridgeResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeouts.request_timeout_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: conn.base_url(),
            token: conn.token.clone(),
            server,
        })
    }

    pub async fn get(&self, path: &str) -> BridgeResult<Response> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> BridgeResult<Response> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> BridgeResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "daemon request");

        let mut request = self
            .http
            .request(method, url.as_str())
            .header(ACCESS_TOKEN_HEADER, &self.token);
        if let Some(server) = &self.server {
            request = request.header(ACCESS_SERVER_HEADER, server);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        // Transport failures (DNS, refusal, timeout, TLS) collapse into
        // BridgeError::Connection via From.
        let response = request.send().await?;
        Ok(response)
    }
}

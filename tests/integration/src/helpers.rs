//! Test helpers for integration tests
//!
//! Provides a test server with in-memory dependencies and request helpers
//! that sign webhook bodies the way the platform does.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use stockbot_api::{create_app, run_server, AppState};
use stockbot_common::{SignatureVerifier, SIGNATURE_HEADER};
use stockbot_service::testing::TestHarness;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Channel secret shared by the test server and the request signer
pub const TEST_CHANNEL_SECRET: &str = "integration-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Handles to the in-memory ports behind the server
    pub harness: Arc<TestHarness>,
    signer: SignatureVerifier,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        Self::start_with_timeout(Duration::from_secs(10)).await
    }

    /// Start a test server with a custom inbound request timeout
    pub async fn start_with_timeout(request_timeout: Duration) -> Result<Self> {
        let harness = Arc::new(TestHarness::new());
        let state = AppState::new(
            harness.ctx.clone(),
            SignatureVerifier::new(TEST_CHANNEL_SECRET),
            request_timeout,
        );
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            run_server(app, listener).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            harness,
            signer: SignatureVerifier::new(TEST_CHANNEL_SECRET),
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).send().await?)
    }

    /// Deliver a webhook body signed with the test secret
    pub async fn deliver(&self, body: &Value) -> Result<Response> {
        let bytes = serde_json::to_vec(body)?;
        let signature = self.signer.sign(&bytes);
        self.deliver_raw(bytes, Some(&signature)).await
    }

    /// Deliver raw bytes with an arbitrary signature header
    pub async fn deliver_raw(&self, body: Vec<u8>, signature: Option<&str>) -> Result<Response> {
        let url = format!("{}/callback", self.base_url());
        let mut request = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .body(body);
        if let Some(signature) = signature {
            request = request.header(SIGNATURE_HEADER, signature);
        }
        Ok(request.send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

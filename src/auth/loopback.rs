//! Loopback redirect receiver for the installed-app authorization flow
//!
//! Google redirects the browser to `http://127.0.0.1:<port>/?code=...&state=...`
//! after consent. A small axum server answers that redirect with a short HTML
//! page and hands the code back over a oneshot channel. Other paths get a 404
//! from the router and idle browser connections don't block the redirect.

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Time the server gets to deliver the result page after the code arrived
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

const SUCCESS_PAGE: &str = "<html><body><h3>Authorization complete.</h3>\
    <p>You can close this window and return to the terminal.</p></body></html>";
const FAILURE_PAGE: &str = "<html><body><h3>Authorization failed.</h3>\
    <p>See the terminal for details.</p></body></html>";

/// Parameters Google appends to the redirect URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: String,
    pub state: Option<String>,
}

impl CallbackParams {
    /// Read the decoded redirect query, surfacing `error=` replies
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self> {
        if let Some(error) = query.get("error") {
            anyhow::bail!("Authorization was denied: {}", error);
        }

        let code = query
            .get("code")
            .filter(|c| !c.is_empty())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No authorization code in OAuth callback"))?;

        Ok(Self {
            code,
            state: query.get("state").cloned(),
        })
    }
}

#[derive(Clone)]
struct CallbackState {
    expected_state: Arc<str>,
    sender: Arc<Mutex<Option<oneshot::Sender<Result<String>>>>>,
}

pub struct CallbackServer {
    listener: TcpListener,
    port: u16,
}

impl CallbackServer {
    /// Listen on an ephemeral localhost port
    pub async fn bind() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind OAuth callback listener")?;
        let port = listener
            .local_addr()
            .context("Failed to read callback listener address")?
            .port();

        log::debug!("OAuth callback listening on port {}", port);
        Ok(Self { listener, port })
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Serve until the browser redirect arrives or `timeout` passes
    pub async fn wait_for_code(self, expected_state: &str, timeout: Duration) -> Result<String> {
        let (code_tx, code_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let app = Router::new()
            .route("/", get(handle_callback))
            .with_state(CallbackState {
                expected_state: Arc::from(expected_state),
                sender: Arc::new(Mutex::new(Some(code_tx))),
            });

        let server = tokio::spawn(async move {
            axum::serve(self.listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        let outcome = tokio::time::timeout(timeout, code_rx).await;

        let _ = shutdown_tx.send(());
        if tokio::time::timeout(SHUTDOWN_GRACE, server).await.is_err() {
            log::debug!("OAuth callback server still draining connections, detaching");
        }

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => anyhow::bail!("OAuth callback server stopped before the redirect"),
            Err(_) => anyhow::bail!(
                "Timed out after {}s waiting for authorization in the browser",
                timeout.as_secs()
            ),
        }
    }
}

async fn handle_callback(
    State(state): State<CallbackState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Html<&'static str>) {
    let result = CallbackParams::from_query(&query).and_then(|params| {
        if params.state.as_deref() != Some(&*state.expected_state) {
            anyhow::bail!("OAuth state mismatch in redirect");
        }
        Ok(params.code)
    });

    let response = match &result {
        Ok(_) => (StatusCode::OK, Html(SUCCESS_PAGE)),
        Err(e) => {
            log::warn!("Rejected OAuth callback: {}", e);
            (StatusCode::BAD_REQUEST, Html(FAILURE_PAGE))
        }
    };

    let sender = state.sender.lock().ok().and_then(|mut slot| slot.take());
    match sender {
        Some(sender) => {
            let _ = sender.send(result);
        }
        None => log::debug!("Ignoring repeated OAuth callback"),
    }

    response
}

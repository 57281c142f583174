//! Single-endpoint HTTP transport.
//!
//! Each POST body is one message; the response body is the reply. Requests
//! whose Host or Origin is not an allowed name are refused with 403.

use super::Transport;
use crate::config::{is_loopback_host, ServerSettings, TransportKind};
use crate::error::{Result, ServerError};
use crate::mcp::protocol::{OutboundMessage, INVALID_REQUEST, PARSE_ERROR};
use crate::mcp::Dispatcher;
use axum::{
    extract::{Request, State},
    http::{header, request::Parts, uri::Authority, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use url::Url;

/// Decides which Host and Origin values are acceptable.
#[derive(Debug, Clone)]
pub struct HostGuard {
    allow_any: bool,
    allowed: Vec<String>,
}

impl HostGuard {
    pub fn from_settings(settings: &ServerSettings) -> Self {
        let mut allowed: Vec<String> = ["localhost", "127.0.0.1", "::1"]
            .iter()
            .map(|h| h.to_string())
            .collect();

        for host in &settings.allowed_hosts {
            allowed.push(normalize_host(host));
        }

        let bind = normalize_host(&settings.host);
        if !is_loopback_host(&bind) && !is_wildcard(&bind) && !allowed.contains(&bind) {
            allowed.push(bind);
        }

        Self {
            allow_any: settings.allow_any_host,
            allowed,
        }
    }

    fn allows_name(&self, host: &str) -> bool {
        self.allow_any || self.allowed.contains(&normalize_host(host))
    }

    /// Check a `Host` header value (`name[:port]`).
    pub fn allows_host(&self, value: &str) -> bool {
        if self.allow_any {
            return true;
        }
        match value.parse::<Authority>() {
            Ok(authority) => self.allows_name(authority.host()),
            Err(_) => false,
        }
    }

    /// Check an `Origin` header value (`scheme://name[:port]`).
    pub fn allows_origin(&self, value: &str) -> bool {
        if self.allow_any {
            return true;
        }
        match Url::parse(value) {
            Ok(url) => url.host_str().is_some_and(|h| self.allows_name(h)),
            Err(_) => false,
        }
    }
}

fn normalize_host(host: &str) -> String {
    host.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

fn is_wildcard(host: &str) -> bool {
    host == "0.0.0.0" || host == "::"
}

struct HttpState {
    dispatcher: Arc<Dispatcher>,
    guard: HostGuard,
}

/// Build the router serving `settings.endpoint_path`.
pub fn router(dispatcher: Arc<Dispatcher>, settings: &ServerSettings) -> Router {
    let guard = HostGuard::from_settings(settings);

    let cors_guard = guard.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|o| cors_guard.allows_origin(o))
            },
        ))
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let state = Arc::new(HttpState { dispatcher, guard });

    Router::new()
        .route(&settings.endpoint_path, post(handle_message))
        .layer(middleware::from_fn_with_state(state.clone(), validate_host))
        .layer(cors)
        .with_state(state)
}

async fn validate_host(
    State(state): State<Arc<HttpState>>,
    request: Request,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(|a| a.to_string()));
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .map(|v| v.to_str().unwrap_or_default().to_string());

    let host_ok = host.as_deref().is_some_and(|h| state.guard.allows_host(h));
    let origin_ok = origin
        .as_deref()
        .map_or(true, |o| state.guard.allows_origin(o));

    if !host_ok || !origin_ok {
        tracing::warn!(host = ?host, origin = ?origin, "Rejected request from disallowed host");
        return (StatusCode::FORBIDDEN, "Forbidden: host not allowed").into_response();
    }

    next.run(request).await
}

async fn handle_message(State(state): State<Arc<HttpState>>, body: String) -> Response {
    match state.dispatcher.handle_message(&body).await {
        Some(message) => {
            let status = match &message {
                OutboundMessage::Rpc(r)
                    if r.error
                        .as_ref()
                        .is_some_and(|e| e.code == PARSE_ERROR || e.code == INVALID_REQUEST) =>
                {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::OK,
            };
            (status, Json(message)).into_response()
        }
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// HTTP transport bound to a listener.
pub struct HttpTransport {
    listener: TcpListener,
    settings: ServerSettings,
}

impl HttpTransport {
    /// Bind the listener described by `settings`.
    pub async fn bind(settings: ServerSettings) -> Result<Self> {
        let addr = settings.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        if !settings.is_loopback() {
            tracing::warn!(
                host = %settings.host,
                "Binding a non-loopback interface; the endpoint has no authentication"
            );
        }

        Ok(Self { listener, settings })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(self, dispatcher: Arc<Dispatcher>, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router(dispatcher, &self.settings);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Transport(format!("HTTP server failed: {}", e)))?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Http
    }

    fn describe(&self) -> String {
        match self.listener.local_addr() {
            Ok(addr) => format!("http://{}{}", addr, self.settings.endpoint_path),
            Err(_) => format!(
                "http://{}{}",
                self.settings.bind_addr(),
                self.settings.endpoint_path
            ),
        }
    }

    async fn serve(self: Box<Self>, dispatcher: Arc<Dispatcher>) -> Result<()> {
        tracing::info!("MCP server listening on {}", self.describe());
        (*self)
            .serve_with_shutdown(dispatcher, shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

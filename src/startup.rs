use std::{
    future::{Future, IntoFuture},
    sync::Arc,
};

use axum::{
    body::Body,
    routing::{self, MethodRouter},
    Router,
};
use http::{header, HeaderValue, Request};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    set_header::SetResponseHeaderLayer,
    trace::{MakeSpan, TraceLayer},
};
use tracing::{Level, Span};

use crate::{
    email_client::DefaultEmailClient,
    routes::{health_check, method_not_allowed, preflight, send_email},
    settings::Settings,
};

/// 핸들러가 공유하는 읽기 전용 상태
pub struct AppState {
    pub email_client: DefaultEmailClient,
    pub sender: String,
    pub recipients: Vec<String>,
}

pub struct Server {
    tcp_listener: TcpListener,
    state: AppState,
}

impl Server {
    /// 설정으로부터 서버를 만든다.
    pub async fn build(settings: &Settings) -> Result<Self, anyhow::Error> {
        let tcp_listener = settings.application.get_listener().await?;
        let email_client = settings.email_client.get_email_client()?;
        if matches!(email_client, DefaultEmailClient::Console(_)) {
            tracing::warn!("No email provider credential is configured. Running in dev mode.");
        }

        Ok(Self::new(
            tcp_listener,
            AppState {
                email_client,
                sender: settings.email_client.sender.clone(),
                recipients: settings.email_client.recipients.clone(),
            },
        ))
    }

    pub fn new(tcp_listener: TcpListener, state: AppState) -> Self {
        Self {
            tcp_listener,
            state,
        }
    }

    pub fn port(&self) -> Result<u16, std::io::Error> {
        Ok(self.tcp_listener.local_addr()?.port())
    }

    pub fn run(self) -> impl Future<Output = Result<(), std::io::Error>> {
        let app = Router::new()
            .route("/health_check", routing::get(health_check))
            .route("/api/send-email", send_email_route())
            .layer(TraceLayer::new_for_http().make_span_with(AddRequestID))
            .with_state(Arc::new(self.state));
        axum::serve(self.tcp_listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .into_future()
    }
}

// Ctrl+C를 받으면 처리 중인 요청을 마치고 종료한다.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        // 시그널을 받을 수 없으면 종료하지 않고 계속 서비스한다.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down the server.");
}

// POST와 OPTIONS만 받는다.
// 나머지 메서드는 405를 반환하고, 모든 응답에 CORS 헤더를 붙인다.
fn send_email_route() -> MethodRouter<Arc<AppState>> {
    routing::post(send_email)
        .options(preflight)
        .fallback(method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("POST, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                )),
        )
}

// https://docs.rs/tower-http/0.5.2/src/tower_http/trace/make_span.rs.html#65-68의 코드를 참조했음
#[derive(Clone)]
struct AddRequestID;

impl MakeSpan<Body> for AddRequestID {
    fn make_span(&mut self, request: &Request<Body>) -> Span {
        tracing::span!(
            Level::ERROR,
            "request",
            request_id = %uuid::Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;

use crate::{
    domain::{ContactSubmission, InvalidSubmission, NotificationEmail, SubmissionRequest},
    email_client::{DeliveryOutcome, EmailClient, EmailClientError},
    startup::AppState,
    utils::error_chain_fmt,
};

const METHOD_NOT_ALLOWED: &str = "Method not allowed";
const MISSING_FIELDS: &str = "必須項目が入力されていません";
const DELIVERY_FAILED: &str = "メール送信に失敗しました";
const SERVER_ERROR: &str = "サーバーエラーが発生しました";
const ACCEPTED: &str =
    "お問い合わせありがとうございます。内容を確認の上、担当者よりご連絡いたします。";
const ACCEPTED_DEV_MODE: &str = "お問い合わせを受け付けました（開発モード）";

#[derive(serde::Serialize)]
pub struct Acknowledgement {
    success: bool,
    message: &'static str,
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(thiserror::Error)]
pub enum SendEmailError {
    // => 400
    #[error("Required fields are missing.")]
    ValidationError(#[source] InvalidSubmission),
    // => 500, 프로바이더가 메일을 거부했다.
    #[error("Failed to deliver the notification email.")]
    DeliveryError(#[source] EmailClientError),
    // => 500
    #[error("Something went wrong.")]
    UnexpectedError(#[source] anyhow::Error),
}

impl std::fmt::Debug for SendEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<EmailClientError> for SendEmailError {
    fn from(e: EmailClientError) -> Self {
        match e {
            EmailClientError::Rejected { .. } => SendEmailError::DeliveryError(e),
            // 네트워크 오류나 타임아웃은 서버 오류로 취급한다.
            other => SendEmailError::UnexpectedError(
                anyhow::Error::new(other).context("Failed to reach the email provider."),
            ),
        }
    }
}

impl IntoResponse for SendEmailError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            SendEmailError::ValidationError(_) => {
                tracing::warn!(error = %self, error_detail = ?self);
                (http::StatusCode::BAD_REQUEST, MISSING_FIELDS)
            }
            SendEmailError::DeliveryError(_) => {
                tracing::error!(error = %self, error_detail = ?self);
                (http::StatusCode::INTERNAL_SERVER_ERROR, DELIVERY_FAILED)
            }
            SendEmailError::UnexpectedError(_) => {
                tracing::error!(error = %self, error_detail = ?self);
                (http::StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
            }
        };
        // 내부 오류의 내용은 클라이언트에 전달하지 않는다.
        (status, Json(ErrorBody { error })).into_response()
    }
}

// `curl -X POST -d '{"name":"Taro","email":"taro@x.com","message":"Hi"}' http://127.0.0.1:8000/api/send-email`
// => 200 OK
// `curl -X POST -d '{"name":"Taro"}' http://127.0.0.1:8000/api/send-email`
// => 400 Bad Request
#[tracing::instrument(name = "Handling a contact form submission.", skip_all)]
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    // `Content-Type`과 관계없이 본문을 직접 파싱한다.
    body: Bytes,
) -> Result<Json<Acknowledgement>, SendEmailError> {
    let request = SubmissionRequest::parse(&body)
        .context("Failed to parse the contact form body.")
        .map_err(SendEmailError::UnexpectedError)?;
    let submission =
        ContactSubmission::try_from(request).map_err(SendEmailError::ValidationError)?;

    let email = NotificationEmail::new(&submission, &state.sender, &state.recipients);
    let outcome = state.email_client.send_email(&email).await?;

    let message = match outcome {
        DeliveryOutcome::Sent => {
            tracing::info!(reply_to = %email.reply_to, "Notification email was sent.");
            ACCEPTED
        }
        DeliveryOutcome::Logged => ACCEPTED_DEV_MODE,
    };

    Ok(Json(Acknowledgement {
        success: true,
        message,
    }))
}

/// CORS 사전 요청은 본문을 보지 않고 바로 200을 반환한다.
pub async fn preflight() -> http::StatusCode {
    http::StatusCode::OK
}

pub async fn method_not_allowed(method: http::Method) -> Response {
    tracing::info!(%method, "Rejected a request with an unsupported method.");
    (
        http::StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: METHOD_NOT_ALLOWED,
        }),
    )
        .into_response()
}

use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum EmailClientError {
    #[error("EmailClient: Url Error")]
    UrlParseError(#[from] url::ParseError),
    #[error("EmailClient: Reqwest Error")]
    ReqwestError(#[from] reqwest::Error),
    // 프로바이더가 2xx 이외의 상태 코드로 응답했다.
    #[error("EmailClient: Rejected by provider ({status})")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("EmailClient: Console Error")]
    ConsoleError(#[from] std::io::Error),
}

impl std::fmt::Debug for EmailClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// 알림 메일이 어떤 경로로 처리되었는지 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// 프로바이더가 메일을 받아들였다.
    Sent,
    /// API 키가 없어서 콘솔에만 출력했다.
    Logged,
}

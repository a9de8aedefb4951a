use crate::{email_client::EmailClientError, utils::error_chain_fmt};

// 오류 관리를 편하게 하기 위한 래퍼 타입
// `main`과 테스트 하네스처럼 여러 종류의 오류를 한데 모아야 할 때 사용한다.
// 핸들러에서만 쓰는 오류는 핸들러 옆에 정의한다.
#[derive(thiserror::Error)]
pub enum ContactFormError {
    #[error("Reqwest Error")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Email Client Error")]
    EmailClientError(#[from] EmailClientError),

    #[error("IO Error")]
    IOError(#[from] std::io::Error),

    #[error("Config Error")]
    ConfigError(#[from] config::ConfigError),

    #[error("Url Parse Error")]
    UrlParseError(#[from] url::ParseError),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ContactFormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

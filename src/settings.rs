use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde_aux::prelude::deserialize_number_from_string;
use tokio::net::TcpListener;

use crate::{
    email_client::{ConsoleOutput, DefaultEmailClient, EmailClientError, Resend},
    startup::Server,
};

/// 배포 환경에서 Resend API 키를 담는 환경 변수
pub const RESEND_API_KEY: &str = "RESEND_API_KEY";

#[derive(serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub recipients: Vec<String>,
    // 없으면 개발 모드로 동작한다.
    #[serde(default)]
    pub authorization_token: Option<Secret<String>>,
    pub timeout_milliseconds: u64,
}

/// 애플리케이션이 사용할 수 있는 런타임 환경
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Settings {
    pub fn get_settings() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir()
            .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
        let settings_directory = base_path.join("settings");

        // 실행 환경을 식별한다.
        // 지정되지 않았으면 `local`로 기본 설정한다.
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or("local".into())
            .as_str()
            .try_into()
            .map_err(config::ConfigError::Message)?;
        let environment_filename = format!("{}.json", environment.as_str());

        let settings = config::Config::builder()
            .add_source(config::File::from(settings_directory.join("base.json")))
            .add_source(config::File::from(
                settings_directory.join(environment_filename),
            ))
            // 환경 변수로부터 설정에 추가한다.
            // `APP_APPLICATION__PORT=5001` => `Settings.application.port`
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        let mut settings = settings.try_deserialize::<Settings>()?;

        settings.email_client.authorization_token = resolve_token(
            settings.email_client.authorization_token.take(),
            std::env::var(RESEND_API_KEY).ok(),
        );

        Ok(settings)
    }

    pub async fn build_server(&self) -> Result<Server, anyhow::Error> {
        Server::build(self).await
    }
}

/// 구조화된 설정의 토큰이 없거나 비어 있을 때만 `RESEND_API_KEY` 값을 쓴다.
/// 둘 다 비어 있으면 `None`, 즉 개발 모드다.
fn resolve_token(
    configured: Option<Secret<String>>,
    from_env: Option<String>,
) -> Option<Secret<String>> {
    configured
        .filter(|token| !token.expose_secret().is_empty())
        .or_else(|| from_env.filter(|key| !key.is_empty()).map(Secret::new))
}

impl ApplicationSettings {
    pub fn get_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub async fn get_listener(&self) -> Result<TcpListener, std::io::Error> {
        TcpListener::bind(self.get_address()).await
    }
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    /// 빈 문자열은 설정되지 않은 것으로 본다.
    pub fn authorization_token(&self) -> Option<&Secret<String>> {
        self.authorization_token
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())
    }

    pub fn get_email_client(&self) -> Result<DefaultEmailClient, EmailClientError> {
        match self.authorization_token() {
            Some(token) => {
                let token = Secret::new(token.expose_secret().clone());
                Ok(Resend::from_email_client_settings(self, token)?.into())
            }
            None => Ok(ConsoleOutput::stderr().into()),
        }
    }
}

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<&str> for Environment {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

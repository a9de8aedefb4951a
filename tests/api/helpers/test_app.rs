use std::sync::{Arc, Mutex, Once};

use contact_form::{
    email_client::{ConsoleOutput, DefaultEmailClient},
    error::ContactFormError,
    settings::Settings,
    startup::{AppState, Server},
    telemetry::{get_tracing_subscriber, init_tracing_subscriber},
};
use secrecy::Secret;
use tracing::{level_filters::LevelFilter, Subscriber};
use url::Url;
use wiremock::MockServer;

pub struct TestApp {
    pub settings: Settings,
    // Resend API를 대신하는 mock 서버
    pub email_server: MockServer,
    // 개발 모드에서 콘솔로 출력된 내용
    pub console: CapturedConsole,
    api_client: reqwest::Client,
}

/// 콘솔 출력을 메모리에 모은다.
#[derive(Clone, Default)]
pub struct CapturedConsole(Arc<Mutex<Vec<u8>>>);

impl CapturedConsole {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedConsole {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl TestApp {
    /// API 키가 설정된 애플리케이션을 백그라운드에서 구동한다.
    /// 메일은 mock 서버로 전달된다.
    pub async fn spawn_app() -> Result<Self, ContactFormError> {
        Self::spawn_app_with(|settings| {
            settings.email_client.authorization_token = Some(Secret::new("re_test".into()));
        })
        .await
    }

    /// API 키가 없는 개발 모드 애플리케이션을 구동한다.
    pub async fn spawn_dev_app() -> Result<Self, ContactFormError> {
        Self::spawn_app_with(|settings| {
            settings.email_client.authorization_token = None;
        })
        .await
    }

    pub async fn spawn_app_with(
        configure: impl FnOnce(&mut Settings),
    ) -> Result<Self, ContactFormError> {
        Self::set_tracing();

        let mut settings = Settings::get_settings()?;
        let email_server = MockServer::start().await;
        settings.email_client.base_url = email_server.uri();
        // 무작위 포트를 사용해서 테스트 격리를 보장한다.
        settings.application.port = 0;
        configure(&mut settings);

        let console = CapturedConsole::default();
        let email_client = match settings.email_client.get_email_client()? {
            DefaultEmailClient::Console(_) => {
                let sink = console.clone();
                DefaultEmailClient::from(ConsoleOutput::new(move || sink.clone()))
            }
            client => client,
        };

        let tcp_listener = settings.application.get_listener().await?;
        // OS가 할당한 포트 번호를 설정에 반영한다.
        settings.application.port = tcp_listener.local_addr()?.port();

        let server = Server::new(
            tcp_listener,
            AppState {
                email_client,
                sender: settings.email_client.sender.clone(),
                recipients: settings.email_client.recipients.clone(),
            },
        );
        // 반환되는 핸들은 사용하지 않는다.
        let _ = tokio::spawn(server.run());

        Ok(TestApp {
            settings,
            email_server,
            console,
            api_client: reqwest::Client::new(),
        })
    }

    // 테스트 로그 설정을 한다.
    fn set_tracing() {
        static ONCE: Once = Once::new();
        ONCE.call_once(|| {
            // 트레이트 객체를 사용해서 타입 문제를 해결했다.
            let tracing_subscriber: Box<dyn Subscriber + Send + Sync> = std::env::var("TEST_LOG")
                .map_or(
                    Box::new(get_tracing_subscriber(
                        "test",
                        LevelFilter::ERROR,
                        std::io::sink,
                    )),
                    |_| {
                        Box::new(get_tracing_subscriber(
                            "test",
                            LevelFilter::TRACE,
                            std::io::stdout,
                        ))
                    },
                );
            init_tracing_subscriber(tracing_subscriber);
        });
    }

    pub fn uri(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "http://{}/",
            self.settings.application.get_address()
        ))
    }

    pub fn send_email_uri(&self) -> Result<Url, url::ParseError> {
        self.uri()?.join("api/send-email")
    }

    /// JSON 본문으로 문의를 보낸다.
    pub async fn post_send_email(
        &self,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ContactFormError> {
        self.post_send_email_raw(body.to_string(), "application/json")
            .await
    }

    /// 본문과 `Content-Type`을 그대로 보낸다.
    pub async fn post_send_email_raw(
        &self,
        body: String,
        content_type: &str,
    ) -> Result<reqwest::Response, ContactFormError> {
        Ok(self
            .api_client
            .post(self.send_email_uri()?)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?)
    }

    pub async fn request_send_email(
        &self,
        method: reqwest::Method,
    ) -> Result<reqwest::Response, ContactFormError> {
        Ok(self
            .api_client
            .request(method, self.send_email_uri()?)
            .body("not even json")
            .send()
            .await?)
    }
}

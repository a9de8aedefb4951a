mod base;
mod console;
mod resend;

pub use base::{DeliveryOutcome, EmailClientError};
pub use console::ConsoleOutput;
pub use resend::Resend;

use crate::domain::NotificationEmail;

// 메일 전달 방식을 쉽게 바꾸기 위한 트레이트
#[trait_variant::make(Send)]
pub trait EmailClient {
    async fn send_email(
        &self,
        email: &NotificationEmail,
    ) -> Result<DeliveryOutcome, EmailClientError>;
}

/// 서버가 사용하는 이메일 클라이언트
///
/// API 키가 설정되어 있으면 Resend로 보내고, 없으면 콘솔에 출력한다.
pub enum DefaultEmailClient {
    Resend(Resend),
    Console(ConsoleOutput),
}

impl EmailClient for DefaultEmailClient {
    async fn send_email(
        &self,
        email: &NotificationEmail,
    ) -> Result<DeliveryOutcome, EmailClientError> {
        match self {
            DefaultEmailClient::Resend(client) => client.send_email(email).await,
            DefaultEmailClient::Console(console) => console.send_email(email).await,
        }
    }
}

impl From<Resend> for DefaultEmailClient {
    fn from(client: Resend) -> Self {
        DefaultEmailClient::Resend(client)
    }
}

impl From<ConsoleOutput> for DefaultEmailClient {
    fn from(console: ConsoleOutput) -> Self {
        DefaultEmailClient::Console(console)
    }
}

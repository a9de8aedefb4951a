use std::io::Write;

use tracing_subscriber::fmt::{writer::BoxMakeWriter, MakeWriter};

use crate::domain::NotificationEmail;

use super::{DeliveryOutcome, EmailClient, EmailClientError};

/// API 키가 없을 때 사용하는 개발용 클라이언트
///
/// 메일을 보내지 않고 본문을 로그 이벤트로 남긴다.
/// 사람이 읽기 쉬운 형태는 별도의 출력(기본값은 stderr)에 쓴다.
/// stdout은 JSON 로그 전용이다.
pub struct ConsoleOutput {
    writer: BoxMakeWriter,
}

impl ConsoleOutput {
    pub fn new<W>(writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            writer: BoxMakeWriter::new(writer),
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr)
    }
}

impl EmailClient for ConsoleOutput {
    async fn send_email(
        &self,
        email: &NotificationEmail,
    ) -> Result<DeliveryOutcome, EmailClientError> {
        tracing::info!(
            reply_to = %email.reply_to,
            subject = %email.subject,
            body = %email.text,
            "RESEND_API_KEY is not configured. Logging the notification email instead of sending it."
        );
        let mut writer = self.writer.make_writer();
        writeln!(writer, "=== お問い合わせメール ===")?;
        writeln!(writer, "{}", email.text)?;
        writeln!(writer, "========================")?;
        writer.flush()?;

        Ok(DeliveryOutcome::Logged)
    }
}

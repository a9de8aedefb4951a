use super::ContactSubmission;

const COMPANY_PLACEHOLDER: &str = "未入力";

/// 담당자에게 보내는 문의 알림 메일
///
/// 직렬화한 결과가 그대로 Resend API의 요청 본문이 된다.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct NotificationEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
}

impl NotificationEmail {
    /// 검증된 문의 내용으로만 만들 수 있다.
    /// 답장은 문의한 사람에게 가도록 `reply_to`를 설정한다.
    pub fn new(submission: &ContactSubmission, from: &str, to: &[String]) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_vec(),
            reply_to: submission.email().to_string(),
            subject: format!("【Cosmico】お問い合わせ: {}様より", submission.name()),
            text: render_body(submission),
        }
    }
}

fn render_body(submission: &ContactSubmission) -> String {
    format!(
        "
お問い合わせがありました。

【お名前】
{name}

【会社名】
{company}

【メールアドレス】
{email}

【お問い合わせ内容】
{message}

---
このメールは、Cosmicoウェブサイトのお問い合わせフォームから送信されました。
",
        name = submission.name(),
        company = submission.company().unwrap_or(COMPANY_PLACEHOLDER),
        email = submission.email(),
        message = submission.message(),
    )
}

use super::SubmissionRequest;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InvalidSubmission {
    #[error("Required field `{0}` is missing or empty.")]
    MissingField(&'static str),
}

/// 필수 항목 검사를 통과한 문의 내용
///
/// `name`, `email`, `message`는 항상 비어 있지 않다.
/// 공백만 있는 값은 그대로 받아들인다.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    name: String,
    company: Option<String>,
    email: String,
    message: String,
}

impl TryFrom<SubmissionRequest> for ContactSubmission {
    type Error = InvalidSubmission;

    fn try_from(request: SubmissionRequest) -> Result<Self, Self::Error> {
        let SubmissionRequest {
            name,
            company,
            email,
            message,
        } = request;

        Ok(Self {
            name: required("name", name)?,
            // 없는 경우와 빈 문자열은 구분하지 않는다.
            company: company.filter(|company| !company.is_empty()),
            email: required("email", email)?,
            message: required("message", message)?,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, InvalidSubmission> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(InvalidSubmission::MissingField(field)),
    }
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

use bytes::Bytes;

/// 문의 폼에서 전달된 검증 전의 본문
///
/// 모든 필드는 없거나 `null`일 수 있다.
/// 필수 항목 검사는 `ContactSubmission`으로 변환할 때 수행한다.
#[derive(serde::Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum SubmissionParseError {
    #[error("Request body is not valid JSON.")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Request body is not a JSON object: {0}")]
    NotAnObject(&'static str),
    #[error("Request body has an unexpected field type.")]
    InvalidField(#[source] serde_json::Error),
}

impl SubmissionRequest {
    /// 요청 본문을 파싱한다.
    ///
    /// 본문은 JSON 객체이거나, JSON 객체를 담은 JSON 문자열일 수 있다.
    /// `Content-Type`은 보지 않는다.
    pub fn parse(body: &Bytes) -> Result<Self, SubmissionParseError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(SubmissionParseError::InvalidJson)?;
        // 문자열로 한 번 더 감싸서 보내는 클라이언트가 있다.
        let value = match value {
            serde_json::Value::String(raw) => {
                serde_json::from_str(&raw).map_err(SubmissionParseError::InvalidJson)?
            }
            other => other,
        };

        match value {
            serde_json::Value::Object(_) => {
                serde_json::from_value(value).map_err(SubmissionParseError::InvalidField)
            }
            serde_json::Value::Null => Err(SubmissionParseError::NotAnObject("null")),
            serde_json::Value::Bool(_) => Err(SubmissionParseError::NotAnObject("bool")),
            serde_json::Value::Number(_) => Err(SubmissionParseError::NotAnObject("number")),
            serde_json::Value::String(_) => Err(SubmissionParseError::NotAnObject("string")),
            serde_json::Value::Array(_) => Err(SubmissionParseError::NotAnObject("array")),
        }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

impl AskRequest {
    /// Lenient parse: an absent or malformed body means an empty question.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// The `{"answer": ...}` reply returned for every ask and quiz outcome.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerEnvelope {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_defaults_to_empty() {
        assert_eq!(AskRequest::from_body(br#"{"question":"hi"}"#).question, "hi");
        assert_eq!(AskRequest::from_body(b"{}").question, "");
        assert_eq!(AskRequest::from_body(b"").question, "");
        assert_eq!(AskRequest::from_body(b"not json").question, "");
        assert_eq!(AskRequest::from_body(br#"{"question":null}"#).question, "");
    }

    #[test]
    fn envelope_serializes_single_key() {
        let body = serde_json::to_string(&AnswerEnvelope {
            answer: "4".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"answer":"4"}"#);
    }
}

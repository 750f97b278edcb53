//! The `ask` and `quiz` operations.
//!
//! Both return a [`RelayOutcome`] rather than a bare string so callers can
//! tell a real answer from a folded failure before it becomes an
//! [`AnswerEnvelope`].

use tracing::{debug, warn};

use crate::api::AnswerEnvelope;
use crate::upstream::{ChatBackend, UpstreamError};

/// Reply sent when `ask` gets nothing to forward.
pub const EMPTY_QUESTION_REPLY: &str = "Please provide a valid question.";

/// Fixed instruction sent upstream by `quiz`.
pub const QUIZ_PROMPT: &str = "Generate exactly 3 multiple-choice questions (MCQs).
Each must include:
- Question
- Options A, B, C, D
- Correct answer";

#[derive(Debug)]
pub enum RelayOutcome {
    /// Completion text from the upstream provider.
    Answered(String),
    /// The question was empty; no upstream call was made.
    Guidance,
    Failed(UpstreamError),
}

impl RelayOutcome {
    pub fn is_answered(&self) -> bool {
        matches!(self, RelayOutcome::Answered(_))
    }

    pub fn into_envelope(self) -> AnswerEnvelope {
        let answer = match self {
            RelayOutcome::Answered(text) => text,
            RelayOutcome::Guidance => EMPTY_QUESTION_REPLY.to_string(),
            RelayOutcome::Failed(err) => err.envelope_text(),
        };
        AnswerEnvelope { answer }
    }
}

/// Forwards `question` upstream unless it is empty.
pub async fn ask(backend: &dyn ChatBackend, question: &str) -> RelayOutcome {
    if question.is_empty() {
        debug!("Empty question, skipping upstream");
        return RelayOutcome::Guidance;
    }

    debug!(
        provider = %backend.provider(),
        chars = question.chars().count(),
        "Relaying question"
    );
    forward(backend, question).await
}

/// Asks the upstream model for three fresh multiple-choice questions.
pub async fn quiz(backend: &dyn ChatBackend) -> RelayOutcome {
    debug!(provider = %backend.provider(), "Relaying quiz prompt");
    forward(backend, QUIZ_PROMPT).await
}

async fn forward(backend: &dyn ChatBackend, prompt: &str) -> RelayOutcome {
    match backend.complete(prompt).await {
        Ok(text) => RelayOutcome::Answered(text),
        Err(err) => {
            warn!(provider = %backend.provider(), error = %err, "Upstream call failed");
            RelayOutcome::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::provider::Provider;

    /// Records every prompt and replies from a canned result.
    struct StubBackend {
        reply: Result<String, &'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubBackend {
        fn answering(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(field: &'static str) -> Self {
            Self {
                reply: Err(field),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for StubBackend {
        async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(UpstreamError::MissingField)
        }

        fn provider(&self) -> Provider {
            Provider::OpenAiRaw
        }
    }

    #[tokio::test]
    async fn empty_question_never_reaches_upstream() {
        let backend = StubBackend::answering("unused");
        let outcome = ask(&backend, "").await;

        assert!(matches!(outcome, RelayOutcome::Guidance));
        assert_eq!(outcome.into_envelope().answer, EMPTY_QUESTION_REPLY);
        assert!(backend.prompts().is_empty());
    }

    #[tokio::test]
    async fn whitespace_question_is_forwarded_once() {
        let backend = StubBackend::answering("?");
        let outcome = ask(&backend, "   ").await;

        assert!(outcome.is_answered());
        assert_eq!(backend.prompts(), vec!["   ".to_string()]);
    }

    #[tokio::test]
    async fn question_is_sent_verbatim_once() {
        let backend = StubBackend::answering("4");
        let outcome = ask(&backend, " What is 2+2? ").await;

        assert!(outcome.is_answered());
        assert_eq!(outcome.into_envelope().answer, "4");
        assert_eq!(backend.prompts(), vec![" What is 2+2? ".to_string()]);
    }

    #[tokio::test]
    async fn quiz_sends_fixed_prompt() {
        let backend = StubBackend::answering("1. What is Rust?\nA) ...");
        let outcome = quiz(&backend).await;

        assert!(outcome.is_answered());
        assert_eq!(backend.prompts(), vec![QUIZ_PROMPT.to_string()]);
    }

    #[tokio::test]
    async fn failures_are_tagged_then_folded() {
        let backend = StubBackend::failing_on("choices");

        let outcome = ask(&backend, "hello").await;
        assert!(matches!(
            outcome,
            RelayOutcome::Failed(UpstreamError::MissingField("choices"))
        ));
        let answer = outcome.into_envelope().answer;
        assert!(answer.to_lowercase().contains("error"));

        let outcome = quiz(&backend).await;
        assert!(!outcome.is_answered());
        assert!(outcome.into_envelope().answer.starts_with("Backend error: "));
    }

    #[test]
    fn quiz_prompt_asks_for_three_lettered_mcqs() {
        assert!(QUIZ_PROMPT.contains("exactly 3 multiple-choice questions"));
        assert!(QUIZ_PROMPT.contains("Options A, B, C, D"));
        assert!(QUIZ_PROMPT.contains("Correct answer"));
    }
}

//! AI code auditor.
//!
//! Sends one bundled source file and a developer question to a text
//! generator under a fixed persona, and returns the answer verbatim. Any
//! failure becomes a fixed fallback answer; callers never see a transport
//! error unless they ask for it with [`Auditor::try_audit`].

pub mod client;
pub mod error;
pub mod types;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::catalog::BackendFile;

pub use client::ClaudeClient;
pub use error::{AuditError, GenerateError};

/// Persona given to the model with every audit.
pub const SYSTEM_INSTRUCTION: &str = "You are a world-class backend security and architecture auditor. \
You will be provided with pieces of Node.js/Express/MySQL code. \
Your goal is to explain the architecture, identify security best practices, and answer specific developer questions. \
Keep answers professional, concise, and technical. Use Markdown formatting.";

/// Sampling temperature for every audit.
pub const TEMPERATURE: f32 = 0.7;

/// Longest question accepted, in characters.
pub const MAX_QUESTION_CHARS: usize = 4000;

/// Answer used when the model returns no text.
pub const EMPTY_ANSWER: &str = "I was unable to analyze the code at this time.";

/// Answer used when the call fails for any reason.
pub const FAILURE_ANSWER: &str =
    "Error: Failed to connect to the AI Auditor. Please check your API configuration.";

/// One generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Something that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] on transport or provider failure.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}

/// Outcome of [`Auditor::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditAnswer {
    pub text: String,
    /// True when `text` is [`FAILURE_ANSWER`].
    pub failed: bool,
}

/// The auditor. Cheap to clone.
#[derive(Clone, Default)]
pub struct Auditor {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl fmt::Debug for Auditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auditor")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl Auditor {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// An auditor with no backend; every audit fails with
    /// [`AuditError::NotConfigured`].
    #[must_use]
    pub const fn disabled() -> Self {
        Self { generator: None }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Check a question before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::EmptyQuestion`] for a blank question and
    /// [`AuditError::QuestionTooLong`] past [`MAX_QUESTION_CHARS`].
    pub fn validate_question(question: &str) -> Result<(), AuditError> {
        if question.trim().is_empty() {
            return Err(AuditError::EmptyQuestion);
        }
        let len = question.chars().count();
        if len > MAX_QUESTION_CHARS {
            return Err(AuditError::QuestionTooLong {
                len,
                max: MAX_QUESTION_CHARS,
            });
        }
        Ok(())
    }

    /// User prompt embedding the file and the question.
    #[must_use]
    pub fn build_prompt(file: &BackendFile, question: &str) -> String {
        format!(
            "CODE TO AUDIT:\n```{}\n{}\n```\n\nUSER QUESTION:\n{}\n",
            file.language.as_str(),
            file.content.trim_end(),
            question.trim()
        )
    }

    /// Run one audit and surface every failure.
    ///
    /// An empty answer is replaced by [`EMPTY_ANSWER`], which is not a
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`Self::validate_question`],
    /// [`AuditError::NotConfigured`] without a backend, and
    /// [`AuditError::Transport`] when the generator fails.
    #[instrument(skip(self, question), fields(path = %file.path))]
    pub async fn try_audit(&self, file: &BackendFile, question: &str) -> Result<String, AuditError> {
        Self::validate_question(question)?;
        let generator = self.generator.as_ref().ok_or(AuditError::NotConfigured)?;

        let request = GenerationRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: Self::build_prompt(file, question),
            temperature: TEMPERATURE,
        };
        let text = generator.generate(&request).await?;

        if text.trim().is_empty() {
            tracing::info!("Auditor returned an empty answer");
            Ok(EMPTY_ANSWER.to_string())
        } else {
            Ok(text)
        }
    }

    /// Run one audit, replacing any failure after validation with
    /// [`FAILURE_ANSWER`].
    ///
    /// # Errors
    ///
    /// Only the question checks of [`Self::validate_question`] are returned.
    pub async fn audit(&self, file: &BackendFile, question: &str) -> Result<AuditAnswer, AuditError> {
        match self.try_audit(file, question).await {
            Ok(text) => Ok(AuditAnswer {
                text,
                failed: false,
            }),
            Err(e @ (AuditError::EmptyQuestion | AuditError::QuestionTooLong { .. })) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, path = file.path, "Audit failed");
                Ok(AuditAnswer {
                    text: FAILURE_ANSWER.to_string(),
                    failed: true,
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::catalog;

    /// Replies from a fixed script and records every request.
    struct Scripted {
        replies: Mutex<VecDeque<Result<String, GenerateError>>>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<String, GenerateError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn controller_file() -> &'static BackendFile {
        catalog::find(catalog::DEFAULT_AUDIT_PATH).unwrap()
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = Auditor::build_prompt(controller_file(), "  Why bcrypt?  ");
        assert!(prompt.starts_with("CODE TO AUDIT:\n```javascript\n"));
        assert!(prompt.contains("exports.softDelete"));
        assert!(prompt.ends_with("```\n\nUSER QUESTION:\nWhy bcrypt?\n"));
    }

    #[tokio::test]
    async fn test_answer_returned_verbatim() {
        let generator = Scripted::new(vec![Ok("## Findings\n\n- ok".to_string())]);
        let auditor = Auditor::new(generator.clone());

        let answer = auditor.audit(controller_file(), "Is it safe?").await.unwrap();
        assert_eq!(answer.text, "## Findings\n\n- ok");
        assert!(!answer.failed);

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system, SYSTEM_INSTRUCTION);
        assert!((seen[0].temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_empty_answer_fallback() {
        let auditor = Auditor::new(Scripted::new(vec![Ok("   ".to_string())]));
        let answer = auditor.audit(controller_file(), "Anything?").await.unwrap();
        assert_eq!(answer.text, EMPTY_ANSWER);
        assert!(!answer.failed);
    }

    #[tokio::test]
    async fn test_transport_failure_fallback() {
        let auditor = Auditor::new(Scripted::new(vec![Err(GenerateError::RateLimited(5))]));
        let answer = auditor.audit(controller_file(), "Anything?").await.unwrap();
        assert_eq!(answer.text, FAILURE_ANSWER);
        assert!(answer.failed);
    }

    #[tokio::test]
    async fn test_try_audit_surfaces_failure() {
        let auditor = Auditor::new(Scripted::new(vec![Err(GenerateError::Unauthorized(
            "Invalid API key".to_string(),
        ))]));
        let err = auditor.try_audit(controller_file(), "Anything?").await.unwrap_err();
        assert!(matches!(err, AuditError::Transport(GenerateError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_unconfigured_falls_back() {
        let auditor = Auditor::disabled();
        assert!(matches!(
            auditor.try_audit(controller_file(), "Anything?").await,
            Err(AuditError::NotConfigured)
        ));
        let answer = auditor.audit(controller_file(), "Anything?").await.unwrap();
        assert!(answer.failed);
    }

    #[tokio::test]
    async fn test_question_checks_skip_the_generator() {
        let generator = Scripted::new(vec![]);
        let auditor = Auditor::new(generator.clone());

        assert!(matches!(
            auditor.audit(controller_file(), " \n\t").await,
            Err(AuditError::EmptyQuestion)
        ));
        let long = "a".repeat(MAX_QUESTION_CHARS + 1);
        assert!(matches!(
            auditor.audit(controller_file(), &long).await,
            Err(AuditError::QuestionTooLong { .. })
        ));
        assert!(generator.seen.lock().unwrap().is_empty());
    }
}

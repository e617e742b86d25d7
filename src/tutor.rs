//! Doubt-solving session: prompt composition and the caller-facing
//! `Idle -> Generating -> {Success | Error}` state machine.

use anyhow::Result;
use log::{debug, warn};

use crate::gemini::{GenerateContent, GenerateContentRequest, GenerateContentResponse};

/// Shown when a well-formed response carries no answer text.
pub const FALLBACK_ANSWER: &str = "I couldn't generate an answer. Please try rephrasing.";

/// Shown when every attempt to reach the AI endpoint failed.
pub const CONNECTIVITY_MESSAGE: &str = "Error connecting to the AI Lab. Please try again.";

const PROMPT_PREFIX: &str = "You are a futuristic English Tutor for Indian defense exams \
(NDA, Air Force Group Y). Explain this doubt in detail with examples and exam-specific tips: ";

const SYSTEM_INSTRUCTION: &str =
    "Use bullet points, bold key terms, and provide a 'Pro Tip' for exams.";

/// Observable state of one tutoring session.
///
/// Re-entrant: asking again from either terminal state goes back through
/// `Generating` before reaching a new terminal state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TutorState {
    #[default]
    Idle,
    Generating,
    Success(String),
    Error(String),
}

/// Wraps a doubt in the tutoring prompt. The doubt text is embedded verbatim.
fn compose_prompt(doubt: &str) -> String {
    format!("{}{}", PROMPT_PREFIX, doubt)
}

/// One doubt-solving session over a [`GenerateContent`] client.
///
/// At most one request is in flight per session; the state holds the answer
/// of the most recent completed request until the next one starts.
pub struct TutorSession<G: GenerateContent> {
    gemini: G,
    state: TutorState,
}

impl<G: GenerateContent> TutorSession<G> {
    pub fn new(gemini: G) -> Self {
        Self {
            gemini,
            state: TutorState::Idle,
        }
    }

    pub fn state(&self) -> &TutorState {
        &self.state
    }

    /// Validates the doubt and enters `Generating`, clearing any previous
    /// answer. Empty or whitespace-only input is rejected with no state
    /// change and no request composed.
    fn begin(&mut self, doubt: &str) -> Option<GenerateContentRequest> {
        if doubt.trim().is_empty() {
            debug!("Ignoring empty doubt");
            return None;
        }

        self.state = TutorState::Generating;
        Some(GenerateContentRequest::new(
            &compose_prompt(doubt),
            SYSTEM_INSTRUCTION,
        ))
    }

    /// Resolves `Generating` into a terminal state. Raw errors never escape;
    /// both exit paths leave `Generating`.
    fn finish(&mut self, result: Result<GenerateContentResponse>) {
        self.state = match result {
            Ok(response) => TutorState::Success(
                response
                    .answer_text()
                    .unwrap_or(FALLBACK_ANSWER)
                    .to_string(),
            ),
            Err(e) => {
                warn!("Doubt solving failed: {:#}", e);
                TutorState::Error(CONNECTIVITY_MESSAGE.to_string())
            }
        };
    }

    /// Asks the tutor one free-text question and drives the session to its
    /// next terminal state.
    #[tracing::instrument(skip(self, doubt))]
    pub async fn ask(&mut self, doubt: &str) {
        let Some(request) = self.begin(doubt) else {
            return;
        };

        let result = self.gemini.generate(&request).await;
        self.finish(result);
    }
}

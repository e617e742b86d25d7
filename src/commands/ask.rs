//! The `ask` command: wires the HTTP client to one tutoring session.

use anyhow::{Context, Result, bail};

use crate::config::ApiConfig;
use crate::gemini::Gemini;
use crate::tutor::{TutorSession, TutorState};

const USER_AGENT: &str = "doubtlab-cli";

/// Runs one doubt through the tutor and prints the outcome.
///
/// Success and the no-answer fallback both go to stdout; connectivity
/// exhaustion becomes a non-zero exit carrying the fixed user-facing message.
#[tracing::instrument(skip(api_key, api_url, model))]
pub async fn ask(
    question: &str,
    api_key: String,
    api_url: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let config = ApiConfig::new(api_key, api_url, model);

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    let mut session = TutorSession::new(Gemini::new(client, config));
    session.ask(question).await;

    match session.state() {
        TutorState::Success(answer) => {
            println!("{}", answer);
            Ok(())
        }
        TutorState::Error(message) => bail!("{}", message),
        // Empty input was rejected before any request was issued.
        TutorState::Idle | TutorState::Generating => Ok(()),
    }
}

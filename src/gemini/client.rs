use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::ApiConfig;
use crate::retry::{RetryPolicy, with_retry};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerateContent: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// Client for the generative-language endpoint, with built-in retry.
pub struct Gemini {
    client: Client,
    config: ApiConfig,
    policy: RetryPolicy,
}

impl Gemini {
    #[tracing::instrument(skip(client, config))]
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self::with_policy(client, config, RetryPolicy::default())
    }

    pub fn with_policy(client: Client, config: ApiConfig, policy: RetryPolicy) -> Self {
        Self {
            client,
            config,
            policy,
        }
    }
}

#[async_trait]
impl GenerateContent for Gemini {
    /// POSTs the request body to `generateContent`, authenticating via the
    /// `key` query parameter.
    ///
    /// A 2xx response with a parseable body is terminal success regardless of
    /// its content. A transport error, a non-success status, or an unparseable
    /// body all count as one failed attempt and are retried with backoff.
    #[tracing::instrument(skip(self, request))]
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.config.generate_url();

        debug!("Sending doubt to {}...", url);

        with_retry(&self.policy, "Generating answer", || {
            let client = self.client.clone();
            let url = url.clone();
            async move {
                let response = client
                    .post(&url)
                    .query(&[("key", self.config.api_key.as_str())])
                    .json(request)
                    .send()
                    .await
                    .context("Failed to send request to the AI endpoint")?;

                let response = response
                    .error_for_status()
                    .context("AI endpoint returned an error status")?;

                let parsed = response
                    .json::<GenerateContentResponse>()
                    .await
                    .context("Failed to parse JSON response from the AI endpoint")?;

                Ok(parsed)
            }
        })
        .await
    }
}

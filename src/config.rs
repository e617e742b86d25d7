//! API configuration injected into the Gemini client.

/// Base URL of the generative-language API (defaults to Google's endpoint).
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for doubt solving.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Endpoint, model and credential for the AI call.
///
/// The key may be the empty string in constrained deployment environments; the
/// request is still issued and fails at the provider, not in this client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: String,
}

impl ApiConfig {
    pub fn new(api_key: String, api_url: Option<String>, model: Option<String>) -> Self {
        Self {
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
        }
    }

    /// URL of the `generateContent` operation for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        )
    }
}

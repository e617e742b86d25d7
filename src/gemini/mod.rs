//! Wire contract and HTTP client for the generative-language API.

mod client;
mod types;

pub use client::{Gemini, GenerateContent};
#[cfg(test)]
pub use client::MockGenerateContent;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, SystemInstruction,
};

//! Text generation for append/insert
//!
//! The note mutators only see the [`Generator`] trait: an ordered list of
//! role-tagged messages in, one completion out. [`openai::OpenAiClient`] is
//! the production implementation.

pub mod openai;
pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use openai::OpenAiClient;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single role-tagged message sent to the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Produces a single completion for a conversation.
///
/// Implementations block until the completion arrives or fails. Failures
/// are reported as [`crate::error::ObsError::GenerationFailure`].
pub trait Generator {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

impl<G: Generator + ?Sized> Generator for &G {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        (**self).complete(messages)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        (**self).complete(messages)
    }
}

//! Scripted [`ChatModel`] for tests: returns a fixed reply and records every request.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatModel, ChatRequest, LlmError, Provider};

pub enum FakeReply {
    Text(String),
    Unavailable,
}

pub struct FakeChatModel {
    reply: FakeReply,
    seen: Mutex<Vec<ChatRequest>>,
}

impl FakeChatModel {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: FakeReply::Text(text.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            reply: FakeReply::Unavailable,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for FakeChatModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.reply {
            FakeReply::Text(text) if text.trim().is_empty() => Err(LlmError::EmptyContent),
            FakeReply::Text(text) => Ok(text.clone()),
            FakeReply::Unavailable => Err(LlmError::Unconfigured(Provider::Groq)),
        }
    }
}

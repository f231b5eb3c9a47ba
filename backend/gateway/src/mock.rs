//! Mock gateway with scripted replies, for exercising the conversation
//! store without a network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use amiga_core::{ChatSession, CompanionGateway, SessionHandle, SessionSpec, SpeechAudio};

/// A mock companion gateway.
pub struct MockGateway {
    avatar_url: String,
    replies: Vec<String>,
    fail_initialize: bool,
    fail_send: bool,
    sent: Arc<Mutex<Vec<String>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            avatar_url: "data:image/png;base64,bW9jaw==".to_string(),
            replies: Vec::new(),
            fail_initialize: false,
            fail_send: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue replies returned in order; once exhausted, a canned reply is used.
    pub fn with_replies<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies = replies.into_iter().map(Into::into).collect();
        self
    }

    pub fn failing_initialize(mut self) -> Self {
        self.fail_initialize = true;
        self
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    /// Utterances forwarded through sessions opened by this gateway.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompanionGateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn initialize(&self, _spec: &SessionSpec) -> Result<SessionHandle> {
        if self.fail_initialize {
            anyhow::bail!("mock initialization failure");
        }
        Ok(SessionHandle {
            avatar_url: self.avatar_url.clone(),
            session: Box::new(MockSession {
                replies: self.replies.clone().into(),
                fail_send: self.fail_send,
                sent: Arc::clone(&self.sent),
            }),
        })
    }

    async fn synthesize_speech(&self, _text: &str) -> Result<SpeechAudio> {
        Ok(SpeechAudio {
            bytes: b"mock audio".to_vec(),
            mime_type: "audio/mp3".to_string(),
        })
    }
}

struct MockSession {
    replies: VecDeque<String>,
    fail_send: bool,
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ChatSession for MockSession {
    async fn send(&mut self, text: &str) -> Result<String> {
        if self.fail_send {
            anyhow::bail!("mock send failure");
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(self
            .replies
            .pop_front()
            .unwrap_or_else(|| "Oi! 💜".to_string()))
    }
}

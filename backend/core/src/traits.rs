use anyhow::Result;
use async_trait::async_trait;

/// What the gateway needs to open a companion session.
///
/// Built from a persona by the companion crate; the gateway never sees
/// persona internals beyond these fields.
#[derive(Debug, Clone)]
pub struct SessionSpec {
    /// Display name of the companion (logging only).
    pub companion_name: String,
    /// System prompt defining the companion's character and rules.
    pub system_prompt: String,
    /// Prompt for the avatar image generation model.
    pub avatar_prompt: String,
    /// Sampling temperature for chat replies.
    pub temperature: f32,
}

/// Result of a successful initialization: the avatar asset plus the
/// stateful chat session that future exchanges go through.
pub struct SessionHandle {
    /// Avatar image as a `data:{mime};base64,...` URL.
    pub avatar_url: String,
    pub session: Box<dyn ChatSession>,
}

/// A stateful chat session. The session object owns the model-side turn
/// history; callers hold it explicitly rather than through any ambient
/// module-level handle.
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Send one user utterance and return the reply text.
    ///
    /// On failure the utterance must not remain recorded in the session's
    /// turn history, so a later resend does not duplicate it.
    async fn send(&mut self, text: &str) -> Result<String>;
}

/// Audio returned by speech synthesis.
pub struct SpeechAudio {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// The external generative backend behind the companion: avatar image
/// generation, stateful chat, and optional speech synthesis.
#[async_trait]
pub trait CompanionGateway: Send + Sync {
    /// Backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate the avatar and open a fresh chat session.
    async fn initialize(&self, spec: &SessionSpec) -> Result<SessionHandle>;

    /// Synthesize speech for a reply. Errors if the backend returns no
    /// audio payload.
    async fn synthesize_speech(&self, text: &str) -> Result<SpeechAudio>;
}

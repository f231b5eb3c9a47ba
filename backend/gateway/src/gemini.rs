//! Gemini gateway for amiga.
//!
//! Implements the three backend capabilities over the Gemini REST API:
//! avatar image generation, a stateful chat session, and text-to-speech.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use amiga_core::{ChatSession, CompanionGateway, SessionHandle, SessionSpec, SpeechAudio};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_CHAT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
const DEFAULT_TTS_VOICE: &str = "Kore";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }

    /// First inline (binary) payload of the first candidate, if any.
    fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Gemini REST gateway.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    image_model: String,
    tts_model: String,
    tts_voice: String,
}

impl GeminiGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            tts_voice: DEFAULT_TTS_VOICE.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_tts_model(mut self, model: impl Into<String>) -> Self {
        self.tts_model = model.into();
        self
    }

    pub fn with_tts_voice(mut self, voice: impl Into<String>) -> Self {
        self.tts_voice = voice.into();
        self
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        post_generate_content(&self.client, &self.api_key, &self.base_url, model, body).await
    }

    /// Generate the companion avatar and return it as a data URL.
    async fn generate_avatar(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                }),
                ..Default::default()
            }),
        };

        let response = self.generate_content(&self.image_model, &body).await?;
        let inline = response
            .first_inline_data()
            .context("no image was generated")?;
        Ok(format!("data:{};base64,{}", inline.mime_type, inline.data))
    }
}

#[async_trait]
impl CompanionGateway for GeminiGateway {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn initialize(&self, spec: &SessionSpec) -> Result<SessionHandle> {
        let avatar_url = self.generate_avatar(&spec.avatar_prompt).await?;
        debug!(companion = %spec.companion_name, "Avatar generated; opening chat session");

        let session = GeminiChatSession {
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.chat_model.clone(),
            system_instruction: Content::system(spec.system_prompt.as_str()),
            temperature: spec.temperature,
            contents: Vec::new(),
        };

        Ok(SessionHandle {
            avatar_url,
            session: Box::new(session),
        })
    }

    async fn synthesize_speech(&self, text: &str) -> Result<SpeechAudio> {
        let body = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::user_text(text)],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: self.tts_voice.clone(),
                        },
                    },
                }),
                ..Default::default()
            }),
        };

        let response = self.generate_content(&self.tts_model, &body).await?;
        let inline = response
            .first_inline_data()
            .context("no audio payload was returned")?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&inline.data)
            .context("Failed to decode audio payload")?;

        Ok(SpeechAudio {
            bytes,
            mime_type: inline.mime_type.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Chat session
// ---------------------------------------------------------------------------

/// A stateful Gemini chat session.
///
/// The turn history lives client-side in `contents`; every `send` posts
/// the full list plus the new utterance. An unanswered utterance is
/// removed again so a resend does not duplicate it.
struct GeminiChatSession {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    system_instruction: Content,
    temperature: f32,
    contents: Vec<Content>,
}

impl GeminiChatSession {
    async fn post_turns(&self) -> Result<String> {
        let body = GenerateContentRequest {
            system_instruction: Some(self.system_instruction.clone()),
            contents: self.contents.clone(),
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                ..Default::default()
            }),
        };

        let parsed =
            post_generate_content(&self.client, &self.api_key, &self.base_url, &self.model, &body)
                .await?;
        Ok(parsed.first_text().unwrap_or_default())
    }
}

async fn post_generate_content(
    client: &Client,
    api_key: &str,
    base_url: &str,
    model: &str,
    body: &GenerateContentRequest,
) -> Result<GenerateContentResponse> {
    let url = format!("{}/models/{}:generateContent", base_url, model);
    debug!(model = %model, "Sending request to Gemini");

    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(body)
        .send()
        .await
        .context("Gemini HTTP request failed")?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        anyhow::bail!("Gemini returned {}: {}", status, error_body);
    }

    response
        .json()
        .await
        .context("Failed to parse Gemini response")
}

#[async_trait]
impl ChatSession for GeminiChatSession {
    async fn send(&mut self, text: &str) -> Result<String> {
        self.contents.push(Content::user_text(text));
        match self.post_turns().await {
            Ok(reply) => {
                self.contents.push(Content::model_text(reply.as_str()));
                Ok(reply)
            }
            Err(e) => {
                self.contents.pop();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_uses_camel_case_keys() {
        let body = GenerateContentRequest {
            system_instruction: Some(Content::system("be nice")),
            contents: vec![Content::user_text("oi")],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.9),
                image_config: Some(ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                }),
                ..Default::default()
            }),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"systemInstruction\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"aspectRatio\":\"1:1\""));
        // Unset optional fields stay off the wire.
        assert!(!json.contains("responseModalities"));
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Oi! "}, {"text": "Tudo bem?"}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.first_text().unwrap(), "Oi! Tudo bem?");
        assert!(parsed.first_inline_data().is_none());
    }

    #[test]
    fn test_response_inline_data_extraction() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "aGk="}}]
                }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let inline = parsed.first_inline_data().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "aGk=");
    }

    #[test]
    fn test_empty_response_yields_no_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.first_text().is_none());
    }
}

/// Companion persona trait.
///
/// Each companion has a character definition: a system prompt that shapes
/// its replies, an avatar prompt for the image model, and display
/// metadata. The trait is the seam between persona data and the session
/// the gateway opens.
use serde::{Deserialize, Serialize};

use amiga_core::SessionSpec;

/// The persona definition for a companion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Short identifier (e.g. "yara", "nina")
    pub id: String,
    /// Display name shown to users
    pub display_name: String,
    /// System prompt defining the companion's character and rules
    pub system_prompt: String,
    /// Prompt for generating the companion's avatar image
    pub avatar_prompt: String,
    /// Emoji fallback shown before the avatar exists
    pub avatar: Option<String>,
    /// Tone descriptor for logging/debugging
    pub tone: String,
    /// Chat sampling temperature
    pub temperature: f32,
}

pub trait CompanionBot: Send + Sync {
    fn persona(&self) -> &Persona;

    fn name(&self) -> &str {
        &self.persona().id
    }

    fn display_name(&self) -> &str {
        &self.persona().display_name
    }

    /// Build the spec the gateway needs to open a session for this persona.
    fn session_spec(&self) -> SessionSpec {
        let p = self.persona();
        SessionSpec {
            companion_name: p.display_name.clone(),
            system_prompt: p.system_prompt.clone(),
            avatar_prompt: p.avatar_prompt.clone(),
            temperature: p.temperature,
        }
    }
}

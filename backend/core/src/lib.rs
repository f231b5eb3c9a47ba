pub mod error;
pub mod message;
pub mod mood;
pub mod traits;

pub use error::AmigaError;
pub use message::{Message, Role};
pub use mood::{mood_for, Mood, MoodRule, MOOD_RULES};
pub use traits::{ChatSession, CompanionGateway, SessionHandle, SessionSpec, SpeechAudio};

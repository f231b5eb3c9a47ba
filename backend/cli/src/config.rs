use std::path::PathBuf;

/// Amiga runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key
    pub api_key: Option<String>,
    /// Directory holding the durable history slot
    pub data_dir: PathBuf,
    /// Chat model override
    pub chat_model: Option<String>,
    /// Avatar image model override
    pub image_model: Option<String>,
    /// Text-to-speech model override
    pub tts_model: Option<String>,
    /// Log level
    pub log_level: String,
}

/// File name of the durable slot within the data directory.
const HISTORY_FILE_NAME: &str = "history.json";

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            data_dir: default_data_dir(),
            chat_model: None,
            image_model: None,
            tts_model: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            data_dir: std::env::var("AMIGA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
            chat_model: std::env::var("AMIGA_CHAT_MODEL").ok(),
            image_model: std::env::var("AMIGA_IMAGE_MODEL").ok(),
            tts_model: std::env::var("AMIGA_TTS_MODEL").ok(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        }
    }

    /// Full path to the durable history slot.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE_NAME)
    }
}

/// Resolve the default data directory: `~/.amiga`, falling back to a
/// relative directory when no home is known.
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".amiga"))
        .unwrap_or_else(|| PathBuf::from(".amiga"))
}

/// Companion registry — selects the persona for a session.
use std::collections::HashMap;

use crate::nina::Nina;
use crate::traits::CompanionBot;
use crate::yara::Yara;

/// Id of the companion used when none is requested.
pub const DEFAULT_COMPANION: &str = "yara";

/// Registry of all available companions.
pub struct CompanionRegistry {
    bots: HashMap<String, Box<dyn CompanionBot>>,
}

impl CompanionRegistry {
    pub fn new() -> Self {
        let mut bots: HashMap<String, Box<dyn CompanionBot>> = HashMap::new();
        bots.insert("yara".into(), Box::new(Yara::new()));
        bots.insert("nina".into(), Box::new(Nina::new()));
        Self { bots }
    }

    /// Get a companion by id, returning `None` if not found.
    pub fn get(&self, id: &str) -> Option<&dyn CompanionBot> {
        self.bots.get(id).map(|b| b.as_ref())
    }

    /// Get a companion by id, falling back to the default persona.
    pub fn get_or_default(&self, id: &str) -> &dyn CompanionBot {
        self.get(id)
            .or_else(|| self.get(DEFAULT_COMPANION))
            .expect("default companion is always registered")
    }

    /// List all available companion ids.
    pub fn ids(&self) -> Vec<&str> {
        self.bots.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for CompanionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let registry = CompanionRegistry::new();
        assert!(registry.get("yara").is_some());
        assert!(registry.get("nina").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        let registry = CompanionRegistry::new();
        let bot = registry.get_or_default("missing");
        assert_eq!(bot.name(), DEFAULT_COMPANION);
    }

    #[test]
    fn test_session_spec_carries_persona_prompt() {
        let registry = CompanionRegistry::new();
        let spec = registry.get_or_default("yara").session_spec();
        assert_eq!(spec.companion_name, "Yara");
        assert!(spec.system_prompt.contains("Português"));
        assert!(!spec.avatar_prompt.is_empty());
    }
}

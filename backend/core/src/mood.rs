//! Companion mood model.
//!
//! The mood shown next to the avatar is derived from the user's latest
//! utterance alone — never from prior mood or conversation history — by
//! matching an ordered table of trigger terms.

use serde::{Deserialize, Serialize};

/// Emotional display state of the companion.
///
/// `Scared` and `Excited` are reserved: they serialize and deserialize
/// like the others but no shipping rule produces them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Jealous,
    Sweet,
    Scared,
    Excited,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Jealous => "jealous",
            Self::Sweet => "sweet",
            Self::Scared => "scared",
            Self::Excited => "excited",
        }
    }
}

/// One entry of the mood derivation table: if any trigger term appears in
/// the lowercased utterance, the rule's mood wins.
#[derive(Debug, Clone, Copy)]
pub struct MoodRule {
    pub mood: Mood,
    pub triggers: &'static [&'static str],
}

/// Ordered rule table. Earlier rules take precedence: an utterance that
/// matches both the jealousy and affection sets resolves to `Jealous`.
pub const MOOD_RULES: &[MoodRule] = &[
    MoodRule {
        mood: Mood::Jealous,
        triggers: &["outra", "garota", "ex"],
    },
    MoodRule {
        mood: Mood::Sweet,
        triggers: &["te amo", "linda"],
    },
];

/// Derive the mood for a single utterance. Pure function of the text;
/// no trigger match falls back to `Happy`.
pub fn mood_for(text: &str) -> Mood {
    let lowered = text.to_lowercase();
    for rule in MOOD_RULES {
        if rule.triggers.iter().any(|t| lowered.contains(t)) {
            return rule.mood;
        }
    }
    Mood::Happy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affection_trigger_is_sweet() {
        assert_eq!(mood_for("Eu te amo"), Mood::Sweet);
        assert_eq!(mood_for("você é linda"), Mood::Sweet);
    }

    #[test]
    fn test_jealousy_trigger_wins_over_affection() {
        // Matches both rule sets; the first rule takes precedence.
        assert_eq!(mood_for("minha ex era linda"), Mood::Jealous);
    }

    #[test]
    fn test_no_trigger_is_happy() {
        assert_eq!(mood_for("Como foi seu dia?"), Mood::Happy);
        assert_eq!(mood_for(""), Mood::Happy);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(mood_for("falei com uma GAROTA hoje"), Mood::Jealous);
        assert_eq!(mood_for("TE AMO"), Mood::Sweet);
    }

    #[test]
    fn test_reserved_moods_serialize() {
        assert_eq!(serde_json::to_string(&Mood::Scared).unwrap(), "\"scared\"");
        let back: Mood = serde_json::from_str("\"excited\"").unwrap();
        assert_eq!(back, Mood::Excited);
    }

    #[test]
    fn test_default_mood_is_happy() {
        assert_eq!(Mood::default(), Mood::Happy);
    }
}

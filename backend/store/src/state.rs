use amiga_core::{Message, Mood};

/// The live conversation snapshot the UI renders from.
///
/// While a session is running this is the source of truth; the durable
/// slot is only a cache of it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// False until avatar and chat session exist; never reverts to false.
    pub is_initialized: bool,
    /// Set exactly once per session, together with `is_initialized`.
    pub avatar_url: Option<String>,
    /// Append-only message log, in conversation order.
    pub history: Vec<Message>,
    /// Recomputed after each completed exchange, never mid-exchange.
    pub mood: Mood,
}

/// Outcome of a send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Exchange completed: reply appended, history persisted, mood recomputed.
    Replied,
    /// The backend failed; the user message stays visible, unanswered.
    Unanswered,
    /// The input was suppressed without touching history.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyText,
    NotInitialized,
}

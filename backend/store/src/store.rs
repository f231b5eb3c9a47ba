//! The Conversation Store: owns the session state and enforces the
//! append/persist/mood-derivation contract.

use std::sync::Arc;

use tracing::{error, info, warn};

use amiga_core::{
    mood_for, AmigaError, ChatSession, CompanionGateway, Message, Role, SessionSpec,
};

use crate::slot::HistorySlot;
use crate::state::{SendOutcome, SessionState, SkipReason};

pub struct ConversationStore {
    gateway: Arc<dyn CompanionGateway>,
    slot: Arc<dyn HistorySlot>,
    spec: SessionSpec,
    state: SessionState,
    session: Option<Box<dyn ChatSession>>,
}

impl ConversationStore {
    pub fn new(
        gateway: Arc<dyn CompanionGateway>,
        slot: Arc<dyn HistorySlot>,
        spec: SessionSpec,
    ) -> Self {
        Self {
            gateway,
            slot,
            spec,
            state: SessionState::default(),
            session: None,
        }
    }

    /// Load persisted history into the live state.
    ///
    /// An absent slot leaves the history empty; unreadable content is
    /// discarded with a log and never surfaced to the user.
    pub async fn hydrate(&mut self) {
        match self.slot.load().await {
            Ok(Some(history)) => {
                info!(messages = history.len(), "Hydrated history from slot");
                self.state.history = history;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Discarding unreadable stored history"),
        }
    }

    /// Create the avatar and chat session.
    ///
    /// Every call while uninitialized is a fresh attempt, so a failed
    /// initialization can simply be retried. On failure the state is left
    /// untouched and the error is returned for a user-visible notice.
    /// Once initialized, further calls are no-ops: the avatar is set
    /// exactly once per session.
    pub async fn initialize(&mut self) -> Result<(), AmigaError> {
        if self.state.is_initialized {
            return Ok(());
        }

        match self.gateway.initialize(&self.spec).await {
            Ok(handle) => {
                self.session = Some(handle.session);
                self.state.avatar_url = Some(handle.avatar_url);
                self.state.is_initialized = true;
                info!(
                    gateway = self.gateway.name(),
                    companion = %self.spec.companion_name,
                    "Companion session initialized"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Initialization failed");
                Err(AmigaError::Backend {
                    provider: self.gateway.name().to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Run one exchange: append the user message, forward it, and on a
    /// successful reply append the model message, persist, and recompute
    /// the mood from the user's utterance.
    ///
    /// Empty/whitespace input and sends before initialization are
    /// suppressed without touching history. A failed reply leaves the
    /// user message visible and unanswered; no error turn is injected
    /// and the durable slot is not rewritten.
    pub async fn send_user_message(&mut self, text: &str) -> SendOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SendOutcome::Skipped(SkipReason::EmptyText);
        }
        let Some(session) = self.session.as_mut() else {
            return SendOutcome::Skipped(SkipReason::NotInitialized);
        };

        // Visible immediately, before the reply resolves.
        self.state.history.push(Message::user(trimmed));

        match session.send(trimmed).await {
            Ok(reply) => {
                let reply = if reply.trim().is_empty() {
                    "...".to_string()
                } else {
                    reply
                };
                self.state.history.push(Message::model(reply));

                if let Err(e) = self.slot.save(&self.state.history).await {
                    warn!(error = %e, "Failed to persist history");
                }

                self.state.mood = mood_for(trimmed);
                SendOutcome::Replied
            }
            Err(e) => {
                error!(error = %e, "Chat backend failed; keeping the message unanswered");
                SendOutcome::Unanswered
            }
        }
    }

    /// Read access for rendering.
    pub fn snapshot(&self) -> &SessionState {
        &self.state
    }

    /// The latest model reply, if any.
    pub fn last_reply(&self) -> Option<&Message> {
        self.state
            .history
            .iter()
            .rev()
            .find(|m| m.role == Role::Model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::InMemorySlot;
    use amiga_core::Mood;
    use amiga_gateway::MockGateway;

    fn spec() -> SessionSpec {
        SessionSpec {
            companion_name: "Yara".to_string(),
            system_prompt: "Você é a Yara.".to_string(),
            avatar_prompt: "anime girl".to_string(),
            temperature: 0.9,
        }
    }

    fn store_with(gateway: Arc<MockGateway>, slot: Arc<dyn HistorySlot>) -> ConversationStore {
        ConversationStore::new(gateway, slot, spec())
    }

    #[tokio::test]
    async fn test_exchange_appends_user_then_model() {
        let gateway = Arc::new(MockGateway::new().with_replies(["Oi, meu amor! 💜"]));
        let mut store = store_with(gateway.clone(), Arc::new(InMemorySlot::new()));
        store.initialize().await.unwrap();

        let outcome = store.send_user_message("Como foi seu dia?").await;
        assert_eq!(outcome, SendOutcome::Replied);

        let history = &store.snapshot().history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].text, "Como foi seu dia?");
        assert_eq!(history[1].role, Role::Model);
        assert_eq!(history[1].text, "Oi, meu amor! 💜");
        assert_eq!(store.snapshot().mood, Mood::Happy);
        assert_eq!(gateway.sent(), vec!["Como foi seu dia?".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_and_whitespace_input_is_skipped() {
        let gateway = Arc::new(MockGateway::new());
        let mut store = store_with(gateway, Arc::new(InMemorySlot::new()));
        store.initialize().await.unwrap();

        assert_eq!(
            store.send_user_message("").await,
            SendOutcome::Skipped(SkipReason::EmptyText)
        );
        assert_eq!(
            store.send_user_message("   \t").await,
            SendOutcome::Skipped(SkipReason::EmptyText)
        );
        assert!(store.snapshot().history.is_empty());
    }

    #[tokio::test]
    async fn test_send_before_initialization_is_skipped() {
        let gateway = Arc::new(MockGateway::new());
        let mut store = store_with(gateway, Arc::new(InMemorySlot::new()));

        assert_eq!(
            store.send_user_message("oi").await,
            SendOutcome::Skipped(SkipReason::NotInitialized)
        );
        assert!(store.snapshot().history.is_empty());
    }

    #[tokio::test]
    async fn test_mood_recomputed_from_user_utterance() {
        let gateway = Arc::new(MockGateway::new());
        let mut store = store_with(gateway, Arc::new(InMemorySlot::new()));
        store.initialize().await.unwrap();

        store.send_user_message("Eu te amo").await;
        assert_eq!(store.snapshot().mood, Mood::Sweet);

        // Jealousy rule wins even when an affection trigger also matches.
        store.send_user_message("minha ex era linda").await;
        assert_eq!(store.snapshot().mood, Mood::Jealous);

        store.send_user_message("Como foi seu dia?").await;
        assert_eq!(store.snapshot().mood, Mood::Happy);
    }

    #[tokio::test]
    async fn test_failed_reply_keeps_user_message_and_slot_untouched() {
        let gateway = Arc::new(MockGateway::new().failing_send());
        let slot = Arc::new(InMemorySlot::new());
        let mut store = store_with(gateway, slot.clone());
        store.initialize().await.unwrap();

        let outcome = store.send_user_message("oi").await;
        assert_eq!(outcome, SendOutcome::Unanswered);

        let history = &store.snapshot().history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, Role::User);
        assert!(slot.load().await.unwrap().is_none());
        // Mood untouched mid-exchange.
        assert_eq!(store.snapshot().mood, Mood::Happy);
    }

    #[tokio::test]
    async fn test_empty_reply_gets_placeholder() {
        let gateway = Arc::new(MockGateway::new().with_replies([""]));
        let mut store = store_with(gateway, Arc::new(InMemorySlot::new()));
        store.initialize().await.unwrap();

        store.send_user_message("oi").await;
        assert_eq!(store.last_reply().unwrap().text, "...");
    }

    #[tokio::test]
    async fn test_history_persisted_after_each_exchange() {
        let gateway = Arc::new(MockGateway::new().with_replies(["uma", "duas"]));
        let slot = Arc::new(InMemorySlot::new());
        let mut store = store_with(gateway, slot.clone());
        store.initialize().await.unwrap();

        store.send_user_message("primeira").await;
        assert_eq!(slot.load().await.unwrap().unwrap().len(), 2);

        store.send_user_message("segunda").await;
        let persisted = slot.load().await.unwrap().unwrap();
        assert_eq!(persisted, store.snapshot().history);
    }

    #[tokio::test]
    async fn test_initialize_failure_leaves_state_and_allows_retry() {
        let gateway = Arc::new(MockGateway::new().failing_initialize());
        let mut store = store_with(gateway, Arc::new(InMemorySlot::new()));

        assert!(store.initialize().await.is_err());
        assert!(!store.snapshot().is_initialized);
        assert!(store.snapshot().avatar_url.is_none());

        // Retry is safe; each call is a fresh attempt.
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn test_initialize_sets_avatar_and_flag_together_once() {
        let gateway = Arc::new(MockGateway::new());
        let mut store = store_with(gateway, Arc::new(InMemorySlot::new()));

        store.initialize().await.unwrap();
        let avatar = store.snapshot().avatar_url.clone();
        assert!(store.snapshot().is_initialized);
        assert!(avatar.is_some());

        // Further calls are no-ops.
        store.initialize().await.unwrap();
        assert_eq!(store.snapshot().avatar_url, avatar);
    }

    #[tokio::test]
    async fn test_hydrate_restores_persisted_history() {
        let slot = Arc::new(InMemorySlot::new());
        let history = vec![Message::user("oi"), Message::model("oi! 💜")];
        slot.save(&history).await.unwrap();

        let gateway = Arc::new(MockGateway::new());
        let mut store = store_with(gateway, slot);
        store.hydrate().await;
        assert_eq!(store.snapshot().history, history);
    }

    #[tokio::test]
    async fn test_hydrate_discards_corrupted_slot() {
        let slot = Arc::new(InMemorySlot::with_raw("{ definitely not json"));
        let gateway = Arc::new(MockGateway::new());
        let mut store = store_with(gateway, slot);

        store.hydrate().await;
        assert!(store.snapshot().history.is_empty());
    }
}

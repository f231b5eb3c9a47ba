pub mod slot;
pub mod state;
pub mod store;

pub use slot::{FileHistorySlot, HistorySlot, InMemorySlot};
pub use state::{SendOutcome, SessionState, SkipReason};
pub use store::ConversationStore;

//! Inspect or wipe the durable history slot.

use anyhow::Result;

use amiga_core::Role;
use amiga_store::{FileHistorySlot, HistorySlot};

use crate::config::Config;
use crate::terminal_output::{note_info, note_success, note_warn, BOLD, DIM, RESET};

/// Print the persisted conversation log.
pub async fn run_history(config: &Config) -> Result<()> {
    let slot = FileHistorySlot::new(config.history_path());
    match slot.load().await {
        Ok(Some(history)) => {
            for msg in &history {
                let who = match msg.role {
                    Role::User => "you",
                    Role::Model => "companion",
                };
                println!(
                    "{DIM}{}{RESET}  {BOLD}{:>9}{RESET}  {}",
                    msg.timestamp.format("%Y-%m-%d %H:%M"),
                    who,
                    msg.text
                );
            }
            println!();
            note_info(&format!("{} messages", history.len()));
        }
        Ok(None) => note_info("No saved history."),
        Err(e) => note_warn(&format!("Stored history is unreadable: {}", e)),
    }
    Ok(())
}

/// Delete the persisted conversation log.
pub async fn run_reset(config: &Config) -> Result<()> {
    let slot = FileHistorySlot::new(config.history_path());
    slot.clear().await?;
    note_success("History cleared.");
    Ok(())
}

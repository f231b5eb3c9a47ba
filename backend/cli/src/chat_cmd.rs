//! The interactive chat flow: initialization screen, then the REPL.

use std::io::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use amiga_companion::{CompanionRegistry, Persona};
use amiga_core::{AmigaError, CompanionGateway, Message, Role};
use amiga_gateway::GeminiGateway;
use amiga_store::{ConversationStore, FileHistorySlot, SendOutcome, SkipReason};

use crate::config::Config;
use crate::terminal_output::{
    mood_badge, note_error, note_info, note_success, note_warn, BOLD, DIM, RESET,
};

pub async fn run_chat(config: &Config, companion_id: &str) -> Result<()> {
    let api_key = config
        .api_key
        .clone()
        .context("GEMINI_API_KEY is not set")?;

    let mut gateway = GeminiGateway::new(api_key);
    if let Some(model) = &config.chat_model {
        gateway = gateway.with_chat_model(model.clone());
    }
    if let Some(model) = &config.image_model {
        gateway = gateway.with_image_model(model.clone());
    }
    if let Some(model) = &config.tts_model {
        gateway = gateway.with_tts_model(model.clone());
    }
    let gateway = Arc::new(gateway);

    let registry = CompanionRegistry::new();
    let bot = registry.get(companion_id).ok_or_else(|| {
        AmigaError::UnknownCompanion(format!(
            "{} (available: {})",
            companion_id,
            registry.ids().join(", ")
        ))
    })?;
    let persona = bot.persona().clone();

    let slot = Arc::new(FileHistorySlot::new(config.history_path()));
    let mut store = ConversationStore::new(gateway.clone(), slot, bot.session_spec());
    store.hydrate().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Initialization screen: one trigger action, retry on failure.
    println!();
    println!(
        "  {} {BOLD}{}{RESET}",
        persona.avatar.as_deref().unwrap_or("·"),
        persona.display_name
    );
    println!("  {DIM}{}{RESET}", persona.tone);
    println!();
    loop {
        note_info(&format!(
            "Press Enter to meet {} (or type 'quit').",
            persona.display_name
        ));
        match lines.next_line().await? {
            None => return Ok(()),
            Some(line) if line.trim() == "quit" => return Ok(()),
            Some(_) => {}
        }

        note_info(&format!("Conhecendo a {}...", persona.display_name));
        match store.initialize().await {
            Ok(()) => {
                note_success(&format!("{} is here! Say something.", persona.display_name));
                break;
            }
            Err(e) => {
                debug!(error = %e, "Initialization attempt failed");
                note_error(&format!(
                    "Could not bring {} to life ({}). Try again.",
                    persona.display_name, e
                ));
            }
        }
    }

    // Replay what earlier sessions said.
    if !store.snapshot().history.is_empty() {
        println!();
        for msg in &store.snapshot().history {
            print_message(&persona, msg);
        }
    }
    println!();

    loop {
        print!("{BOLD}you{RESET} ❯ ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim().to_string();

        if let Some(command) = input.strip_prefix('/') {
            if !handle_command(command, gateway.as_ref(), &store).await {
                break;
            }
            continue;
        }

        match store.send_user_message(&input).await {
            SendOutcome::Replied => {
                if let Some(reply) = store.last_reply() {
                    print_message(&persona, reply);
                }
                println!("  {}", mood_badge(store.snapshot().mood));
            }
            SendOutcome::Unanswered => {
                note_warn("No reply arrived; your message stays in the thread. Try again.");
            }
            SendOutcome::Skipped(SkipReason::EmptyText) => {}
            SendOutcome::Skipped(SkipReason::NotInitialized) => {
                note_warn("The companion is not initialized yet.");
            }
        }
    }

    Ok(())
}

fn print_message(persona: &Persona, msg: &Message) {
    match msg.role {
        Role::User => println!("{BOLD}you{RESET} ❯ {}", msg.text),
        Role::Model => println!("{BOLD}{}{RESET} ❯ {}", persona.display_name, msg.text),
    }
}

/// In-REPL commands. Returns false when the loop should exit.
async fn handle_command(
    command: &str,
    gateway: &dyn CompanionGateway,
    store: &ConversationStore,
) -> bool {
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("exit") | Some("quit") => return false,
        Some("mood") => {
            println!("  {}", mood_badge(store.snapshot().mood));
        }
        Some("speak") => {
            let Some(path) = parts.next() else {
                note_warn("Usage: /speak <output-file>");
                return true;
            };
            speak_last_reply(gateway, store, path).await;
        }
        _ => note_warn("Commands: /mood, /speak <file>, /exit"),
    }
    true
}

/// Synthesize the latest reply to an audio file.
async fn speak_last_reply(gateway: &dyn CompanionGateway, store: &ConversationStore, path: &str) {
    let Some(reply) = store.last_reply() else {
        note_warn("Nothing to speak yet.");
        return;
    };

    match gateway.synthesize_speech(&reply.text).await {
        Ok(audio) => match tokio::fs::write(path, &audio.bytes).await {
            Ok(()) => note_success(&format!("Saved {} audio to {}", audio.mime_type, path)),
            Err(e) => note_error(&format!("Could not write {}: {}", path, e)),
        },
        Err(e) => note_error(&format!("Speech synthesis failed: {}", e)),
    }
}

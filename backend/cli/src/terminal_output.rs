//! Terminal output helpers: ANSI formatting, status notes, mood badge.

use amiga_core::Mood;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Print a formatted INFO note to stdout.
pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

/// Print a formatted WARNING note.
pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

/// Print a formatted ERROR note.
pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

/// Print a formatted SUCCESS note.
pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

/// Render the mood indicator shown next to the companion's replies.
pub fn mood_badge(mood: Mood) -> String {
    let (emoji, color) = match mood {
        Mood::Happy => ("😊", YELLOW),
        Mood::Jealous => ("😤", RED),
        Mood::Sweet => ("🥰", MAGENTA),
        Mood::Scared => ("😱", BLUE),
        Mood::Excited => ("🤩", CYAN),
    };
    if supports_color() {
        format!("{color}{emoji} {}{RESET}", mood.label())
    } else {
        format!("[{}]", mood.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_badge_names_the_mood() {
        for mood in [
            Mood::Happy,
            Mood::Jealous,
            Mood::Sweet,
            Mood::Scared,
            Mood::Excited,
        ] {
            assert!(mood_badge(mood).contains(mood.label()));
        }
    }
}

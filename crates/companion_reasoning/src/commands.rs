//! Slash-command parsing and execution.
//!
//! Commands never fail: every outcome, including bad input and I/O errors,
//! comes back as text for the user.

use chrono::Local;
use companion_core::UserPreferences;
use companion_memory::ConversationMemory;

/// Returned by `/exit`; the read loop stops when it sees this.
pub const EXIT_SENTINEL: &str = "exit";

pub const HELP_TEXT: &str = "Available commands:
/help - Show this help message
/clear - Clear conversation history
/save [filename] - Save conversation to file
/load <filename> - Load conversation from file
/preferences - Show/set user preferences
/summary - Get conversation summary
/exit - End conversation";

#[derive(Debug, Clone, PartialEq)]
pub enum PreferencesAction {
    Show,
    Set { key: String, value: String },
    /// Arguments without a usable `key=value` pair
    Malformed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    Clear,
    Save { filename: Option<String> },
    Load { filename: Option<String> },
    Help,
    Preferences(PreferencesAction),
    Summary,
    Unknown(String),
}

impl Command {
    /// Parse command text with the leading `/` already removed.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();

        match name.as_str() {
            "exit" => Command::Exit,
            "clear" => Command::Clear,
            "save" => Command::Save {
                filename: args.first().map(|s| s.to_string()),
            },
            "load" => Command::Load {
                filename: args.first().map(|s| s.to_string()),
            },
            "help" => Command::Help,
            "preferences" => Command::Preferences(parse_preferences(&args)),
            "summary" => Command::Summary,
            _ => Command::Unknown(name),
        }
    }

    /// Run the command against the session state and describe the outcome.
    pub fn execute(self, memory: &mut ConversationMemory, preferences: &mut UserPreferences) -> String {
        match self {
            Command::Exit => EXIT_SENTINEL.to_string(),
            Command::Clear => {
                memory.clear_memory();
                "Conversation history cleared!".to_string()
            }
            Command::Save { filename } => {
                let filename = filename.unwrap_or_else(default_save_filename);
                match memory.save_to_file(&filename) {
                    Ok(()) => format!("Conversation saved to {}", filename),
                    Err(e) => format!("Error saving conversation: {}", e),
                }
            }
            Command::Load { filename: None } => "Please specify a filename to load".to_string(),
            Command::Load {
                filename: Some(filename),
            } => match memory.load_from_file(&filename) {
                Ok(()) => format!("Conversation loaded from {}", filename),
                Err(e) => format!("Error loading conversation: {}", e),
            },
            Command::Help => HELP_TEXT.to_string(),
            Command::Preferences(PreferencesAction::Show) => {
                format!("Current preferences: {}", preferences.to_pretty_json())
            }
            Command::Preferences(PreferencesAction::Set { key, value }) => {
                preferences.set(&key, &value);
                format!("Preference set: {} = {}", key, value)
            }
            Command::Preferences(PreferencesAction::Malformed) => {
                "Usage: /preferences [key=value]".to_string()
            }
            Command::Summary => memory.get_conversation_summary(),
            Command::Unknown(name) => {
                format!("Unknown command: {}. Type /help for available commands.", name)
            }
        }
    }
}

/// Arguments are re-joined with spaces and split on the first `=`.
fn parse_preferences(args: &[&str]) -> PreferencesAction {
    if args.is_empty() {
        return PreferencesAction::Show;
    }
    let joined = args.join(" ");
    match joined.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => PreferencesAction::Set {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        },
        _ => PreferencesAction::Malformed,
    }
}

fn default_save_filename() -> String {
    format!("conversation_{}.json", Local::now().format("%Y%m%d_%H%M%S"))
}

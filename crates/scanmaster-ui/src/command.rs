use std::path::PathBuf;

use scanmaster_types::{AppEvent, ContentRef, OnboardingAction};

#[derive(Debug, Clone)]
pub enum UiCommand {
    Send(AppEvent),
    Help,
    /// Gallery opened without choosing anything
    PickerCancelled,
    Empty,
    Unknown(String),
}

/// Map one line of user input to a command
pub fn parse_command(line: &str) -> UiCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => UiCommand::Empty,
        "camera" | "c" => UiCommand::Send(AppEvent::CaptureFromCamera),
        "gallery" | "g" | "open" => {
            if rest.is_empty() {
                UiCommand::PickerCancelled
            } else {
                UiCommand::Send(AppEvent::PickFromGallery(ContentRef::Path(PathBuf::from(
                    rest,
                ))))
            }
        }
        "copy" | "y" => UiCommand::Send(AppEvent::CopyRequested),
        "erase" | "e" | "clear" => UiCommand::Send(AppEvent::Erase),
        "next" | "n" => UiCommand::Send(AppEvent::Onboarding(OnboardingAction::Next)),
        "finish" | "f" | "skip" => UiCommand::Send(AppEvent::Onboarding(OnboardingAction::Finish)),
        "back" | "b" | "prev" => UiCommand::Send(AppEvent::Back),
        "quit" | "q" | "exit" => UiCommand::Send(AppEvent::Close),
        "help" | "h" | "?" => UiCommand::Help,
        other => UiCommand::Unknown(other.to_string()),
    }
}

//! Capabilities supplied by the host application.
//!
//! The text-generation assistant and the sequence viewer live outside the
//! analysis core. They are injected through the [`Assistant`] and [`Viewer`]
//! traits, and every call goes through [`ask`] or [`present`], which turn
//! their failures into a [`Notification`] for the user instead of an error
//! that could take the editor down.

use std::fmt;

use thiserror::Error;

use crate::region::Annotation;
use crate::report::SequenceReport;

/// Longest fragment sent to an assistant, in symbols.
pub const MAX_PROMPT_FRAGMENT: usize = 10_000;

/// Failures of the assistant collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    #[error("Assistant is not available: {0}")]
    Unavailable(String),

    #[error("Assistant request failed: {0}")]
    Failed(String),

    #[error("Assistant is rate limited, retry later")]
    RateLimited,

    #[error("Assistant returned an empty response")]
    EmptyResponse,
}

/// Failures of the viewer collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("Viewer cannot display an empty sequence")]
    EmptySequence,

    #[error("Annotation '{label}' ({start}..{end}) lies outside the sequence ({len})")]
    OutOfRange {
        label: String,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Free-text analysis of a prompt, typically a remote text-generation model.
pub trait Assistant {
    fn analyze(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// Anything that displays a sequence with highlighted annotations.
pub trait Viewer {
    fn show(&mut self, sequence: &str, annotations: &[Annotation]) -> Result<(), ViewerError>;
}

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A recoverable message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Prompt combining a user instruction with a sequence fragment.
///
/// Fragments longer than [`MAX_PROMPT_FRAGMENT`] are cut.
pub fn build_prompt(fragment: &str, instruction: &str) -> String {
    let clipped = fragment.get(..MAX_PROMPT_FRAGMENT).unwrap_or(fragment);
    let note = if clipped.len() < fragment.len() {
        format!(" (first {} of {} symbols)", clipped.len(), fragment.len())
    } else {
        String::new()
    };
    format!(
        "{}\n\nSequence{}:\n{}",
        instruction.trim(),
        note,
        clipped
    )
}

/// Sends `fragment` and `instruction` to the assistant.
///
/// Any failure, including a blank answer, comes back as an error notification.
pub fn ask(
    assistant: &dyn Assistant,
    fragment: &str,
    instruction: &str,
) -> Result<String, Notification> {
    if fragment.is_empty() {
        return Err(Notification::warning("Nothing to analyze: sequence is empty"));
    }

    let prompt = build_prompt(fragment, instruction);
    log::debug!("assistant prompt: {} bytes", prompt.len());

    match assistant.analyze(&prompt) {
        Ok(answer) if answer.trim().is_empty() => {
            log::warn!("assistant returned an empty response");
            Err(Notification::error(AssistantError::EmptyResponse.to_string()))
        }
        Ok(answer) => Ok(answer),
        Err(e) => {
            log::warn!("assistant call failed: {}", e);
            Err(Notification::error(e.to_string()))
        }
    }
}

/// Hands the sequence and its annotations to the viewer.
///
/// Returns a notification when the viewer rejects them.
pub fn present(
    viewer: &mut dyn Viewer,
    sequence: &str,
    annotations: &[Annotation],
) -> Option<Notification> {
    match viewer.show(sequence, annotations) {
        Ok(()) => None,
        Err(e) => {
            log::warn!("viewer rejected sequence: {}", e);
            Some(Notification::warning(e.to_string()))
        }
    }
}

/// Offline assistant that answers with the analysis report of the fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryAssistant;

impl Assistant for SummaryAssistant {
    fn analyze(&self, prompt: &str) -> Result<String, AssistantError> {
        let (instruction, fragment) = prompt
            .split_once("\n\nSequence")
            .and_then(|(instruction, rest)| {
                rest.split_once(":\n").map(|(_, seq)| (instruction, seq))
            })
            .ok_or_else(|| AssistantError::Failed("prompt carries no sequence".to_string()))?;

        let report = SequenceReport::analyze(fragment);
        Ok(format!(
            "Request: {}\n\n{}",
            if instruction.is_empty() { "summary" } else { instruction },
            report.render_text()
        ))
    }
}

/// Assistant used when no endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableAssistant;

impl Assistant for UnavailableAssistant {
    fn analyze(&self, _prompt: &str) -> Result<String, AssistantError> {
        Err(AssistantError::Unavailable(
            "no assistant endpoint configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{AnnotationCategory, Region, Rgb};

    struct FixedAssistant(Result<String, AssistantError>);

    impl Assistant for FixedAssistant {
        fn analyze(&self, _prompt: &str) -> Result<String, AssistantError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingViewer {
        shown: Vec<(String, usize)>,
    }

    impl Viewer for RecordingViewer {
        fn show(&mut self, sequence: &str, annotations: &[Annotation]) -> Result<(), ViewerError> {
            if sequence.is_empty() {
                return Err(ViewerError::EmptySequence);
            }
            self.shown.push((sequence.to_string(), annotations.len()));
            Ok(())
        }
    }

    #[test]
    fn test_build_prompt() {
        let prompt = build_prompt("ATGC", "  Find promoters ");
        assert_eq!(prompt, "Find promoters\n\nSequence:\nATGC");
    }

    #[test]
    fn test_build_prompt_clips_long_fragment() {
        let fragment = "A".repeat(MAX_PROMPT_FRAGMENT + 5);
        let prompt = build_prompt(&fragment, "x");
        assert!(prompt.contains("(first 10000 of 10005 symbols)"));
        assert!(prompt.len() < fragment.len() + 100);
    }

    #[test]
    fn test_ask_success() {
        let assistant = FixedAssistant(Ok("looks like a plasmid".to_string()));
        assert_eq!(ask(&assistant, "ATGC", "what is it").unwrap(), "looks like a plasmid");
    }

    #[test]
    fn test_ask_failures_become_notifications() {
        let assistant = FixedAssistant(Err(AssistantError::RateLimited));
        let note = ask(&assistant, "ATGC", "x").unwrap_err();
        assert_eq!(note.level, Level::Error);
        assert!(note.message.contains("rate limited"));

        let blank = FixedAssistant(Ok("   ".to_string()));
        let note = ask(&blank, "ATGC", "x").unwrap_err();
        assert!(note.message.contains("empty response"));

        let note = ask(&UnavailableAssistant, "ATGC", "x").unwrap_err();
        assert!(note.message.contains("not available"));
    }

    #[test]
    fn test_ask_empty_fragment() {
        let note = ask(&SummaryAssistant, "", "x").unwrap_err();
        assert_eq!(note.level, Level::Warning);
    }

    #[test]
    fn test_summary_assistant() {
        let answer = ask(&SummaryAssistant, "ATGGATTAG", "translate this").unwrap();
        assert!(answer.starts_with("Request: translate this"));
        assert!(answer.contains("Translation: MD*"));
    }

    #[test]
    fn test_present() {
        let mut viewer = RecordingViewer::default();
        let annotation = Annotation::new(
            Region::new(0, 3).unwrap(),
            "start",
            Rgb(0, 0, 0),
            AnnotationCategory::Feature,
        );
        assert!(present(&mut viewer, "ATGC", &[annotation]).is_none());
        assert_eq!(viewer.shown, vec![("ATGC".to_string(), 1)]);

        let note = present(&mut viewer, "", &[]).unwrap();
        assert_eq!(note.level, Level::Warning);
        assert_eq!(viewer.shown.len(), 1);
    }
}

//! Speech output layer
//!
//! Every announcement leaves the engine through [`SpeechSink`], which
//! cleans up host markup, formats speaker lines, drops duplicates inside
//! a short window and remembers the last dialogue or narration line for
//! the repeat command.

mod backend;
mod sink;
mod text;

use std::time::Instant;

use serde::{Deserialize, Serialize};

pub use backend::{NullSpeech, SpeechBackend};
pub use sink::{SharedSink, SpeechSink};
pub use text::clean_text;

/// Kind of content an announcement carries
///
/// Only affects formatting and repeat-buffer eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Dialogue,
    Narrator,
    Menu,
    MenuChoice,
    Investigation,
    Evidence,
    SystemMessage,
    Trial,
    PsycheLock,
}

impl Category {
    /// Whether "repeat" should replay announcements of this kind
    pub fn is_repeatable(self) -> bool {
        matches!(self, Category::Dialogue | Category::Narrator)
    }
}

/// A single announcement, immutable once created
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub speaker: Option<String>,
    pub body: String,
    pub category: Category,
    pub timestamp: Instant,
}

impl Announcement {
    /// Text as it is handed to the speech engine
    pub fn formatted(&self) -> String {
        format_line(self.speaker.as_deref(), &self.body, self.category)
    }
}

/// `"{speaker}: {body}"` for attributed dialogue, the body otherwise
pub(crate) fn format_line(speaker: Option<&str>, body: &str, category: Category) -> String {
    match speaker {
        Some(speaker) if category == Category::Dialogue && !speaker.is_empty() => {
            format!("{speaker}: {body}")
        }
        _ => body.to_string(),
    }
}

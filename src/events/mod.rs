//! Events module for tracker transitions
//!
//! Structured records of mode entry and exit and of narration sessions,
//! returned from every tick so the embedding layer can log or forward
//! them.

use serde::{Deserialize, Serialize};

use crate::segmenter::SegmentSet;
use crate::tracker::ModeKind;

/// Events produced while polling the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// A mode-detection predicate became true
    ModeEntered { mode: ModeKind },

    /// A mode-detection predicate became false
    ModeExited {
        mode: ModeKind,
        /// Time spent in the mode, in milliseconds
        duration_ms: u64,
    },

    /// A new narration type was segmented
    NarrationStarted { segment_set: SegmentSet, lines: usize },

    /// The host stopped reporting narration
    NarrationEnded,
}

impl std::fmt::Display for TrackerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerEvent::ModeEntered { mode } => write!(f, "MODE_ENTERED ({})", mode),
            TrackerEvent::ModeExited { mode, duration_ms } => {
                write!(f, "MODE_EXITED ({}, {}ms)", mode, duration_ms)
            }
            TrackerEvent::NarrationStarted { segment_set, lines } => {
                write!(f, "NARRATION_STARTED ({:?}, {} lines)", segment_set, lines)
            }
            TrackerEvent::NarrationEnded => write!(f, "NARRATION_ENDED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = TrackerEvent::ModeExited {
            mode: ModeKind::RotatePuzzle,
            duration_ms: 1500,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("mode_exited"));
        assert!(json.contains("rotate_puzzle"));
        assert!(json.contains("1500"));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"mode_entered","mode":"hotspot_exam"}"#;
        let event: TrackerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, TrackerEvent::ModeEntered { mode: ModeKind::HotspotExam });
    }

    #[test]
    fn test_display() {
        let event = TrackerEvent::ModeEntered { mode: ModeKind::DotPuzzle };
        assert_eq!(event.to_string(), "MODE_ENTERED (dot_puzzle)");
    }
}

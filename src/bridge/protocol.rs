//! Bridge message definitions

use serde::{Deserialize, Serialize};

use crate::dispatcher::Command;
use crate::events::TrackerEvent;
use crate::probe::PointerTarget;

/// Messages from the host to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// Replace the whole host snapshot; counts as one frame
    Snapshot { state: serde_json::Value },

    /// Overwrite one dotted path of the snapshot; counts as one frame
    Patch { path: String, value: serde_json::Value },

    /// A user command from the input-mapping layer
    Command { command: Command },

    /// An extra frame without state changes
    Tick,
}

/// Messages from the engine to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputMessage {
    /// Speak `text`, optionally cutting off in-flight speech
    Say { text: String, interrupt: bool },

    /// Silence the speech engine
    Stop,

    /// Move a host pointer
    Pointer { target: PointerTarget, position: [f64; 3] },

    /// A tracker or narration transition
    Event { event: TrackerEvent },
}

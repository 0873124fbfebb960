//! Line-oriented JSON bridge to a host process
//!
//! The host side (or a recorded session) writes [`HostMessage`]s to the
//! engine's stdin and reads [`OutputMessage`]s from its stdout, one JSON
//! document per line.

mod output;
mod protocol;
mod replay;

pub use output::LineOutput;
pub use protocol::{HostMessage, OutputMessage};
pub use replay::{Replay, ReplayStats};

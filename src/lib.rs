//! narrator-engine: screen-reader announcements for an application the
//! engine does not control
//!
//! The host is observed through a read-only [`probe::StateProbe`] once per
//! frame. Three mode trackers (dot puzzle, rotation puzzle, object
//! examination) keep their own navigation cursors and answer hint and
//! state commands; watchers speak dialogue and segmented narration. All
//! speech leaves through one deduplicating [`speech::SpeechSink`].
//!
//! Everything runs synchronously on the host's frame thread. Nothing the
//! engine does is allowed to fail the host: missing fields degrade the
//! feature, and an absent speech engine turns output into a no-op.

pub mod bridge;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod language;
pub mod messages;
pub mod probe;
pub mod segmenter;
pub mod speech;
pub mod tracker;
pub mod watch;

#[cfg(test)]
pub(crate) mod testing;

pub use config::EngineConfig;
pub use dispatcher::{Command, Dispatcher};
pub use events::TrackerEvent;

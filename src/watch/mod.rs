//! Host content watchers
//!
//! Unlike mode trackers these have no cursor and answer no commands. They
//! poll once per tick and speak host text as it appears: dialogue lines
//! and segmented narration.

mod dialogue;
mod narration;

pub use dialogue::DialogueWatcher;
pub use narration::NarrationWatcher;

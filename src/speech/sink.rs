//! Deduplicating announcement sink

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::backend::SpeechBackend;
use super::text::clean_text;
use super::{format_line, Announcement, Category};
use crate::error::SpeechError;

/// The sink is shared by every tracker on the engine thread
pub type SharedSink = Rc<RefCell<SpeechSink>>;

/// Owns the single outbound channel to the speech engine
pub struct SpeechSink {
    backend: Box<dyn SpeechBackend>,
    duplicate_window: Duration,
    last_message: Option<Announcement>,
    /// Formatted text of the last deduplicated emission
    last_key: Option<String>,
    last_emit_time: Option<Instant>,
    /// Last dialogue or narration line, kept for "repeat"
    repeat_buffer: Option<Announcement>,
    backend_available: bool,
}

impl SpeechSink {
    pub fn new(backend: Box<dyn SpeechBackend>, duplicate_window: Duration) -> Self {
        Self {
            backend,
            duplicate_window,
            last_message: None,
            last_key: None,
            last_emit_time: None,
            repeat_buffer: None,
            backend_available: true,
        }
    }

    pub fn shared(self) -> SharedSink {
        Rc::new(RefCell::new(self))
    }

    pub fn last_message(&self) -> Option<&Announcement> {
        self.last_message.as_ref()
    }

    pub fn last_emit_time(&self) -> Option<Instant> {
        self.last_emit_time
    }

    /// Formatted text that "repeat" would replay
    pub fn repeat_text(&self) -> Option<String> {
        self.repeat_buffer.as_ref().map(Announcement::formatted)
    }

    /// Announce host content with deduplication
    pub fn output(&mut self, speaker: Option<&str>, body: &str, category: Category) {
        self.output_at(speaker, body, category, Instant::now());
    }

    /// [`output`](Self::output) with an explicit clock reading
    pub fn output_at(&mut self, speaker: Option<&str>, body: &str, category: Category, now: Instant) {
        let body = clean_text(body);
        if body.is_empty() {
            return;
        }
        let speaker = speaker.map(clean_text).filter(|s| !s.is_empty());
        let formatted = format_line(speaker.as_deref(), &body, category);

        if self.is_duplicate(&formatted, now) {
            debug!(text = %formatted, "duplicate announcement suppressed");
            return;
        }

        let announcement = Announcement {
            speaker,
            body,
            category,
            timestamp: now,
        };
        if category.is_repeatable() {
            self.repeat_buffer = Some(announcement.clone());
        }
        self.last_message = Some(announcement);
        self.last_emit_time = Some(now);
        self.speak_raw(&formatted, false);
        self.last_key = Some(formatted);
    }

    /// Speaker-less [`output`](Self::output)
    pub fn announce(&mut self, body: &str, category: Category) {
        self.output(None, body, category);
    }

    pub fn announce_at(&mut self, body: &str, category: Category, now: Instant) {
        self.output_at(None, body, category, now);
    }

    /// Answer an explicit user command
    ///
    /// Always audible and cuts off whatever is being spoken. Leaves the
    /// repeat buffer, the duplicate window and `last_message` alone.
    pub fn respond(&mut self, body: &str, category: Category) {
        let body = clean_text(body);
        if body.is_empty() {
            return;
        }
        debug!(text = %body, ?category, "command reply");
        self.speak_raw(&body, true);
    }

    /// Replay the last dialogue or narration line, ignoring the duplicate
    /// window. Returns `false` when there is nothing to replay.
    pub fn repeat_last(&mut self) -> bool {
        match self.repeat_text() {
            Some(text) => {
                self.speak_raw(&text, true);
                true
            }
            None => false,
        }
    }

    /// Lowest-level passthrough to the speech engine
    pub fn speak_raw(&mut self, text: &str, interrupt: bool) {
        if !self.backend_available {
            return;
        }
        let result = self.backend.say(text, interrupt);
        self.handle_backend_result(result);
    }

    /// Cut off in-flight speech
    pub fn stop(&mut self) {
        if !self.backend_available {
            return;
        }
        let result = self.backend.stop();
        self.handle_backend_result(result);
    }

    fn is_duplicate(&self, formatted: &str, now: Instant) -> bool {
        match (&self.last_key, self.last_emit_time) {
            (Some(last), Some(at)) => {
                last == formatted && now.saturating_duration_since(at) < self.duplicate_window
            }
            _ => false,
        }
    }

    fn handle_backend_result(&mut self, result: Result<(), SpeechError>) {
        match result {
            Ok(()) => {}
            Err(SpeechError::Unavailable) => {
                warn!("speech engine unavailable, further speech output disabled");
                self.backend_available = false;
            }
            Err(e) => {
                debug!(?e, "speech request dropped");
            }
        }
    }
}

//! Testing utilities
//!
//! Recording doubles for the two outbound capabilities and a harness that
//! wires them to a [`SnapshotProbe`] so tracker tests can script host state
//! with `serde_json::json!`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::error::SpeechError;
use crate::messages::Messages;
use crate::probe::{HostPointer, PointerTarget, SnapshotProbe};
use crate::speech::{SpeechBackend, SpeechSink};
use crate::tracker::TrackerContext;

/// One call received by [`RecordingSpeech`]
#[derive(Debug, Clone, PartialEq)]
pub enum Utterance {
    Say { text: String, interrupt: bool },
    Stop,
}

/// Speech backend that records every call
///
/// Clones share the same log, so a test keeps one clone and hands the
/// other to the sink.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeech {
    log: Rc<RefCell<Vec<Utterance>>>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Vec<Utterance> {
        self.log.borrow().clone()
    }

    /// Spoken text only, in order
    pub fn spoken(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|u| match u {
                Utterance::Say { text, .. } => Some(text.clone()),
                Utterance::Stop => None,
            })
            .collect()
    }

    pub fn last_spoken(&self) -> Option<String> {
        self.spoken().pop()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl SpeechBackend for RecordingSpeech {
    fn say(&mut self, text: &str, interrupt: bool) -> Result<(), SpeechError> {
        self.log.borrow_mut().push(Utterance::Say {
            text: text.to_string(),
            interrupt,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SpeechError> {
        self.log.borrow_mut().push(Utterance::Stop);
        Ok(())
    }
}

/// Host pointer that records placements
#[derive(Debug, Default)]
pub struct RecordingPointer {
    placed: RefCell<Vec<(PointerTarget, [f64; 3])>>,
}

impl RecordingPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placed(&self) -> Vec<(PointerTarget, [f64; 3])> {
        self.placed.borrow().clone()
    }
}

impl HostPointer for RecordingPointer {
    fn place(&self, target: PointerTarget, position: [f64; 3]) -> bool {
        self.placed.borrow_mut().push((target, position));
        true
    }
}

/// Everything a tracker test needs
pub struct Harness {
    pub probe: Rc<SnapshotProbe>,
    pub speech: RecordingSpeech,
    pub pointer: Rc<RecordingPointer>,
    pub context: TrackerContext,
}

impl Harness {
    pub fn new(state: serde_json::Value) -> Self {
        Self::with_messages(state, Messages::new())
    }

    pub fn with_messages(state: serde_json::Value, messages: Messages) -> Self {
        let probe = Rc::new(SnapshotProbe::new(state));
        let speech = RecordingSpeech::new();
        let pointer = Rc::new(RecordingPointer::new());
        let sink = SpeechSink::new(Box::new(speech.clone()), Duration::from_millis(500)).shared();
        let context = TrackerContext::new(probe.clone(), sink, pointer.clone(), Rc::new(messages));

        Self {
            probe,
            speech,
            pointer,
            context,
        }
    }
}

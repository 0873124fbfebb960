//! JSON-lines writer for speech, pointer and event output

use std::cell::RefCell;
use std::io::{ErrorKind, Write};
use std::rc::Rc;

use tracing::debug;

use super::protocol::OutputMessage;
use crate::error::SpeechError;
use crate::probe::{HostPointer, PointerTarget};
use crate::speech::SpeechBackend;

/// Shared line writer; clones write to the same stream
#[derive(Clone)]
pub struct LineOutput {
    out: Rc<RefCell<dyn Write>>,
}

impl LineOutput {
    pub fn new(out: Rc<RefCell<dyn Write>>) -> Self {
        Self { out }
    }

    pub fn stdout() -> Self {
        Self::new(Rc::new(RefCell::new(std::io::stdout())))
    }

    pub fn send(&self, message: &OutputMessage) -> std::io::Result<()> {
        let line = serde_json::to_string(message)?;
        let mut out = self.out.borrow_mut();
        writeln!(out, "{line}")?;
        out.flush()
    }
}

impl SpeechBackend for LineOutput {
    fn say(&mut self, text: &str, interrupt: bool) -> Result<(), SpeechError> {
        let message = OutputMessage::Say {
            text: text.to_string(),
            interrupt,
        };
        self.send(&message).map_err(speech_error)
    }

    fn stop(&mut self) -> Result<(), SpeechError> {
        self.send(&OutputMessage::Stop).map_err(speech_error)
    }
}

impl HostPointer for LineOutput {
    fn place(&self, target: PointerTarget, position: [f64; 3]) -> bool {
        match self.send(&OutputMessage::Pointer { target, position }) {
            Ok(()) => true,
            Err(e) => {
                debug!(?e, "pointer message dropped");
                false
            }
        }
    }
}

/// A closed pipe means nobody is listening any more
fn speech_error(e: std::io::Error) -> SpeechError {
    match e.kind() {
        ErrorKind::BrokenPipe => SpeechError::Unavailable,
        _ => SpeechError::Failed(e.to_string()),
    }
}

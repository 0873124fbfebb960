//! Outbound speech capability

use crate::error::SpeechError;

/// The external speech engine
///
/// Both calls are fire-and-forget. [`SpeechError::Unavailable`] tells the
/// sink to stop talking to this backend.
pub trait SpeechBackend {
    fn say(&mut self, text: &str, interrupt: bool) -> Result<(), SpeechError>;

    fn stop(&mut self) -> Result<(), SpeechError>;
}

/// Backend for hosts without a speech engine
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeech;

impl SpeechBackend for NullSpeech {
    fn say(&mut self, _text: &str, _interrupt: bool) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable)
    }

    fn stop(&mut self) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_speech_reports_unavailable() {
        let mut speech = NullSpeech;
        assert!(matches!(speech.say("hello", false), Err(SpeechError::Unavailable)));
        assert!(matches!(speech.stop(), Err(SpeechError::Unavailable)));
    }
}

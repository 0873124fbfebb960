//! Dialogue line announcer

use crate::probe::StateProbe;
use crate::speech::Category;
use crate::tracker::TrackerContext;

const SPEAKER: &str = "dialogue.speaker";
const TEXT: &str = "dialogue.text";

/// Speaks each new dialogue line with its speaker
pub struct DialogueWatcher {
    ctx: TrackerContext,
    last_text: Option<String>,
}

impl DialogueWatcher {
    pub fn new(ctx: TrackerContext) -> Self {
        Self {
            ctx,
            last_text: None,
        }
    }

    pub fn poll(&mut self) {
        let probe: &dyn StateProbe = &*self.ctx.probe;
        let Some(text) = probe.read_text(TEXT).found() else {
            self.last_text = None;
            return;
        };
        if self.last_text.as_deref() == Some(text.as_str()) {
            return;
        }

        let speaker = probe.read_text(SPEAKER).found();
        self.ctx
            .sink
            .borrow_mut()
            .output(speaker.as_deref(), &text, Category::Dialogue);
        self.last_text = Some(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use serde_json::json;

    #[test]
    fn test_new_lines_spoken_with_speaker() {
        let harness = Harness::new(json!({
            "dialogue": { "speaker": "Phoenix", "text": "Hold it!" }
        }));
        let mut watcher = DialogueWatcher::new(harness.context.clone());

        watcher.poll();
        watcher.poll();
        assert_eq!(harness.speech.spoken(), vec!["Phoenix: Hold it!"]);

        harness.probe.set(TEXT, json!("<b>Objection!</b>"));
        watcher.poll();
        assert_eq!(harness.speech.last_spoken().as_deref(), Some("Phoenix: Objection!"));
    }

    #[test]
    fn test_speakerless_line() {
        let harness = Harness::new(json!({ "dialogue": { "text": "..." } }));
        let mut watcher = DialogueWatcher::new(harness.context.clone());
        watcher.poll();
        assert_eq!(harness.speech.spoken(), vec!["..."]);
    }

    #[test]
    fn test_line_shown_again_after_clearing_is_spoken() {
        let harness = Harness::new(json!({ "dialogue": { "speaker": "Maya", "text": "Nick!" } }));
        let mut watcher = DialogueWatcher::new(harness.context.clone());
        watcher.poll();

        harness.probe.set(TEXT, json!(null));
        watcher.poll();
        harness.probe.set(TEXT, json!("Nick!"));
        watcher.poll();
        // Within the duplicate window the sink collapses the repeat
        assert_eq!(harness.speech.spoken(), vec!["Maya: Nick!"]);
        assert_eq!(
            harness.context.sink.borrow().repeat_text().as_deref(),
            Some("Maya: Nick!")
        );
    }
}

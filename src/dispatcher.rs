//! Tick and command routing
//!
//! The dispatcher owns every tracker and watcher for the engine's
//! lifetime. Each tick polls all of them; commands go to the first
//! tracker that reports its mode as active.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::events::TrackerEvent;
use crate::messages::key;
use crate::probe::{HostPointer, StateProbe};
use crate::speech::{Category, SharedSink, SpeechBackend, SpeechSink};
use crate::tracker::{
    DotPuzzle, HotspotExam, ModeKind, ModeTracker, RotatePuzzle, Tracker, TrackerContext,
};
use crate::watch::{DialogueWatcher, NarrationWatcher};

/// Discrete user commands from the input-mapping layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Repeat,
    AnnounceState,
    NavigateNext,
    NavigatePrevious,
    AnnounceHint,
    ListAll,
    Refresh,
    Stop,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Command::Repeat => "repeat",
            Command::AnnounceState => "announce_state",
            Command::NavigateNext => "navigate_next",
            Command::NavigatePrevious => "navigate_previous",
            Command::AnnounceHint => "announce_hint",
            Command::ListAll => "list_all",
            Command::Refresh => "refresh",
            Command::Stop => "stop",
        };
        f.write_str(name)
    }
}

pub struct Dispatcher {
    ctx: TrackerContext,
    /// Priority order: the first active tracker receives commands
    trackers: Vec<Box<dyn Tracker>>,
    narration: NarrationWatcher,
    dialogue: DialogueWatcher,
}

impl Dispatcher {
    /// Build the engine from its external capabilities
    pub fn new(
        config: &EngineConfig,
        probe: Rc<dyn StateProbe>,
        speech: Box<dyn SpeechBackend>,
        pointer: Rc<dyn HostPointer>,
    ) -> Self {
        let sink = SpeechSink::new(speech, config.duplicate_window()).shared();
        let ctx = TrackerContext::new(probe, sink, pointer, Rc::new(config.message_catalog()));
        Self::with_context(config, ctx)
    }

    pub fn with_context(config: &EngineConfig, ctx: TrackerContext) -> Self {
        let trackers: Vec<Box<dyn Tracker>> = vec![
            Box::new(ModeTracker::new(DotPuzzle::new(config), ctx.clone())),
            Box::new(ModeTracker::new(RotatePuzzle::new(config), ctx.clone())),
            Box::new(ModeTracker::new(HotspotExam::new(config), ctx.clone())),
        ];

        Self {
            narration: NarrationWatcher::new(ctx.clone()),
            dialogue: DialogueWatcher::new(ctx.clone()),
            trackers,
            ctx,
        }
    }

    pub fn sink(&self) -> &SharedSink {
        &self.ctx.sink
    }

    /// Mode currently receiving commands
    pub fn active_mode(&self) -> Option<ModeKind> {
        self.active_tracker().map(|t| t.kind())
    }

    pub fn tracker(&self, kind: ModeKind) -> Option<&dyn Tracker> {
        self.trackers.iter().find(|t| t.kind() == kind).map(|t| &**t)
    }

    fn active_tracker(&self) -> Option<&dyn Tracker> {
        self.trackers.iter().find(|t| t.is_active()).map(|t| &**t)
    }

    fn active_tracker_mut(&mut self) -> Option<&mut Box<dyn Tracker>> {
        self.trackers.iter_mut().find(|t| t.is_active())
    }

    /// Poll every tracker and watcher once; returns the transitions seen
    pub fn tick(&mut self) -> Vec<TrackerEvent> {
        let mut events: Vec<TrackerEvent> = self.trackers.iter_mut().filter_map(|t| t.poll()).collect();
        events.extend(self.narration.poll());
        self.dialogue.poll();

        for event in &events {
            debug!(%event, "tracker event");
        }
        events
    }

    pub fn handle(&mut self, command: Command) {
        info!(%command, active = ?self.active_mode(), "command received");

        match command {
            Command::Repeat => {
                let repeated = self.ctx.sink.borrow_mut().repeat_last();
                if !repeated {
                    let text = self.ctx.messages.text(key::NOTHING_TO_REPEAT);
                    self.ctx.respond(&text, Category::SystemMessage);
                }
            }
            Command::Stop => self.ctx.sink.borrow_mut().stop(),
            _ => {
                let Some(tracker) = self.active_tracker_mut() else {
                    let text = self.ctx.messages.text(key::NO_ACTIVE_MODE);
                    self.ctx.respond(&text, Category::SystemMessage);
                    return;
                };
                match command {
                    Command::AnnounceState => tracker.announce_state(),
                    Command::NavigateNext => tracker.navigate_next(),
                    Command::NavigatePrevious => tracker.navigate_previous(),
                    Command::AnnounceHint => tracker.announce_hint(),
                    Command::ListAll => tracker.list_all(),
                    Command::Refresh => tracker.refresh(),
                    Command::Repeat | Command::Stop => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, Utterance};
    use serde_json::json;

    fn create_dispatcher(harness: &Harness) -> Dispatcher {
        Dispatcher::with_context(&EngineConfig::default(), harness.context.clone())
    }

    #[test]
    fn test_command_serialization() {
        let json = serde_json::to_string(&Command::NavigatePrevious).unwrap();
        assert_eq!(json, "\"navigate_previous\"");
        let command: Command = serde_json::from_str("\"list_all\"").unwrap();
        assert_eq!(command, Command::ListAll);
        assert_eq!(Command::AnnounceHint.to_string(), "announce_hint");
    }

    #[test]
    fn test_command_without_active_mode() {
        let harness = Harness::new(json!({}));
        let mut dispatcher = create_dispatcher(&harness);
        assert!(dispatcher.tick().is_empty());

        dispatcher.handle(Command::NavigateNext);
        assert_eq!(
            harness.speech.last_spoken().as_deref(),
            Some("Not in a puzzle or examination")
        );
        dispatcher.handle(Command::Repeat);
        assert_eq!(harness.speech.last_spoken().as_deref(), Some("Nothing to repeat"));
    }

    #[test]
    fn test_routes_to_active_tracker() {
        let harness = Harness::new(json!({
            "exam": { "active": true, "hotspots": [{ "name": "spot_1", "center": [0, 0, -1] }] }
        }));
        let mut dispatcher = create_dispatcher(&harness);

        let events = dispatcher.tick();
        assert_eq!(events, vec![TrackerEvent::ModeEntered { mode: ModeKind::HotspotExam }]);
        assert_eq!(dispatcher.active_mode(), Some(ModeKind::HotspotExam));

        dispatcher.handle(Command::ListAll);
        assert_eq!(harness.speech.last_spoken().as_deref(), Some("1 items: Hotspot 1"));
    }

    #[test]
    fn test_first_active_tracker_wins() {
        let harness = Harness::new(json!({
            "dot_puzzle": { "active": true },
            "rotate_puzzle": { "active": true, "pieces": [{ "rotation": 0 }] }
        }));
        let mut dispatcher = create_dispatcher(&harness);
        dispatcher.tick();
        assert_eq!(dispatcher.active_mode(), Some(ModeKind::DotPuzzle));

        dispatcher.handle(Command::NavigateNext);
        assert_eq!(harness.speech.last_spoken().as_deref(), Some("E top-left, 1 of 12"));
        let rotate = dispatcher.tracker(ModeKind::RotatePuzzle).unwrap();
        assert_eq!(rotate.cursor().raw_index(), -1);
    }

    #[test]
    fn test_repeat_replays_dialogue_not_status() {
        let harness = Harness::new(json!({
            "dialogue": { "speaker": "Edgeworth", "text": "Objection!" },
            "rotate_puzzle": { "active": true, "pieces": [] }
        }));
        let mut dispatcher = create_dispatcher(&harness);
        dispatcher.tick();
        dispatcher.handle(Command::AnnounceHint);

        dispatcher.handle(Command::Repeat);
        assert_eq!(
            harness.speech.log().last(),
            Some(&Utterance::Say { text: "Edgeworth: Objection!".into(), interrupt: true })
        );
    }

    #[test]
    fn test_stop_reaches_backend() {
        let harness = Harness::new(json!({}));
        let mut dispatcher = create_dispatcher(&harness);
        dispatcher.handle(Command::Stop);
        assert_eq!(harness.speech.log(), vec![Utterance::Stop]);
    }
}

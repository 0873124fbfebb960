//! Narration line announcer

use tracing::debug;

use crate::events::TrackerEvent;
use crate::language::Language;
use crate::probe::{ProbeValue, StateProbe};
use crate::segmenter::{segment, SegmentSet};
use crate::speech::Category;
use crate::tracker::TrackerContext;

const TYPE: &str = "narration.type";
const CODES: &str = "narration.codes";
const LINE: &str = "narration.line";

/// An active narration: the packed source and the lines cut from it
#[derive(Debug)]
struct Session {
    set: SegmentSet,
    language: Language,
    codes: Vec<u16>,
    lines: Vec<String>,
    /// Last line index spoken
    spoken: Option<usize>,
}

/// Segments narration once per type and speaks each line as the host
/// advances to it
pub struct NarrationWatcher {
    ctx: TrackerContext,
    session: Option<Session>,
}

fn read_codes(probe: &dyn StateProbe) -> Vec<u16> {
    probe
        .read_list(CODES)
        .map(|items| {
            items
                .iter()
                .filter_map(|item: &ProbeValue| item.as_i64().found())
                .filter_map(|code| u16::try_from(code).ok())
                .collect()
        })
        .unwrap_or_default()
}

impl NarrationWatcher {
    pub fn new(ctx: TrackerContext) -> Self {
        Self { ctx, session: None }
    }

    /// Lines of the current narration, empty when none is running
    pub fn lines(&self) -> &[String] {
        self.session.as_ref().map(|s| s.lines.as_slice()).unwrap_or(&[])
    }

    pub fn poll(&mut self) -> Option<TrackerEvent> {
        let probe = &*self.ctx.probe;
        let Some(set) = probe
            .read_i64(TYPE)
            .found()
            .and_then(SegmentSet::from_id)
        else {
            return self.session.take().map(|_| {
                debug!("narration ended");
                TrackerEvent::NarrationEnded
            });
        };

        let codes = read_codes(probe);
        let language = Language::from_probe(probe);
        let stale = match &self.session {
            Some(session) => {
                session.set != set || session.language != language || session.codes != codes
            }
            None => true,
        };

        let mut event = None;
        if stale {
            let lines = segment(&codes, language, set);
            debug!(?set, ?language, lines = lines.len(), "narration segmented");
            event = Some(TrackerEvent::NarrationStarted {
                segment_set: set,
                lines: lines.len(),
            });
            self.session = Some(Session {
                set,
                language,
                codes,
                lines,
                spoken: None,
            });
        }

        let line = probe.read_usize(LINE).found();
        if let (Some(session), Some(index)) = (self.session.as_mut(), line) {
            if session.spoken != Some(index) {
                if let Some(text) = session.lines.get(index) {
                    session.spoken = Some(index);
                    self.ctx.announce(text, Category::Narrator);
                }
            }
        }

        event
    }
}

//! Polling mode trackers
//!
//! Each interactive sub-mode of the host gets a [`ModeTracker`]: a two-state
//! machine (Inactive, Active) re-evaluated once per tick from the probe,
//! plus a navigation [`Cursor`] over whatever the mode exposes. The
//! mode-specific parts (detection, labels, hints) live behind
//! [`TrackedMode`].

mod cursor;
pub mod dot;
pub mod entities;
pub mod geometry;
pub mod hotspot;
pub mod rotate;

use std::fmt::Display;
use std::rc::Rc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::events::TrackerEvent;
use crate::messages::{key, Messages};
use crate::probe::{HostPointer, StateProbe};
use crate::speech::{Category, SharedSink};

pub use cursor::Cursor;
pub use dot::DotPuzzle;
pub use hotspot::HotspotExam;
pub use rotate::RotatePuzzle;

/// The interactive sub-modes the engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    DotPuzzle,
    RotatePuzzle,
    HotspotExam,
}

impl std::fmt::Display for ModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeKind::DotPuzzle => write!(f, "dot_puzzle"),
            ModeKind::RotatePuzzle => write!(f, "rotate_puzzle"),
            ModeKind::HotspotExam => write!(f, "hotspot_exam"),
        }
    }
}

/// Capabilities handed to every tracker at construction
#[derive(Clone)]
pub struct TrackerContext {
    pub probe: Rc<dyn StateProbe>,
    pub sink: SharedSink,
    pub pointer: Rc<dyn HostPointer>,
    pub messages: Rc<Messages>,
}

impl TrackerContext {
    pub fn new(
        probe: Rc<dyn StateProbe>,
        sink: SharedSink,
        pointer: Rc<dyn HostPointer>,
        messages: Rc<Messages>,
    ) -> Self {
        Self {
            probe,
            sink,
            pointer,
            messages,
        }
    }

    pub fn text(&self, id: &str, args: &[&dyn Display]) -> String {
        self.messages.format(id, args)
    }

    /// Deduplicated status announcement
    pub fn announce(&self, body: &str, category: Category) {
        self.sink.borrow_mut().announce(body, category);
    }

    /// Answer to an explicit command
    pub fn respond(&self, body: &str, category: Category) {
        self.sink.borrow_mut().respond(body, category);
    }
}

/// Mode-specific behavior plugged into [`ModeTracker`]
pub trait TrackedMode {
    const KIND: ModeKind;
    /// Message id of the mode's spoken name
    const NAME: &'static str;
    const CATEGORY: Category;

    /// Mode-detection predicate; missing fields mean inactive
    fn detect(&self, probe: &dyn StateProbe) -> bool;

    /// Derive entity lists and return the orientation announcement
    fn enter(&mut self, ctx: &TrackerContext) -> String;

    /// Drop everything derived on entry
    fn exit(&mut self);

    /// Per-tick sampling while active
    fn sample(&mut self, _ctx: &TrackerContext) {}

    /// Size of the navigable collection
    fn total(&self) -> usize;

    /// Semantic label of entry `index`
    fn label(&self, ctx: &TrackerContext, index: usize) -> String;

    /// Host side effect when the cursor lands on `index`
    fn focus(&mut self, _ctx: &TrackerContext, _index: usize) {}

    fn hint(&self, ctx: &TrackerContext, cursor: &Cursor) -> String;

    fn state(&self, ctx: &TrackerContext, cursor: &Cursor) -> String;

    /// Re-derive entity lists; `None` when the mode has nothing to refresh
    fn refresh(&mut self, _ctx: &TrackerContext) -> Option<String> {
        None
    }
}

/// Object-safe surface the dispatcher drives
pub trait Tracker {
    fn kind(&self) -> ModeKind;
    fn is_active(&self) -> bool;
    fn cursor(&self) -> Cursor;
    /// Re-evaluate detection; returns the transition, if any
    fn poll(&mut self) -> Option<TrackerEvent>;
    fn navigate_next(&mut self);
    fn navigate_previous(&mut self);
    fn announce_hint(&mut self);
    fn announce_state(&mut self);
    fn list_all(&mut self);
    fn refresh(&mut self);
}

/// Inactive/Active lifecycle around a [`TrackedMode`]
pub struct ModeTracker<M> {
    mode: M,
    ctx: TrackerContext,
    cursor: Cursor,
    active: bool,
    entered_at: Option<Instant>,
}

impl<M: TrackedMode> ModeTracker<M> {
    pub fn new(mode: M, ctx: TrackerContext) -> Self {
        Self {
            mode,
            ctx,
            cursor: Cursor::default(),
            active: false,
            entered_at: None,
        }
    }

    pub fn mode(&self) -> &M {
        &self.mode
    }

    fn enter(&mut self) -> TrackerEvent {
        info!(mode = %M::KIND, "mode entered");
        self.active = true;
        self.entered_at = Some(Instant::now());

        let greeting = self.mode.enter(&self.ctx);
        self.cursor.reset(self.mode.total());
        self.ctx.announce(&greeting, M::CATEGORY);

        TrackerEvent::ModeEntered { mode: M::KIND }
    }

    fn exit(&mut self) -> TrackerEvent {
        let duration_ms = self
            .entered_at
            .take()
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0);
        info!(mode = %M::KIND, duration_ms, "mode exited");

        self.active = false;
        self.mode.exit();
        self.cursor.reset(0);

        let name = self.ctx.messages.text(M::NAME);
        let farewell = self.ctx.text(key::MODE_EXIT, &[&name]);
        self.ctx.announce(&farewell, M::CATEGORY);

        TrackerEvent::ModeExited {
            mode: M::KIND,
            duration_ms,
        }
    }

    /// Runs `f` when active, otherwise announces that the mode is not on
    fn when_active(&mut self, f: impl FnOnce(&mut Self)) {
        if self.active {
            f(self);
        } else {
            let name = self.ctx.messages.text(M::NAME);
            let text = self.ctx.text(key::NOT_IN_MODE, &[&name]);
            self.ctx.respond(&text, M::CATEGORY);
        }
    }

    fn navigate(&mut self, forward: bool) {
        self.cursor.set_total(self.mode.total());
        let moved = if forward {
            self.cursor.next()
        } else {
            self.cursor.previous()
        };
        let Some(index) = moved else {
            debug!(mode = %M::KIND, "nothing to navigate");
            return;
        };

        self.mode.focus(&self.ctx, index);
        let label = self.mode.label(&self.ctx, index);
        let text = self.ctx.text(key::POSITION, &[&label, &(index + 1), &self.cursor.total()]);
        self.ctx.respond(&text, M::CATEGORY);
    }
}

impl<M: TrackedMode> Tracker for ModeTracker<M> {
    fn kind(&self) -> ModeKind {
        M::KIND
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn poll(&mut self) -> Option<TrackerEvent> {
        let detected = self.mode.detect(&*self.ctx.probe);
        match (self.active, detected) {
            (false, true) => Some(self.enter()),
            (true, false) => Some(self.exit()),
            (true, true) => {
                self.mode.sample(&self.ctx);
                self.cursor.set_total(self.mode.total());
                None
            }
            (false, false) => None,
        }
    }

    fn navigate_next(&mut self) {
        self.when_active(|t| t.navigate(true));
    }

    fn navigate_previous(&mut self) {
        self.when_active(|t| t.navigate(false));
    }

    fn announce_hint(&mut self) {
        self.when_active(|t| {
            let text = t.mode.hint(&t.ctx, &t.cursor);
            t.ctx.respond(&text, M::CATEGORY);
        });
    }

    fn announce_state(&mut self) {
        self.when_active(|t| {
            let text = t.mode.state(&t.ctx, &t.cursor);
            t.ctx.respond(&text, M::CATEGORY);
        });
    }

    fn list_all(&mut self) {
        self.when_active(|t| {
            let total = t.mode.total();
            let text = if total == 0 {
                t.ctx.messages.text(key::LIST_EMPTY)
            } else {
                let labels: Vec<String> = (0..total).map(|i| t.mode.label(&t.ctx, i)).collect();
                t.ctx.text(key::LIST, &[&total, &labels.join(", ")])
            };
            t.ctx.respond(&text, M::CATEGORY);
        });
    }

    fn refresh(&mut self) {
        self.when_active(|t| {
            if let Some(text) = t.mode.refresh(&t.ctx) {
                t.cursor.set_total(t.mode.total());
                t.ctx.respond(&text, M::CATEGORY);
            }
        });
    }
}

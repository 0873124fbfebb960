//! Connect-the-dots puzzle
//!
//! The host shows 12 dots for Latin-script languages and 15 for the CJK
//! family. Only the 12-dot layout has curated position names and hint
//! text; the 15-dot layout falls back to "position N" and raw counts.

use tracing::debug;

use super::entities::{derive_entities, Entity};
use super::{Cursor, ModeKind, TrackedMode, TrackerContext};
use crate::config::{EngineConfig, HintBands};
use crate::language::Language;
use crate::messages::key;
use crate::probe::{PointerTarget, StateProbe};
use crate::speech::Category;

const ACTIVE: &str = "dot_puzzle.active";
const DOTS: &str = "dot_puzzle.dots";
const CONNECTIONS: &str = "dot_puzzle.connections";
const DRAWING: &str = "dot_puzzle.drawing";
const LINE_START: &str = "dot_puzzle.line_start";

/// Position names of the 12-dot layout, in dot order
const TWELVE_DOT_LABELS: [&str; 12] = [
    "E top-left",
    "E top-right",
    "E middle-left",
    "E middle-right",
    "E bottom-left",
    "E bottom-right",
    "Y top-left",
    "Y top-right",
    "Y center",
    "Y bottom",
    "outer left",
    "outer right",
];

/// Qualitative guidance for the 12-dot layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotHint {
    Start,
    FirstShape,
    SecondShape,
    Done,
}

impl DotHint {
    /// Bucket a connection count; every band includes its lower edge
    pub fn for_connections(connections: usize, bands: &HintBands) -> Self {
        if connections >= bands.done_from {
            DotHint::Done
        } else if connections >= bands.second_shape_from {
            DotHint::SecondShape
        } else if connections >= bands.first_shape_from {
            DotHint::FirstShape
        } else {
            DotHint::Start
        }
    }
}

pub struct DotPuzzle {
    bands: HintBands,
    exclusions: Vec<String>,
    /// Read once per activation
    language: Language,
    dots: Vec<Entity>,
}

impl DotPuzzle {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            bands: config.hint_bands,
            exclusions: config.exclusion_patterns.clone(),
            language: Language::default(),
            dots: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn has_curated_labels(&self) -> bool {
        self.language.dot_count() == TWELVE_DOT_LABELS.len()
    }

    fn connections(probe: &dyn StateProbe) -> usize {
        probe.read_usize(CONNECTIONS).unwrap_or(0)
    }

    fn position(&self, index: usize) -> Option<[f64; 3]> {
        self.dots.get(index).and_then(|dot| dot.position)
    }
}

impl TrackedMode for DotPuzzle {
    const KIND: ModeKind = ModeKind::DotPuzzle;
    const NAME: &'static str = key::DOT_MODE;
    const CATEGORY: Category = Category::Investigation;

    fn detect(&self, probe: &dyn StateProbe) -> bool {
        probe.is_true(ACTIVE)
    }

    fn enter(&mut self, ctx: &TrackerContext) -> String {
        self.language = Language::from_probe(&*ctx.probe);
        self.dots = ctx
            .probe
            .read_list(DOTS)
            .map(|children| derive_entities(&children, "position", &self.exclusions))
            .unwrap_or_default();
        debug!(
            language = ?self.language,
            dots = self.dots.len(),
            "dot puzzle layout read"
        );
        ctx.text(key::DOT_ENTER, &[&self.total()])
    }

    fn exit(&mut self) {
        self.dots.clear();
    }

    fn total(&self) -> usize {
        self.language.dot_count()
    }

    fn label(&self, ctx: &TrackerContext, index: usize) -> String {
        match TWELVE_DOT_LABELS.get(index) {
            Some(label) if self.has_curated_labels() => label.to_string(),
            _ => ctx.text(key::DOT_POSITION_GENERIC, &[&(index + 1)]),
        }
    }

    fn focus(&mut self, ctx: &TrackerContext, index: usize) {
        match self.position(index) {
            Some(position) => {
                if !ctx.pointer.place(PointerTarget::DotCursor, position) {
                    debug!(index, "host refused dot cursor placement");
                }
            }
            None => debug!(index, "no recorded position for dot"),
        }
    }

    fn hint(&self, ctx: &TrackerContext, _cursor: &Cursor) -> String {
        let connections = Self::connections(&*ctx.probe);
        if !self.has_curated_labels() {
            return ctx.text(key::DOT_HINT_COUNT, &[&connections]);
        }
        match DotHint::for_connections(connections, &self.bands) {
            DotHint::Start => ctx.messages.text(key::DOT_HINT_START),
            DotHint::FirstShape => ctx.messages.text(key::DOT_HINT_FIRST_SHAPE),
            DotHint::SecondShape => ctx.messages.text(key::DOT_HINT_SECOND_SHAPE),
            DotHint::Done => ctx.text(key::DOT_HINT_DONE, &[&connections]),
        }
    }

    fn state(&self, ctx: &TrackerContext, cursor: &Cursor) -> String {
        let probe = &*ctx.probe;
        let connections = Self::connections(probe);
        let mut text = match cursor.index() {
            Some(index) => {
                let label = self.label(ctx, index);
                ctx.text(key::DOT_STATE, &[&label, &connections])
            }
            None => ctx.text(key::DOT_STATE_NO_DOT, &[&connections]),
        };

        if probe.is_true(DRAWING) {
            if let Some(start) = probe.read_usize(LINE_START).found() {
                let label = self.label(ctx, start);
                text.push_str(". ");
                text.push_str(&ctx.text(key::DOT_STATE_DRAWING, &[&label]));
            }
        }
        text
    }
}

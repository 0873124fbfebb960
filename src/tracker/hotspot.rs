//! 3D object examination
//!
//! The host renders an object the player can turn and zoom, with named
//! hotspot children. Navigation moves the examination cursor over the
//! selected hotspot; zoom changes are announced as they happen.

use tracing::debug;

use super::entities::{derive_entities, Entity};
use super::geometry::{project_to_cursor, Camera, CursorSpace};
use super::{Cursor, ModeKind, TrackedMode, TrackerContext};
use crate::config::EngineConfig;
use crate::messages::key;
use crate::probe::{PointerTarget, StateProbe};
use crate::speech::Category;

const ACTIVE: &str = "exam.active";
const HOTSPOTS: &str = "exam.hotspots";
const ZOOM: &str = "exam.zoom";
const CAMERA: &str = "exam.camera";
const CURSOR_SPACE: &str = "exam.cursor_space";
const OVER_HOTSPOT: &str = "exam.cursor_over_hotspot";

/// Absorbs per-frame jitter in the sampled zoom ratio
#[derive(Debug, Clone)]
pub struct ZoomWatch {
    threshold: f64,
    last: Option<f64>,
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Zoom ratio as a whole percentage
pub fn zoom_percent(zoom: f64) -> i64 {
    (zoom * 100.0).round() as i64
}

impl ZoomWatch {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last: None,
        }
    }

    /// Record the value present on entry without announcing it
    pub fn baseline(&mut self, zoom: Option<f64>) {
        self.last = zoom.map(round_one_decimal);
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Feed one sample; returns the percentage to announce, if any
    pub fn observe(&mut self, zoom: f64) -> Option<i64> {
        let rounded = round_one_decimal(zoom);
        let Some(last) = self.last else {
            self.last = Some(rounded);
            return None;
        };
        // Tolerance for decimal values that are not exact in binary
        if (rounded - last).abs() + 1e-9 < self.threshold {
            return None;
        }
        self.last = Some(rounded);
        Some(zoom_percent(zoom))
    }
}

pub struct HotspotExam {
    exclusions: Vec<String>,
    hotspots: Vec<Entity>,
    zoom: ZoomWatch,
}

impl HotspotExam {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            exclusions: config.exclusion_patterns.clone(),
            hotspots: Vec::new(),
            zoom: ZoomWatch::new(config.zoom_threshold),
        }
    }

    pub fn hotspots(&self) -> &[Entity] {
        &self.hotspots
    }

    fn derive(&mut self, probe: &dyn StateProbe) {
        self.hotspots = probe
            .read_list(HOTSPOTS)
            .map(|children| derive_entities(&children, "center", &self.exclusions))
            .unwrap_or_default();
        debug!(hotspots = self.hotspots.len(), "hotspots derived");
    }

    fn cursor_target(probe: &dyn StateProbe, center: [f64; 3]) -> Option<[f64; 3]> {
        let camera = Camera::from_probe(probe, CAMERA)?;
        let space = CursorSpace::from_probe(probe, CURSOR_SPACE)?;
        project_to_cursor(&camera, &space, center)
    }
}

impl TrackedMode for HotspotExam {
    const KIND: ModeKind = ModeKind::HotspotExam;
    const NAME: &'static str = key::EXAM_MODE;
    const CATEGORY: Category = Category::Investigation;

    fn detect(&self, probe: &dyn StateProbe) -> bool {
        probe.is_true(ACTIVE)
    }

    fn enter(&mut self, ctx: &TrackerContext) -> String {
        let probe = &*ctx.probe;
        self.derive(probe);
        let zoom = probe.read_f64(ZOOM).found();
        self.zoom.baseline(zoom);

        let count = self.hotspots.len();
        match zoom {
            Some(zoom) => ctx.text(key::EXAM_ENTER, &[&count, &zoom_percent(zoom)]),
            None => ctx.text(key::EXAM_ENTER_NO_ZOOM, &[&count]),
        }
    }

    fn exit(&mut self) {
        self.hotspots.clear();
        self.zoom.clear();
    }

    fn sample(&mut self, ctx: &TrackerContext) {
        let Some(zoom) = ctx.probe.read_f64(ZOOM).found() else {
            return;
        };
        if let Some(percent) = self.zoom.observe(zoom) {
            let text = ctx.text(key::EXAM_ZOOM, &[&percent]);
            ctx.announce(&text, Self::CATEGORY);
        }
    }

    fn total(&self) -> usize {
        self.hotspots.len()
    }

    fn label(&self, ctx: &TrackerContext, index: usize) -> String {
        let number = self.hotspots.get(index).map(|h| h.number).unwrap_or(index + 1);
        ctx.text(key::EXAM_HOTSPOT, &[&number])
    }

    fn focus(&mut self, ctx: &TrackerContext, index: usize) {
        let Some(center) = self.hotspots.get(index).and_then(|h| h.position) else {
            debug!(index, "hotspot has no center");
            return;
        };
        match Self::cursor_target(&*ctx.probe, center) {
            Some(target) => {
                if !ctx.pointer.place(PointerTarget::ExamCursor, target) {
                    debug!(index, "host refused exam cursor placement");
                }
            }
            None => debug!(index, ?center, "hotspot projection failed"),
        }
    }

    fn hint(&self, ctx: &TrackerContext, cursor: &Cursor) -> String {
        // Examination has no puzzle to solve; the closest help is the summary
        self.state(ctx, cursor)
    }

    fn state(&self, ctx: &TrackerContext, _cursor: &Cursor) -> String {
        let probe = &*ctx.probe;
        let over = if probe.is_true(OVER_HOTSPOT) {
            ctx.messages.text(key::EXAM_OVER_HOTSPOT)
        } else {
            ctx.messages.text(key::EXAM_NOT_OVER_HOTSPOT)
        };
        let count = self.hotspots.len();
        match probe.read_f64(ZOOM).found() {
            Some(zoom) => ctx.text(key::EXAM_STATE, &[&zoom_percent(zoom), &over, &count]),
            None => ctx.text(key::EXAM_STATE_NO_ZOOM, &[&over, &count]),
        }
    }

    fn refresh(&mut self, ctx: &TrackerContext) -> Option<String> {
        self.derive(&*ctx.probe);
        Some(ctx.text(key::EXAM_REFRESHED, &[&self.hotspots.len()]))
    }
}

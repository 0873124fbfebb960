//! User-facing message templates
//!
//! Templates are keyed by id and use positional placeholders (`{0}`,
//! `{1}`, ...). English defaults are built in; a localization layer can
//! merge overrides on top. A key missing from the overrides falls back to
//! the default, and a key missing everywhere renders as the key itself.

use std::collections::HashMap;
use std::fmt::Display;

/// Message ids
pub mod key {
    pub const NO_ACTIVE_MODE: &str = "no_active_mode";
    pub const NOT_IN_MODE: &str = "not_in_mode";
    pub const NOTHING_TO_REPEAT: &str = "nothing_to_repeat";
    pub const POSITION: &str = "position";
    pub const LIST: &str = "list";
    pub const LIST_EMPTY: &str = "list_empty";
    pub const MODE_EXIT: &str = "mode_exit";

    pub const DOT_MODE: &str = "dot_mode";
    pub const DOT_ENTER: &str = "dot_enter";
    pub const DOT_POSITION_GENERIC: &str = "dot_position_generic";
    pub const DOT_HINT_START: &str = "dot_hint_start";
    pub const DOT_HINT_FIRST_SHAPE: &str = "dot_hint_first_shape";
    pub const DOT_HINT_SECOND_SHAPE: &str = "dot_hint_second_shape";
    pub const DOT_HINT_DONE: &str = "dot_hint_done";
    pub const DOT_HINT_COUNT: &str = "dot_hint_count";
    pub const DOT_STATE: &str = "dot_state";
    pub const DOT_STATE_NO_DOT: &str = "dot_state_no_dot";
    pub const DOT_STATE_DRAWING: &str = "dot_state_drawing";

    pub const ROTATE_MODE: &str = "rotate_mode";
    pub const ROTATE_ENTER: &str = "rotate_enter";
    pub const ROTATE_PIECE: &str = "rotate_piece";
    pub const ROTATE_PIECE_ROTATED: &str = "rotate_piece_rotated";
    pub const ROTATE_PIECE_PLACED: &str = "rotate_piece_placed";
    pub const ROTATE_HINT_COMPLETE: &str = "rotate_hint_complete";
    pub const ROTATE_HINT_COMBINE: &str = "rotate_hint_combine";
    pub const ROTATE_HINT_ROTATE_RIGHT: &str = "rotate_hint_rotate_right";
    pub const ROTATE_HINT_ROTATE_LEFT: &str = "rotate_hint_rotate_left";
    pub const ROTATE_HINT_MOVE_RIGHT: &str = "rotate_hint_move_right";
    pub const ROTATE_HINT_MOVE_LEFT: &str = "rotate_hint_move_left";
    pub const ROTATE_HINT_SELECT: &str = "rotate_hint_select";
    pub const ROTATE_STATE: &str = "rotate_state";
    pub const ROTATE_STATE_NO_SELECTION: &str = "rotate_state_no_selection";
    pub const ROTATE_PLACED: &str = "rotate_placed";
    pub const ROTATE_NOT_PLACED: &str = "rotate_not_placed";

    pub const EXAM_MODE: &str = "exam_mode";
    pub const EXAM_ENTER: &str = "exam_enter";
    pub const EXAM_ENTER_NO_ZOOM: &str = "exam_enter_no_zoom";
    pub const EXAM_HOTSPOT: &str = "exam_hotspot";
    pub const EXAM_ZOOM: &str = "exam_zoom";
    pub const EXAM_STATE: &str = "exam_state";
    pub const EXAM_STATE_NO_ZOOM: &str = "exam_state_no_zoom";
    pub const EXAM_OVER_HOTSPOT: &str = "exam_over_hotspot";
    pub const EXAM_NOT_OVER_HOTSPOT: &str = "exam_not_over_hotspot";
    pub const EXAM_REFRESHED: &str = "exam_refreshed";
}

fn default_template(id: &str) -> Option<&'static str> {
    let template = match id {
        key::NO_ACTIVE_MODE => "Not in a puzzle or examination",
        key::NOT_IN_MODE => "Not in {0}",
        key::NOTHING_TO_REPEAT => "Nothing to repeat",
        key::POSITION => "{0}, {1} of {2}",
        key::LIST => "{0} items: {1}",
        key::LIST_EMPTY => "Nothing to list",
        key::MODE_EXIT => "Left {0}",

        key::DOT_MODE => "dot puzzle",
        key::DOT_ENTER => "Connect the dots puzzle. {0} dots. Use next and previous to move between dots",
        key::DOT_POSITION_GENERIC => "position {0}",
        key::DOT_HINT_START => "Start by connecting two dots of the first shape",
        key::DOT_HINT_FIRST_SHAPE => "Continue the first shape",
        key::DOT_HINT_SECOND_SHAPE => "First shape done. Draw the second shape",
        key::DOT_HINT_DONE => "All shapes drawn. {0} connections",
        key::DOT_HINT_COUNT => "{0} connections drawn",
        key::DOT_STATE => "Current dot {0}. {1} connections drawn",
        key::DOT_STATE_NO_DOT => "No dot selected. {0} connections drawn",
        key::DOT_STATE_DRAWING => "Drawing a line from {0}",

        key::ROTATE_MODE => "rotation puzzle",
        key::ROTATE_ENTER => "Rotation puzzle. {0} pieces, {1} remaining",
        key::ROTATE_PIECE => "Piece {0}",
        key::ROTATE_PIECE_ROTATED => "Piece {0}, rotated {1} degrees",
        key::ROTATE_PIECE_PLACED => "Piece {0}, placed",
        key::ROTATE_HINT_COMPLETE => "Puzzle complete",
        key::ROTATE_HINT_COMBINE => "Correct piece at the correct angle. Press combine. {0} pieces remaining",
        key::ROTATE_HINT_ROTATE_RIGHT => "Correct piece. Rotate right {0} times. {1} pieces remaining",
        key::ROTATE_HINT_ROTATE_LEFT => "Correct piece. Rotate left {0} times. {1} pieces remaining",
        key::ROTATE_HINT_MOVE_RIGHT => "Move right to piece {0}. {1} pieces remaining",
        key::ROTATE_HINT_MOVE_LEFT => "Move left to piece {0}. {1} pieces remaining",
        key::ROTATE_HINT_SELECT => "Select piece {0}. {1} pieces remaining",
        key::ROTATE_STATE => "Piece {0}, {1}, rotated {2} degrees. {3} pieces remaining",
        key::ROTATE_STATE_NO_SELECTION => "No piece selected. {0} pieces remaining",
        key::ROTATE_PLACED => "placed",
        key::ROTATE_NOT_PLACED => "not placed",

        key::EXAM_MODE => "examination",
        key::EXAM_ENTER => "Examination. {0} hotspots. Zoom {1}%",
        key::EXAM_ENTER_NO_ZOOM => "Examination. {0} hotspots",
        key::EXAM_HOTSPOT => "Hotspot {0}",
        key::EXAM_ZOOM => "Zoom {0}%",
        key::EXAM_STATE => "Zoom {0}%. {1}. {2} hotspots",
        key::EXAM_STATE_NO_ZOOM => "{0}. {1} hotspots",
        key::EXAM_OVER_HOTSPOT => "Cursor on a hotspot",
        key::EXAM_NOT_OVER_HOTSPOT => "Cursor not on a hotspot",
        key::EXAM_REFRESHED => "{0} hotspots found",
        _ => return None,
    };
    Some(template)
}

/// Resolved message catalog
#[derive(Debug, Clone, Default)]
pub struct Messages {
    overrides: HashMap<String, String>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Raw template for `id`
    pub fn template<'a>(&'a self, id: &'a str) -> &'a str {
        self.overrides
            .get(id)
            .map(String::as_str)
            .or_else(|| default_template(id))
            .unwrap_or(id)
    }

    /// Resolve `id` and substitute positional arguments
    pub fn format(&self, id: &str, args: &[&dyn Display]) -> String {
        fill(self.template(id), args)
    }

    pub fn text(&self, id: &str) -> String {
        self.template(id).to_string()
    }
}

/// Substitute `{N}` placeholders. Out-of-range or malformed placeholders
/// are left as written.
pub fn fill(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg.to_string(), close))
        });

        match substituted {
            Some((text, close)) => {
                out.push_str(&text);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

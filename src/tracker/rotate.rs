//! Select-piece-and-rotate puzzle
//!
//! Each step expects one specific piece, turned back to rotation state 0
//! and combined. Rotation states are quarter turns modulo 4; "right"
//! decrements the state and "left" increments it.

use tracing::debug;

use super::{Cursor, ModeKind, TrackedMode, TrackerContext};
use crate::config::EngineConfig;
use crate::messages::key;
use crate::probe::{ProbeValue, StateProbe};
use crate::speech::Category;

const ACTIVE: &str = "rotate_puzzle.active";
const PIECES: &str = "rotate_puzzle.pieces";
const STEP: &str = "rotate_puzzle.step";
const SELECTED: &str = "rotate_puzzle.selected";

const ROTATION_STATES: u8 = 4;
const DEGREES_PER_STATE: u32 = 90;

/// What the player should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateHint {
    Complete,
    /// No piece selected; `target` is the piece index
    Select { target: usize, remaining: usize },
    Combine { remaining: usize },
    RotateRight { presses: u8, remaining: usize },
    RotateLeft { presses: u8, remaining: usize },
    MoveRight { target: usize, remaining: usize },
    MoveLeft { target: usize, remaining: usize },
}

/// Compute the next instruction
///
/// `rotation` is the selected piece's rotation state, only consulted when
/// the selected piece is the expected one. Ties between the two rotation
/// directions go to the decrementing (right) one.
pub fn rotate_hint(solution: &[usize], step: usize, selected: Option<usize>, rotation: u8) -> RotateHint {
    let Some(&target) = solution.get(step) else {
        return RotateHint::Complete;
    };
    let remaining = solution.len() - step;

    let Some(selected) = selected else {
        return RotateHint::Select { target, remaining };
    };

    if selected == target {
        let rotation = rotation % ROTATION_STATES;
        if rotation == 0 {
            return RotateHint::Combine { remaining };
        }
        let right_presses = rotation;
        let left_presses = ROTATION_STATES - rotation;
        if right_presses <= left_presses {
            RotateHint::RotateRight {
                presses: right_presses,
                remaining,
            }
        } else {
            RotateHint::RotateLeft {
                presses: left_presses,
                remaining,
            }
        }
    } else if target > selected {
        RotateHint::MoveRight { target, remaining }
    } else {
        RotateHint::MoveLeft { target, remaining }
    }
}

/// One puzzle piece as the host reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Piece {
    pub rotation: u8,
    pub placed: bool,
}

impl Piece {
    fn from_value(value: &ProbeValue) -> Self {
        let rotation = value
            .field("rotation")
            .and_then(|v| v.as_i64())
            .map(|r| r.rem_euclid(i64::from(ROTATION_STATES)) as u8)
            .unwrap_or(0);
        let placed = value.field("placed").and_then(|v| v.as_bool()).unwrap_or(false);
        Self { rotation, placed }
    }

    pub fn degrees(&self) -> u32 {
        u32::from(self.rotation) * DEGREES_PER_STATE
    }
}

pub struct RotatePuzzle {
    solution: Vec<usize>,
    piece_count: usize,
}

impl RotatePuzzle {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            solution: config.rotate_solution.clone(),
            piece_count: 0,
        }
    }

    fn pieces(probe: &dyn StateProbe) -> Vec<Piece> {
        probe
            .read_list(PIECES)
            .map(|items| items.iter().map(Piece::from_value).collect())
            .unwrap_or_default()
    }

    fn piece(probe: &dyn StateProbe, index: usize) -> Option<Piece> {
        probe
            .read(&format!("{PIECES}.{index}"))
            .found()
            .map(|value| Piece::from_value(&value))
    }

    fn step(probe: &dyn StateProbe) -> usize {
        probe.read_usize(STEP).unwrap_or(0)
    }

    fn remaining(&self, step: usize) -> usize {
        self.solution.len().saturating_sub(step)
    }
}

impl TrackedMode for RotatePuzzle {
    const KIND: ModeKind = ModeKind::RotatePuzzle;
    const NAME: &'static str = key::ROTATE_MODE;
    const CATEGORY: Category = Category::Evidence;

    fn detect(&self, probe: &dyn StateProbe) -> bool {
        probe.is_true(ACTIVE)
    }

    fn enter(&mut self, ctx: &TrackerContext) -> String {
        let probe = &*ctx.probe;
        self.piece_count = Self::pieces(probe).len();
        let remaining = self.remaining(Self::step(probe));
        ctx.text(key::ROTATE_ENTER, &[&self.piece_count, &remaining])
    }

    fn exit(&mut self) {
        self.piece_count = 0;
    }

    fn sample(&mut self, ctx: &TrackerContext) {
        self.piece_count = Self::pieces(&*ctx.probe).len();
    }

    fn total(&self) -> usize {
        self.piece_count
    }

    fn label(&self, ctx: &TrackerContext, index: usize) -> String {
        let number = index + 1;
        match Self::piece(&*ctx.probe, index) {
            Some(piece) if piece.placed => ctx.text(key::ROTATE_PIECE_PLACED, &[&number]),
            Some(piece) if piece.rotation != 0 => {
                ctx.text(key::ROTATE_PIECE_ROTATED, &[&number, &piece.degrees()])
            }
            _ => ctx.text(key::ROTATE_PIECE, &[&number]),
        }
    }

    fn hint(&self, ctx: &TrackerContext, _cursor: &Cursor) -> String {
        let probe = &*ctx.probe;
        let step = Self::step(probe);
        let selected = probe.read_usize(SELECTED).found();
        let rotation = selected
            .and_then(|index| Self::piece(probe, index))
            .map(|piece| piece.rotation)
            .unwrap_or(0);

        let hint = rotate_hint(&self.solution, step, selected, rotation);
        debug!(step, ?selected, rotation, ?hint, "rotation hint");

        match hint {
            RotateHint::Complete => ctx.messages.text(key::ROTATE_HINT_COMPLETE),
            RotateHint::Select { target, remaining } => {
                ctx.text(key::ROTATE_HINT_SELECT, &[&(target + 1), &remaining])
            }
            RotateHint::Combine { remaining } => ctx.text(key::ROTATE_HINT_COMBINE, &[&remaining]),
            RotateHint::RotateRight { presses, remaining } => {
                ctx.text(key::ROTATE_HINT_ROTATE_RIGHT, &[&presses, &remaining])
            }
            RotateHint::RotateLeft { presses, remaining } => {
                ctx.text(key::ROTATE_HINT_ROTATE_LEFT, &[&presses, &remaining])
            }
            RotateHint::MoveRight { target, remaining } => {
                ctx.text(key::ROTATE_HINT_MOVE_RIGHT, &[&(target + 1), &remaining])
            }
            RotateHint::MoveLeft { target, remaining } => {
                ctx.text(key::ROTATE_HINT_MOVE_LEFT, &[&(target + 1), &remaining])
            }
        }
    }

    fn state(&self, ctx: &TrackerContext, _cursor: &Cursor) -> String {
        let probe = &*ctx.probe;
        let remaining = self.remaining(Self::step(probe));
        let selected = probe
            .read_usize(SELECTED)
            .found()
            .and_then(|index| Some((index, Self::piece(probe, index)?)));

        match selected {
            Some((index, piece)) => {
                let placed = if piece.placed {
                    ctx.messages.text(key::ROTATE_PLACED)
                } else {
                    ctx.messages.text(key::ROTATE_NOT_PLACED)
                };
                ctx.text(
                    key::ROTATE_STATE,
                    &[&(index + 1), &placed, &piece.degrees(), &remaining],
                )
            }
            None => ctx.text(key::ROTATE_STATE_NO_SELECTION, &[&remaining]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use crate::tracker::{ModeTracker, Tracker};
    use serde_json::json;

    const SOLUTION: [usize; 4] = [2, 0, 3, 1];

    fn puzzle_state() -> serde_json::Value {
        json!({
            "rotate_puzzle": {
                "active": true,
                "step": 0,
                "selected": 2,
                "pieces": [
                    { "rotation": 0, "placed": false },
                    { "rotation": 1, "placed": false },
                    { "rotation": 3, "placed": false },
                    { "rotation": 2, "placed": false }
                ]
            }
        })
    }

    fn create_tracker(harness: &Harness) -> ModeTracker<RotatePuzzle> {
        let puzzle = RotatePuzzle::new(&EngineConfig::default());
        ModeTracker::new(puzzle, harness.context.clone())
    }

    #[test]
    fn test_rotation_tie_break() {
        assert_eq!(rotate_hint(&SOLUTION, 0, Some(2), 0), RotateHint::Combine { remaining: 4 });
        assert_eq!(
            rotate_hint(&SOLUTION, 0, Some(2), 1),
            RotateHint::RotateRight { presses: 1, remaining: 4 }
        );
        // 2 right vs 2 left: decrementing direction wins
        assert_eq!(
            rotate_hint(&SOLUTION, 0, Some(2), 2),
            RotateHint::RotateRight { presses: 2, remaining: 4 }
        );
        assert_eq!(
            rotate_hint(&SOLUTION, 0, Some(2), 3),
            RotateHint::RotateLeft { presses: 1, remaining: 4 }
        );
    }

    #[test]
    fn test_rotation_wraps_modulo_four() {
        assert_eq!(rotate_hint(&SOLUTION, 0, Some(2), 4), RotateHint::Combine { remaining: 4 });
        assert_eq!(
            rotate_hint(&SOLUTION, 0, Some(2), 7),
            RotateHint::RotateLeft { presses: 1, remaining: 4 }
        );
    }

    #[test]
    fn test_navigation_direction_from_sign() {
        assert_eq!(
            rotate_hint(&SOLUTION, 1, Some(3), 1),
            RotateHint::MoveLeft { target: 0, remaining: 3 }
        );
        assert_eq!(
            rotate_hint(&SOLUTION, 2, Some(0), 0),
            RotateHint::MoveRight { target: 3, remaining: 2 }
        );
        assert_eq!(
            rotate_hint(&SOLUTION, 3, None, 0),
            RotateHint::Select { target: 1, remaining: 1 }
        );
    }

    #[test]
    fn test_complete_when_steps_exhausted() {
        assert_eq!(rotate_hint(&SOLUTION, 4, Some(1), 2), RotateHint::Complete);
        assert_eq!(rotate_hint(&[], 0, Some(0), 0), RotateHint::Complete);
    }

    #[test]
    fn test_hint_for_rotation_three_is_left_once() {
        let harness = Harness::new(puzzle_state());
        let mut tracker = create_tracker(&harness);
        tracker.poll();

        tracker.announce_hint();
        assert_eq!(
            harness.speech.last_spoken().as_deref(),
            Some("Correct piece. Rotate left 1 times. 4 pieces remaining")
        );

        harness.probe.set("rotate_puzzle.pieces.2.rotation", json!(0));
        tracker.announce_hint();
        assert_eq!(
            harness.speech.last_spoken().as_deref(),
            Some("Correct piece at the correct angle. Press combine. 4 pieces remaining")
        );
    }

    #[test]
    fn test_hint_does_not_reveal_navigation_counts() {
        let harness = Harness::new(puzzle_state());
        harness.probe.set("rotate_puzzle.selected", json!(0));
        let mut tracker = create_tracker(&harness);
        tracker.poll();

        tracker.announce_hint();
        assert_eq!(
            harness.speech.last_spoken().as_deref(),
            Some("Move right to piece 3. 4 pieces remaining")
        );
    }

    #[test]
    fn test_state_reports_selected_piece() {
        let harness = Harness::new(puzzle_state());
        harness.probe.set("rotate_puzzle.step", json!(1));
        let mut tracker = create_tracker(&harness);
        tracker.poll();

        tracker.announce_state();
        assert_eq!(
            harness.speech.last_spoken().as_deref(),
            Some("Piece 3, not placed, rotated 270 degrees. 3 pieces remaining")
        );

        harness.probe.set("rotate_puzzle.selected", json!(null));
        tracker.announce_state();
        assert_eq!(
            harness.speech.last_spoken().as_deref(),
            Some("No piece selected. 3 pieces remaining")
        );
    }

    #[test]
    fn test_navigation_labels_pieces() {
        let harness = Harness::new(puzzle_state());
        harness.probe.set("rotate_puzzle.pieces.0.placed", json!(true));
        let mut tracker = create_tracker(&harness);
        tracker.poll();
        assert_eq!(
            harness.speech.last_spoken().as_deref(),
            Some("Rotation puzzle. 4 pieces, 4 remaining")
        );

        tracker.navigate_next();
        assert_eq!(harness.speech.last_spoken().as_deref(), Some("Piece 1, placed, 1 of 4"));
        tracker.navigate_next();
        assert_eq!(
            harness.speech.last_spoken().as_deref(),
            Some("Piece 2, rotated 90 degrees, 2 of 4")
        );
    }

    #[test]
    fn test_piece_count_follows_host() {
        let harness = Harness::new(puzzle_state());
        let mut tracker = create_tracker(&harness);
        tracker.poll();
        tracker.navigate_previous();
        assert_eq!(tracker.cursor().index(), Some(3));

        harness.probe.set(
            PIECES,
            json!([{ "rotation": 0 }, { "rotation": 0 }]),
        );
        tracker.poll();
        assert_eq!(tracker.cursor().total(), 2);
        assert_eq!(tracker.cursor().index(), Some(1));
    }
}

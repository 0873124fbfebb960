//! The one write-side capability: moving a host-visible pointer

use serde::{Deserialize, Serialize};

/// Which host pointer to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// Pen cursor of the dot-connection puzzle, in screen/world units
    DotCursor,
    /// Examination cursor, in its own camera space
    ExamCursor,
}

/// Places a host pointer; returns `false` when the host refused or the
/// pointer does not exist. Speech never depends on the result.
pub trait HostPointer {
    fn place(&self, target: PointerTarget, position: [f64; 3]) -> bool;
}


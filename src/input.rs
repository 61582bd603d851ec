//! Input model: the pointer gesture state machine.
//!
//! `InteractionMode` is the active gesture tracked between pointer-down and
//! pointer-up. Each active variant carries the anchor needed to compute
//! deltas on subsequent moves. Transitions happen only on press and
//! release; `Idle` is both the initial state and the terminal state
//! between gestures.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::region::Point;

/// The active pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionMode {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// The user is moving the existing region. The anchor is re-set to the
    /// latest pointer position after each applied move, so deltas stay
    /// incremental rather than absolute.
    Dragging {
        /// Image-space pointer position of the previous event.
        anchor: Point,
    },
    /// The user is dragging the bottom-right resize handle.
    Resizing {
        /// Image-space pointer position at gesture start.
        anchor: Point,
    },
    /// The user is dragging out a brand-new region from the press point.
    Creating {
        /// The corner the drag started from; the region is re-derived from
        /// this anchor and the live pointer on every move.
        anchor: Point,
    },
}

impl Default for InteractionMode {
    fn default() -> Self {
        Self::Idle
    }
}

impl InteractionMode {
    /// Whether a gesture is currently in progress.
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// The gesture's anchor point, if one is in progress.
    #[must_use]
    pub fn anchor(self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Dragging { anchor } | Self::Resizing { anchor } | Self::Creating { anchor } => {
                Some(anchor)
            }
        }
    }
}

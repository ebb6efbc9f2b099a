// SPDX-License-Identifier: MPL-2.0
//! Single-finger swipe classification.

use crate::domain::{SwipeThresholds, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Previous,
    Next,
    /// Upward flick that closes the viewer.
    Dismiss,
}

/// Classifies the travel between touch start and touch end.
///
/// The dismiss flick is checked first. A horizontal swipe to the right
/// (positive `dx`) goes back, to the left goes forward.
#[must_use]
pub fn classify_swipe(delta: Vector, thresholds: &SwipeThresholds) -> Option<Swipe> {
    if !delta.is_finite() {
        return None;
    }
    if delta.y < -thresholds.min_dismiss() && delta.x.abs() < thresholds.max_dismiss_horizontal() {
        return Some(Swipe::Dismiss);
    }
    if delta.x.abs() > thresholds.min_horizontal() && delta.y.abs() < thresholds.max_vertical() {
        return Some(if delta.x > 0.0 {
            Swipe::Previous
        } else {
            Swipe::Next
        });
    }
    None
}

// SPDX-License-Identifier: MPL-2.0
//! Viewer newtypes.
//!
//! This module provides type-safe wrappers for tunable viewer values,
//! ensuring they are always within valid ranges.

use crate::config::defaults::{
    DEFAULT_DISMISS_MAX_HORIZONTAL, DEFAULT_DISMISS_MIN_DISTANCE, DEFAULT_SWIPE_MAX_VERTICAL,
    DEFAULT_SWIPE_MIN_DISTANCE, DEFAULT_TRANSITION_FALLBACK_MS, DEFAULT_ZOOM_CEILING,
    DEFAULT_ZOOM_STEP, MAX_GESTURE_DISTANCE, MAX_TRANSITION_FALLBACK_MS, MAX_ZOOM_CEILING,
    MAX_ZOOM_STEP, MIN_TRANSITION_FALLBACK_MS, MIN_ZOOM_CEILING, MIN_ZOOM_STEP,
};
use std::time::Duration;

// =============================================================================
// ZoomStep
// =============================================================================

/// Zoom increment applied by zoom in/out, guaranteed to be within range.
///
/// This type ensures that zoom step values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStep(f32);

impl ZoomStep {
    /// Creates a new zoom step, clamping the value to the valid range.
    /// Non-finite input falls back to the default.
    #[must_use]
    pub fn new(step: f32) -> Self {
        if step.is_finite() {
            Self(step.clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP))
        } else {
            Self::default()
        }
    }

    /// Returns the raw step value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ZoomStep {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_STEP)
    }
}

// =============================================================================
// ZoomCeiling
// =============================================================================

/// Floor for the per-image maximum zoom level.
///
/// The effective maximum for an image is the larger of this ceiling and the
/// image's native-to-displayed pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomCeiling(f32);

impl ZoomCeiling {
    /// Creates a new ceiling, clamping the value to the valid range.
    /// Non-finite input falls back to the default.
    #[must_use]
    pub fn new(ceiling: f32) -> Self {
        if ceiling.is_finite() {
            Self(ceiling.clamp(MIN_ZOOM_CEILING, MAX_ZOOM_CEILING))
        } else {
            Self::default()
        }
    }

    /// Returns the raw ceiling value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ZoomCeiling {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_CEILING)
    }
}

// =============================================================================
// FallbackDelay
// =============================================================================

/// How long a transition race waits for the platform's transition-end
/// signal before completing on its own.
///
/// # Example
///
/// ```
/// use lens_lightbox::domain::newtypes::FallbackDelay;
///
/// let delay = FallbackDelay::from_millis(200);
/// assert_eq!(delay.as_duration().as_millis(), 200);
///
/// // Values outside range are clamped
/// assert_eq!(FallbackDelay::from_millis(0).millis(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackDelay(u32);

impl FallbackDelay {
    /// Creates a new delay, clamping to the valid range.
    #[must_use]
    pub fn from_millis(millis: u32) -> Self {
        Self(millis.clamp(MIN_TRANSITION_FALLBACK_MS, MAX_TRANSITION_FALLBACK_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn millis(self) -> u32 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

impl Default for FallbackDelay {
    fn default() -> Self {
        Self(DEFAULT_TRANSITION_FALLBACK_MS)
    }
}

// =============================================================================
// SwipeThresholds
// =============================================================================

/// Distance thresholds that classify a single-finger swipe.
///
/// A horizontal swipe navigates; an upward flick dismisses. All values are
/// in CSS pixels and clamped to `[0, MAX_GESTURE_DISTANCE]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    min_horizontal: f32,
    max_vertical: f32,
    min_dismiss: f32,
    max_dismiss_horizontal: f32,
}

impl SwipeThresholds {
    #[must_use]
    pub fn new(
        min_horizontal: f32,
        max_vertical: f32,
        min_dismiss: f32,
        max_dismiss_horizontal: f32,
    ) -> Self {
        Self {
            min_horizontal: clamp_distance(min_horizontal, DEFAULT_SWIPE_MIN_DISTANCE),
            max_vertical: clamp_distance(max_vertical, DEFAULT_SWIPE_MAX_VERTICAL),
            min_dismiss: clamp_distance(min_dismiss, DEFAULT_DISMISS_MIN_DISTANCE),
            max_dismiss_horizontal: clamp_distance(
                max_dismiss_horizontal,
                DEFAULT_DISMISS_MAX_HORIZONTAL,
            ),
        }
    }

    /// Horizontal travel a navigation swipe must exceed.
    #[must_use]
    pub fn min_horizontal(&self) -> f32 {
        self.min_horizontal
    }

    /// Vertical travel a navigation swipe must stay below.
    #[must_use]
    pub fn max_vertical(&self) -> f32 {
        self.max_vertical
    }

    /// Upward travel the dismiss flick must exceed.
    #[must_use]
    pub fn min_dismiss(&self) -> f32 {
        self.min_dismiss
    }

    /// Horizontal travel the dismiss flick must stay below.
    #[must_use]
    pub fn max_dismiss_horizontal(&self) -> f32 {
        self.max_dismiss_horizontal
    }
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            min_horizontal: DEFAULT_SWIPE_MIN_DISTANCE,
            max_vertical: DEFAULT_SWIPE_MAX_VERTICAL,
            min_dismiss: DEFAULT_DISMISS_MIN_DISTANCE,
            max_dismiss_horizontal: DEFAULT_DISMISS_MAX_HORIZONTAL,
        }
    }
}

fn clamp_distance(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, MAX_GESTURE_DISTANCE)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_step_clamps_to_valid_range() {
        assert_eq!(ZoomStep::new(0.0).value(), MIN_ZOOM_STEP);
        assert_eq!(ZoomStep::new(10.0).value(), MAX_ZOOM_STEP);
        assert_eq!(ZoomStep::new(0.5).value(), 0.5);
    }

    #[test]
    fn zoom_step_rejects_nan() {
        assert_eq!(ZoomStep::new(f32::NAN), ZoomStep::default());
    }

    #[test]
    fn zoom_ceiling_never_below_one() {
        assert_eq!(ZoomCeiling::new(0.2).value(), 1.0);
        assert_eq!(ZoomCeiling::new(100.0).value(), MAX_ZOOM_CEILING);
        assert_eq!(ZoomCeiling::default().value(), 4.0);
    }

    #[test]
    fn fallback_delay_clamps() {
        assert_eq!(FallbackDelay::from_millis(0).millis(), MIN_TRANSITION_FALLBACK_MS);
        assert_eq!(
            FallbackDelay::from_millis(60_000).millis(),
            MAX_TRANSITION_FALLBACK_MS
        );
        assert_eq!(
            FallbackDelay::default().as_duration(),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn swipe_thresholds_fall_back_on_non_finite() {
        let thresholds = SwipeThresholds::new(f32::INFINITY, -5.0, 120.0, f32::NAN);
        assert_eq!(thresholds.min_horizontal(), DEFAULT_SWIPE_MIN_DISTANCE);
        assert_eq!(thresholds.max_vertical(), 0.0);
        assert_eq!(thresholds.min_dismiss(), 120.0);
        assert_eq!(
            thresholds.max_dismiss_horizontal(),
            DEFAULT_DISMISS_MAX_HORIZONTAL
        );
    }
}

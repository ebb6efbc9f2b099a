// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the viewer. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Zoom level floor, step and ceiling bounds
//! - **Gestures**: Swipe and dismiss-flick thresholds (CSS pixels)
//! - **Transitions**: Fallback delay when a transition-end signal never fires

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Zoom level of the unzoomed image. Nothing can zoom below it.
pub const MIN_ZOOM_LEVEL: f32 = 1.0;

/// Default zoom step for zoom in/out operations (0.25×).
pub const DEFAULT_ZOOM_STEP: f32 = 0.25;

/// Minimum allowed zoom step.
pub const MIN_ZOOM_STEP: f32 = 0.05;

/// Maximum allowed zoom step.
pub const MAX_ZOOM_STEP: f32 = 1.0;

/// Default zoom ceiling. High-resolution images may zoom past it, up to
/// their native pixel density.
pub const DEFAULT_ZOOM_CEILING: f32 = 4.0;

/// Lowest configurable zoom ceiling.
pub const MIN_ZOOM_CEILING: f32 = 1.0;

/// Highest configurable zoom ceiling.
pub const MAX_ZOOM_CEILING: f32 = 16.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Minimum horizontal travel for a navigation swipe.
pub const DEFAULT_SWIPE_MIN_DISTANCE: f32 = 50.0;

/// Vertical travel a navigation swipe must stay below.
pub const DEFAULT_SWIPE_MAX_VERTICAL: f32 = 30.0;

/// Minimum upward travel for the dismiss flick.
pub const DEFAULT_DISMISS_MIN_DISTANCE: f32 = 100.0;

/// Horizontal travel the dismiss flick must stay below.
pub const DEFAULT_DISMISS_MAX_HORIZONTAL: f32 = 50.0;

/// Upper bound for any configurable gesture distance.
pub const MAX_GESTURE_DISTANCE: f32 = 1000.0;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Default fallback delay for transition races (milliseconds).
pub const DEFAULT_TRANSITION_FALLBACK_MS: u32 = 200;

/// Minimum fallback delay (one frame at 60 Hz).
pub const MIN_TRANSITION_FALLBACK_MS: u32 = 16;

/// Maximum fallback delay.
pub const MAX_TRANSITION_FALLBACK_MS: u32 = 2000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Zoom validation
    assert!(MIN_ZOOM_LEVEL == 1.0);
    assert!(MIN_ZOOM_STEP > 0.0);
    assert!(MAX_ZOOM_STEP > MIN_ZOOM_STEP);
    assert!(DEFAULT_ZOOM_STEP >= MIN_ZOOM_STEP);
    assert!(DEFAULT_ZOOM_STEP <= MAX_ZOOM_STEP);
    assert!(MIN_ZOOM_CEILING >= MIN_ZOOM_LEVEL);
    assert!(DEFAULT_ZOOM_CEILING >= MIN_ZOOM_CEILING);
    assert!(DEFAULT_ZOOM_CEILING <= MAX_ZOOM_CEILING);

    // Gesture validation: the dismiss flick must need more travel than a
    // navigation swipe so one cannot be mistaken for the other.
    assert!(DEFAULT_SWIPE_MIN_DISTANCE > 0.0);
    assert!(DEFAULT_SWIPE_MAX_VERTICAL > 0.0);
    assert!(DEFAULT_DISMISS_MIN_DISTANCE > DEFAULT_SWIPE_MIN_DISTANCE);
    assert!(DEFAULT_DISMISS_MAX_HORIZONTAL > 0.0);
    assert!(DEFAULT_DISMISS_MIN_DISTANCE <= MAX_GESTURE_DISTANCE);

    // Transition validation
    assert!(MIN_TRANSITION_FALLBACK_MS > 0);
    assert!(MAX_TRANSITION_FALLBACK_MS >= MIN_TRANSITION_FALLBACK_MS);
    assert!(DEFAULT_TRANSITION_FALLBACK_MS >= MIN_TRANSITION_FALLBACK_MS);
    assert!(DEFAULT_TRANSITION_FALLBACK_MS <= MAX_TRANSITION_FALLBACK_MS);
};

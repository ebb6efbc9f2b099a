// SPDX-License-Identifier: MPL-2.0
//! Zoom/pan sub-component: zoom level, pan offset and their bounds.
//!
//! Pan is expressed in unscaled image pixels and applied after the scale, so
//! the rendered transform is always `scale(level) translate(pan)` around the
//! center of the image.

use super::Viewer;
use crate::config::defaults::MIN_ZOOM_LEVEL;
use crate::domain::{Size, Vector, ZoomCeiling, ZoomStep};
use crate::host::Host;
use std::fmt;

/// Levels this close to 1.0 snap to it, so repeated steps cannot leave the
/// image a hair above unzoomed.
const UNZOOMED_SNAP: f32 = 1e-4;

/// Zoom/pan sub-component state.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomPan {
    level: f32,
    max_level: f32,
    ceiling: ZoomCeiling,
    step: ZoomStep,
    pan: Vector,
    natural: Option<Size>,
    displayed: Option<Size>,
    viewport: Option<Size>,
}

/// Messages for the zoom/pan sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    ZoomIn,
    ZoomOut,
    /// Back to 1.0 with no pan.
    Reset,
    SetZoom(f32),
    /// Pan relative to where the drag began; `delta` is in screen pixels.
    PanFrom { origin: Vector, delta: Vector },
    /// Unscaled image size and content area size as currently laid out.
    Layout {
        displayed: Option<Size>,
        viewport: Option<Size>,
    },
    /// Native size of the displayed image, `None` while it is loading.
    NaturalSize(Option<Size>),
}

/// Effects produced by zoom/pan changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Level, bounds or pan moved; the view must be rendered again.
    Changed,
}

/// The rendered transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub translate: Vector,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        translate: Vector::ZERO,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scale({}) translate({}px, {}px)",
            self.scale, self.translate.x, self.translate.y
        )
    }
}

impl Default for ZoomPan {
    fn default() -> Self {
        Self::new(ZoomStep::default(), ZoomCeiling::default())
    }
}

impl ZoomPan {
    #[must_use]
    pub fn new(step: ZoomStep, ceiling: ZoomCeiling) -> Self {
        Self {
            level: MIN_ZOOM_LEVEL,
            max_level: ceiling.value(),
            ceiling,
            step,
            pan: Vector::ZERO,
            natural: None,
            displayed: None,
            viewport: None,
        }
    }

    /// Handle a zoom/pan message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        let before = (self.level, self.max_level, self.pan);
        match msg {
            Message::ZoomIn => self.set_zoom(self.level + self.step.value()),
            Message::ZoomOut => self.set_zoom(self.level - self.step.value()),
            Message::Reset => {
                self.level = MIN_ZOOM_LEVEL;
                self.pan = Vector::ZERO;
            }
            Message::SetZoom(level) => self.set_zoom(level),
            Message::PanFrom { origin, delta } => {
                if origin.is_finite() && delta.is_finite() {
                    self.pan = origin + delta / self.level;
                    self.constrain_pan();
                }
            }
            Message::Layout { displayed, viewport } => {
                self.displayed = displayed;
                self.viewport = viewport;
                self.update_zoom_limits();
            }
            Message::NaturalSize(natural) => {
                self.natural = natural;
                self.update_zoom_limits();
            }
        }
        if before == (self.level, self.max_level, self.pan) {
            Effect::None
        } else {
            Effect::Changed
        }
    }

    fn set_zoom(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        let mut level = level.clamp(MIN_ZOOM_LEVEL, self.max_level);
        if level - MIN_ZOOM_LEVEL < UNZOOMED_SNAP {
            level = MIN_ZOOM_LEVEL;
        }
        self.level = level;
        self.constrain_pan();
    }

    /// Recomputes the maximum level from native vs. displayed size and pulls
    /// the current level down if it no longer fits.
    fn update_zoom_limits(&mut self) {
        self.max_level = match (self.natural, self.displayed) {
            (Some(natural), Some(displayed))
                if natural.is_measurable() && displayed.is_measurable() =>
            {
                let width_ratio = natural.width / displayed.width;
                let height_ratio = natural.height / displayed.height;
                width_ratio.max(height_ratio).max(self.ceiling.value())
            }
            _ => self.ceiling.value(),
        };
        if self.level > self.max_level {
            self.level = self.max_level;
        }
        self.constrain_pan();
    }

    /// Clamps pan into the box returned by [`Self::max_pan`].
    fn constrain_pan(&mut self) {
        self.pan = self.pan.clamp_within(self.max_pan());
    }

    /// Largest allowed pan per axis: half of what the scaled image overflows
    /// the viewport by, zero on an axis that fits or when geometry is unknown.
    #[must_use]
    pub fn max_pan(&self) -> Vector {
        if !self.is_zoomed() {
            return Vector::ZERO;
        }
        let (Some(displayed), Some(viewport)) = (self.displayed, self.viewport) else {
            return Vector::ZERO;
        };
        if !displayed.is_measurable() || !viewport.is_measurable() {
            return Vector::ZERO;
        }
        let scaled = displayed.scale(self.level);
        let overflow = |scaled: f32, viewport: f32| {
            if scaled > viewport {
                (scaled - viewport) / 2.0
            } else {
                0.0
            }
        };
        Vector::new(
            overflow(scaled.width, viewport.width),
            overflow(scaled.height, viewport.height),
        )
    }

    #[must_use]
    pub fn level(&self) -> f32 {
        self.level
    }

    #[must_use]
    pub fn max_level(&self) -> f32 {
        self.max_level
    }

    #[must_use]
    pub fn pan(&self) -> Vector {
        self.pan
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.level > MIN_ZOOM_LEVEL
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.level < self.max_level
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.is_zoomed()
    }

    /// Zoom level as a rounded percentage (1.5 → 150).
    #[must_use]
    pub fn percent(&self) -> u32 {
        // Levels are clamped to a small positive range, so the cast is lossless.
        (self.level * 100.0).round() as u32
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform {
            scale: self.level,
            translate: self.pan,
        }
    }
}

impl<H: Host> Viewer<H> {
    /// Steps the zoom level up. Returns whether anything changed.
    pub fn zoom_in(&mut self) -> bool {
        self.apply_zoom(Message::ZoomIn)
    }

    /// Steps the zoom level down. Returns whether anything changed.
    pub fn zoom_out(&mut self) -> bool {
        self.apply_zoom(Message::ZoomOut)
    }

    /// Back to 1.0 with no pan. Ends any pan in progress.
    pub fn reset_zoom(&mut self) -> bool {
        self.apply_zoom(Message::Reset)
    }

    /// Sets the zoom level, clamped to `[1.0, max]`. Non-finite input is ignored.
    pub fn set_zoom(&mut self, level: f32) -> bool {
        self.apply_zoom(Message::SetZoom(level))
    }

    fn apply_zoom(&mut self, msg: Message) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(?msg, "zoom ignored, viewer is closed");
            return false;
        };
        if !session.phase.is_open() {
            tracing::debug!(?msg, phase = ?session.phase, "zoom ignored");
            return false;
        }
        let effect = session.zoom.handle(msg);
        if !session.zoom.is_zoomed() {
            session.end_pan(&mut self.host);
        }
        if effect == Effect::Changed {
            self.render();
            true
        } else {
            false
        }
    }

    /// Re-reads layout sizes from the host and re-derives zoom bounds.
    pub(crate) fn refresh_geometry(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let effect = session.zoom.handle(Message::Layout {
            displayed: self.host.image_layout_size(),
            viewport: self.host.content_size(),
        });
        if !session.zoom.is_zoomed() {
            session.end_pan(&mut self.host);
        }
        if effect == Effect::Changed {
            self.render();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn laid_out(displayed: Size, viewport: Size) -> ZoomPan {
        let mut zoom = ZoomPan::default();
        zoom.handle(Message::Layout {
            displayed: Some(displayed),
            viewport: Some(viewport),
        });
        zoom
    }

    #[test]
    fn zoom_in_four_steps_reaches_two() {
        let mut zoom = ZoomPan::default();
        for _ in 0..4 {
            zoom.handle(Message::ZoomIn);
        }
        assert_abs_diff_eq!(zoom.level(), 2.0);
    }

    #[test]
    fn zoom_in_never_exceeds_max() {
        let mut zoom = ZoomPan::default();
        for _ in 0..40 {
            zoom.handle(Message::ZoomIn);
        }
        assert_abs_diff_eq!(zoom.level(), 4.0);
        assert!(!zoom.can_zoom_in());
        assert_eq!(zoom.handle(Message::ZoomIn), Effect::None);
    }

    #[test]
    fn zoom_out_stops_at_one() {
        let mut zoom = ZoomPan::default();
        zoom.handle(Message::ZoomIn);
        zoom.handle(Message::ZoomOut);
        assert_eq!(zoom.handle(Message::ZoomOut), Effect::None);
        assert_eq!(zoom.level(), 1.0);
        assert!(!zoom.can_zoom_out());
    }

    #[test]
    fn set_zoom_clamps_into_range() {
        let mut zoom = ZoomPan::default();
        for (requested, expected) in [(0.2, 1.0), (2.5, 2.5), (9.0, 4.0), (-3.0, 1.0)] {
            zoom.handle(Message::SetZoom(requested));
            assert_abs_diff_eq!(zoom.level(), expected);
        }
    }

    #[test]
    fn non_finite_zoom_is_ignored() {
        let mut zoom = ZoomPan::default();
        zoom.handle(Message::SetZoom(2.0));
        assert_eq!(zoom.handle(Message::SetZoom(f32::NAN)), Effect::None);
        assert_eq!(zoom.handle(Message::SetZoom(f32::INFINITY)), Effect::None);
        assert_abs_diff_eq!(zoom.level(), 2.0);
    }

    #[test]
    fn max_level_follows_native_density() {
        let mut zoom = laid_out(Size::new(500.0, 250.0), Size::new(800.0, 600.0));
        zoom.handle(Message::NaturalSize(Some(Size::new(4000.0, 1000.0))));
        assert_abs_diff_eq!(zoom.max_level(), 8.0);

        zoom.handle(Message::NaturalSize(Some(Size::new(600.0, 300.0))));
        assert_abs_diff_eq!(zoom.max_level(), 4.0);
    }

    #[test]
    fn shrinking_max_pulls_level_down() {
        let mut zoom = laid_out(Size::new(500.0, 250.0), Size::new(800.0, 600.0));
        zoom.handle(Message::NaturalSize(Some(Size::new(4000.0, 1000.0))));
        zoom.handle(Message::SetZoom(7.0));

        zoom.handle(Message::Layout {
            displayed: Some(Size::new(1000.0, 500.0)),
            viewport: Some(Size::new(1200.0, 900.0)),
        });
        assert_abs_diff_eq!(zoom.max_level(), 4.0);
        assert_abs_diff_eq!(zoom.level(), 4.0);
    }

    #[test]
    fn max_pan_is_half_the_overflow() {
        let mut zoom = laid_out(Size::new(400.0, 300.0), Size::new(500.0, 500.0));
        zoom.handle(Message::SetZoom(2.0));
        // Scaled 800x600 over 500x500.
        assert_eq!(zoom.max_pan(), Vector::new(150.0, 50.0));

        zoom.handle(Message::SetZoom(1.5));
        // Scaled 600x450: height fits.
        assert_eq!(zoom.max_pan(), Vector::new(50.0, 0.0));
    }

    #[test]
    fn unknown_geometry_gives_zero_pan_box() {
        let mut zoom = ZoomPan::default();
        zoom.handle(Message::SetZoom(3.0));
        zoom.handle(Message::PanFrom {
            origin: Vector::ZERO,
            delta: Vector::new(300.0, 300.0),
        });
        assert_eq!(zoom.pan(), Vector::ZERO);
    }

    #[test]
    fn drag_delta_is_divided_by_level_and_clamped() {
        let mut zoom = laid_out(Size::new(400.0, 300.0), Size::new(500.0, 500.0));
        zoom.handle(Message::SetZoom(2.0));

        zoom.handle(Message::PanFrom {
            origin: Vector::ZERO,
            delta: Vector::new(100.0, -40.0),
        });
        assert_eq!(zoom.pan(), Vector::new(50.0, -20.0));

        zoom.handle(Message::PanFrom {
            origin: Vector::new(50.0, -20.0),
            delta: Vector::new(1000.0, -1000.0),
        });
        assert_eq!(zoom.pan(), Vector::new(150.0, -50.0));
    }

    #[test]
    fn returning_to_one_clears_pan() {
        let mut zoom = laid_out(Size::new(400.0, 300.0), Size::new(500.0, 500.0));
        zoom.handle(Message::SetZoom(2.0));
        zoom.handle(Message::PanFrom {
            origin: Vector::ZERO,
            delta: Vector::new(100.0, 60.0),
        });
        assert!(!zoom.pan().is_zero());

        zoom.handle(Message::SetZoom(1.0));
        assert_eq!(zoom.pan(), Vector::ZERO);
    }

    #[test]
    fn zoom_out_re_clamps_pan() {
        let mut zoom = laid_out(Size::new(400.0, 300.0), Size::new(500.0, 500.0));
        zoom.handle(Message::SetZoom(2.0));
        zoom.handle(Message::PanFrom {
            origin: Vector::ZERO,
            delta: Vector::new(300.0, 100.0),
        });
        assert_eq!(zoom.pan(), Vector::new(150.0, 50.0));

        zoom.handle(Message::SetZoom(1.5));
        assert_eq!(zoom.pan(), Vector::new(50.0, 0.0));
    }

    #[test]
    fn transform_renders_scale_then_translate() {
        let mut zoom = laid_out(Size::new(400.0, 300.0), Size::new(500.0, 500.0));
        assert_eq!(zoom.transform().to_string(), "scale(1) translate(0px, 0px)");

        zoom.handle(Message::SetZoom(1.5));
        zoom.handle(Message::PanFrom {
            origin: Vector::ZERO,
            delta: Vector::new(-30.0, 0.0),
        });
        assert_eq!(zoom.transform().to_string(), "scale(1.5) translate(-20px, 0px)");
        assert_eq!(zoom.percent(), 150);
    }

    #[test]
    fn custom_step_and_ceiling() {
        let mut zoom = ZoomPan::new(ZoomStep::new(0.5), ZoomCeiling::new(2.0));
        zoom.handle(Message::ZoomIn);
        zoom.handle(Message::ZoomIn);
        zoom.handle(Message::ZoomIn);
        assert_abs_diff_eq!(zoom.level(), 2.0);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Gesture router: turns pointer and touch input into intents.
//!
//! Drag-pan only happens while zoomed, swipes only while not zoomed, so the
//! two never compete for the same touch. Per-gesture tracking is cleared when
//! the gesture ends.
//!
//! ```text
//! Viewer::handle (orchestrator)
//!     ├── GestureState::route  - pointer/touch → Intent
//!     ├── swipe                - swipe classification
//!     ├── keyboard             - Escape, arrows, Tab
//!     └── focus_trap           - Tab wrap-around
//! ```

pub mod focus_trap;
pub mod keyboard;
pub mod swipe;

pub use focus_trap::next_focus;
pub use keyboard::{map_key, resolve_escape, EscapeAction, KeyAction, KeyContext};
pub use swipe::{classify_swipe, Swipe};

use super::event::{Event, HitTarget, PointerButton};
use super::phase::PanInput;
use crate::domain::{Point, SwipeThresholds, Vector};

/// Viewer state the router depends on.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext {
    /// The overlay is open and accepting input.
    pub interactive: bool,
    pub zoomed: bool,
    /// Current pan offset, recorded as the origin of a new drag.
    pub pan: Vector,
    pub thresholds: SwipeThresholds,
}

/// What the orchestrator should do in response to a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    None,
    BeginPan(PanInput),
    /// Pan to `origin + delta / level`.
    PanTo { origin: Vector, delta: Vector },
    EndPan,
    Swipe(Swipe),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanAnchor {
    input: PanInput,
    start: Point,
    origin: Vector,
}

/// Transient per-gesture tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureState {
    pan: Option<PanAnchor>,
    swipe_start: Option<Point>,
}

impl GestureState {
    /// Routes one event. Non-gesture events yield [`Intent::None`].
    pub fn route(&mut self, event: &Event, ctx: &GestureContext) -> Intent {
        match event {
            Event::PointerDown {
                position,
                button,
                target,
            } => {
                if !ctx.interactive
                    || !ctx.zoomed
                    || *button != PointerButton::Primary
                    || *target != HitTarget::Image
                    || self.pan.is_some()
                {
                    return Intent::None;
                }
                self.begin_pan(PanInput::Pointer, *position, ctx.pan)
            }
            Event::PointerMoved(position) => self.pan_to(PanInput::Pointer, *position),
            Event::PointerUp => self.end_pan(PanInput::Pointer),
            Event::TouchStart { touches, target } => {
                if !ctx.interactive {
                    return Intent::None;
                }
                if ctx.zoomed {
                    self.swipe_start = None;
                    match touches.as_slice() {
                        [touch] if *target == HitTarget::Image && self.pan.is_none() => {
                            self.begin_pan(PanInput::Touch, *touch, ctx.pan)
                        }
                        _ => Intent::None,
                    }
                } else {
                    // A second finger cancels the swipe.
                    self.swipe_start = match touches.as_slice() {
                        [touch] => Some(*touch),
                        _ => None,
                    };
                    Intent::None
                }
            }
            Event::TouchMove { touches } => match touches.as_slice() {
                [touch] => self.pan_to(PanInput::Touch, *touch),
                _ => Intent::None,
            },
            Event::TouchEnd { changed, .. } => {
                if self.pan.is_some_and(|anchor| anchor.input == PanInput::Touch) {
                    self.swipe_start = None;
                    return self.end_pan(PanInput::Touch);
                }
                let start = self.swipe_start.take();
                if ctx.zoomed || !ctx.interactive {
                    return Intent::None;
                }
                let (Some(start), [end]) = (start, changed.as_slice()) else {
                    return Intent::None;
                };
                let delta = *end - start;
                let swipe = classify_swipe(delta, &ctx.thresholds);
                tracing::trace!(dx = delta.x, dy = delta.y, ?swipe, "swipe classified");
                swipe.map_or(Intent::None, Intent::Swipe)
            }
            _ => Intent::None,
        }
    }

    fn begin_pan(&mut self, input: PanInput, start: Point, origin: Vector) -> Intent {
        self.pan = Some(PanAnchor {
            input,
            start,
            origin,
        });
        Intent::BeginPan(input)
    }

    fn pan_to(&self, input: PanInput, position: Point) -> Intent {
        match self.pan {
            Some(anchor) if anchor.input == input => Intent::PanTo {
                origin: anchor.origin,
                delta: position - anchor.start,
            },
            _ => Intent::None,
        }
    }

    fn end_pan(&mut self, input: PanInput) -> Intent {
        match self.pan {
            Some(anchor) if anchor.input == input => {
                self.pan = None;
                Intent::EndPan
            }
            _ => Intent::None,
        }
    }

    #[must_use]
    pub fn is_tracking_pan(&self) -> bool {
        self.pan.is_some()
    }

    /// Forgets any gesture in progress.
    pub fn cancel(&mut self) {
        self.pan = None;
        self.swipe_start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(zoomed: bool) -> GestureContext {
        GestureContext {
            interactive: true,
            zoomed,
            pan: Vector::new(5.0, -5.0),
            thresholds: SwipeThresholds::default(),
        }
    }

    fn touch_start(x: f32, y: f32) -> Event {
        Event::TouchStart {
            touches: vec![Point::new(x, y)],
            target: HitTarget::Image,
        }
    }

    fn touch_end(x: f32, y: f32) -> Event {
        Event::TouchEnd {
            changed: vec![Point::new(x, y)],
            remaining: 0,
        }
    }

    fn primary_down(target: HitTarget) -> Event {
        Event::PointerDown {
            position: Point::new(100.0, 100.0),
            button: PointerButton::Primary,
            target,
        }
    }

    #[test]
    fn swipe_left_navigates_next() {
        let mut state = GestureState::default();
        assert_eq!(state.route(&touch_start(200.0, 100.0), &ctx(false)), Intent::None);
        assert_eq!(
            state.route(&touch_end(120.0, 110.0), &ctx(false)),
            Intent::Swipe(Swipe::Next)
        );
    }

    #[test]
    fn flick_up_dismisses() {
        let mut state = GestureState::default();
        state.route(&touch_start(100.0, 300.0), &ctx(false));
        assert_eq!(
            state.route(&touch_end(110.0, 180.0), &ctx(false)),
            Intent::Swipe(Swipe::Dismiss)
        );
    }

    #[test]
    fn swipe_is_forgotten_after_it_ends() {
        let mut state = GestureState::default();
        state.route(&touch_start(200.0, 100.0), &ctx(false));
        state.route(&touch_end(190.0, 100.0), &ctx(false));
        assert_eq!(state.route(&touch_end(0.0, 100.0), &ctx(false)), Intent::None);
    }

    #[test]
    fn two_finger_start_cancels_swipe() {
        let mut state = GestureState::default();
        state.route(&touch_start(200.0, 100.0), &ctx(false));
        state.route(
            &Event::TouchStart {
                touches: vec![Point::new(200.0, 100.0), Point::new(250.0, 100.0)],
                target: HitTarget::Image,
            },
            &ctx(false),
        );
        assert_eq!(state.route(&touch_end(50.0, 100.0), &ctx(false)), Intent::None);
    }

    #[test]
    fn no_swipe_while_zoomed() {
        let mut state = GestureState::default();
        state.route(&touch_start(200.0, 100.0), &ctx(false));
        assert_eq!(state.route(&touch_end(50.0, 100.0), &ctx(true)), Intent::None);
    }

    #[test]
    fn pointer_pan_tracks_delta_from_press() {
        let mut state = GestureState::default();
        assert_eq!(
            state.route(&primary_down(HitTarget::Image), &ctx(true)),
            Intent::BeginPan(PanInput::Pointer)
        );
        assert_eq!(
            state.route(&Event::PointerMoved(Point::new(130.0, 80.0)), &ctx(true)),
            Intent::PanTo {
                origin: Vector::new(5.0, -5.0),
                delta: Vector::new(30.0, -20.0),
            }
        );
        assert_eq!(state.route(&Event::PointerUp, &ctx(true)), Intent::EndPan);
        assert!(!state.is_tracking_pan());
        assert_eq!(
            state.route(&Event::PointerMoved(Point::new(0.0, 0.0)), &ctx(true)),
            Intent::None
        );
    }

    #[test]
    fn pan_needs_zoom_primary_button_and_image() {
        let mut state = GestureState::default();
        assert_eq!(state.route(&primary_down(HitTarget::Image), &ctx(false)), Intent::None);
        assert_eq!(state.route(&primary_down(HitTarget::Control), &ctx(true)), Intent::None);
        let secondary = Event::PointerDown {
            position: Point::new(0.0, 0.0),
            button: PointerButton::Secondary,
            target: HitTarget::Image,
        };
        assert_eq!(state.route(&secondary, &ctx(true)), Intent::None);
    }

    #[test]
    fn touch_pan_single_finger_only() {
        let mut state = GestureState::default();
        assert_eq!(
            state.route(&touch_start(10.0, 10.0), &ctx(true)),
            Intent::BeginPan(PanInput::Touch)
        );
        let pinch = Event::TouchMove {
            touches: vec![Point::new(20.0, 20.0), Point::new(40.0, 40.0)],
        };
        assert_eq!(state.route(&pinch, &ctx(true)), Intent::None);
        assert_eq!(
            state.route(
                &Event::TouchMove {
                    touches: vec![Point::new(20.0, 40.0)]
                },
                &ctx(true)
            ),
            Intent::PanTo {
                origin: Vector::new(5.0, -5.0),
                delta: Vector::new(10.0, 30.0),
            }
        );
        assert_eq!(state.route(&touch_end(20.0, 40.0), &ctx(true)), Intent::EndPan);
    }

    #[test]
    fn multi_touch_start_does_not_pan() {
        let mut state = GestureState::default();
        let two = Event::TouchStart {
            touches: vec![Point::new(10.0, 10.0), Point::new(30.0, 30.0)],
            target: HitTarget::Image,
        };
        assert_eq!(state.route(&two, &ctx(true)), Intent::None);
    }

    #[test]
    fn pointer_up_does_not_end_touch_pan() {
        let mut state = GestureState::default();
        state.route(&touch_start(10.0, 10.0), &ctx(true));
        assert_eq!(state.route(&Event::PointerUp, &ctx(true)), Intent::None);
        assert!(state.is_tracking_pan());
    }

    #[test]
    fn nothing_routes_when_not_interactive() {
        let mut state = GestureState::default();
        let closed = GestureContext {
            interactive: false,
            ..ctx(true)
        };
        assert_eq!(state.route(&primary_down(HitTarget::Image), &closed), Intent::None);
        assert_eq!(state.route(&touch_start(0.0, 0.0), &closed), Intent::None);
    }
}

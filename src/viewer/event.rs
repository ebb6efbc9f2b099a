// SPDX-License-Identifier: MPL-2.0
//! Platform events fed into the viewer, and the viewer's answer to each.

use crate::domain::{Point, Size};
use crate::host::{Control, FrameId, TimerId, TransitionTarget};

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Tab,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    #[must_use]
    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What a pointer or touch landed on inside the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The image or its wrapper.
    Image,
    /// A button or anything inside the control bar.
    Control,
    /// Empty content area.
    Elsewhere,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    KeyDown(KeyInput),
    /// A control button was clicked or activated from the keyboard.
    Activate(Control),
    BackdropClicked,
    /// Click on the content area (only delivered while fullscreen).
    ContentClicked {
        on_control: bool,
    },
    PointerDown {
        position: Point,
        button: PointerButton,
        target: HitTarget,
    },
    PointerMoved(Point),
    PointerUp,
    TouchStart {
        touches: Vec<Point>,
        target: HitTarget,
    },
    TouchMove {
        touches: Vec<Point>,
    },
    TouchEnd {
        /// Touch points lifted by this event.
        changed: Vec<Point>,
        /// Touch points still down.
        remaining: usize,
    },
    TransitionEnded(TransitionTarget),
    TimerFired(TimerId),
    AnimationFrame(FrameId),
    ImageLoaded {
        src: String,
        natural: Size,
    },
    FullscreenChanged,
    /// An accepted fullscreen request failed later.
    FullscreenFailed(String),
    CaptionResized,
    ViewportResized,
}

impl Event {
    /// Events that stem from the user rather than the platform.
    #[must_use]
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Event::KeyDown(_)
                | Event::Activate(_)
                | Event::BackdropClicked
                | Event::ContentClicked { .. }
                | Event::PointerDown { .. }
                | Event::PointerMoved(_)
                | Event::PointerUp
                | Event::TouchStart { .. }
                | Event::TouchMove { .. }
                | Event::TouchEnd { .. }
        )
    }
}

/// How the host should treat the platform event that produced an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The viewer did nothing with it.
    Ignored,
    Handled,
    /// Handled, and the platform default action must be cancelled.
    PreventDefault,
}

impl Response {
    #[must_use]
    pub fn is_handled(self) -> bool {
        !matches!(self, Response::Ignored)
    }
}

impl From<bool> for Response {
    fn from(handled: bool) -> Self {
        if handled {
            Response::Handled
        } else {
            Response::Ignored
        }
    }
}

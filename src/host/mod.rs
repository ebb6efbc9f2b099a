// SPDX-License-Identifier: MPL-2.0
//! Host port: everything the viewer needs from the page it lives in.
//!
//! The viewer never touches a platform directly. Scroll, focus, overlay
//! rendering, geometry, fullscreen, timers, animation frames and listener
//! registration all go through [`Host`], and the platform reports back by
//! feeding [`Event`](crate::viewer::Event)s into the viewer.
//!
//! [`headless::HeadlessHost`] is an in-memory implementation.

pub mod headless;

use crate::domain::Size;
use crate::error::FullscreenError;
use crate::viewer::OverlayView;
use std::time::Duration;

pub use headless::HeadlessHost;

/// An element of the surrounding page (e.g. whatever had focus before open).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Handle for a pending timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Handle for a pending animation frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Buttons in the overlay's control bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Previous,
    Next,
    ZoomOut,
    ZoomIn,
    ResetZoom,
    Fullscreen,
    Close,
}

impl Control {
    /// Document order of the control bar.
    pub const ALL: [Control; 7] = [
        Control::Previous,
        Control::Next,
        Control::ZoomOut,
        Control::ZoomIn,
        Control::ResetZoom,
        Control::Fullscreen,
        Control::Close,
    ];
}

/// What the viewer may ask the host to focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Control(Control),
    /// The displayed image.
    Image,
    /// The dialog element itself.
    Overlay,
    /// An element outside the overlay.
    Element(ElementId),
}

/// Elements that run a CSS transition the viewer waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionTarget {
    /// The dialog fading out on close.
    Overlay,
    /// The image fading during a swap.
    Image,
}

/// Listener slots the viewer registers and releases.
///
/// Each slot is registered at most once at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    DocumentKeydown,
    FullscreenChange,
    /// Focus trap on the dialog.
    OverlayKeydown,
    BackdropClick,
    ContentPointerDown,
    /// Registered only while a pointer pan is in progress.
    DocumentPointerMove,
    /// Registered only while a pointer pan is in progress.
    DocumentPointerUp,
    ContentTouchStart,
    ContentTouchEnd,
    /// Registered only while a touch pan is in progress.
    DocumentTouchMove,
    /// Registered only while a touch pan is in progress.
    DocumentTouchEnd,
    /// Resize observer on the caption region.
    CaptionResize,
    /// Registered only while fullscreen.
    FullscreenContentClick,
    TransitionEnd(TransitionTarget),
    ViewportResize,
}

/// Port the viewer drives the page through.
pub trait Host {
    // Scroll

    fn scroll_offset(&self) -> f32;
    /// Fixes the page in place at `offset` so it cannot scroll underneath.
    fn pin_page(&mut self, offset: f32);
    fn unpin_page(&mut self);
    fn scroll_to(&mut self, offset: f32);

    // Focus

    fn active_element(&self) -> Option<ElementId>;
    /// The overlay control holding focus, if any.
    fn focused_control(&self) -> Option<Control>;
    /// Returns false when the target does not exist.
    fn focus(&mut self, target: FocusTarget) -> bool;

    // Overlay

    fn mount_overlay(&mut self, view: &OverlayView);
    fn render(&mut self, view: &OverlayView);
    /// Returns false when nothing was mounted.
    fn unmount_overlay(&mut self) -> bool;

    // Geometry

    /// Size of the content area the image is laid out in.
    fn content_size(&self) -> Option<Size>;
    /// Laid-out image size before the zoom transform.
    fn image_layout_size(&self) -> Option<Size>;
    fn caption_height(&self) -> Option<f32>;

    // Fullscreen

    fn fullscreen_supported(&self) -> bool;
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<(), FullscreenError>;
    fn exit_fullscreen(&mut self);

    // Scheduling

    fn set_timeout(&mut self, delay: Duration) -> TimerId;
    fn clear_timeout(&mut self, id: TimerId);
    fn request_animation_frame(&mut self) -> FrameId;
    fn cancel_animation_frame(&mut self, id: FrameId);

    // Listeners

    fn add_listener(&mut self, listener: Listener) -> ListenerId;
    /// Returns false when the id was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

// SPDX-License-Identifier: MPL-2.0
//! In-memory [`Host`] with a virtual clock.
//!
//! Useful for embedding the viewer where no real page exists, and for
//! driving it deterministically: frames and timers only run when
//! [`Viewer::pump`] or [`Viewer::advance_time`] says so.

use super::{
    Control, ElementId, FocusTarget, FrameId, Host, Listener, ListenerId, TimerId,
};
use crate::domain::Size;
use crate::error::FullscreenError;
use crate::viewer::{Event, OverlayView, Viewer};
use std::collections::VecDeque;
use std::time::Duration;

/// Upper bound on pump rounds; frames that keep rescheduling stop here.
const MAX_PUMP_ROUNDS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FullscreenPolicy {
    Allow,
    Deny(String),
    /// Accept the request, then report failure asynchronously.
    FailLater(String),
}

#[derive(Debug, Clone)]
pub struct HeadlessHost {
    scroll_offset: f32,
    pinned_at: Option<f32>,
    focused: Option<FocusTarget>,
    overlay: Option<OverlayView>,
    mounts: usize,
    renders: usize,
    fullscreen_supported: bool,
    fullscreen: bool,
    fullscreen_policy: FullscreenPolicy,
    content_size: Option<Size>,
    image_layout_size: Option<Size>,
    caption_height: Option<f32>,
    now: Duration,
    next_id: u64,
    timers: Vec<(TimerId, Duration)>,
    frames: Vec<FrameId>,
    listeners: Vec<(ListenerId, Listener)>,
    outbox: VecDeque<Event>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self {
            scroll_offset: 0.0,
            pinned_at: None,
            focused: None,
            overlay: None,
            mounts: 0,
            renders: 0,
            fullscreen_supported: true,
            fullscreen: false,
            fullscreen_policy: FullscreenPolicy::Allow,
            content_size: None,
            image_layout_size: None,
            caption_height: None,
            now: Duration::ZERO,
            next_id: 1,
            timers: Vec::new(),
            frames: Vec::new(),
            listeners: Vec::new(),
            outbox: VecDeque::new(),
        }
    }
}

impl HeadlessHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn with_scroll_offset(mut self, offset: f32) -> Self {
        self.scroll_offset = offset;
        self
    }

    #[must_use]
    pub fn with_focused_element(mut self, element: ElementId) -> Self {
        self.focused = Some(FocusTarget::Element(element));
        self
    }

    #[must_use]
    pub fn with_content_size(mut self, size: Size) -> Self {
        self.content_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_image_layout_size(mut self, size: Size) -> Self {
        self.image_layout_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_caption_height(mut self, height: f32) -> Self {
        self.caption_height = Some(height);
        self
    }

    #[must_use]
    pub fn without_fullscreen(mut self) -> Self {
        self.fullscreen_supported = false;
        self
    }

    /// Fullscreen requests fail synchronously with `reason`.
    #[must_use]
    pub fn denying_fullscreen(mut self, reason: impl Into<String>) -> Self {
        self.fullscreen_policy = FullscreenPolicy::Deny(reason.into());
        self
    }

    /// Fullscreen requests are accepted, then fail through an event.
    #[must_use]
    pub fn failing_fullscreen_later(mut self, reason: impl Into<String>) -> Self {
        self.fullscreen_policy = FullscreenPolicy::FailLater(reason.into());
        self
    }

    // -------------------------------------------------------------------------
    // Mutators used to simulate the page
    // -------------------------------------------------------------------------

    pub fn set_content_size(&mut self, size: Option<Size>) {
        self.content_size = size;
    }

    pub fn set_image_layout_size(&mut self, size: Option<Size>) {
        self.image_layout_size = size;
    }

    pub fn set_caption_height(&mut self, height: Option<f32>) {
        self.caption_height = height;
    }

    /// Simulates the user leaving fullscreen through the platform (e.g. F11).
    pub fn leave_fullscreen_externally(&mut self) {
        self.exit_fullscreen();
    }

    /// Queues an event as if the platform had fired it.
    pub fn queue_event(&mut self, event: Event) {
        self.outbox.push_back(event);
    }

    // -------------------------------------------------------------------------
    // Inspectors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn overlay(&self) -> Option<&OverlayView> {
        self.overlay.as_ref()
    }

    #[must_use]
    pub fn mount_count(&self) -> usize {
        self.mounts
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders
    }

    #[must_use]
    pub fn pinned_at(&self) -> Option<f32> {
        self.pinned_at
    }

    #[must_use]
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focused
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn has_listener(&self, listener: Listener) -> bool {
        self.listeners.iter().any(|(_, l)| *l == listener)
    }

    // -------------------------------------------------------------------------
    // Scheduling
    // -------------------------------------------------------------------------

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drains queued animation frames in request order.
    pub fn take_frames(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.frames)
    }

    /// Drains queued platform events.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.outbox.drain(..).collect()
    }

    /// Pops the earliest timer due at or before `deadline` and moves the
    /// clock to its due time.
    fn pop_due_timer(&mut self, deadline: Duration) -> Option<TimerId> {
        let (position, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (_, due))| *due <= deadline)
            .min_by_key(|(_, (id, due))| (*due, *id))?;
        let (id, due) = self.timers.remove(position);
        self.now = self.now.max(due);
        Some(id)
    }

    fn control_present(&self, control: Control) -> bool {
        self.overlay
            .as_ref()
            .and_then(|view| view.control(control))
            .is_some_and(|c| c.visible)
    }
}

impl Host for HeadlessHost {
    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn pin_page(&mut self, offset: f32) {
        self.pinned_at = Some(offset);
    }

    fn unpin_page(&mut self) {
        self.pinned_at = None;
        // Unpinning a fixed body jumps to the top until scroll is restored.
        self.scroll_offset = 0.0;
    }

    fn scroll_to(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    fn active_element(&self) -> Option<ElementId> {
        match self.focused {
            Some(FocusTarget::Element(element)) => Some(element),
            _ => None,
        }
    }

    fn focused_control(&self) -> Option<Control> {
        match self.focused {
            Some(FocusTarget::Control(control)) if self.control_present(control) => Some(control),
            _ => None,
        }
    }

    fn focus(&mut self, target: FocusTarget) -> bool {
        let exists = match target {
            FocusTarget::Control(control) => self.control_present(control),
            FocusTarget::Image | FocusTarget::Overlay => self.overlay.is_some(),
            FocusTarget::Element(_) => true,
        };
        if exists {
            self.focused = Some(target);
        }
        exists
    }

    fn mount_overlay(&mut self, view: &OverlayView) {
        self.overlay = Some(view.clone());
        self.mounts += 1;
    }

    fn render(&mut self, view: &OverlayView) {
        if self.overlay.is_some() {
            self.overlay = Some(view.clone());
            self.renders += 1;
        }
    }

    fn unmount_overlay(&mut self) -> bool {
        if self.overlay.take().is_none() {
            return false;
        }
        if !matches!(self.focused, Some(FocusTarget::Element(_))) {
            self.focused = None;
        }
        true
    }

    fn content_size(&self) -> Option<Size> {
        self.content_size
    }

    fn image_layout_size(&self) -> Option<Size> {
        self.image_layout_size
    }

    fn caption_height(&self) -> Option<f32> {
        self.caption_height
    }

    fn fullscreen_supported(&self) -> bool {
        self.fullscreen_supported
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        if !self.fullscreen_supported {
            return Err(FullscreenError::Unsupported);
        }
        match &self.fullscreen_policy {
            FullscreenPolicy::Allow => {
                if !self.fullscreen {
                    self.fullscreen = true;
                    self.outbox.push_back(Event::FullscreenChanged);
                }
                Ok(())
            }
            FullscreenPolicy::Deny(reason) => Err(FullscreenError::Denied(reason.clone())),
            FullscreenPolicy::FailLater(reason) => {
                self.outbox
                    .push_back(Event::FullscreenFailed(reason.clone()));
                Ok(())
            }
        }
    }

    fn exit_fullscreen(&mut self) {
        if self.fullscreen {
            self.fullscreen = false;
            self.outbox.push_back(Event::FullscreenChanged);
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id());
        self.timers.push((id, self.now + delay));
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|(timer, _)| *timer != id);
    }

    fn request_animation_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id());
        self.frames.push(id);
        id
    }

    fn cancel_animation_frame(&mut self, id: FrameId) {
        self.frames.retain(|frame| *frame != id);
    }

    fn add_listener(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.push((id, listener));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }
}

impl Viewer<HeadlessHost> {
    /// Delivers queued platform events and animation frames until both
    /// queues are empty.
    pub fn pump(&mut self) {
        for _ in 0..MAX_PUMP_ROUNDS {
            let events = self.host_mut().take_events();
            let frames = self.host_mut().take_frames();
            if events.is_empty() && frames.is_empty() {
                return;
            }
            for event in events {
                self.handle(event);
            }
            for frame in frames {
                self.handle(Event::AnimationFrame(frame));
            }
        }
        tracing::debug!("pump stopped with work still queued");
    }

    /// Moves the virtual clock forward, firing due timers in order and
    /// pumping after each one.
    pub fn advance_time(&mut self, by: Duration) {
        self.pump();
        let deadline = self.host().now() + by;
        while let Some(timer) = self.host_mut().pop_due_timer(deadline) {
            self.handle(Event::TimerFired(timer));
            self.pump();
        }
        self.host_mut().now = deadline;
    }
}

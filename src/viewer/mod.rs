// SPDX-License-Identifier: MPL-2.0
//! The image viewer overlay.
//!
//! [`Viewer`] orchestrates nested sub-components that each own a slice of
//! the session state:
//!
//! ```text
//! Viewer (orchestrator)
//!     ├── lifecycle   - open, close, teardown, fullscreen
//!     ├── navigation  - index within the collection, crossfade
//!     ├── zoom        - zoom level, pan and their bounds
//!     ├── gesture     - pointer, touch and keyboard routing
//!     ├── transition  - transition-end vs. timeout races
//!     ├── listeners   - host listener bookkeeping
//!     └── view        - view model rendered by the host
//! ```
//!
//! Platform events come in through [`Viewer::handle`]. An event whose
//! listener is not currently registered is ignored, so callbacks that
//! outlive a session cannot reach the next one.

pub mod event;
pub mod gesture;
pub mod lifecycle;
pub mod listeners;
pub mod navigation;
pub mod phase;
pub mod session;
pub mod transition;
pub mod view;
pub mod zoom;

pub use event::{Event, HitTarget, Key, KeyInput, PointerButton, Response};
pub use lifecycle::OpenOutcome;
pub use navigation::Direction;
pub use phase::{Display, Interaction, PanInput, Phase};
pub use session::Session;
pub use view::{ControlView, Cursor, ImageView, OverlayView};
pub use zoom::Transform;

use crate::config::{Config, ViewerSettings};
use crate::domain::Vector;
use crate::host::{Control, FocusTarget, Host, Listener, TransitionTarget};
use crate::i18n::I18n;
use gesture::{EscapeAction, GestureContext, Intent, KeyAction, KeyContext, Swipe};
use session::FrameTask;

/// Image viewer bound to a host.
#[derive(Debug)]
pub struct Viewer<H: Host> {
    host: H,
    settings: ViewerSettings,
    i18n: I18n,
    session: Option<Session>,
}

impl<H: Host> Viewer<H> {
    #[must_use]
    pub fn new(host: H, settings: ViewerSettings, i18n: I18n) -> Self {
        Self {
            host,
            settings,
            i18n,
            session: None,
        }
    }

    /// Builds a viewer from loaded configuration, resolving the UI language
    /// from it.
    #[must_use]
    pub fn with_config(host: H, config: &Config) -> Self {
        Self::new(host, config.viewer_settings(), I18n::new(None, config))
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    #[must_use]
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether a session exists (including while opening or closing).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session
            .as_ref()
            .map_or(Phase::Closed, |session| session.phase)
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(|session| session.nav.index())
    }

    #[must_use]
    pub fn zoom_level(&self) -> Option<f32> {
        self.session.as_ref().map(|session| session.zoom.level())
    }

    #[must_use]
    pub fn max_zoom_level(&self) -> Option<f32> {
        self.session.as_ref().map(|session| session.zoom.max_level())
    }

    #[must_use]
    pub fn pan(&self) -> Option<Vector> {
        self.session.as_ref().map(|session| session.zoom.pan())
    }

    /// The view the host currently shows, rebuilt from state.
    #[must_use]
    pub fn view(&self) -> Option<OverlayView> {
        self.session
            .as_ref()
            .map(|session| OverlayView::build(session, &self.i18n))
    }

    pub(crate) fn render(&mut self) {
        if let Some(session) = &self.session {
            let view = OverlayView::build(session, &self.i18n);
            self.host.render(&view);
        }
    }

    fn listening(&self, listener: Listener) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.listeners.is_registered(listener))
    }

    /// Feeds one platform event into the viewer.
    pub fn handle(&mut self, event: Event) -> Response {
        if event.is_user_input() && self.phase().is_closing() {
            tracing::trace!(?event, "input ignored while closing");
            return Response::Ignored;
        }
        match event {
            Event::KeyDown(input) => self.on_key(input),
            Event::Activate(control) => self.activate(control).into(),
            Event::BackdropClicked => {
                if !self.listening(Listener::BackdropClick) {
                    return Response::Ignored;
                }
                self.close().into()
            }
            Event::ContentClicked { on_control } => {
                if on_control || !self.listening(Listener::FullscreenContentClick) {
                    return Response::Ignored;
                }
                self.host.exit_fullscreen();
                Response::Handled
            }
            Event::PointerDown { .. } => self.on_gesture(&event, Listener::ContentPointerDown),
            Event::PointerMoved(_) => self.on_gesture(&event, Listener::DocumentPointerMove),
            Event::PointerUp => self.on_gesture(&event, Listener::DocumentPointerUp),
            Event::TouchStart { .. } => self.on_gesture(&event, Listener::ContentTouchStart),
            Event::TouchMove { .. } => self.on_gesture(&event, Listener::DocumentTouchMove),
            Event::TouchEnd { .. } => {
                let listener = if self.listening(Listener::DocumentTouchEnd) {
                    Listener::DocumentTouchEnd
                } else {
                    Listener::ContentTouchEnd
                };
                self.on_gesture(&event, listener)
            }
            Event::TransitionEnded(target) => self.on_transition_end(target).into(),
            Event::TimerFired(timer) => self.on_timer(timer).into(),
            Event::AnimationFrame(frame) => self.on_frame(frame).into(),
            Event::ImageLoaded { src, natural } => self.on_image_loaded(&src, natural).into(),
            Event::FullscreenChanged => self.on_fullscreen_changed().into(),
            Event::FullscreenFailed(reason) => {
                if !self.is_open() {
                    return Response::Ignored;
                }
                tracing::warn!(%reason, "fullscreen request failed");
                Response::Handled
            }
            Event::CaptionResized => {
                if !self.listening(Listener::CaptionResize) {
                    return Response::Ignored;
                }
                self.measure_caption();
                Response::Handled
            }
            Event::ViewportResized => {
                if !self.listening(Listener::ViewportResize) {
                    return Response::Ignored;
                }
                self.refresh_geometry();
                Response::Handled
            }
        }
    }

    fn on_key(&mut self, input: KeyInput) -> Response {
        let listener = if input.key == Key::Tab {
            Listener::OverlayKeydown
        } else {
            Listener::DocumentKeydown
        };
        if !self.listening(listener) {
            return Response::Ignored;
        }
        let Some(session) = &self.session else {
            return Response::Ignored;
        };
        let focus_order = OverlayView::build(session, &self.i18n).focus_order();
        let ctx = KeyContext {
            revealed: session.phase.is_open(),
            collection_len: session.nav.len(),
            fullscreen: session.phase.is_fullscreen(),
            zoomed: session.zoom.is_zoomed(),
            focus_order: &focus_order,
            focused: self.host.focused_control(),
        };
        match gesture::map_key(input, &ctx) {
            KeyAction::None => Response::Ignored,
            KeyAction::Escape(action) => {
                tracing::debug!(?action, "escape");
                let handled = match action {
                    EscapeAction::ExitFullscreen => {
                        self.host.exit_fullscreen();
                        true
                    }
                    EscapeAction::ResetZoom => self.reset_zoom(),
                    EscapeAction::Close => self.close(),
                };
                handled.into()
            }
            KeyAction::Navigate(direction) => {
                self.navigate(navigation::Message::Step(direction));
                // Arrow keys never scroll the page behind the overlay.
                Response::PreventDefault
            }
            KeyAction::Focus(control) => {
                self.host.focus(FocusTarget::Control(control));
                Response::PreventDefault
            }
        }
    }

    /// Runs a control bar button.
    pub fn activate(&mut self, control: Control) -> bool {
        let actionable = self.session.as_ref().is_some_and(|session| {
            session.phase.is_open()
                && OverlayView::build(session, &self.i18n).is_actionable(control)
        });
        if !actionable {
            tracing::debug!(?control, "control not actionable");
            return false;
        }
        match control {
            Control::Previous => self.navigate_prev(),
            Control::Next => self.navigate_next(),
            Control::ZoomOut => self.zoom_out(),
            Control::ZoomIn => self.zoom_in(),
            Control::ResetZoom => self.reset_zoom(),
            Control::Fullscreen => self.toggle_fullscreen(),
            Control::Close => self.close(),
        }
    }

    fn on_gesture(&mut self, event: &Event, listener: Listener) -> Response {
        if !self.listening(listener) {
            return Response::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return Response::Ignored;
        };
        let ctx = GestureContext {
            interactive: session.phase.is_open(),
            zoomed: session.zoom.is_zoomed(),
            pan: session.zoom.pan(),
            thresholds: self.settings.swipe,
        };
        match session.gestures.route(event, &ctx) {
            Intent::None => Response::Ignored,
            Intent::BeginPan(input) => {
                if !session.begin_pan(&mut self.host, input) {
                    return Response::Ignored;
                }
                tracing::trace!(?input, "pan started");
                self.render();
                Response::PreventDefault
            }
            Intent::PanTo { origin, delta } => {
                if session.phase.is_panning() {
                    session.zoom.handle(zoom::Message::PanFrom { origin, delta });
                    self.render();
                }
                Response::PreventDefault
            }
            Intent::EndPan => {
                session.end_pan(&mut self.host);
                tracing::trace!("pan ended");
                self.render();
                Response::Handled
            }
            Intent::Swipe(swipe) => {
                let handled = match swipe {
                    Swipe::Previous => self.navigate_prev(),
                    Swipe::Next => self.navigate_next(),
                    Swipe::Dismiss => self.close(),
                };
                handled.into()
            }
        }
    }

    fn on_transition_end(&mut self, target: TransitionTarget) -> bool {
        if !self.listening(Listener::TransitionEnd(target)) {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match target {
            TransitionTarget::Overlay => {
                let settled = session.close_race.as_mut().is_some_and(|race| {
                    race.on_transition_end(&mut self.host, &mut session.listeners, target)
                });
                if settled {
                    self.teardown();
                }
                settled
            }
            TransitionTarget::Image => {
                let settled = session.image_swap.as_mut().is_some_and(|race| {
                    race.on_transition_end(&mut self.host, &mut session.listeners, target)
                });
                if settled {
                    self.finish_image_swap();
                }
                settled
            }
        }
    }

    fn on_timer(&mut self, timer: crate::host::TimerId) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if let Some(race) = session.close_race.as_mut() {
            if race.on_timer(&mut self.host, &mut session.listeners, timer) {
                self.teardown();
                return true;
            }
        }
        if let Some(race) = session.image_swap.as_mut() {
            if race.on_timer(&mut self.host, &mut session.listeners, timer) {
                self.finish_image_swap();
                return true;
            }
        }
        false
    }

    fn on_frame(&mut self, frame: crate::host::FrameId) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(task) = session.take_frame(frame) else {
            return false;
        };
        match task {
            FrameTask::Reveal => self.reveal(),
            FrameTask::MeasureCaption { frames_left } if frames_left > 0 => {
                session.schedule(
                    &mut self.host,
                    FrameTask::MeasureCaption {
                        frames_left: frames_left - 1,
                    },
                );
            }
            FrameTask::MeasureCaption { .. } => {
                if session.caption.is_some() {
                    session
                        .listeners
                        .register(&mut self.host, Listener::CaptionResize);
                }
                self.measure_caption();
            }
            FrameTask::ShowImage => {
                session.image_visible = true;
                self.refresh_geometry();
                self.render();
                self.host.focus(FocusTarget::Image);
            }
        }
        true
    }

    fn measure_caption(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.measure_caption(&self.host);
            self.render();
        }
    }

    fn on_image_loaded(&mut self, src: &str, natural: crate::domain::Size) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.displayed_image().map(|image| image.src.as_str()) != Some(src) {
            tracing::debug!(src, "stale image load ignored");
            return false;
        }
        session
            .zoom
            .handle(zoom::Message::NaturalSize(Some(natural)));
        self.refresh_geometry();
        self.render();
        true
    }
}

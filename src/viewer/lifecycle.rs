// SPDX-License-Identifier: MPL-2.0
//! Lifecycle: open, close, teardown and fullscreen.
//!
//! Open mounts the overlay hidden and reveals it on the next animation frame.
//! Close marks the overlay closing and races its fade-out against a fallback
//! timer; whichever wins runs teardown, which hands every host resource back
//! and restores scroll and focus.

use super::phase::Display;
use super::session::{FrameTask, Session};
use super::transition::TransitionRace;
use super::view::OverlayView;
use super::Viewer;
use crate::domain::Collection;
use crate::host::{Control, FocusTarget, Host, Listener, TransitionTarget};
use crate::page::{NodeId, PageSnapshot, RegionId};

/// Result of an open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// A session is already active; nothing changed.
    AlreadyOpen,
    /// The target does not qualify, or the index is out of range.
    NotViewable,
}

impl OpenOutcome {
    #[must_use]
    pub fn is_opened(self) -> bool {
        self == OpenOutcome::Opened
    }
}

/// Listeners held for the whole session.
const SESSION_LISTENERS: [Listener; 8] = [
    Listener::DocumentKeydown,
    Listener::OverlayKeydown,
    Listener::FullscreenChange,
    Listener::BackdropClick,
    Listener::ContentPointerDown,
    Listener::ContentTouchStart,
    Listener::ContentTouchEnd,
    Listener::ViewportResize,
];

impl<H: Host> Viewer<H> {
    /// Click entry point: opens on `node` if it qualifies as a viewer image
    /// inside `boundary`.
    pub fn handle_click(
        &mut self,
        page: &PageSnapshot,
        boundary: Option<RegionId>,
        node: NodeId,
    ) -> OpenOutcome {
        if !page.is_viewer_image(node, boundary) {
            tracing::debug!(?node, "click target is not a viewer image");
            return OpenOutcome::NotViewable;
        }
        self.open(page, node)
    }

    /// Opens on `node`, collecting every qualifying image that shares its
    /// content region.
    pub fn open(&mut self, page: &PageSnapshot, node: NodeId) -> OpenOutcome {
        if self.session.is_some() {
            tracing::debug!("open ignored, viewer already active");
            return OpenOutcome::AlreadyOpen;
        }
        let Some((collection, index)) = page.find_collection(node) else {
            tracing::debug!(?node, "no collection for node");
            return OpenOutcome::NotViewable;
        };
        self.open_collection(collection, index)
    }

    /// Opens on image `index` of a collection the caller already built.
    pub fn open_collection(&mut self, collection: Collection, index: usize) -> OpenOutcome {
        if self.session.is_some() {
            tracing::debug!("open ignored, viewer already active");
            return OpenOutcome::AlreadyOpen;
        }
        if index >= collection.len() {
            tracing::debug!(index, len = collection.len(), "open index out of range");
            return OpenOutcome::NotViewable;
        }

        let previous_focus = self.host.active_element();
        let scroll_offset = self.host.scroll_offset();
        self.host.pin_page(scroll_offset);

        let len = collection.len();
        let mut session = Session::new(
            collection,
            index,
            &self.settings,
            scroll_offset,
            previous_focus,
            self.host.fullscreen_supported(),
        );
        for listener in SESSION_LISTENERS {
            session.listeners.register(&mut self.host, listener);
        }
        let view = OverlayView::build(&session, &self.i18n);
        self.host.mount_overlay(&view);
        session.schedule(&mut self.host, FrameTask::Reveal);
        // Layout settles over two frames after mount before the caption has
        // its final height.
        session.schedule(&mut self.host, FrameTask::MeasureCaption { frames_left: 1 });
        self.session = Some(session);
        self.refresh_geometry();

        tracing::info!(index, len, "viewer opened");
        OpenOutcome::Opened
    }

    /// Unhides the overlay and moves focus into it.
    pub(crate) fn reveal(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.phase.shown() {
            return;
        }
        self.render();
        if !self.host.focus(FocusTarget::Control(Control::Close)) {
            self.host.focus(FocusTarget::Overlay);
        }
    }

    /// Starts closing. Returns false when there is nothing to close or a
    /// close is already running.
    pub fn close(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("close ignored, viewer is closed");
            return false;
        };
        if session.phase.is_closing() {
            tracing::debug!("close ignored, already closing");
            return false;
        }
        session.end_pan(&mut self.host);
        session.phase.begin_closing();
        session.close_race = Some(TransitionRace::start(
            &mut self.host,
            &mut session.listeners,
            TransitionTarget::Overlay,
            self.settings.transition_fallback,
        ));
        self.render();
        true
    }

    /// Tears the session down right away, skipping the fade-out.
    pub fn dispose(&mut self) {
        self.teardown();
    }

    pub(crate) fn teardown(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.release(&mut self.host);
        if self.host.is_fullscreen() {
            self.host.exit_fullscreen();
        }
        self.host.unmount_overlay();
        self.host.unpin_page();
        self.host.scroll_to(session.scroll_offset);
        if let Some(element) = session.previous_focus {
            self.host.focus(FocusTarget::Element(element));
        }
        tracing::info!(index = session.nav.index(), "viewer closed");
    }

    /// Enters or leaves fullscreen. The phase follows the host's
    /// [`Event::FullscreenChanged`](super::Event::FullscreenChanged), not this
    /// call.
    pub fn toggle_fullscreen(&mut self) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if !session.phase.is_open() || !session.fullscreen_supported {
            tracing::debug!(phase = ?session.phase, "fullscreen toggle ignored");
            return false;
        }
        if self.host.is_fullscreen() {
            self.host.exit_fullscreen();
            return true;
        }
        match self.host.request_fullscreen() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "fullscreen request rejected");
                false
            }
        }
    }

    pub(crate) fn on_fullscreen_changed(&mut self) -> bool {
        if !self.listening(Listener::FullscreenChange) {
            return false;
        }
        let fullscreen = self.host.is_fullscreen();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let display = if fullscreen {
            Display::Fullscreen
        } else {
            Display::Windowed
        };
        if !session.phase.set_display(display) {
            return false;
        }
        if fullscreen {
            session
                .listeners
                .register(&mut self.host, Listener::FullscreenContentClick);
        } else {
            session
                .listeners
                .unregister(&mut self.host, Listener::FullscreenContentClick);
        }
        tracing::debug!(fullscreen, "fullscreen changed");
        self.refresh_geometry();
        self.render();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ViewerSettings};
    use crate::domain::ImageRef;
    use crate::host::{ElementId, HeadlessHost};
    use crate::i18n::I18n;
    use crate::test_utils::init_tracing;
    use crate::viewer::Phase;
    use std::time::Duration;

    fn viewer(host: HeadlessHost) -> Viewer<HeadlessHost> {
        Viewer::new(
            host,
            ViewerSettings::default(),
            I18n::new(Some("en-US".to_string()), &Config::default()),
        )
    }

    fn pair() -> Collection {
        Collection::new(vec![ImageRef::new("a.png", ""), ImageRef::new("b.png", "")])
            .expect("non-empty")
    }

    #[test]
    fn open_mounts_hidden_then_reveals() {
        let mut viewer = viewer(HeadlessHost::new());
        assert_eq!(viewer.open_collection(pair(), 0), OpenOutcome::Opened);
        assert_eq!(viewer.phase(), Phase::Opening);
        assert!(viewer.host().overlay().is_some_and(|view| view.hidden));

        viewer.pump();
        assert!(viewer.phase().is_open());
        assert!(viewer.host().overlay().is_some_and(|view| !view.hidden));
        assert_eq!(
            viewer.host().focused(),
            Some(FocusTarget::Control(Control::Close))
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut viewer = viewer(HeadlessHost::new());
        assert_eq!(viewer.open_collection(pair(), 2), OpenOutcome::NotViewable);
        assert!(!viewer.is_open());
        assert_eq!(viewer.host().pinned_at(), None);
    }

    #[test]
    fn close_during_opening_still_tears_down() {
        let mut viewer = viewer(HeadlessHost::new().with_focused_element(ElementId(9)));
        viewer.open_collection(pair(), 0);
        assert!(viewer.close());
        viewer.advance_time(Duration::from_millis(250));
        assert!(!viewer.is_open());
        assert_eq!(viewer.host().pending_frames(), 0);
        assert_eq!(viewer.host().focused(), Some(FocusTarget::Element(ElementId(9))));
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut viewer = viewer(HeadlessHost::new());
        viewer.open_collection(pair(), 1);
        viewer.pump();
        viewer.dispose();
        viewer.dispose();
        assert!(!viewer.is_open());
        assert_eq!(viewer.host().listener_count(), 0);
        assert_eq!(viewer.host().mount_count(), 1);
    }

    #[test]
    fn toggle_fullscreen_needs_support() {
        init_tracing();
        let mut viewer = viewer(HeadlessHost::new().without_fullscreen());
        viewer.open_collection(pair(), 0);
        viewer.pump();
        assert!(!viewer.toggle_fullscreen());
        assert!(!viewer.phase().is_fullscreen());
    }

    #[test]
    fn fullscreen_registers_content_click_while_active() {
        init_tracing();
        let mut viewer = viewer(HeadlessHost::new());
        viewer.open_collection(pair(), 0);
        viewer.pump();

        assert!(viewer.toggle_fullscreen());
        viewer.pump();
        assert!(viewer.phase().is_fullscreen());
        assert!(viewer.host().has_listener(Listener::FullscreenContentClick));

        assert!(viewer.toggle_fullscreen());
        viewer.pump();
        assert!(!viewer.phase().is_fullscreen());
        assert!(!viewer.host().has_listener(Listener::FullscreenContentClick));
    }
}

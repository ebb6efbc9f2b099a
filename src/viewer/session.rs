// SPDX-License-Identifier: MPL-2.0
//! State of one open viewer.
//!
//! A `Session` exists from `open` until teardown and owns every resource the
//! viewer acquired from the host: listeners, timers (through transition
//! races) and animation frames. Dropping it without teardown would leak them,
//! so only the lifecycle code creates and destroys it.

use super::gesture::GestureState;
use super::listeners::ListenerRegistry;
use super::navigation::Navigator;
use super::phase::{PanInput, Phase};
use super::transition::TransitionRace;
use super::zoom::{self, ZoomPan};
use crate::config::ViewerSettings;
use crate::domain::{CaptionHtml, Collection, ImageRef};
use crate::host::{ElementId, FrameId, Host, Listener, TransitionTarget};

/// Work deferred to the next animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// Unhide the overlay and move focus into it.
    Reveal,
    /// Measure the caption after `frames_left` more frames.
    MeasureCaption { frames_left: u8 },
    /// Fade the freshly swapped image back in.
    ShowImage,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub collection: Collection,
    pub nav: Navigator,
    /// Index whose source is on screen; lags `nav` during a crossfade.
    pub displayed: usize,
    pub image_visible: bool,
    pub phase: Phase,
    pub zoom: ZoomPan,
    pub gestures: GestureState,
    pub listeners: ListenerRegistry,
    pub caption: Option<CaptionHtml>,
    pub caption_height: f32,
    pub scroll_offset: f32,
    pub previous_focus: Option<ElementId>,
    pub image_swap: Option<TransitionRace>,
    pub close_race: Option<TransitionRace>,
    pub frames: Vec<(FrameId, FrameTask)>,
    pub fullscreen_supported: bool,
}

impl Session {
    /// Builds a session in `Opening`. `index` must be in range.
    #[must_use]
    pub fn new(
        collection: Collection,
        index: usize,
        settings: &ViewerSettings,
        scroll_offset: f32,
        previous_focus: Option<ElementId>,
        fullscreen_supported: bool,
    ) -> Self {
        let caption = collection.get(index).and_then(ImageRef::display_caption);
        let nav = Navigator::new(index, collection.len());
        let mut phase = Phase::Closed;
        phase.begin_opening();
        Self {
            collection,
            nav,
            displayed: index,
            image_visible: true,
            phase,
            zoom: ZoomPan::new(settings.zoom_step, settings.zoom_ceiling),
            gestures: GestureState::default(),
            listeners: ListenerRegistry::default(),
            caption,
            caption_height: 0.0,
            scroll_offset,
            previous_focus,
            image_swap: None,
            close_race: None,
            frames: Vec::new(),
            fullscreen_supported,
        }
    }

    /// The image whose source is on screen.
    #[must_use]
    pub fn displayed_image(&self) -> Option<&ImageRef> {
        self.collection.get(self.displayed)
    }

    pub fn schedule<H: Host>(&mut self, host: &mut H, task: FrameTask) -> FrameId {
        let id = host.request_animation_frame();
        self.frames.push((id, task));
        id
    }

    /// Removes and returns the task queued under `id`.
    pub fn take_frame(&mut self, id: FrameId) -> Option<FrameTask> {
        let position = self.frames.iter().position(|(frame, _)| *frame == id)?;
        Some(self.frames.remove(position).1)
    }

    fn cancel_frames<H: Host>(&mut self, host: &mut H, task: FrameTask) {
        self.frames.retain(|(frame, queued)| {
            if *queued == task {
                host.cancel_animation_frame(*frame);
                false
            } else {
                true
            }
        });
    }

    /// Ends a pan if one is running and releases its document listeners.
    pub fn end_pan<H: Host>(&mut self, host: &mut H) -> Option<PanInput> {
        self.gestures.cancel();
        let input = self.phase.end_pan()?;
        for listener in pan_listeners(input) {
            self.listeners.unregister(host, listener);
        }
        Some(input)
    }

    /// Starts a pan and registers its document listeners.
    pub fn begin_pan<H: Host>(&mut self, host: &mut H, input: PanInput) -> bool {
        if !self.phase.begin_pan(input, self.zoom.is_zoomed()) {
            self.gestures.cancel();
            return false;
        }
        for listener in pan_listeners(input) {
            self.listeners.register(host, listener);
        }
        true
    }

    /// Replaces the caption for the image at `nav.index()`.
    pub fn update_caption<H: Host>(&mut self, host: &mut H) {
        self.caption = self
            .collection
            .get(self.nav.index())
            .and_then(ImageRef::display_caption);
        if self.caption.is_some() {
            self.listeners.register(host, Listener::CaptionResize);
            self.schedule(host, FrameTask::MeasureCaption { frames_left: 0 });
        } else {
            self.listeners.unregister(host, Listener::CaptionResize);
            self.caption_height = 0.0;
        }
    }

    /// Reads the caption height from the host; zero without a caption.
    pub fn measure_caption<H: Host>(&mut self, host: &H) {
        self.caption_height = if self.caption.is_some() {
            host.caption_height()
                .filter(|height| height.is_finite() && *height >= 0.0)
                .unwrap_or(0.0)
        } else {
            0.0
        };
    }

    /// Hides the image and races its fade-out. Supersedes a pending swap.
    pub fn begin_swap<H: Host>(&mut self, host: &mut H, settings: &ViewerSettings) {
        if let Some(mut race) = self.image_swap.take() {
            race.cancel(host, &mut self.listeners);
        }
        self.cancel_frames(host, FrameTask::ShowImage);
        self.update_caption(host);
        self.end_pan(host);
        self.zoom.handle(zoom::Message::Reset);
        self.image_visible = false;
        self.image_swap = Some(TransitionRace::start(
            host,
            &mut self.listeners,
            TransitionTarget::Image,
            settings.transition_fallback,
        ));
    }

    /// Swaps in the new source once the fade-out settled.
    pub fn finish_swap<H: Host>(&mut self, host: &mut H) {
        self.image_swap = None;
        self.displayed = self.nav.index();
        self.zoom.handle(zoom::Message::NaturalSize(None));
        self.schedule(host, FrameTask::ShowImage);
    }

    /// Releases every host resource the session holds.
    pub fn release<H: Host>(&mut self, host: &mut H) {
        for mut race in [self.image_swap.take(), self.close_race.take()]
            .into_iter()
            .flatten()
        {
            race.cancel(host, &mut self.listeners);
        }
        for (frame, _) in self.frames.drain(..) {
            host.cancel_animation_frame(frame);
        }
        self.gestures.cancel();
        self.listeners.clear(host);
        self.phase.closed();
    }
}

fn pan_listeners(input: PanInput) -> [Listener; 2] {
    match input {
        PanInput::Pointer => [Listener::DocumentPointerMove, Listener::DocumentPointerUp],
        PanInput::Touch => [Listener::DocumentTouchMove, Listener::DocumentTouchEnd],
    }
}

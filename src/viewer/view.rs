// SPDX-License-Identifier: MPL-2.0
//! View model handed to the host for rendering.
//!
//! [`OverlayView`] is a plain snapshot: the host maps it onto whatever it
//! renders with and never needs to look at viewer state directly.

use super::session::Session;
use super::zoom::Transform;
use crate::domain::CaptionHtml;
use crate::host::Control;
use crate::i18n::I18n;

/// Cursor over the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// One button of the control bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub control: Control,
    /// Accessible label.
    pub label: String,
    /// `false` means hidden (`display: none`), e.g. "previous" on the first image.
    pub visible: bool,
    pub enabled: bool,
    /// In the tab order.
    pub focusable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
    /// Fully opaque; false while crossfading.
    pub visible: bool,
    pub transform: Transform,
    /// Whether transform changes animate; off while dragging.
    pub animate: bool,
    pub cursor: Cursor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    /// Hidden from assistive tech (`aria-hidden`).
    pub hidden: bool,
    pub closing: bool,
    pub aria_label: String,
    /// "2/5"; only for collections of more than one image.
    pub pagination: Option<String>,
    /// "150%"; only while zoomed.
    pub zoom_readout: Option<String>,
    /// Controls present in the bar, in document order.
    pub controls: Vec<ControlView>,
    pub image: ImageView,
    pub caption: Option<CaptionHtml>,
    pub caption_height: f32,
    pub fullscreen: bool,
}

impl OverlayView {
    /// Builds the view for `session`, labelled through `i18n`.
    #[must_use]
    pub fn build(session: &Session, i18n: &I18n) -> Self {
        let nav = &session.nav;
        let zoom = &session.zoom;
        let multiple = nav.len() > 1;
        let fullscreen = session.phase.is_fullscreen();
        let panning = session.phase.is_panning();

        let aria_label = if multiple {
            i18n.tr_args(
                "viewer-dialog-label-position",
                &[
                    ("current", nav.position().into()),
                    ("total", nav.len().into()),
                ],
            )
        } else {
            i18n.tr("viewer-dialog-label")
        };

        let mut controls = Vec::with_capacity(Control::ALL.len());
        if multiple {
            controls.push(ControlView {
                control: Control::Previous,
                label: i18n.tr("viewer-prev"),
                visible: nav.has_previous(),
                enabled: true,
                focusable: true,
            });
            controls.push(ControlView {
                control: Control::Next,
                label: i18n.tr("viewer-next"),
                visible: nav.has_next(),
                enabled: true,
                focusable: true,
            });
        }
        controls.push(ControlView {
            control: Control::ZoomOut,
            label: i18n.tr(if zoom.can_zoom_out() {
                "viewer-zoom-out"
            } else {
                "viewer-zoom-out-at-min"
            }),
            visible: true,
            enabled: zoom.can_zoom_out(),
            focusable: true,
        });
        controls.push(ControlView {
            control: Control::ZoomIn,
            label: i18n.tr(if zoom.can_zoom_in() {
                "viewer-zoom-in"
            } else {
                "viewer-zoom-in-at-max"
            }),
            visible: true,
            enabled: zoom.can_zoom_in(),
            focusable: true,
        });
        controls.push(ControlView {
            control: Control::ResetZoom,
            label: i18n.tr(if zoom.is_zoomed() {
                "viewer-zoom-reset"
            } else {
                "viewer-zoom-reset-at-min"
            }),
            visible: true,
            enabled: zoom.is_zoomed(),
            focusable: zoom.is_zoomed(),
        });
        if session.fullscreen_supported {
            controls.push(ControlView {
                control: Control::Fullscreen,
                label: i18n.tr(if fullscreen {
                    "viewer-fullscreen-exit"
                } else {
                    "viewer-fullscreen-enter"
                }),
                visible: true,
                enabled: true,
                focusable: true,
            });
        }
        controls.push(ControlView {
            control: Control::Close,
            label: i18n.tr("viewer-close"),
            visible: true,
            enabled: true,
            focusable: true,
        });

        let (src, alt) = session
            .displayed_image()
            .map(|image| (image.src.clone(), image.alt.clone()))
            .unwrap_or_default();
        let cursor = if panning {
            Cursor::Grabbing
        } else if zoom.is_zoomed() {
            Cursor::Grab
        } else {
            Cursor::Default
        };

        Self {
            hidden: !session.phase.is_open(),
            closing: session.phase.is_closing(),
            aria_label,
            pagination: multiple.then(|| nav.pagination()),
            zoom_readout: zoom.is_zoomed().then(|| format!("{}%", zoom.percent())),
            controls,
            image: ImageView {
                src,
                alt,
                visible: session.image_visible,
                transform: zoom.transform(),
                animate: !panning,
                cursor,
            },
            caption: session.caption.clone(),
            caption_height: session.caption_height,
            fullscreen,
        }
    }

    #[must_use]
    pub fn control(&self, control: Control) -> Option<&ControlView> {
        self.controls.iter().find(|view| view.control == control)
    }

    /// Whether `control` is present, shown and clickable.
    #[must_use]
    pub fn is_actionable(&self, control: Control) -> bool {
        self.control(control)
            .is_some_and(|view| view.visible && view.enabled)
    }

    /// Controls reachable with Tab, in document order.
    #[must_use]
    pub fn focus_order(&self) -> Vec<Control> {
        self.controls
            .iter()
            .filter(|view| view.visible && view.enabled && view.focusable)
            .map(|view| view.control)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ViewerSettings};
    use crate::domain::{Collection, ImageRef};
    use crate::viewer::zoom::Message as ZoomMessage;

    fn i18n() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    fn session(len: usize, index: usize) -> Session {
        let images = (0..len)
            .map(|i| ImageRef::new(format!("{i}.png"), format!("Image {i}")))
            .collect();
        let collection = Collection::new(images).expect("non-empty");
        let mut session = Session::new(collection, index, &ViewerSettings::default(), 0.0, None, true);
        session.phase.shown();
        session
    }

    #[test]
    fn middle_image_shows_both_arrows_and_position() {
        let view = OverlayView::build(&session(3, 1), &i18n());
        assert_eq!(view.aria_label, "Image viewer (2 of 3)");
        assert_eq!(view.pagination.as_deref(), Some("2/3"));
        assert!(view.control(Control::Previous).is_some_and(|c| c.visible));
        assert!(view.control(Control::Next).is_some_and(|c| c.visible));
    }

    #[test]
    fn first_image_hides_previous() {
        let view = OverlayView::build(&session(3, 0), &i18n());
        assert!(!view.is_actionable(Control::Previous));
        assert!(view.is_actionable(Control::Next));
    }

    #[test]
    fn single_image_has_no_navigation_or_pagination() {
        let view = OverlayView::build(&session(1, 0), &i18n());
        assert_eq!(view.aria_label, "Image viewer");
        assert!(view.pagination.is_none());
        assert!(view.control(Control::Previous).is_none());
        assert!(view.control(Control::Next).is_none());
    }

    #[test]
    fn unzoomed_controls_reflect_minimum() {
        let view = OverlayView::build(&session(1, 0), &i18n());
        let zoom_out = view.control(Control::ZoomOut).expect("zoom out present");
        assert!(!zoom_out.enabled);
        assert_eq!(zoom_out.label, "Zoom out (at minimum)");
        let reset = view.control(Control::ResetZoom).expect("reset present");
        assert!(!reset.enabled && !reset.focusable);
        assert_eq!(reset.label, "Reset zoom (at minimum)");
        assert!(view.zoom_readout.is_none());
        assert_eq!(view.image.cursor, Cursor::Default);
    }

    #[test]
    fn maxed_zoom_disables_zoom_in() {
        let mut session = session(1, 0);
        session.zoom.handle(ZoomMessage::SetZoom(100.0));
        let view = OverlayView::build(&session, &i18n());
        let zoom_in = view.control(Control::ZoomIn).expect("zoom in present");
        assert!(!zoom_in.enabled);
        assert_eq!(zoom_in.label, "Zoom in (at maximum)");
        assert_eq!(view.zoom_readout.as_deref(), Some("400%"));
        assert_eq!(view.image.cursor, Cursor::Grab);
        assert_eq!(
            view.focus_order(),
            vec![Control::ZoomOut, Control::ResetZoom, Control::Fullscreen, Control::Close]
        );
    }

    #[test]
    fn opening_overlay_is_hidden() {
        let collection = Collection::single(ImageRef::new("a.png", ""));
        let session = Session::new(collection, 0, &ViewerSettings::default(), 0.0, None, false);
        let view = OverlayView::build(&session, &i18n());
        assert!(view.hidden);
        assert!(view.control(Control::Fullscreen).is_none());
        assert_eq!(view.image.src, "a.png");
    }

    #[test]
    fn cursor_css_names() {
        assert_eq!(Cursor::Grabbing.as_css(), "grabbing");
        assert_eq!(Cursor::Grab.as_css(), "grab");
        assert_eq!(Cursor::Default.as_css(), "default");
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Keyboard map: Escape, arrow navigation and the Tab focus trap.

use super::focus_trap::next_focus;
use crate::host::Control;
use crate::viewer::event::{Key, KeyInput};
use crate::viewer::navigation::Direction;

/// What Escape does, most specific state first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeAction {
    ExitFullscreen,
    ResetZoom,
    Close,
}

#[must_use]
pub fn resolve_escape(fullscreen: bool, zoomed: bool) -> EscapeAction {
    if fullscreen {
        EscapeAction::ExitFullscreen
    } else if zoomed {
        EscapeAction::ResetZoom
    } else {
        EscapeAction::Close
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Escape(EscapeAction),
    Navigate(Direction),
    /// Move focus to wrap around the overlay.
    Focus(Control),
}

/// Viewer state the keyboard map depends on.
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    /// The overlay is visible (not hidden from assistive tech).
    pub revealed: bool,
    pub collection_len: usize,
    pub fullscreen: bool,
    pub zoomed: bool,
    pub focus_order: &'a [Control],
    pub focused: Option<Control>,
}

#[must_use]
pub fn map_key(input: KeyInput, ctx: &KeyContext<'_>) -> KeyAction {
    match input.key {
        Key::Escape => KeyAction::Escape(resolve_escape(ctx.fullscreen, ctx.zoomed)),
        Key::ArrowLeft | Key::ArrowRight => {
            if ctx.collection_len <= 1 || !ctx.revealed {
                return KeyAction::None;
            }
            let direction = if input.key == Key::ArrowLeft {
                Direction::Previous
            } else {
                Direction::Next
            };
            KeyAction::Navigate(direction)
        }
        Key::Tab => next_focus(ctx.focus_order, ctx.focused, input.shift)
            .map_or(KeyAction::None, KeyAction::Focus),
        Key::Other => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(collection_len: usize) -> KeyContext<'static> {
        KeyContext {
            revealed: true,
            collection_len,
            fullscreen: false,
            zoomed: false,
            focus_order: &[Control::ZoomIn, Control::Close],
            focused: Some(Control::Close),
        }
    }

    #[test]
    fn escape_prefers_fullscreen_then_zoom_then_close() {
        assert_eq!(resolve_escape(true, true), EscapeAction::ExitFullscreen);
        assert_eq!(resolve_escape(false, true), EscapeAction::ResetZoom);
        assert_eq!(resolve_escape(false, false), EscapeAction::Close);
    }

    #[test]
    fn arrows_navigate_multi_image_collections() {
        assert_eq!(
            map_key(KeyInput::new(Key::ArrowLeft), &ctx(3)),
            KeyAction::Navigate(Direction::Previous)
        );
        assert_eq!(
            map_key(KeyInput::new(Key::ArrowRight), &ctx(3)),
            KeyAction::Navigate(Direction::Next)
        );
    }

    #[test]
    fn arrows_ignored_for_single_image() {
        assert_eq!(map_key(KeyInput::new(Key::ArrowRight), &ctx(1)), KeyAction::None);
    }

    #[test]
    fn arrows_ignored_while_hidden() {
        let hidden = KeyContext {
            revealed: false,
            ..ctx(3)
        };
        assert_eq!(map_key(KeyInput::new(Key::ArrowRight), &hidden), KeyAction::None);
    }

    #[test]
    fn tab_on_last_control_wraps() {
        assert_eq!(
            map_key(KeyInput::new(Key::Tab), &ctx(1)),
            KeyAction::Focus(Control::ZoomIn)
        );
        assert_eq!(map_key(KeyInput::shifted(Key::Tab), &ctx(1)), KeyAction::None);
    }

    #[test]
    fn other_keys_do_nothing() {
        assert_eq!(map_key(KeyInput::new(Key::Other), &ctx(3)), KeyAction::None);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Navigation sub-component: position within the collection.

use super::Viewer;
use crate::host::Host;

/// Direction of a relative move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Navigation sub-component state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
    len: usize,
}

/// Messages for the navigation sub-component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Step(Direction),
    GoTo(usize),
}

/// Effects produced by navigation changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Out of range or already at the end; nothing changed.
    None,
    Moved { from: usize, to: usize },
}

impl Navigator {
    #[must_use]
    pub fn new(index: usize, len: usize) -> Self {
        Self {
            index: index.min(len.saturating_sub(1)),
            len,
        }
    }

    /// Handle a navigation message. Steps clamp at the ends; there is no
    /// wraparound.
    pub fn handle(&mut self, msg: Message) -> Effect {
        let target = match msg {
            Message::Step(Direction::Previous) => self.index.checked_sub(1),
            Message::Step(Direction::Next) => Some(self.index + 1),
            Message::GoTo(index) => Some(index),
        };
        match target {
            Some(to) if to < self.len => {
                let from = self.index;
                self.index = to;
                Effect::Moved { from, to }
            }
            _ => Effect::None,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.len
    }

    /// 1-based position, as shown to the user.
    #[must_use]
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Readout such as "2/5".
    #[must_use]
    pub fn pagination(&self) -> String {
        format!("{}/{}", self.position(), self.len)
    }
}

impl<H: Host> Viewer<H> {
    /// Shows the image at `index`. Out-of-range indices are ignored.
    pub fn navigate_to(&mut self, index: usize) -> bool {
        self.navigate(Message::GoTo(index))
    }

    /// Moves one image back; does nothing on the first image.
    pub fn navigate_prev(&mut self) -> bool {
        self.navigate(Message::Step(Direction::Previous))
    }

    /// Moves one image forward; does nothing on the last image.
    pub fn navigate_next(&mut self) -> bool {
        self.navigate(Message::Step(Direction::Next))
    }

    pub(crate) fn navigate(&mut self, msg: Message) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(?msg, "navigation ignored, viewer is closed");
            return false;
        };
        if session.phase.is_closing() {
            tracing::debug!(?msg, "navigation ignored while closing");
            return false;
        }
        let Effect::Moved { from, to } = session.nav.handle(msg) else {
            tracing::debug!(?msg, index = session.nav.index(), len = session.nav.len(), "navigation out of range");
            return false;
        };
        tracing::debug!(from, to, "navigating");
        session.begin_swap(&mut self.host, &self.settings);
        self.render();
        true
    }

    /// Completes a crossfade whose fade-out settled.
    pub(crate) fn finish_image_swap(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.finish_swap(&mut self.host);
        self.render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clamps_at_both_ends() {
        let mut nav = Navigator::new(0, 3);
        assert_eq!(nav.handle(Message::Step(Direction::Previous)), Effect::None);
        assert_eq!(
            nav.handle(Message::Step(Direction::Next)),
            Effect::Moved { from: 0, to: 1 }
        );
        nav.handle(Message::Step(Direction::Next));
        assert_eq!(nav.handle(Message::Step(Direction::Next)), Effect::None);
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let mut nav = Navigator::new(1, 3);
        assert_eq!(nav.handle(Message::GoTo(3)), Effect::None);
        assert_eq!(nav.handle(Message::GoTo(usize::MAX)), Effect::None);
        assert_eq!(nav.index(), 1);
    }

    #[test]
    fn boundaries_and_readout() {
        let nav = Navigator::new(1, 3);
        assert!(nav.has_previous());
        assert!(nav.has_next());
        assert_eq!(nav.pagination(), "2/3");

        let first = Navigator::new(0, 3);
        assert!(!first.has_previous());
        let last = Navigator::new(2, 3);
        assert!(!last.has_next());
    }

    #[test]
    fn single_image_has_no_neighbours() {
        let nav = Navigator::new(0, 1);
        assert!(!nav.has_previous());
        assert!(!nav.has_next());
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Viewer lifecycle as one explicit state.
//!
//! Panning and fullscreen are not free-standing flags: they only exist inside
//! [`Phase::Open`], so "panning while closing" cannot be represented. Every
//! change goes through a guarded transition that reports whether it applied.

/// Whether the content area is shown in a window or fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Windowed,
    Fullscreen,
}

/// Input device driving a pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanInput {
    Pointer,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Panning(PanInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No session.
    #[default]
    Closed,
    /// Overlay mounted but still hidden until the next frame.
    Opening,
    Open {
        display: Display,
        interaction: Interaction,
    },
    /// Fading out; only teardown leaves this phase.
    Closing,
}

impl Phase {
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Phase::Closed)
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Phase::Open { .. })
    }

    #[must_use]
    pub fn is_closing(self) -> bool {
        matches!(self, Phase::Closing)
    }

    #[must_use]
    pub fn is_fullscreen(self) -> bool {
        matches!(
            self,
            Phase::Open {
                display: Display::Fullscreen,
                ..
            }
        )
    }

    #[must_use]
    pub fn pan_input(self) -> Option<PanInput> {
        match self {
            Phase::Open {
                interaction: Interaction::Panning(input),
                ..
            } => Some(input),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_panning(self) -> bool {
        self.pan_input().is_some()
    }

    /// `Closed → Opening`.
    pub fn begin_opening(&mut self) -> bool {
        if *self != Phase::Closed {
            return false;
        }
        *self = Phase::Opening;
        true
    }

    /// `Opening → Open`, windowed and idle.
    pub fn shown(&mut self) -> bool {
        if *self != Phase::Opening {
            return false;
        }
        *self = Phase::Open {
            display: Display::Windowed,
            interaction: Interaction::Idle,
        };
        true
    }

    /// `Opening | Open → Closing`. Any pan is dropped.
    pub fn begin_closing(&mut self) -> bool {
        match self {
            Phase::Opening | Phase::Open { .. } => {
                *self = Phase::Closing;
                true
            }
            Phase::Closed | Phase::Closing => false,
        }
    }

    /// `Open(idle) → Open(panning)`, only while zoomed.
    pub fn begin_pan(&mut self, input: PanInput, zoomed: bool) -> bool {
        match self {
            Phase::Open { interaction, .. } if zoomed && *interaction == Interaction::Idle => {
                *interaction = Interaction::Panning(input);
                true
            }
            _ => false,
        }
    }

    /// `Open(panning) → Open(idle)`; returns the input that was panning.
    pub fn end_pan(&mut self) -> Option<PanInput> {
        match self {
            Phase::Open { interaction, .. } => match *interaction {
                Interaction::Panning(input) => {
                    *interaction = Interaction::Idle;
                    Some(input)
                }
                Interaction::Idle => None,
            },
            _ => None,
        }
    }

    /// Changes display mode while open; returns whether it changed.
    pub fn set_display(&mut self, next: Display) -> bool {
        match self {
            Phase::Open { display, .. } if *display != next => {
                *display = next;
                true
            }
            _ => false,
        }
    }

    /// Any phase → `Closed`. Reserved for teardown.
    pub fn closed(&mut self) {
        *self = Phase::Closed;
    }
}

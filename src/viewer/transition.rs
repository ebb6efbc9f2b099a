// SPDX-License-Identifier: MPL-2.0
//! "First of {transition end, timeout}" behind a one-shot latch.
//!
//! A race is started when an element begins a CSS transition. Whichever of
//! the transition-end signal or the fallback timer arrives first settles it;
//! the loser is cancelled and anything arriving afterwards is ignored.

use super::listeners::ListenerRegistry;
use crate::domain::FallbackDelay;
use crate::host::{Host, Listener, TimerId, TransitionTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRace {
    target: TransitionTarget,
    timer: Option<TimerId>,
    settled: bool,
}

impl TransitionRace {
    /// Registers the transition-end listener and arms the fallback timer.
    pub fn start<H: Host>(
        host: &mut H,
        listeners: &mut ListenerRegistry,
        target: TransitionTarget,
        fallback: FallbackDelay,
    ) -> Self {
        listeners.register(host, Listener::TransitionEnd(target));
        let timer = host.set_timeout(fallback.as_duration());
        Self {
            target,
            timer: Some(timer),
            settled: false,
        }
    }

    #[must_use]
    pub fn target(&self) -> TransitionTarget {
        self.target
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    #[must_use]
    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Returns true when this signal settles the race.
    pub fn on_transition_end<H: Host>(
        &mut self,
        host: &mut H,
        listeners: &mut ListenerRegistry,
        target: TransitionTarget,
    ) -> bool {
        if target != self.target {
            return false;
        }
        self.settle(host, listeners)
    }

    /// Returns true when this timer settles the race.
    pub fn on_timer<H: Host>(
        &mut self,
        host: &mut H,
        listeners: &mut ListenerRegistry,
        id: TimerId,
    ) -> bool {
        if !self.owns_timer(id) {
            return false;
        }
        // The timer already fired; nothing to clear.
        self.timer = None;
        self.settle(host, listeners)
    }

    /// Releases the timer and listener without running completion.
    pub fn cancel<H: Host>(&mut self, host: &mut H, listeners: &mut ListenerRegistry) {
        self.settle(host, listeners);
    }

    fn settle<H: Host>(&mut self, host: &mut H, listeners: &mut ListenerRegistry) -> bool {
        if self.settled {
            return false;
        }
        self.settled = true;
        if let Some(timer) = self.timer.take() {
            host.clear_timeout(timer);
        }
        listeners.unregister(host, Listener::TransitionEnd(self.target));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;

    fn started(host: &mut HeadlessHost, listeners: &mut ListenerRegistry) -> TransitionRace {
        TransitionRace::start(
            host,
            listeners,
            TransitionTarget::Overlay,
            FallbackDelay::default(),
        )
    }

    #[test]
    fn transition_end_wins_and_cancels_timer() {
        let mut host = HeadlessHost::new();
        let mut listeners = ListenerRegistry::default();
        let mut race = started(&mut host, &mut listeners);
        assert_eq!(host.pending_timers(), 1);
        assert!(listeners.is_registered(Listener::TransitionEnd(TransitionTarget::Overlay)));

        assert!(race.on_transition_end(&mut host, &mut listeners, TransitionTarget::Overlay));
        assert_eq!(host.pending_timers(), 0);
        assert!(listeners.is_empty());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn timeout_wins_and_later_signal_is_ignored() {
        let mut host = HeadlessHost::new();
        let mut listeners = ListenerRegistry::default();
        let mut race = started(&mut host, &mut listeners);
        let timer = race.timer.expect("timer armed");

        assert!(race.on_timer(&mut host, &mut listeners, timer));
        assert!(!race.on_transition_end(&mut host, &mut listeners, TransitionTarget::Overlay));
        assert!(!race.on_timer(&mut host, &mut listeners, timer));
        assert!(race.is_settled());
    }

    #[test]
    fn signal_for_other_target_does_not_settle() {
        let mut host = HeadlessHost::new();
        let mut listeners = ListenerRegistry::default();
        let mut race = started(&mut host, &mut listeners);

        assert!(!race.on_transition_end(&mut host, &mut listeners, TransitionTarget::Image));
        assert!(!race.is_settled());
    }

    #[test]
    fn cancel_releases_resources() {
        let mut host = HeadlessHost::new();
        let mut listeners = ListenerRegistry::default();
        let mut race = started(&mut host, &mut listeners);

        race.cancel(&mut host, &mut listeners);
        assert!(race.is_settled());
        assert_eq!(host.pending_timers(), 0);
        assert_eq!(host.listener_count(), 0);
    }
}

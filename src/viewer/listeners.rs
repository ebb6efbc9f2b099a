// SPDX-License-Identifier: MPL-2.0
//! Registration/deregistration pairs for every listener a session owns.

use crate::host::{Host, Listener, ListenerId};

/// Listeners registered by one session, keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerRegistry {
    entries: Vec<(Listener, ListenerId)>,
}

impl ListenerRegistry {
    /// Registers `listener` unless its slot is already taken.
    pub fn register<H: Host>(&mut self, host: &mut H, listener: Listener) -> ListenerId {
        if let Some(id) = self.id_of(listener) {
            return id;
        }
        let id = host.add_listener(listener);
        self.entries.push((listener, id));
        id
    }

    /// Removes `listener` if registered; returns whether it was.
    pub fn unregister<H: Host>(&mut self, host: &mut H, listener: Listener) -> bool {
        let Some(position) = self.entries.iter().position(|(l, _)| *l == listener) else {
            return false;
        };
        let (_, id) = self.entries.remove(position);
        if !host.remove_listener(id) {
            tracing::debug!(?listener, "host had already dropped listener");
        }
        true
    }

    #[must_use]
    pub fn is_registered(&self, listener: Listener) -> bool {
        self.id_of(listener).is_some()
    }

    #[must_use]
    pub fn id_of(&self, listener: Listener) -> Option<ListenerId> {
        self.entries
            .iter()
            .find(|(l, _)| *l == listener)
            .map(|(_, id)| *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every listener, newest first.
    pub fn clear<H: Host>(&mut self, host: &mut H) {
        while let Some((_, id)) = self.entries.pop() {
            host.remove_listener(id);
        }
    }
}

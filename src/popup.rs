//! Overlay coordination: at most one popup is open per registry.
//!
//! A registry is created once by the host and cloned into every widget that
//! owns a popup. Clones share the same slot.

use std::{cell::RefCell, rc::Rc};

use crate::event::{EventKind, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupId(u64);

#[derive(Debug, Default)]
struct Slot {
    next_id: u64,
    open: Option<PopupId>,
}

#[derive(Debug, Clone, Default)]
pub struct PopupRegistry {
    slot: Rc<RefCell<Slot>>,
}

impl PopupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out an id unique within this registry.
    pub fn register(&self) -> PopupId {
        let mut slot = self.slot.borrow_mut();
        let id = PopupId(slot.next_id);
        slot.next_id += 1;
        id
    }

    /// Opens `id`, returning the popup it replaced, if any.
    pub fn open(&self, id: PopupId) -> Option<PopupId> {
        let previous = self.slot.borrow_mut().open.replace(id);
        match previous {
            Some(prev) if prev != id => {
                tracing::debug!(?prev, ?id, "popup replaced");
                Some(prev)
            }
            _ => {
                tracing::trace!(?id, "popup opened");
                None
            }
        }
    }

    /// Closes whatever popup is open.
    pub fn close(&self) -> Option<PopupId> {
        let closed = self.slot.borrow_mut().open.take();
        if let Some(id) = closed {
            tracing::trace!(?id, "popup closed");
        }
        closed
    }

    /// Closes `id` only if it is the open popup; anything else is a no-op.
    pub fn close_popup(&self, id: PopupId) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.open == Some(id) {
            slot.open = None;
            tracing::trace!(?id, "popup closed");
            true
        } else {
            false
        }
    }

    pub fn is_open(&self, id: PopupId) -> bool {
        self.slot.borrow().open == Some(id)
    }

    pub fn current(&self) -> Option<PopupId> {
        self.slot.borrow().open
    }
}

/// Which interactions display and hide a popup from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupTrigger {
    pub display: EventKind,
    pub hide: EventKind,
}

impl Default for PopupTrigger {
    fn default() -> Self {
        Self {
            display: EventKind::Click,
            hide: EventKind::Click,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupTransition {
    Opened { replaced: Option<PopupId> },
    Closed,
    Unchanged,
}

/// Binds one popup to its anchor.
///
/// Events on the anchor toggle only this popup: with the default trigger a
/// second click closes it instead of reopening it. Opening from another
/// anchor closes this one through the shared registry.
#[derive(Debug, Clone)]
pub struct PopupBinder {
    id: PopupId,
    registry: PopupRegistry,
    trigger: PopupTrigger,
}

impl PopupBinder {
    pub fn new(registry: &PopupRegistry, trigger: PopupTrigger) -> Self {
        Self {
            id: registry.register(),
            registry: registry.clone(),
            trigger,
        }
    }

    pub fn id(&self) -> PopupId {
        self.id
    }

    pub fn trigger(&self) -> PopupTrigger {
        self.trigger
    }

    pub fn is_open(&self) -> bool {
        self.registry.is_open(self.id)
    }

    pub fn open(&self) -> PopupTransition {
        let replaced = self.registry.open(self.id);
        PopupTransition::Opened { replaced }
    }

    pub fn close(&self) -> PopupTransition {
        if self.registry.close_popup(self.id) {
            PopupTransition::Closed
        } else {
            PopupTransition::Unchanged
        }
    }

    /// Handles an event that reached the anchor (or bubbled up to it).
    pub fn handle_anchor_event(&self, event: &UiEvent) -> PopupTransition {
        if event.is_propagation_stopped() {
            return PopupTransition::Unchanged;
        }
        if self.is_open() {
            if event.kind() == self.trigger.hide {
                return self.close();
            }
        } else if event.kind() == self.trigger.display {
            return self.open();
        }
        PopupTransition::Unchanged
    }

    /// Handles an interaction that happened outside both anchor and popup.
    pub fn handle_outside_event(&self, event: &UiEvent) -> PopupTransition {
        if event.kind() == self.trigger.hide {
            self.close()
        } else {
            PopupTransition::Unchanged
        }
    }
}

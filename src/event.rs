/// Interaction kinds a widget can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Focus,
    Blur,
}

/// An interaction being dispatched through the widget tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiEvent {
    kind: EventKind,
    propagation_stopped: bool,
}

impl UiEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            propagation_stopped: false,
        }
    }

    pub fn click() -> Self {
        Self::new(EventKind::Click)
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Handlers further up the tree (popup anchors included) ignore the event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

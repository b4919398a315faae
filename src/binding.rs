//! The seams between a widget and its host: the bound model value and the
//! redraw request issued after each handler.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// Read/write access to a string value owned by the host application.
pub trait ModelBinding {
    fn get(&self) -> String;
    fn set(&self, value: String);
}

/// Shared string cell. Clones observe the same value.
#[derive(Debug, Clone, Default)]
pub struct Model(Rc<RefCell<String>>);

impl Model {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(value.into())))
    }
}

impl ModelBinding for Model {
    fn get(&self) -> String {
        self.0.borrow().clone()
    }

    fn set(&self, value: String) {
        *self.0.borrow_mut() = value;
    }
}

/// Adapts a getter/setter pair.
pub struct FnBinding<G, S> {
    getter: G,
    setter: S,
}

impl<G, S> FnBinding<G, S>
where
    G: Fn() -> String,
    S: Fn(String),
{
    pub fn new(getter: G, setter: S) -> Self {
        Self { getter, setter }
    }
}

impl<G, S> ModelBinding for FnBinding<G, S>
where
    G: Fn() -> String,
    S: Fn(String),
{
    fn get(&self) -> String {
        (self.getter)()
    }

    fn set(&self, value: String) {
        (self.setter)(value)
    }
}

pub trait Redraw {
    fn request_redraw(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedraw;

impl Redraw for NoRedraw {
    fn request_redraw(&self) {}
}

/// Counts redraw requests; clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct RedrawCounter(Rc<Cell<usize>>);

impl RedrawCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.0.get()
    }

    /// Returns whether any redraw was requested since the last call.
    pub fn take(&self) -> bool {
        self.0.replace(0) > 0
    }
}

impl Redraw for RedrawCounter {
    fn request_redraw(&self) {
        self.0.set(self.0.get() + 1);
    }
}

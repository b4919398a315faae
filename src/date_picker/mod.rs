//! Stateful date picker.
//!
//! The picker owns only its [`ViewCursor`] and the last model value it saw.
//! The selected date lives in the host's model, the open/closed state in the
//! shared [`PopupRegistry`].

mod cells;
mod cursor;
mod view;

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    attrs::{AttrType, AttributeRule, AttributeSchema},
    binding::{ModelBinding, NoRedraw, Redraw},
    calendar::{Clock, DatePattern, SystemClock},
    event::UiEvent,
    field::{Field, FieldAttrs, deserialize_resolved},
    popup::{PopupBinder, PopupRegistry, PopupTransition, PopupTrigger},
};

pub use cells::DateCell;
pub use cursor::ViewCursor;

use cells::CellPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatePickerAttrs {
    pub format: String,
    pub disable_past: bool,
    pub hide_offset: bool,
}

impl Default for DatePickerAttrs {
    fn default() -> Self {
        Self {
            format: DatePattern::DEFAULT.to_string(),
            disable_past: false,
            hide_offset: false,
        }
    }
}

impl DatePickerAttrs {
    /// Field attributes plus the picker's own; the inner input is a
    /// read-only text box.
    pub fn schema() -> AttributeSchema {
        FieldAttrs::schema().extend(
            AttributeSchema::new("DatePicker")
                .attr(
                    "format",
                    AttributeRule::required(AttrType::String).with_default(DatePattern::DEFAULT),
                )
                .attr(
                    "disablePast",
                    AttributeRule::optional(AttrType::Boolean).with_default(false),
                )
                .attr(
                    "hideOffset",
                    AttributeRule::optional(AttrType::Boolean).with_default(false),
                )
                .attr(
                    "type",
                    AttributeRule::optional(AttrType::String).with_default("text"),
                )
                .attr(
                    "readOnly",
                    AttributeRule::optional(AttrType::Boolean).with_default(true),
                ),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    /// Event on the anchor (the field).
    Toggle,
    Previous,
    Next,
    Select(NaiveDate),
    /// Interaction outside anchor and popup.
    Outside,
}

pub struct DatePickerBuilder {
    attrs: Value,
    model: Box<dyn ModelBinding>,
    clock: Box<dyn Clock>,
    redraw: Box<dyn Redraw>,
    trigger: PopupTrigger,
}

impl DatePickerBuilder {
    pub fn attrs(mut self, attrs: Value) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn redraw(mut self, redraw: impl Redraw + 'static) -> Self {
        self.redraw = Box::new(redraw);
        self
    }

    pub fn trigger(mut self, trigger: PopupTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn build(self, registry: &PopupRegistry) -> DatePicker {
        let report = DatePickerAttrs::schema().validate(&self.attrs);
        let attrs: DatePickerAttrs = deserialize_resolved(&report, "DatePicker");
        let field = Field::new(FieldAttrs::from_report(&report)).with_issues(report.issues);

        let mut picker = DatePicker {
            field,
            binder: PopupBinder::new(registry, self.trigger),
            pattern: DatePattern::new(&attrs.format),
            attrs,
            model: self.model,
            clock: self.clock,
            redraw: self.redraw,
            cursor: ViewCursor::new(1970, 0),
            last_seen: String::new(),
        };
        picker.init();
        picker
    }
}

pub struct DatePicker {
    field: Field,
    binder: PopupBinder,
    attrs: DatePickerAttrs,
    pattern: DatePattern,
    model: Box<dyn ModelBinding>,
    clock: Box<dyn Clock>,
    redraw: Box<dyn Redraw>,
    cursor: ViewCursor,
    last_seen: String,
}

impl fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("attrs", &self.attrs)
            .field("cursor", &self.cursor)
            .field("last_seen", &self.last_seen)
            .field("popup", &self.binder.id())
            .finish_non_exhaustive()
    }
}

impl DatePicker {
    pub fn builder(model: impl ModelBinding + 'static) -> DatePickerBuilder {
        DatePickerBuilder {
            attrs: Value::Null,
            model: Box::new(model),
            clock: Box::new(SystemClock),
            redraw: Box::new(NoRedraw),
            trigger: PopupTrigger::default(),
        }
    }

    fn init(&mut self) {
        let raw = self.model.get();
        self.cursor = self.cursor_for(&raw);
        tracing::trace!(value = %raw, cursor = ?self.cursor, "date picker initialised");
        self.last_seen = raw;
    }

    fn parse_model(&self, raw: &str) -> Option<NaiveDate> {
        if raw.is_empty() {
            return None;
        }
        match self.pattern.parse_in_year(raw, self.clock.today().year()) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::debug!(pattern = %self.pattern, "model value treated as empty: {err}");
                None
            }
        }
    }

    fn cursor_for(&self, raw: &str) -> ViewCursor {
        let date = self
            .parse_model(raw)
            .unwrap_or_else(|| self.clock.today());
        ViewCursor::from_date(date)
    }

    /// Re-reads the model before a render. When the value changed since the
    /// last check the cursor jumps to it; returns whether that happened.
    pub fn before_update(&mut self) -> bool {
        let raw = self.model.get();
        if raw == self.last_seen {
            return false;
        }
        self.cursor = self.cursor_for(&raw);
        tracing::debug!(value = %raw, cursor = ?self.cursor, "model changed, cursor resynced");
        self.last_seen = raw;
        true
    }

    pub fn previous_month(&mut self, event: &mut UiEvent) {
        event.stop_propagation();
        self.cursor.retreat();
        self.redraw.request_redraw();
    }

    pub fn next_month(&mut self, event: &mut UiEvent) {
        event.stop_propagation();
        self.cursor.advance();
        self.redraw.request_redraw();
    }

    /// Writes `date` into the model and moves the cursor to its month.
    /// Disabled or hidden cells are refused.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        let cell = self.policy().cell(date, !self.cursor.contains(date));
        if !cell.is_selectable() {
            tracing::debug!(%date, "selection refused");
            return false;
        }
        let value = self.pattern.format(date);
        self.cursor = ViewCursor::from_date(date);
        tracing::debug!(%value, "date selected");
        self.model.set(value);
        self.redraw.request_redraw();
        true
    }

    /// Empties the model. The cursor stays where it is.
    pub fn clear(&mut self) {
        if self.model.get().is_empty() {
            return;
        }
        tracing::debug!("value cleared");
        self.model.set(String::new());
        self.last_seen.clear();
        self.redraw.request_redraw();
    }

    /// Routes one interaction. Month navigation stops propagation so the
    /// popup stays open; a selection bubbles to the anchor and closes it.
    pub fn dispatch(&mut self, action: PickerAction, event: &mut UiEvent) -> PopupTransition {
        let transition = match action {
            PickerAction::Previous => {
                self.previous_month(event);
                PopupTransition::Unchanged
            }
            PickerAction::Next => {
                self.next_month(event);
                PopupTransition::Unchanged
            }
            PickerAction::Select(date) => {
                if self.select(date) {
                    self.binder.handle_anchor_event(event)
                } else {
                    event.stop_propagation();
                    PopupTransition::Unchanged
                }
            }
            PickerAction::Toggle => self.binder.handle_anchor_event(event),
            PickerAction::Outside => self.binder.handle_outside_event(event),
        };
        if transition != PopupTransition::Unchanged {
            self.redraw.request_redraw();
        }
        transition
    }

    fn policy(&self) -> CellPolicy {
        CellPolicy {
            today: self.clock.today(),
            selected: self.selected_date(),
            disable_past: self.attrs.disable_past,
            hide_offset: self.attrs.hide_offset,
        }
    }

    /// Rows of seven cells for the month under the cursor.
    pub fn weeks(&self) -> Vec<Vec<DateCell>> {
        self.policy().weeks(&self.cursor.grid())
    }

    pub fn cell(&self, date: NaiveDate) -> DateCell {
        self.policy().cell(date, !self.cursor.contains(date))
    }

    pub fn cursor(&self) -> ViewCursor {
        self.cursor
    }

    pub fn title(&self) -> String {
        self.cursor.title()
    }

    pub fn attrs(&self) -> &DatePickerAttrs {
        &self.attrs
    }

    pub fn pattern(&self) -> &DatePattern {
        &self.pattern
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn binder(&self) -> &PopupBinder {
        &self.binder
    }

    pub fn is_open(&self) -> bool {
        self.binder.is_open()
    }

    pub fn value(&self) -> String {
        self.model.get()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.parse_model(&self.model.get())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

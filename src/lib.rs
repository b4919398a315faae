#![deny(rust_2018_idioms)]

#[cfg(feature = "tui")]
mod app;
pub mod attrs;
pub mod binding;
pub mod calendar;
pub mod compose;
pub mod date_picker;
pub mod event;
pub mod field;
mod io;
pub mod popup;
#[cfg(feature = "tui")]
pub mod presentation;
pub mod vdom;

#[cfg(feature = "tui")]
pub use app::{DatePickerUI, UiOptions};
pub use attrs::{AttrType, AttributeIssue, AttributeReport, AttributeRule, AttributeSchema};
pub use binding::{FnBinding, Model, ModelBinding, NoRedraw, Redraw, RedrawCounter};
pub use calendar::{
    CalendarGrid, Clock, DatePattern, FixedClock, GridDate, MONTHS, PatternError, SystemClock,
    WEEKDAYS, month_dates,
};
pub use compose::{ClassList, Composition, Decoration, INPUT_BASE, class_list};
pub use date_picker::{
    DateCell, DatePicker, DatePickerAttrs, DatePickerBuilder, PickerAction, ViewCursor,
};
pub use event::{EventKind, UiEvent};
pub use field::{Adornment, Field, FieldAttrs, Input};
pub use io::{DocumentFormat, load_attrs_str, merge_attrs, parse_document_str};
pub use popup::{PopupBinder, PopupId, PopupRegistry, PopupTransition, PopupTrigger};
pub use vdom::{Element, Node};

pub mod prelude {
    pub use super::{
        ClassList, Composition, DatePattern, DatePicker, Decoration, Model, ModelBinding,
        PopupRegistry, UiEvent,
    };
}

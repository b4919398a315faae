use anyhow::Result;
use serde_json::Value;

use crate::{
    binding::{Model, RedrawCounter},
    date_picker::DatePicker,
    popup::PopupRegistry,
};

use super::{options::UiOptions, runtime::App};

/// Runs a single date picker full-screen and returns the accepted value.
#[derive(Debug)]
pub struct DatePickerUI {
    attrs: Value,
    value: String,
    title: Option<String>,
    options: UiOptions,
}

impl DatePickerUI {
    pub fn new(attrs: Value) -> Self {
        Self {
            attrs,
            value: String::new(),
            title: None,
            options: UiOptions::default(),
        }
    }

    /// Initial model value, in the picker's format.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(self) -> Result<String> {
        let DatePickerUI {
            attrs,
            value,
            title,
            options,
        } = self;

        let redraw = RedrawCounter::new();
        let picker = DatePicker::builder(Model::new(value))
            .attrs(attrs)
            .redraw(redraw.clone())
            .build(&PopupRegistry::new());

        let mut app = App::new(picker, redraw, title, options);
        app.run()
    }
}

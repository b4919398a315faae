mod input;
mod keymap;
mod options;
mod picker_ui;
mod runtime;
mod status;
mod terminal;

pub use options::UiOptions;
pub use picker_ui::DatePickerUI;

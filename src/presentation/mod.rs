//! Terminal rendering of the date picker with ratatui.

mod date_picker;
mod footer;
mod layout;

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::Paragraph,
};

use crate::date_picker::DatePicker;

pub use date_picker::{Hit, PickerHitMap, render_date_picker};
pub use footer::render_footer;
pub use layout::anchored_rect;

pub const FIELD_HEIGHT: u16 = 3;

pub struct UiContext<'a> {
    pub title: Option<&'a str>,
    pub picker: &'a DatePicker,
    pub focus: Option<NaiveDate>,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
}

/// Lays out title, field (with its popup) and footer; returns the hit map of
/// the picker for mouse routing.
pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) -> PickerHitMap {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(frame.area());

    if let Some(title) = ctx.title {
        frame.render_widget(Paragraph::new(Line::from(title)), chunks[0]);
    }
    render_footer(frame, chunks[3], ctx.status_message, ctx.help);

    let anchor = chunks[1];
    let width = anchor.width.min(40);
    let anchor = ratatui::layout::Rect { width, ..anchor };
    render_date_picker(frame, anchor, ctx.picker, ctx.focus)
}

use chrono::{Datelike, NaiveDate};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    calendar::WEEKDAYS,
    date_picker::{DateCell, DatePicker},
};

use super::layout::anchored_rect;

const CELL_WIDTH: u16 = 4;
const GRID_WIDTH: u16 = CELL_WIDTH * 7;
const PREV_LABEL: &str = " ‹ ";
const NEXT_LABEL: &str = " › ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Anchor,
    Previous,
    Next,
    Cell(NaiveDate),
    /// Inside the popup but not on a control.
    Popup,
    Outside,
}

/// Screen regions of the last rendered picker.
#[derive(Debug, Clone, Default)]
pub struct PickerHitMap {
    pub anchor: Rect,
    pub popup: Option<Rect>,
    pub previous: Option<Rect>,
    pub next: Option<Rect>,
    pub cells: Vec<(Rect, NaiveDate)>,
}

impl PickerHitMap {
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let position = Position::new(column, row);
        if self.anchor.contains(position) {
            return Hit::Anchor;
        }
        if !self.popup.is_some_and(|popup| popup.contains(position)) {
            return Hit::Outside;
        }
        if self.previous.is_some_and(|rect| rect.contains(position)) {
            return Hit::Previous;
        }
        if self.next.is_some_and(|rect| rect.contains(position)) {
            return Hit::Next;
        }
        self.cells
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map_or(Hit::Popup, |(_, date)| Hit::Cell(*date))
    }
}

fn cell_style(cell: &DateCell, focused: bool) -> Style {
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if cell.offset {
        style = Style::default().fg(Color::DarkGray);
    }
    if cell.today {
        style = style.bg(Color::Rgb(255, 165, 0)).fg(Color::White);
    }
    if cell.selected {
        style = style.bg(Color::Blue).fg(Color::White);
    }
    if cell.disabled {
        style = style
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT | Modifier::DIM);
    }
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn header_line(title: &str) -> Line<'static> {
    let title_width = UnicodeWidthStr::width(title) as u16;
    let side = PREV_LABEL.width() as u16 + NEXT_LABEL.width() as u16;
    let room = GRID_WIDTH.saturating_sub(side).saturating_sub(title_width);
    let left = room / 2;
    let right = room - left;
    let blue = Style::default().fg(Color::Blue);
    Line::from(vec![
        Span::styled(PREV_LABEL, blue),
        Span::raw(" ".repeat(left as usize)),
        Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(right as usize)),
        Span::styled(NEXT_LABEL, blue),
    ])
}

fn week_bar_line() -> Line<'static> {
    Line::from(
        WEEKDAYS
            .iter()
            .map(|day| Span::raw(format!("{day:>3} ")))
            .collect::<Vec<_>>(),
    )
}

/// Draws the picker's field inside `anchor` and, when open, its calendar
/// popup below it.
pub fn render_date_picker(
    frame: &mut Frame<'_>,
    anchor: Rect,
    picker: &DatePicker,
    focus: Option<NaiveDate>,
) -> PickerHitMap {
    let mut hits = PickerHitMap {
        anchor,
        ..PickerHitMap::default()
    };

    let field = picker.field();
    let value = picker.value();
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(label) = field.label() {
        block = block.title(label.to_string());
    }
    if field.error().is_some() {
        block = block.border_style(Style::default().fg(Color::Red));
    }
    let content = if value.is_empty() {
        let placeholder = field.input().placeholder().unwrap_or(picker.pattern().as_str());
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value)
    };
    let indicator = if picker.is_open() { " ▴" } else { " ▾" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![content, Span::raw(indicator)])).block(block),
        anchor,
    );

    if !picker.is_open() {
        return hits;
    }

    let weeks = picker.weeks();
    let height = weeks.len() as u16 + 4;
    let area = anchored_rect(anchor, GRID_WIDTH + 2, height, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);

    let mut lines = vec![header_line(&picker.title()), week_bar_line()];
    for week in &weeks {
        let spans = week
            .iter()
            .map(|cell| {
                if cell.hidden {
                    Span::raw(" ".repeat(CELL_WIDTH as usize))
                } else {
                    let focused = focus == Some(cell.date);
                    Span::styled(
                        format!("{:>3} ", cell.date.day()),
                        cell_style(cell, focused),
                    )
                }
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);

    hits.popup = Some(area);
    let side = PREV_LABEL.width() as u16;
    hits.previous = Some(clip(Rect::new(inner.x, inner.y, side, 1), inner));
    hits.next = Some(clip(
        Rect::new(inner.x + GRID_WIDTH.saturating_sub(side), inner.y, side, 1),
        inner,
    ));
    for (row, week) in weeks.iter().enumerate() {
        for (col, cell) in week.iter().enumerate() {
            if !cell.is_selectable() {
                continue;
            }
            let rect = Rect::new(
                inner.x + col as u16 * CELL_WIDTH,
                inner.y + 2 + row as u16,
                CELL_WIDTH,
                1,
            );
            hits.cells.push((clip(rect, inner), cell.date));
        }
    }
    hits
}

fn clip(rect: Rect, bounds: Rect) -> Rect {
    rect.intersection(bounds)
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use serde_json::json;

    use super::*;
    use crate::{
        binding::Model, calendar::FixedClock, date_picker::PickerAction, event::UiEvent,
        popup::PopupRegistry,
    };

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn open_picker() -> DatePicker {
        let mut picker = DatePicker::builder(Model::new("2024-02-15"))
            .attrs(json!({"format": "YYYY-MM-DD", "label": "Due"}))
            .clock(FixedClock(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()))
            .build(&PopupRegistry::new());
        picker.dispatch(PickerAction::Toggle, &mut UiEvent::click());
        picker
    }

    #[test]
    fn renders_field_and_calendar() {
        let picker = open_picker();
        let mut terminal = Terminal::new(TestBackend::new(40, 14)).unwrap();
        let mut hits = PickerHitMap::default();
        terminal
            .draw(|frame| {
                hits = render_date_picker(frame, Rect::new(0, 0, 30, 3), &picker, None);
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("2024-02-15"));
        assert!(text.contains("Due"));
        assert!(text.contains("FEB 2024"));
        assert!(text.contains("Sun Mon Tue"));
        assert_eq!(hits.popup.map(|rect| rect.y), Some(3));
    }

    #[test]
    fn hit_map_routes_clicks() {
        let picker = open_picker();
        let mut terminal = Terminal::new(TestBackend::new(40, 14)).unwrap();
        let mut hits = PickerHitMap::default();
        terminal
            .draw(|frame| {
                hits = render_date_picker(frame, Rect::new(0, 0, 30, 3), &picker, None);
            })
            .unwrap();

        assert_eq!(hits.hit(1, 1), Hit::Anchor);
        assert_eq!(hits.hit(2, 4), Hit::Previous);
        assert_eq!(hits.hit(28, 4), Hit::Next);
        assert_eq!(hits.hit(39, 13), Hit::Outside);
        // Feb 2024 starts on a Thursday: first row, fifth column.
        let first = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(hits.hit(1 + 4 * 4 + 1, 6), Hit::Cell(first));
    }

    #[test]
    fn closed_picker_has_no_popup() {
        let picker = DatePicker::builder(Model::default()).build(&PopupRegistry::new());
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        let mut hits = PickerHitMap::default();
        terminal
            .draw(|frame| {
                hits = render_date_picker(frame, Rect::new(0, 0, 30, 3), &picker, None);
            })
            .unwrap();
        assert!(hits.popup.is_none());
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("YYYY-MM-DD"));
    }
}

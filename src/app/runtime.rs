use anyhow::{Result, anyhow};
use chrono::{Datelike, Days, NaiveDate};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::{
    binding::{Redraw, RedrawCounter},
    date_picker::{DatePicker, PickerAction, ViewCursor},
    event::{EventKind, UiEvent},
    popup::PopupTransition,
    presentation::{self, Hit, PickerHitMap, UiContext},
};

use super::{
    input::KeyAction,
    keymap::{self, KeymapContext},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

pub(crate) struct App {
    picker: DatePicker,
    redraw: RedrawCounter,
    options: UiOptions,
    title: Option<String>,
    status: StatusLine,
    focus: Option<NaiveDate>,
    hits: PickerHitMap,
    initial: String,
    exit_armed: bool,
    should_quit: bool,
    result: Option<String>,
}

impl App {
    /// `redraw` must be the sink the picker was built with.
    pub fn new(
        picker: DatePicker,
        redraw: RedrawCounter,
        title: Option<String>,
        options: UiOptions,
    ) -> Self {
        let initial = picker.value();
        Self {
            picker,
            redraw,
            options,
            title,
            status: StatusLine::new(),
            focus: None,
            hits: PickerHitMap::default(),
            initial,
            exit_armed: false,
            should_quit: false,
            result: None,
        }
    }

    pub fn run(&mut self) -> Result<String> {
        let mut terminal = TerminalGuard::enter(self.options.mouse)?;
        self.redraw.request_redraw();
        while !self.should_quit {
            if self.picker.before_update() && self.picker.is_open() {
                self.focus = self.initial_focus();
            }
            if self.redraw.take() {
                terminal.draw(|frame| self.draw(frame))?;
            }
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) if self.options.mouse => self.handle_mouse(mouse),
                Event::Resize(_, _) => self.redraw.request_redraw(),
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }

        self.result
            .take()
            .ok_or_else(|| anyhow!("user exited without choosing a date"))
    }

    fn context(&self) -> KeymapContext {
        if self.picker.is_open() {
            KeymapContext::Calendar
        } else {
            KeymapContext::Field
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let help = if self.options.show_help {
            keymap::help_text(self.context())
        } else {
            None
        };
        self.hits = presentation::draw(
            frame,
            UiContext {
                title: self.title.as_deref(),
                picker: &self.picker,
                focus: self.focus,
                status_message: self.status.message(),
                help: help.as_deref(),
            },
        );
    }

    /// Synthesises the event the popup trigger listens for, so keyboard
    /// toggling follows the same path as a click on the anchor.
    fn trigger_event(&self) -> UiEvent {
        let trigger = self.picker.binder().trigger();
        if self.picker.is_open() {
            UiEvent::new(trigger.hide)
        } else {
            UiEvent::new(trigger.display)
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let Some(action) = keymap::classify_key(&key, self.context()) else {
            return;
        };
        if action != KeyAction::Quit {
            self.exit_armed = false;
        }
        match action {
            KeyAction::Save => {
                let value = self.picker.value();
                self.status.selected(&value);
                self.result = Some(value);
                self.should_quit = true;
            }
            KeyAction::Quit => self.on_exit(),
            KeyAction::TogglePopup => {
                let mut event = self.trigger_event();
                self.apply(PickerAction::Toggle, &mut event);
            }
            KeyAction::Clear => {
                self.picker.clear();
                self.status.cleared();
            }
            KeyAction::Select => {
                if let Some(date) = self.focus {
                    let mut event = self.trigger_event();
                    self.apply(PickerAction::Select(date), &mut event);
                }
            }
            KeyAction::Dismiss => {
                let mut event = UiEvent::new(self.picker.binder().trigger().hide);
                self.apply(PickerAction::Outside, &mut event);
            }
            KeyAction::MonthStep(delta) => self.step_months(delta),
            KeyAction::FocusStep(days) => self.step_focus(days),
        }
        self.redraw.request_redraw();
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        self.exit_armed = false;
        let mut event = UiEvent::new(EventKind::Click);
        match self.hits.hit(mouse.column, mouse.row) {
            Hit::Anchor => self.apply(PickerAction::Toggle, &mut event),
            Hit::Previous => self.step_months(-1),
            Hit::Next => self.step_months(1),
            Hit::Cell(date) => {
                self.focus = Some(date);
                self.apply(PickerAction::Select(date), &mut event);
            }
            Hit::Popup => {}
            Hit::Outside => self.apply(PickerAction::Outside, &mut event),
        }
        self.redraw.request_redraw();
    }

    fn apply(&mut self, action: PickerAction, event: &mut UiEvent) {
        let before = self.picker.value();
        let transition = self.picker.dispatch(action, event);
        if let PickerAction::Select(date) = action {
            let value = self.picker.value();
            if value != before || self.picker.selected_date() == Some(date) {
                self.status.selected(&value);
            } else {
                self.status.refused(&date.to_string());
            }
        }
        match transition {
            PopupTransition::Opened { .. } => {
                self.focus = self.initial_focus();
                self.status.browsing(&self.picker.title());
            }
            PopupTransition::Closed => {
                self.focus = None;
                if !matches!(action, PickerAction::Select(_)) {
                    self.status.ready();
                }
            }
            PopupTransition::Unchanged => {}
        }
    }

    /// Selected date when it is in view, then today, then the first of
    /// the month.
    fn initial_focus(&self) -> Option<NaiveDate> {
        let cursor = self.picker.cursor();
        [self.picker.selected_date(), Some(self.picker.today())]
            .into_iter()
            .flatten()
            .find(|date| cursor.contains(*date))
            .or_else(|| NaiveDate::from_ymd_opt(cursor.year, cursor.month + 1, 1))
    }

    fn step_months(&mut self, delta: i32) {
        let day = self.focus.map_or(1, |date| date.day());
        for _ in 0..delta.unsigned_abs() {
            let mut event = UiEvent::click();
            let action = if delta < 0 {
                PickerAction::Previous
            } else {
                PickerAction::Next
            };
            self.picker.dispatch(action, &mut event);
        }
        let cursor = self.picker.cursor();
        if self.focus.is_some() {
            self.focus = clamp_day(cursor, day);
        }
        self.status.browsing(&self.picker.title());
    }

    fn step_focus(&mut self, days: i64) {
        let Some(current) = self.focus.or_else(|| self.initial_focus()) else {
            return;
        };
        let magnitude = Days::new(days.unsigned_abs());
        let target = if days < 0 {
            current.checked_sub_days(magnitude)
        } else {
            current.checked_add_days(magnitude)
        };
        let Some(target) = target else {
            return;
        };
        let cursor = self.picker.cursor();
        let months = (target.year() - cursor.year) * 12 + target.month0() as i32
            - cursor.month as i32;
        if months != 0 {
            self.step_months(months);
        }
        self.focus = Some(target);
    }

    fn on_exit(&mut self) {
        let changed = self.picker.value() != self.initial;
        if self.options.confirm_exit && changed && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
        self.result = None;
    }
}

/// Same day of month in the cursor's month, clamped to its last day.
fn clamp_day(cursor: ViewCursor, day: u32) -> Option<NaiveDate> {
    (1..=day.max(1))
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(cursor.year, cursor.month + 1, d))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        binding::{Model, ModelBinding},
        calendar::FixedClock,
        popup::PopupRegistry,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app(model: &Model, attrs: Value) -> App {
        let redraw = RedrawCounter::new();
        let picker = DatePicker::builder(model.clone())
            .attrs(attrs)
            .clock(FixedClock(date(2024, 2, 10)))
            .redraw(redraw.clone())
            .build(&PopupRegistry::new());
        App::new(picker, redraw, None, UiOptions::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn render(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(50, 20)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
    }

    #[test]
    fn keyboard_round_trip_selects_focused_date() {
        let model = Model::new("2024-02-15");
        let mut app = app(&model, json!({}));

        press(&mut app, KeyCode::Enter);
        assert!(app.picker.is_open());
        assert_eq!(app.focus, Some(date(2024, 2, 15)));

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Some(date(2024, 2, 23)));

        press(&mut app, KeyCode::Enter);
        assert!(!app.picker.is_open());
        assert_eq!(model.get(), "2024-02-23");
        assert_eq!(app.focus, None);
    }

    #[test]
    fn focus_crossing_month_moves_cursor() {
        let model = Model::new("2024-02-28");
        let mut app = app(&model, json!({}));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Some(date(2024, 3, 6)));
        assert_eq!(app.picker.cursor(), ViewCursor::new(2024, 2));
        assert_eq!(model.get(), "2024-02-28");
    }

    #[test]
    fn month_keys_keep_day_of_month() {
        let model = Model::new("2024-01-31");
        let mut app = app(&model, json!({}));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.picker.cursor(), ViewCursor::new(2024, 1));
        assert_eq!(app.focus, Some(date(2024, 2, 29)));
        assert!(app.picker.is_open());
    }

    #[test]
    fn disabled_focus_is_not_selected() {
        let model = Model::default();
        let mut app = app(&model, json!({"disablePast": true}));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Some(date(2024, 2, 10)));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        assert_eq!(model.get(), "");
        assert!(app.picker.is_open());
    }

    #[test]
    fn escape_dismisses_without_writing() {
        let model = Model::new("2024-02-15");
        let mut app = app(&model, json!({}));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Esc);
        assert!(!app.picker.is_open());
        assert_eq!(model.get(), "2024-02-15");
    }

    #[test]
    fn save_returns_current_value() {
        let model = Model::new("2024-02-15");
        let mut app = app(&model, json!({}));
        ctrl(&mut app, 's');
        assert!(app.should_quit);
        assert_eq!(app.result.as_deref(), Some("2024-02-15"));
    }

    #[test]
    fn quit_after_change_needs_confirmation() {
        let model = Model::new("2024-02-15");
        let mut app = app(&model, json!({}));
        press(&mut app, KeyCode::Delete);
        assert_eq!(model.get(), "");

        ctrl(&mut app, 'q');
        assert!(!app.should_quit);
        ctrl(&mut app, 'q');
        assert!(app.should_quit);
        assert!(app.result.is_none());
    }

    #[test]
    fn mouse_clicks_follow_hit_map() {
        let model = Model::new("2024-02-15");
        let mut app = app(&model, json!({}));
        render(&mut app);
        let anchor = app.hits.anchor;
        click(&mut app, anchor.x + 1, anchor.y + 1);
        assert!(app.picker.is_open());

        render(&mut app);
        let next = app.hits.next.unwrap();
        click(&mut app, next.x, next.y);
        assert_eq!(app.picker.cursor(), ViewCursor::new(2024, 2));

        render(&mut app);
        let target = date(2024, 3, 12);
        let (rect, _) = *app
            .hits
            .cells
            .iter()
            .find(|(_, date)| *date == target)
            .unwrap();
        click(&mut app, rect.x, rect.y);
        assert_eq!(model.get(), "2024-03-12");
        assert!(!app.picker.is_open());
    }

    #[test]
    fn click_outside_closes_popup() {
        let model = Model::default();
        let mut app = app(&model, json!({}));
        press(&mut app, KeyCode::Enter);
        render(&mut app);
        click(&mut app, 49, 19);
        assert!(!app.picker.is_open());
    }

    #[test]
    fn clamp_day_handles_short_months() {
        assert_eq!(clamp_day(ViewCursor::new(2023, 1), 31), Some(date(2023, 2, 28)));
        assert_eq!(clamp_day(ViewCursor::new(2023, 3), 31), Some(date(2023, 4, 30)));
        assert_eq!(clamp_day(ViewCursor::new(2023, 0), 5), Some(date(2023, 1, 5)));
    }
}

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, status: &str, help: Option<&str>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    if let Some(help) = help {
        let actions = Paragraph::new(format!("Actions: {help}"))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(actions, rows[0]);
    }

    let status = if status.trim().is_empty() {
        "Ready"
    } else {
        status
    };
    let line = Line::from(vec![Span::raw("Status: "), Span::raw(status.to_string())]);
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), rows[1]);
}

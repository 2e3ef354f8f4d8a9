pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::Step;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.session.step() {
        Step::Group => screens::group::render(frame, area, state),
        Step::Expenses | Step::Claims => render_shell(frame, area, state),
    }
    components::toast::render(frame, area, state.notices.current());
    components::alert::render(frame, area, state.alert.as_deref());
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Group info
            Constraint::Length(2), // Tabs
            Constraint::Min(0),    // Section content
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state, &theme);

    match state.section {
        Section::Expenses => screens::expenses::render(frame, layout[2], state),
        Section::Claims => screens::claims::render(frame, layout[2], state),
    }

    let hints = components::hints::for_state(state);
    frame.render_widget(
        Paragraph::new(Line::from(components::hints::hints_to_spans(&hints, &theme))),
        layout[3],
    );
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(group) = state.session.group() else {
        return;
    };
    let date = group.date.format(&state.date_format).to_string();

    let line = Line::from(vec![
        Span::styled("Group", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", group.name)),
        Span::styled("Place", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", group.place)),
        Span::styled("Paid by", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", group.payers_label())),
        Span::styled("Date", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {date}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

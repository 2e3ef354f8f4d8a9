use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, Section},
    ui::theme::Theme,
};

/// Renders the section tabs. Sections whose step is still locked are
/// dimmed and marked.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let sections = [Section::Expenses, Section::Claims];

    let mut spans = vec![Span::raw(" ")];
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = section.label();
        if *section == state.section {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else if state.session.is_unlocked(section.step()) {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        } else {
            spans.push(Span::styled(
                format!("{label} (locked)"),
                Style::default().fg(theme.dim),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

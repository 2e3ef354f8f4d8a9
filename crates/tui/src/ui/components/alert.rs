use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::theme::Theme;

/// Calculates a centered rect of the given size inside `area`.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Box width for `message`: padded text, at least 30 columns, at most the
/// available width (or 30 on very narrow terminals).
fn alert_width(message: &str, available: u16) -> u16 {
    let max = available.max(30);
    (message.chars().count() + 6).clamp(30, usize::from(max)) as u16
}

/// Modal alert. Input is blocked until it is dismissed.
pub fn render(frame: &mut Frame<'_>, area: Rect, message: Option<&str>) {
    let Some(message) = message else {
        return;
    };
    let theme = Theme::default();
    let rect = centered_box(alert_width(message, area.width), 5, area);

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(" alert ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));

    let text = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Enter / Esc to close",
            Style::default().fg(theme.dim),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_clamped_to_the_screen() {
        assert_eq!(alert_width("short", 80), 30);
        assert_eq!(alert_width(&"x".repeat(40), 80), 46);
        assert_eq!(alert_width(&"x".repeat(70_000), 80), 80);
        assert_eq!(alert_width(&"x".repeat(70_000), 10), 30);
    }
}

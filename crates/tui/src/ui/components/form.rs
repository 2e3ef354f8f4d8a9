use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Spans for one `label: value` input.
///
/// The focused field shows a cursor; locked fields are dimmed and never
/// show one.
pub fn field_spans(
    label: &str,
    value: &str,
    focused: bool,
    locked: bool,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let value_style = if locked {
        Style::default().fg(theme.dim)
    } else if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };
    let cursor = if focused && !locked { "│" } else { "" };
    let value = if value.is_empty() && !focused {
        "-".to_string()
    } else {
        format!("{value}{cursor}")
    };

    vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(value, value_style),
        Span::raw("   "),
    ]
}

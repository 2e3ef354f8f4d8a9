use engine::Step;
use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, Section},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: String,
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            hint.key.clone(),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Hints for the current screen and mode.
pub fn for_state(state: &AppState) -> Vec<KeyHint> {
    if state.session.step() == Step::Group {
        return vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Ctrl+N", "add payer"),
            KeyHint::new("Ctrl+D", "remove payer"),
            KeyHint::new("Enter", "create"),
            KeyHint::new("Ctrl+C", "quit"),
        ];
    }

    let editing = match state.section {
        Section::Expenses => state.expenses.draft.is_editing(),
        Section::Claims => state.claims.draft.is_editing(),
    };

    let mut hints = vec![KeyHint::new("←→", "section"), KeyHint::new("Tab", "next")];
    if editing {
        hints.push(KeyHint::new("Enter", "update"));
        hints.push(KeyHint::new("Esc", "cancel"));
    } else {
        hints.push(KeyHint::new("Enter", "add"));
        hints.push(KeyHint::new("↑↓", "select"));
        hints.push(KeyHint::new("Ctrl+E", "edit"));
        hints.push(KeyHint::new("Ctrl+D", "delete"));
    }
    if state.section == Section::Claims {
        hints.push(KeyHint::new("↑↓ on item", "pick"));
    }
    hints.push(KeyHint::new("Ctrl+C", "quit"));
    hints
}

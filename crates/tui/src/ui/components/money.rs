use engine::Money;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Formats an amount with the configured symbol, e.g. `$20.00`.
#[must_use]
pub fn format_amount(amount: Money, symbol: &str) -> String {
    format!("{symbol}{amount}")
}

/// Creates a bold span for totals.
#[must_use]
pub fn styled_total(amount: Money, symbol: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format_amount(amount, symbol),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )
}

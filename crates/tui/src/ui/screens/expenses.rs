use engine::ExpenseField;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            form::field_spans,
            money::{format_amount, styled_total},
        },
        theme::Theme,
    },
};

/// Step 2: expense entry form and the ledger table.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_form(frame, layout[0], state, &theme);
    render_table(frame, layout[1], state, &theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let draft = &state.expenses.draft;
    let focus = state.expense_focus();
    let title = if draft.is_editing() {
        "Edit Expense"
    } else {
        "Step 2: Expense Entry"
    };

    let spans = ExpenseField::ALL
        .iter()
        .flat_map(|field| {
            let locked = *field == ExpenseField::Item && draft.is_editing();
            field_spans(
                field.label(),
                draft.value(*field),
                *field == focus,
                locked,
                theme,
            )
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let symbol = state.currency_symbol.as_str();
    let items = state.session.items();

    let mut rows: Vec<Row> = items
        .iter()
        .map(|expense| {
            Row::new(vec![
                Cell::from(expense.item().to_string()),
                Cell::from(expense.quantity().to_string()),
                Cell::from(format_amount(expense.price(), symbol)),
                Cell::from(format_amount(expense.total(), symbol)),
            ])
        })
        .collect();

    if items.is_empty() {
        rows.push(
            Row::new(vec![Cell::from("No expenses added yet")])
                .style(Style::default().fg(theme.dim)),
        );
    } else {
        rows.push(Row::new(vec![
            Cell::from(""),
            Cell::from(""),
            Cell::from("Total"),
            Cell::from(styled_total(state.session.ledger_total(), symbol, theme)),
        ]));
    }

    let header = Row::new(vec!["Item", "Quantity", "Price/Unit", "Total"]).style(
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Expenses"))
    .row_highlight_style(Style::default().bg(theme.selection));

    let mut table_state = TableState::default();
    if !items.is_empty() {
        table_state.select(Some(state.expenses.selected));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

use engine::{ClaimField, Money};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState},
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

/// Step 3: member claims form, claims table and per-member totals.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(layout[1]);

    render_form(frame, layout[0], state, &theme);
    render_table(frame, body[0], state, &theme);
    render_summary(frame, body[1], state, &theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let draft = &state.claims.draft;
    let focus = state.claim_focus();
    let symbol = state.currency_symbol.as_str();
    let title = if draft.is_editing() {
        "Edit Member Expense"
    } else {
        "Step 3: Individual Member Expenses"
    };

    let selected = draft.value(ClaimField::Item);
    let item_label = draft
        .choices(&state.session)
        .into_iter()
        .find(|choice| choice.item == selected)
        .map(|choice| format!("{} (Available: {})", choice.item, choice.available))
        .unwrap_or_default();

    let mut first = field_spans(
        ClaimField::Member.label(),
        draft.value(ClaimField::Member),
        focus == ClaimField::Member,
        false,
        theme,
    );
    first.extend(field_spans(
        ClaimField::Item.label(),
        &item_label,
        focus == ClaimField::Item,
        true,
        theme,
    ));

    let mut second = field_spans(
        ClaimField::Quantity.label(),
        draft.value(ClaimField::Quantity),
        focus == ClaimField::Quantity,
        false,
        theme,
    );
    second.extend(field_spans(
        ClaimField::Price.label(),
        draft.value(ClaimField::Price),
        false,
        true,
        theme,
    ));
    let preview = draft
        .preview_total()
        .map(|total| format_amount(total, symbol))
        .unwrap_or_else(|| "-".to_string());
    second.push(Span::styled("Total: ", Style::default().fg(theme.text_muted)));
    second.push(Span::raw(preview));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title);
    frame.render_widget(
        Paragraph::new(vec![Line::from(first), Line::from(second)]).block(block),
        area,
    );
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let symbol = state.currency_symbol.as_str();
    let claims = state.session.claims();

    let mut rows: Vec<Row> = claims
        .iter()
        .map(|claim| {
            Row::new(vec![
                Cell::from(claim.member().to_string()),
                Cell::from(claim.item().to_string()),
                Cell::from(claim.quantity().to_string()),
                Cell::from(format_amount(claim.price(), symbol)),
                Cell::from(format_amount(claim.total(), symbol)),
            ])
        })
        .collect();

    if claims.is_empty() {
        rows.push(
            Row::new(vec![Cell::from("No member expenses added yet")])
                .style(Style::default().fg(theme.dim)),
        );
    } else {
        rows.push(Row::new(vec![
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from("Total"),
            Cell::from(styled_total(state.session.claims_total(), symbol, theme)),
        ]));
    }

    let header = Row::new(vec!["Member", "Item", "Quantity", "Price/Unit", "Total"]).style(
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Member Expenses"))
    .row_highlight_style(Style::default().bg(theme.selection));

    let mut table_state = TableState::default();
    if !claims.is_empty() {
        table_state.select(Some(state.claims.selected));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let symbol = state.currency_symbol.as_str();
    let session = &state.session;

    let mut items: Vec<ListItem> = session
        .member_totals()
        .into_iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}: ", entry.member)),
                Span::raw(format_amount(entry.total, symbol)),
            ]))
        })
        .collect();

    items.push(ListItem::new(""));
    for allocation in session.allocations() {
        let color = if allocation.available.is_zero() {
            theme.warning
        } else {
            theme.text_muted
        };
        items.push(ListItem::new(Span::styled(
            format!(
                "{}: {}/{} claimed",
                allocation.item, allocation.claimed, allocation.quantity
            ),
            Style::default().fg(color),
        )));
    }

    let unclaimed = session.unclaimed_total();
    if unclaimed != Money::ZERO {
        items.push(ListItem::new(Line::from(vec![
            Span::styled("Unclaimed: ", Style::default().fg(theme.text_muted)),
            styled_total(unclaimed, symbol, theme),
        ])));
    }

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Per member"));
    frame.render_widget(list, area);
}

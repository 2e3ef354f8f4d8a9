use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, GroupField},
    ui::{
        components::{alert::centered_box, form::field_spans, hints},
        theme::Theme,
    },
};

/// Step 1: the group creation form.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.group_form;

    // name, place, one row per payer, date
    let rows = 3 + form.draft.payers.len() as u16;
    let card_area = centered_box(72, rows + 5, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Step 1: Group Creation ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let mut lines = vec![
        Line::from(field_spans(
            "Group Name",
            &form.draft.name,
            form.focus == GroupField::Name,
            false,
            &theme,
        )),
        Line::from(field_spans(
            "Canteen Place",
            &form.draft.place,
            form.focus == GroupField::Place,
            false,
            &theme,
        )),
    ];
    for (i, payer) in form.draft.payers.iter().enumerate() {
        lines.push(Line::from(field_spans(
            &format!("Paid By #{}", i + 1),
            payer,
            form.focus == GroupField::Payer(i),
            false,
            &theme,
        )));
    }
    lines.push(Line::from(field_spans(
        "Date (YYYY-MM-DD)",
        &form.draft.date,
        form.focus == GroupField::Date,
        false,
        &theme,
    )));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .margin(1)
        .split(inner);

    frame.render_widget(Paragraph::new(lines), layout[0]);
    frame.render_widget(
        Paragraph::new(Line::from(hints::hints_to_spans(
            &hints::for_state(state),
            &theme,
        ))),
        layout[1],
    );
}

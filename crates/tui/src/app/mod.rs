use std::time::Instant;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::{
    ClaimDraft, ClaimField, EngineError, ExpenseDraft, ExpenseField, GroupDraft, NoticeBoard,
    NoticeLevel, Session, Step, Surface,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Expenses,
    Claims,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Expenses => "Expenses",
            Self::Claims => "Claims",
        }
    }

    /// Step the section needs before it can be opened.
    pub fn step(self) -> Step {
        match self {
            Self::Expenses => Step::Expenses,
            Self::Claims => Step::Claims,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Name,
    Place,
    Payer(usize),
    Date,
}

#[derive(Debug)]
pub struct GroupFormState {
    pub draft: GroupDraft,
    pub focus: GroupField,
}

impl GroupFormState {
    fn next(&mut self) {
        let payers = self.draft.payers.len();
        self.focus = match self.focus {
            GroupField::Name => GroupField::Place,
            GroupField::Place => GroupField::Payer(0),
            GroupField::Payer(i) if i + 1 < payers => GroupField::Payer(i + 1),
            GroupField::Payer(_) => GroupField::Date,
            GroupField::Date => GroupField::Name,
        };
    }

    fn prev(&mut self) {
        let payers = self.draft.payers.len();
        self.focus = match self.focus {
            GroupField::Name => GroupField::Date,
            GroupField::Place => GroupField::Name,
            GroupField::Payer(0) => GroupField::Place,
            GroupField::Payer(i) => GroupField::Payer(i - 1),
            GroupField::Date => GroupField::Payer(payers.saturating_sub(1)),
        };
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            GroupField::Name => Some(&mut self.draft.name),
            GroupField::Place => Some(&mut self.draft.place),
            GroupField::Payer(i) => self.draft.payers.get_mut(i),
            GroupField::Date => Some(&mut self.draft.date),
        }
    }
}

#[derive(Debug, Default)]
pub struct ExpensesState {
    pub draft: ExpenseDraft,
    pub focus: Option<ExpenseField>,
    pub selected: usize,
}

#[derive(Debug, Default)]
pub struct ClaimsState {
    pub draft: ClaimDraft,
    pub focus: Option<ClaimField>,
    pub selected: usize,
}

#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    pub group_form: GroupFormState,
    pub section: Section,
    pub expenses: ExpensesState,
    pub claims: ClaimsState,
    /// Blocking alert for input errors; must be dismissed.
    pub alert: Option<String>,
    pub notices: NoticeBoard,
    pub currency_symbol: String,
    pub date_format: String,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            session: Session::new(),
            group_form: GroupFormState {
                draft: config.group.to_draft(),
                focus: GroupField::Name,
            },
            section: Section::Expenses,
            expenses: ExpensesState {
                focus: Some(ExpenseField::Item),
                ..ExpensesState::default()
            },
            claims: ClaimsState {
                focus: Some(ClaimField::Member),
                ..ClaimsState::default()
            },
            alert: None,
            notices: NoticeBoard::new(config.notice_ttl()),
            currency_symbol: config.currency_symbol.clone(),
            date_format: config.date_format.clone(),
        }
    }

    pub fn expense_focus(&self) -> ExpenseField {
        self.expenses.focus.unwrap_or(ExpenseField::Item)
    }

    pub fn claim_focus(&self) -> ClaimField {
        self.claims.focus.unwrap_or(ClaimField::Member)
    }

    /// Routes an engine error to the alert or the notice board.
    fn report(&mut self, err: EngineError, now: Instant) {
        tracing::debug!(%err, "operation rejected");
        match err.surface() {
            Surface::Alert => self.alert = Some(err.to_string()),
            Surface::Notice => self.notices.post(err.to_string(), NoticeLevel::Error, now),
        }
    }

    fn info(&mut self, message: impl Into<String>, now: Instant) {
        self.notices.post(message, NoticeLevel::Info, now);
    }

    /// Applies one user action. Engine errors never escape: they end up on
    /// screen.
    pub fn handle_action(&mut self, action: AppAction, now: Instant) {
        if self.alert.is_some() {
            if matches!(action, AppAction::Cancel | AppAction::Submit) {
                self.alert = None;
            }
            return;
        }

        if self.session.step() == Step::Group {
            self.handle_group(action, now);
            return;
        }

        match action {
            AppAction::Left | AppAction::Right => self.switch_section(now),
            _ => match self.section {
                Section::Expenses => self.handle_expenses(action, now),
                Section::Claims => self.handle_claims(action, now),
            },
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.notices.expire(now);
    }

    fn handle_group(&mut self, action: AppAction, now: Instant) {
        let form = &mut self.group_form;
        match action {
            AppAction::NextField => form.next(),
            AppAction::PrevField => form.prev(),
            AppAction::Input(ch) => {
                if let Some(field) = form.field_mut() {
                    field.push(ch);
                }
            }
            AppAction::Backspace => {
                if let Some(field) = form.field_mut() {
                    field.pop();
                }
            }
            AppAction::AddPayer => {
                form.draft.add_payer();
                form.focus = GroupField::Payer(form.draft.payers.len() - 1);
            }
            AppAction::Delete => {
                if let GroupField::Payer(i) = form.focus {
                    form.draft.remove_payer(i);
                    let last = form.draft.payers.len() - 1;
                    form.focus = GroupField::Payer(i.min(last));
                }
            }
            AppAction::Submit => match self.session.create_group(&self.group_form.draft) {
                Ok(group) => {
                    let message = format!("Group \"{}\" created", group.name);
                    self.info(message, now);
                }
                Err(err) => self.report(err, now),
            },
            AppAction::Cancel => self.notices.dismiss(),
            _ => {}
        }
    }

    fn switch_section(&mut self, now: Instant) {
        let target = match self.section {
            Section::Expenses => Section::Claims,
            Section::Claims => Section::Expenses,
        };
        if self.session.is_unlocked(target.step()) {
            self.section = target;
        } else {
            self.info("Add an expense before assigning it to members", now);
        }
    }

    fn handle_expenses(&mut self, action: AppAction, now: Instant) {
        let focus = self.expense_focus();
        let state = &mut self.expenses;
        match action {
            AppAction::NextField => state.focus = Some(focus.next()),
            AppAction::PrevField => state.focus = Some(focus.prev()),
            AppAction::Input(ch) => {
                if let Some(field) = state.draft.field_mut(focus) {
                    field.push(ch);
                }
            }
            AppAction::Backspace => {
                if let Some(field) = state.draft.field_mut(focus) {
                    field.pop();
                }
            }
            AppAction::Up => state.selected = state.selected.saturating_sub(1),
            AppAction::Down => {
                let len = self.session.items().len();
                state.selected = (state.selected + 1).min(len.saturating_sub(1));
            }
            AppAction::Submit => match state.draft.submit(&mut self.session) {
                Ok(saved) => {
                    state.focus = Some(ExpenseField::Item);
                    self.info(format!("Saved \"{}\"", saved.item()), now);
                }
                Err(err) => self.report(err, now),
            },
            AppAction::Cancel => {
                if state.draft.is_editing() {
                    state.draft.cancel();
                    state.focus = Some(ExpenseField::Item);
                } else {
                    self.notices.dismiss();
                }
            }
            AppAction::Edit => {
                let Some(key) = self.selected_item_key() else {
                    return;
                };
                match self.expenses.draft.begin_edit(&self.session, &key) {
                    Ok(()) => self.expenses.focus = Some(ExpenseField::Quantity),
                    Err(err) => self.report(err, now),
                }
            }
            AppAction::Delete => {
                let Some(key) = self.selected_item_key() else {
                    return;
                };
                match self.session.delete_item(&key) {
                    Ok(removed) => {
                        if self.expenses.draft.mode()
                            == &(engine::ExpenseMode::Editing {
                                key: removed.item().to_string(),
                            })
                        {
                            self.expenses.draft.cancel();
                        }
                        self.clamp_selection();
                        self.info(format!("Deleted \"{}\"", removed.item()), now);
                    }
                    Err(err) => self.report(err, now),
                }
            }
            _ => {}
        }
    }

    fn handle_claims(&mut self, action: AppAction, now: Instant) {
        let focus = self.claim_focus();
        let state = &mut self.claims;
        match action {
            AppAction::NextField => state.focus = Some(focus.next()),
            AppAction::PrevField => state.focus = Some(focus.prev()),
            AppAction::Input(ch) => {
                if let Some(field) = state.draft.field_mut(focus) {
                    field.push(ch);
                }
            }
            AppAction::Backspace => {
                if let Some(field) = state.draft.field_mut(focus) {
                    field.pop();
                }
            }
            AppAction::Up | AppAction::Down if focus == ClaimField::Item => {
                state
                    .draft
                    .cycle_item(&self.session, action == AppAction::Down);
            }
            AppAction::Up => state.selected = state.selected.saturating_sub(1),
            AppAction::Down => {
                let len = self.session.claims().len();
                state.selected = (state.selected + 1).min(len.saturating_sub(1));
            }
            AppAction::Submit => match state.draft.submit(&mut self.session) {
                Ok(saved) => {
                    state.focus = Some(ClaimField::Member);
                    self.info(
                        format!("Assigned {} of \"{}\" to {}", saved.quantity(), saved.item(), saved.member()),
                        now,
                    );
                }
                Err(err) => self.report(err, now),
            },
            AppAction::Cancel => {
                if state.draft.is_editing() {
                    state.draft.cancel();
                    state.focus = Some(ClaimField::Member);
                } else {
                    self.notices.dismiss();
                }
            }
            AppAction::Edit => {
                let index = state.selected;
                match state.draft.begin_edit(&self.session, index) {
                    Ok(()) => state.focus = Some(ClaimField::Quantity),
                    Err(err) => self.report(err, now),
                }
            }
            AppAction::Delete => {
                let index = state.selected;
                if let Some(removed) = self.session.delete_claim(index) {
                    state.draft.claim_deleted(index);
                    self.clamp_selection();
                    self.info(
                        format!("Removed {}'s \"{}\"", removed.member(), removed.item()),
                        now,
                    );
                }
            }
            _ => {}
        }
    }

    fn selected_item_key(&self) -> Option<String> {
        self.session
            .items()
            .get(self.expenses.selected)
            .map(|expense| expense.item().to_string())
    }

    fn clamp_selection(&mut self) {
        let items = self.session.items().len();
        let claims = self.session.claims().len();
        self.expenses.selected = self.expenses.selected.min(items.saturating_sub(1));
        self.claims.selected = self.claims.selected.min(claims.saturating_sub(1));
    }
}

pub struct App {
    config: AppConfig,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(&config);
        Self {
            config,
            state,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = self.config.tick_rate();

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    _ => {}
                }
            }
            self.state.tick(Instant::now());
        }

        tracing::info!("session closed");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match ui::keymap::map_key(key) {
            AppAction::Quit => self.should_quit = true,
            action => self.state.handle_action(action, Instant::now()),
        }
    }
}

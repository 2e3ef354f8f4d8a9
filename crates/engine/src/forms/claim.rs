use crate::{EngineError, MemberClaim, Money, Quantity, ResultEngine, Session};

use super::require_filled;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimField {
    Member,
    Item,
    Quantity,
    Price,
}

impl ClaimField {
    pub const ALL: [ClaimField; 4] = [Self::Member, Self::Item, Self::Quantity, Self::Price];

    pub fn label(self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Item => "Item",
            Self::Quantity => "Quantity",
            Self::Price => "Price per unit",
        }
    }

    /// Next focusable field. The price is read-only and is skipped.
    pub fn next(self) -> Self {
        match self {
            Self::Member => Self::Item,
            Self::Item => Self::Quantity,
            Self::Quantity | Self::Price => Self::Member,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Member | Self::Price => Self::Quantity,
            Self::Item => Self::Member,
            Self::Quantity => Self::Item,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClaimMode {
    #[default]
    Adding,
    Editing {
        index: usize,
    },
}

/// An item as offered by the claim form's selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemChoice {
    pub item: String,
    pub available: Quantity,
    /// Exhausted items can't be picked, unless already selected.
    pub selectable: bool,
}

/// Raw input of the member claim form.
#[derive(Clone, Debug, Default)]
pub struct ClaimDraft {
    member: String,
    item: String,
    quantity: String,
    price: String,
    mode: ClaimMode,
}

impl ClaimDraft {
    pub fn mode(&self) -> ClaimMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ClaimMode::Editing { .. })
    }

    fn editing_index(&self) -> Option<usize> {
        match self.mode {
            ClaimMode::Editing { index } => Some(index),
            ClaimMode::Adding => None,
        }
    }

    pub fn value(&self, field: ClaimField) -> &str {
        match field {
            ClaimField::Member => &self.member,
            ClaimField::Item => &self.item,
            ClaimField::Quantity => &self.quantity,
            ClaimField::Price => &self.price,
        }
    }

    /// Editable buffer for `field`. The item is chosen through
    /// [`select_item`](Self::select_item) and the price is copied from it,
    /// so both return `None`.
    pub fn field_mut(&mut self, field: ClaimField) -> Option<&mut String> {
        match field {
            ClaimField::Member => Some(&mut self.member),
            ClaimField::Quantity => Some(&mut self.quantity),
            ClaimField::Item | ClaimField::Price => None,
        }
    }

    /// Selects `key` and copies its current price.
    pub fn select_item(&mut self, session: &Session, key: &str) -> ResultEngine<()> {
        let expense = session
            .ledger()
            .get(key)
            .ok_or_else(|| EngineError::ItemNotFound(key.to_string()))?;
        self.item = expense.item().to_string();
        self.price = expense.price().to_string();
        Ok(())
    }

    /// Moves the selection to the next (or previous) selectable item,
    /// wrapping around. Does nothing when no item can be picked.
    pub fn cycle_item(&mut self, session: &Session, forward: bool) {
        let choices: Vec<ItemChoice> = self
            .choices(session)
            .into_iter()
            .filter(|choice| choice.selectable)
            .collect();
        if choices.is_empty() {
            return;
        }

        let current = choices.iter().position(|choice| choice.item == self.item);
        let len = choices.len();
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        // the key comes from the ledger itself, so it always resolves
        let _ = self.select_item(session, &choices[next].item);
    }

    /// Every ledger item with its availability for this draft.
    ///
    /// While editing, the claim under edit doesn't count against its item.
    pub fn choices(&self, session: &Session) -> Vec<ItemChoice> {
        let excluding = self.editing_index();
        session
            .items()
            .iter()
            .map(|expense| {
                let available = session.available_quantity(expense.item(), excluding);
                ItemChoice {
                    item: expense.item().to_string(),
                    available,
                    selectable: !available.is_zero() || expense.item() == self.item,
                }
            })
            .collect()
    }

    /// Total of the draft as typed, if quantity and price parse.
    pub fn preview_total(&self) -> Option<Money> {
        let quantity: Quantity = self.quantity.parse().ok()?;
        let price: Money = self.price.parse().ok()?;
        Money::total(quantity, price).ok()
    }

    /// Loads the claim at `index` into the form and enters edit mode.
    pub fn begin_edit(&mut self, session: &Session, index: usize) -> ResultEngine<()> {
        let claim = session
            .claims()
            .get(index)
            .ok_or(EngineError::ClaimNotFound(index))?;
        self.member = claim.member().to_string();
        self.item = claim.item().to_string();
        self.quantity = claim.quantity().to_string();
        self.price = claim.price().to_string();
        self.mode = ClaimMode::Editing { index };
        Ok(())
    }

    /// Adds or updates the claim. The draft is cleared only on success.
    pub fn submit(&mut self, session: &mut Session) -> ResultEngine<MemberClaim> {
        require_filled(
            &[&self.member, &self.item, &self.quantity, &self.price],
            "member expense",
        )?;
        let quantity: Quantity = self.quantity.parse()?;
        let price: Money = self.price.parse()?;

        let saved = match self.mode {
            ClaimMode::Adding => session.add_claim(&self.member, &self.item, quantity, price)?,
            ClaimMode::Editing { index } => {
                session.update_claim(index, &self.member, &self.item, quantity, price)?
            }
        }
        .clone();
        self.cancel();
        Ok(saved)
    }

    /// Keeps an edit in progress pointing at the same claim after the claim
    /// at `index` was deleted. Deleting the edited claim cancels the edit.
    pub fn claim_deleted(&mut self, index: usize) {
        if let ClaimMode::Editing { index: editing } = self.mode {
            if editing == index {
                self.cancel();
            } else if editing > index {
                self.mode = ClaimMode::Editing {
                    index: editing - 1,
                };
            }
        }
    }

    /// Clears every field and leaves edit mode.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

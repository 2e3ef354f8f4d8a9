use crate::{EngineError, ExpenseItem, Money, Quantity, ResultEngine, Session};

use super::require_filled;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpenseField {
    Item,
    Quantity,
    Price,
}

impl ExpenseField {
    pub const ALL: [ExpenseField; 3] = [Self::Item, Self::Quantity, Self::Price];

    pub fn label(self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::Quantity => "Quantity",
            Self::Price => "Price per unit",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Item => Self::Quantity,
            Self::Quantity => Self::Price,
            Self::Price => Self::Item,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Item => Self::Price,
            Self::Quantity => Self::Item,
            Self::Price => Self::Quantity,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExpenseMode {
    #[default]
    Adding,
    /// Editing the item with this key. The key is read-only.
    Editing { key: String },
}

/// Raw input of the expense form.
#[derive(Clone, Debug, Default)]
pub struct ExpenseDraft {
    item: String,
    quantity: String,
    price: String,
    mode: ExpenseMode,
}

impl ExpenseDraft {
    pub fn mode(&self) -> &ExpenseMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ExpenseMode::Editing { .. })
    }

    pub fn value(&self, field: ExpenseField) -> &str {
        match field {
            ExpenseField::Item => &self.item,
            ExpenseField::Quantity => &self.quantity,
            ExpenseField::Price => &self.price,
        }
    }

    /// Editable buffer for `field`, or `None` when the field is locked.
    pub fn field_mut(&mut self, field: ExpenseField) -> Option<&mut String> {
        match field {
            ExpenseField::Item if self.is_editing() => None,
            ExpenseField::Item => Some(&mut self.item),
            ExpenseField::Quantity => Some(&mut self.quantity),
            ExpenseField::Price => Some(&mut self.price),
        }
    }

    /// Loads the item `key` into the form and enters edit mode.
    pub fn begin_edit(&mut self, session: &Session, key: &str) -> ResultEngine<()> {
        let expense = session
            .ledger()
            .get(key)
            .ok_or_else(|| EngineError::ItemNotFound(key.to_string()))?;
        self.item = expense.item().to_string();
        self.quantity = expense.quantity().to_string();
        self.price = expense.price().to_string();
        self.mode = ExpenseMode::Editing {
            key: expense.item().to_string(),
        };
        Ok(())
    }

    /// Adds or updates the item. The draft is cleared only on success.
    pub fn submit(&mut self, session: &mut Session) -> ResultEngine<ExpenseItem> {
        require_filled(&[&self.item, &self.quantity, &self.price], "expense")?;
        let quantity: Quantity = self.quantity.parse()?;
        let price: Money = self.price.parse()?;

        let saved = match &self.mode {
            ExpenseMode::Adding => session.add_item(&self.item, quantity, price)?,
            ExpenseMode::Editing { key } => session.update_item(key, quantity, price)?,
        }
        .clone();
        self.cancel();
        Ok(saved)
    }

    /// Clears every field and leaves edit mode.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

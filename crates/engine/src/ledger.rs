//! The module contains the expense ledger: the pool of purchased items
//! member claims draw from.
use crate::{Money, Quantity, ResultEngine};

/// A purchased item.
///
/// `item` is the join key used by claims. It never changes after creation,
/// and `total` is recomputed on every write from quantity and price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseItem {
    item: String,
    quantity: Quantity,
    price: Money,
    total: Money,
}

impl ExpenseItem {
    pub(crate) fn new(item: String, quantity: Quantity, price: Money) -> ResultEngine<Self> {
        let total = Money::total(quantity, price)?;
        Ok(Self {
            item,
            quantity,
            price,
            total,
        })
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Price per unit.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Replaces quantity and price, leaving the item untouched on error.
    pub(crate) fn set_amounts(&mut self, quantity: Quantity, price: Money) -> ResultEngine<()> {
        let total = Money::total(quantity, price)?;
        self.quantity = quantity;
        self.price = price;
        self.total = total;
        Ok(())
    }
}

/// Ordered set of [`ExpenseItem`]s with unique, case-sensitive keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    items: Vec<ExpenseItem>,
}

impl Ledger {
    pub fn get(&self, key: &str) -> Option<&ExpenseItem> {
        self.items.iter().find(|expense| expense.item == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|expense| expense.item == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn items(&self) -> &[ExpenseItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseItem> {
        self.items.iter()
    }

    pub(crate) fn push(&mut self, expense: ExpenseItem) -> &ExpenseItem {
        self.items.push(expense);
        &self.items[self.items.len() - 1]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut ExpenseItem> {
        self.items.get_mut(index)
    }

    pub(crate) fn remove(&mut self, index: usize) -> ExpenseItem {
        self.items.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_sensitive() {
        let mut ledger = Ledger::default();
        ledger.push(
            ExpenseItem::new("Rice".to_string(), Quantity::from_units(1), Money::new(100))
                .unwrap(),
        );
        assert!(ledger.contains("Rice"));
        assert!(!ledger.contains("rice"));
        assert_eq!(ledger.position("Rice"), Some(0));
    }

    #[test]
    fn failed_amount_update_keeps_previous_values() {
        let mut expense =
            ExpenseItem::new("Rice".to_string(), Quantity::from_units(10), Money::new(200))
                .unwrap();
        assert_eq!(expense.total(), Money::new(2000));

        let err = expense.set_amounts(Quantity::from_hundredths(i64::MAX), Money::new(i64::MAX));
        assert!(err.is_err());
        assert_eq!(expense.quantity(), Quantity::from_units(10));
        assert_eq!(expense.total(), Money::new(2000));
    }
}

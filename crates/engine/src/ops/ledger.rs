use crate::{
    EngineError, ExpenseItem, Money, Quantity, ResultEngine, Session,
    util::normalize_required,
};

use super::{EXPENSE_FORM, ensure_non_negative, ensure_total_fits};

impl Session {
    /// Adds a new item to the ledger.
    ///
    /// Fails with [`EngineError::DuplicateItem`] when the key is already
    /// present (exact, case-sensitive match).
    pub fn add_item(
        &mut self,
        item: &str,
        quantity: Quantity,
        price: Money,
    ) -> ResultEngine<&ExpenseItem> {
        self.require_group()?;
        let item = normalize_required(item, EXPENSE_FORM)?;
        ensure_non_negative(quantity, price)?;
        if self.ledger.contains(&item) {
            tracing::debug!(%item, "duplicate item rejected");
            return Err(EngineError::DuplicateItem(item));
        }

        let expense = ExpenseItem::new(item, quantity, price)?;
        ensure_total_fits(
            self.ledger
                .iter()
                .map(|existing| existing.total())
                .chain([expense.total()]),
        )?;
        tracing::debug!(
            item = expense.item(),
            %quantity,
            %price,
            "item added"
        );
        Ok(self.ledger.push(expense))
    }

    /// Changes quantity and price of an existing item. The key itself can't
    /// change.
    ///
    /// Shrinking the quantity below what members already claimed fails with
    /// [`EngineError::QuantityBelowAllocated`], reporting the claimed floor.
    pub fn update_item(
        &mut self,
        key: &str,
        quantity: Quantity,
        price: Money,
    ) -> ResultEngine<&ExpenseItem> {
        ensure_non_negative(quantity, price)?;
        let index = self
            .ledger
            .position(key)
            .ok_or_else(|| EngineError::ItemNotFound(key.to_string()))?;

        let current = self.ledger.items()[index].quantity();
        if quantity < current {
            let used = self.used_quantity(key, None);
            if used > quantity {
                tracing::debug!(item = key, %used, %quantity, "quantity below allocated");
                return Err(EngineError::QuantityBelowAllocated {
                    item: key.to_string(),
                    used,
                });
            }
        }

        let total = Money::total(quantity, price)?;
        ensure_total_fits(self.ledger.iter().enumerate().map(|(position, expense)| {
            if position == index {
                total
            } else {
                expense.total()
            }
        }))?;

        let expense = self
            .ledger
            .get_mut(index)
            .ok_or_else(|| EngineError::ItemNotFound(key.to_string()))?;
        expense.set_amounts(quantity, price)?;
        tracing::debug!(item = key, %quantity, %price, "item updated");
        Ok(expense)
    }

    /// Removes an item. Refused while any claim still references it; claims
    /// are never removed as a side effect.
    pub fn delete_item(&mut self, key: &str) -> ResultEngine<ExpenseItem> {
        let index = self
            .ledger
            .position(key)
            .ok_or_else(|| EngineError::ItemNotFound(key.to_string()))?;
        if self.claims.iter().any(|claim| claim.item() == key) {
            tracing::debug!(item = key, "delete of claimed item rejected");
            return Err(EngineError::ItemInUse(key.to_string()));
        }

        let removed = self.ledger.remove(index);
        tracing::debug!(item = key, "item deleted");
        Ok(removed)
    }

    /// Sum of the quantities claimed on `key`, optionally ignoring the claim
    /// at index `excluding`.
    pub fn used_quantity(&self, key: &str, excluding: Option<usize>) -> Quantity {
        self.claims
            .iter()
            .enumerate()
            .filter(|(index, claim)| claim.item() == key && Some(*index) != excluding)
            .map(|(_, claim)| claim.quantity())
            .sum()
    }

    /// Quantity of `key` still free to claim.
    ///
    /// `excluding` leaves one claim out of the consumed total, so a claim
    /// under edit doesn't count against itself. Unknown keys have nothing
    /// available; the result is never negative.
    pub fn available_quantity(&self, key: &str, excluding: Option<usize>) -> Quantity {
        match self.ledger.get(key) {
            Some(expense) => expense
                .quantity()
                .saturating_sub(self.used_quantity(key, excluding)),
            None => Quantity::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{EngineError, GroupDraft, Money, Quantity, Session};

    fn session() -> Session {
        let group = GroupDraft {
            name: "Lunch".to_string(),
            place: "Canteen".to_string(),
            payers: vec!["Alice".to_string()],
            date: "2024-03-01".to_string(),
        }
        .validate()
        .unwrap();
        Session::builder().group(group).build()
    }

    #[test]
    fn add_item_computes_total_and_trims_key() {
        let mut session = session();
        let item = session
            .add_item("  Rice ", Quantity::from_units(10), Money::new(200))
            .unwrap();
        assert_eq!(item.item(), "Rice");
        assert_eq!(item.total(), Money::new(2000));
    }

    #[test]
    fn empty_item_name_is_missing_field() {
        let mut session = session();
        assert_eq!(
            session
                .add_item(" ", Quantity::from_units(1), Money::new(1))
                .unwrap_err(),
            EngineError::MissingField("expense".to_string())
        );
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut session = session();
        assert!(matches!(
            session.add_item("Rice", Quantity::from_units(-1), Money::new(1)),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let mut session = session();
        session
            .add_item("Rice", Quantity::from_units(1), Money::new(100))
            .unwrap();
        session
            .add_item("rice", Quantity::from_units(1), Money::new(100))
            .unwrap();
        assert_eq!(
            session
                .add_item("Rice", Quantity::from_units(2), Money::new(100))
                .unwrap_err(),
            EngineError::DuplicateItem("Rice".to_string())
        );
        assert_eq!(session.items().len(), 2);
    }

    #[test]
    fn update_and_delete_unknown_item() {
        let mut session = session();
        assert_eq!(
            session
                .update_item("Rice", Quantity::from_units(1), Money::new(1))
                .unwrap_err(),
            EngineError::ItemNotFound("Rice".to_string())
        );
        assert_eq!(
            session.delete_item("Rice").unwrap_err(),
            EngineError::ItemNotFound("Rice".to_string())
        );
    }

    #[test]
    fn growing_quantity_skips_floor_check() {
        let mut session = session();
        session
            .add_item("Rice", Quantity::from_units(10), Money::new(200))
            .unwrap();
        session
            .add_claim("A", "Rice", Quantity::from_units(10), Money::new(200))
            .unwrap();
        let item = session
            .update_item("Rice", Quantity::from_units(12), Money::new(250))
            .unwrap();
        assert_eq!(item.total(), Money::new(3000));
        assert_eq!(
            session.available_quantity("Rice", None),
            Quantity::from_units(2)
        );
    }

    #[test]
    fn shrinking_to_exactly_the_claimed_quantity_is_allowed() {
        let mut session = session();
        session
            .add_item("Rice", Quantity::from_units(10), Money::new(200))
            .unwrap();
        session
            .add_claim("A", "Rice", Quantity::from_units(6), Money::new(200))
            .unwrap();
        session
            .update_item("Rice", Quantity::from_units(6), Money::new(200))
            .unwrap();
        assert_eq!(session.available_quantity("Rice", None), Quantity::ZERO);
    }

    #[test]
    fn ledger_total_overflow_is_rejected() {
        let mut session = session();
        let huge: Quantity = "90000000000000000".parse().unwrap();
        let price: Money = "1".parse().unwrap();
        session.add_item("A", huge, price).unwrap();
        assert!(matches!(
            session.add_item("B", huge, price),
            Err(EngineError::InvalidAmount(_))
        ));
        assert_eq!(session.items().len(), 1);

        session
            .add_item("B", Quantity::from_units(1), price)
            .unwrap();
        assert!(matches!(
            session.update_item("B", huge, price),
            Err(EngineError::InvalidAmount(_))
        ));
        assert_eq!(session.items()[1].quantity(), Quantity::from_units(1));
        assert_eq!(
            session.ledger_total(),
            Money::new(9_000_000_000_000_000_100)
        );
    }

    #[test]
    fn unknown_item_has_nothing_available() {
        let session = session();
        assert_eq!(session.available_quantity("Rice", None), Quantity::ZERO);
        assert_eq!(session.used_quantity("Rice", None), Quantity::ZERO);
    }
}

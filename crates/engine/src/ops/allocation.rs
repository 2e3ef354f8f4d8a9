use crate::{
    EngineError, MemberClaim, Money, Quantity, ResultEngine, Session,
    util::normalize_required,
};

use super::{CLAIM_FORM, ensure_non_negative, ensure_total_fits};

impl Session {
    /// Reserves `quantity` of `item` for `member`.
    ///
    /// This is the admission check of the session: a request larger than
    /// the item's free quantity fails with [`EngineError::OverAllocation`].
    /// Claims are validated and committed one by one, in submission order.
    pub fn add_claim(
        &mut self,
        member: &str,
        item: &str,
        quantity: Quantity,
        price: Money,
    ) -> ResultEngine<&MemberClaim> {
        let claim = self.admit(None, member, item, quantity, price)?;
        tracing::debug!(
            member = claim.member(),
            item = claim.item(),
            %quantity,
            "claim added"
        );
        self.claims.push(claim);
        Ok(&self.claims[self.claims.len() - 1])
    }

    /// Replaces the claim at `index`.
    ///
    /// The claim's own previous reservation is left out of the availability
    /// check, so it can grow up to its old quantity plus the free headroom.
    pub fn update_claim(
        &mut self,
        index: usize,
        member: &str,
        item: &str,
        quantity: Quantity,
        price: Money,
    ) -> ResultEngine<&MemberClaim> {
        if index >= self.claims.len() {
            return Err(EngineError::ClaimNotFound(index));
        }
        let claim = self.admit(Some(index), member, item, quantity, price)?;
        tracing::debug!(
            index,
            member = claim.member(),
            item = claim.item(),
            %quantity,
            "claim updated"
        );
        self.claims[index] = claim;
        Ok(&self.claims[index])
    }

    /// Removes the claim at `index`, releasing its quantity.
    ///
    /// Never fails: an index that no longer exists is a no-op and returns
    /// `None`, other claims are untouched.
    pub fn delete_claim(&mut self, index: usize) -> Option<MemberClaim> {
        if index >= self.claims.len() {
            tracing::debug!(index, "delete of missing claim ignored");
            return None;
        }
        let removed = self.claims.remove(index);
        tracing::debug!(
            index,
            member = removed.member(),
            item = removed.item(),
            "claim deleted"
        );
        Some(removed)
    }

    /// Validates a claim write without committing it.
    fn admit(
        &self,
        excluding: Option<usize>,
        member: &str,
        item: &str,
        quantity: Quantity,
        price: Money,
    ) -> ResultEngine<MemberClaim> {
        let member = normalize_required(member, CLAIM_FORM)?;
        let item = normalize_required(item, CLAIM_FORM)?;
        ensure_non_negative(quantity, price)?;
        if !self.ledger.contains(&item) {
            return Err(EngineError::ItemNotFound(item));
        }

        let available = self.available_quantity(&item, excluding);
        if quantity > available {
            tracing::debug!(%item, %quantity, %available, "over-allocation rejected");
            return Err(EngineError::OverAllocation {
                item,
                requested: quantity,
                available,
            });
        }

        let claim = MemberClaim::new(member, item, quantity, price)?;
        ensure_total_fits(
            self.claims
                .iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != excluding)
                .map(|(_, existing)| existing.total())
                .chain([claim.total()]),
        )?;
        Ok(claim)
    }
}

#[cfg(test)]
mod tests {
    use crate::{EngineError, GroupDraft, Money, Quantity, Session};

    fn session_with_rice() -> Session {
        let group = GroupDraft {
            name: "Lunch".to_string(),
            place: "Canteen".to_string(),
            payers: vec!["Alice".to_string()],
            date: "2024-03-01".to_string(),
        }
        .validate()
        .unwrap();
        let mut session = Session::builder().group(group).build();
        session
            .add_item("Rice", Quantity::from_units(10), Money::new(200))
            .unwrap();
        session
    }

    #[test]
    fn claim_on_unknown_item_is_rejected() {
        let mut session = session_with_rice();
        assert_eq!(
            session
                .add_claim("A", "Beans", Quantity::ZERO, Money::new(100))
                .unwrap_err(),
            EngineError::ItemNotFound("Beans".to_string())
        );
        assert!(session.claims().is_empty());
    }

    #[test]
    fn claim_keeps_its_copied_price() {
        let mut session = session_with_rice();
        session
            .add_claim("A", "Rice", Quantity::from_units(2), Money::new(200))
            .unwrap();
        session
            .update_item("Rice", Quantity::from_units(10), Money::new(300))
            .unwrap();
        let claim = &session.claims()[0];
        assert_eq!(claim.price(), Money::new(200));
        assert_eq!(claim.total(), Money::new(400));
    }

    #[test]
    fn update_claim_out_of_range() {
        let mut session = session_with_rice();
        assert_eq!(
            session
                .update_claim(0, "A", "Rice", Quantity::from_units(1), Money::new(200))
                .unwrap_err(),
            EngineError::ClaimNotFound(0)
        );
    }

    #[test]
    fn update_claim_can_move_to_another_item() {
        let mut session = session_with_rice();
        session
            .add_item("Beans", Quantity::from_units(3), Money::new(100))
            .unwrap();
        session
            .add_claim("A", "Rice", Quantity::from_units(10), Money::new(200))
            .unwrap();

        let err = session
            .update_claim(0, "A", "Beans", Quantity::from_units(4), Money::new(100))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::OverAllocation {
                item: "Beans".to_string(),
                requested: Quantity::from_units(4),
                available: Quantity::from_units(3),
            }
        );

        session
            .update_claim(0, "A", "Beans", Quantity::from_units(3), Money::new(100))
            .unwrap();
        assert_eq!(
            session.available_quantity("Rice", None),
            Quantity::from_units(10)
        );
        assert_eq!(session.available_quantity("Beans", None), Quantity::ZERO);
    }

    #[test]
    fn claims_total_overflow_is_rejected() {
        let mut session = session_with_rice();
        let one = Quantity::from_units(1);
        session
            .add_claim("A", "Rice", one, Money::new(i64::MAX - 5))
            .unwrap();
        assert!(matches!(
            session.add_claim("B", "Rice", one, Money::new(200)),
            Err(EngineError::InvalidAmount(_))
        ));
        assert_eq!(session.claims().len(), 1);

        // replacing the large claim frees its share of the total
        session
            .update_claim(0, "A", "Rice", one, Money::new(200))
            .unwrap();
        session
            .add_claim("B", "Rice", one, Money::new(200))
            .unwrap();
        assert_eq!(session.claims_total(), Money::new(400));
    }

    #[test]
    fn missing_member_is_missing_field() {
        let mut session = session_with_rice();
        assert_eq!(
            session
                .add_claim("", "Rice", Quantity::from_units(1), Money::new(200))
                .unwrap_err(),
            EngineError::MissingField("member expense".to_string())
        );
    }
}

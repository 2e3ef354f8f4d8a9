//! The module contains the member claims: reservations of part of an
//! item's quantity by one member.
use crate::{Money, Quantity, ResultEngine};

/// A member's reservation against an [`ExpenseItem`](crate::ExpenseItem).
///
/// `item` is a weak reference by key and is resolved against the ledger on
/// every operation. `price` is a copy taken when the claim was written, so
/// later price changes on the item do not affect existing claims.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberClaim {
    member: String,
    item: String,
    quantity: Quantity,
    price: Money,
    total: Money,
}

impl MemberClaim {
    pub(crate) fn new(
        member: String,
        item: String,
        quantity: Quantity,
        price: Money,
    ) -> ResultEngine<Self> {
        let total = Money::total(quantity, price)?;
        Ok(Self {
            member,
            item,
            quantity,
            price,
            total,
        })
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Price per unit copied from the item.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn total(&self) -> Money {
        self.total
    }
}

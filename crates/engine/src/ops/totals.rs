//! Read-only views folded from the ledger and the claims on every call.
use crate::{Money, Quantity, Session};

/// Sum of one member's claim totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberTotal {
    pub member: String,
    pub total: Money,
}

/// How much of one item is claimed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemAllocation {
    pub item: String,
    pub quantity: Quantity,
    pub claimed: Quantity,
    pub available: Quantity,
}

impl Session {
    /// Total of every ledger item.
    pub fn ledger_total(&self) -> Money {
        self.ledger.iter().map(|expense| expense.total()).sum()
    }

    /// Total of every claim.
    pub fn claims_total(&self) -> Money {
        self.claims.iter().map(|claim| claim.total()).sum()
    }

    /// Ledger total not yet covered by claims. Informational only, never
    /// negative.
    pub fn unclaimed_total(&self) -> Money {
        self.ledger_total().saturating_sub(self.claims_total())
    }

    /// Per-member totals, in order of each member's first claim.
    pub fn member_totals(&self) -> Vec<MemberTotal> {
        let mut totals: Vec<MemberTotal> = Vec::new();
        for claim in &self.claims {
            match totals.iter_mut().find(|t| t.member == claim.member()) {
                Some(entry) => entry.total += claim.total(),
                None => totals.push(MemberTotal {
                    member: claim.member().to_string(),
                    total: claim.total(),
                }),
            }
        }
        totals
    }

    /// Claimed and free quantity of every ledger item.
    pub fn allocations(&self) -> Vec<ItemAllocation> {
        self.ledger
            .iter()
            .map(|expense| {
                let claimed = self.used_quantity(expense.item(), None);
                ItemAllocation {
                    item: expense.item().to_string(),
                    quantity: expense.quantity(),
                    claimed,
                    available: expense.quantity().saturating_sub(claimed),
                }
            })
            .collect()
    }
}

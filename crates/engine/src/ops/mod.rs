//! `Session` operations, one file per concern.
//!
//! Every write follows the same shape: resolve keys, validate against the
//! current state, then commit. Nothing is written before validation passes.
use crate::{EngineError, Money, Quantity, ResultEngine};

mod allocation;
mod ledger;
mod totals;

pub use totals::{ItemAllocation, MemberTotal};

const EXPENSE_FORM: &str = "expense";
const CLAIM_FORM: &str = "member expense";

fn ensure_non_negative(quantity: Quantity, price: Money) -> ResultEngine<()> {
    if quantity.is_negative() {
        return Err(EngineError::InvalidAmount(
            "quantity must not be negative".to_string(),
        ));
    }
    if price.is_negative() {
        return Err(EngineError::InvalidAmount(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// Fails when the amounts, summed, don't fit in [`Money`]. Every stored
/// total passes through here so the derived views can add freely.
fn ensure_total_fits(amounts: impl IntoIterator<Item = Money>) -> ResultEngine<()> {
    Money::checked_sum(amounts)
        .map(|_| ())
        .ok_or_else(|| EngineError::InvalidAmount("total too large".to_string()))
}

//! Form drafts for the expense and member-claim inputs.
//!
//! A draft holds raw text as typed, plus an explicit mode telling whether
//! submitting adds a new record or rewrites the one under edit. Field locks
//! that depend on the mode (the item key of an expense under edit, the
//! copied price of a claim) are enforced by `field_mut`.
mod claim;
mod expense;

pub use claim::{ClaimDraft, ClaimField, ClaimMode, ItemChoice};
pub use expense::{ExpenseDraft, ExpenseField, ExpenseMode};

use crate::{EngineError, ResultEngine};

fn require_filled(values: &[&str], form: &str) -> ResultEngine<()> {
    if values.iter().any(|value| value.trim().is_empty()) {
        return Err(EngineError::MissingField(form.to_string()));
    }
    Ok(())
}

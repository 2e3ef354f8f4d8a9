//! The module contains the errors the engine can return.
//!
//! Every error is recoverable: the operation that produced it changed
//! nothing, and its `Display` text is the message shown to the user.
//!
//! The errors are split in two families by [`EngineError::surface`]:
//!
//! - input errors ([`MissingField`], [`InvalidAmount`], [`InvalidDate`])
//!   are shown as a blocking alert;
//! - rule violations ([`DuplicateItem`], [`QuantityBelowAllocated`],
//!   [`ItemInUse`], [`OverAllocation`], ...) go to the transient notice.
//!
//!  [`MissingField`]: EngineError::MissingField
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`DuplicateItem`]: EngineError::DuplicateItem
//!  [`QuantityBelowAllocated`]: EngineError::QuantityBelowAllocated
//!  [`ItemInUse`]: EngineError::ItemInUse
//!  [`OverAllocation`]: EngineError::OverAllocation
use thiserror::Error;

use crate::Quantity;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Please fill all {0} fields")]
    MissingField(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Create the group first")]
    GroupNotCreated,
    #[error("The group has already been created")]
    GroupAlreadyCreated,
    #[error("An item named \"{0}\" already exists. Please edit the existing item instead.")]
    DuplicateItem(String),
    #[error("\"{0}\" item not found!")]
    ItemNotFound(String),
    #[error("Member expense #{0} not found!")]
    ClaimNotFound(usize),
    #[error("Cannot reduce quantity of \"{item}\" below {used} as it's already assigned to members")]
    QuantityBelowAllocated { item: String, used: Quantity },
    #[error("Cannot delete \"{0}\" as it's assigned to members. Remove member assignments first.")]
    ItemInUse(String),
    #[error("Cannot assign {requested} of \"{item}\". Only {available} available.")]
    OverAllocation {
        item: String,
        requested: Quantity,
        available: Quantity,
    },
}

/// Where an error should be shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    /// Blocking alert, stays until the user dismisses it.
    Alert,
    /// Transient notice, cleared by its timer or by the user.
    Notice,
}

impl EngineError {
    /// Classifies the error for the presentation layer.
    #[must_use]
    pub fn surface(&self) -> Surface {
        match self {
            Self::MissingField(_) | Self::InvalidAmount(_) | Self::InvalidDate(_) => {
                Surface::Alert
            }
            _ => Surface::Notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_allocation_message_reports_both_quantities() {
        let err = EngineError::OverAllocation {
            item: "Rice".to_string(),
            requested: Quantity::from_units(5),
            available: Quantity::from_units(4),
        };
        assert_eq!(
            err.to_string(),
            "Cannot assign 5 of \"Rice\". Only 4 available."
        );
    }

    #[test]
    fn quantity_floor_message_reports_used_quantity() {
        let err = EngineError::QuantityBelowAllocated {
            item: "Rice".to_string(),
            used: Quantity::from_hundredths(650),
        };
        assert!(err.to_string().contains("below 6.5"));
    }

    #[test]
    fn input_errors_are_alerts() {
        assert_eq!(
            EngineError::MissingField("expense".to_string()).surface(),
            Surface::Alert
        );
        assert_eq!(
            EngineError::InvalidAmount("x".to_string()).surface(),
            Surface::Alert
        );
        assert_eq!(
            EngineError::ItemInUse("Rice".to_string()).surface(),
            Surface::Notice
        );
    }
}

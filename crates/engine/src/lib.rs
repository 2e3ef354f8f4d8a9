//! Expense-splitting engine.
//!
//! A [`Session`] owns the group, the ledger of purchased items and the
//! member claims against those items. Every write validates first and
//! commits only on success, so a rejected operation leaves the session
//! untouched.
//!
//! The central rule is conservation: for every item, the quantities
//! claimed by members never add up to more than the item's quantity.
//!
//! ```rust
//! use engine::{GroupDraft, Money, Quantity, Session};
//!
//! let mut session = Session::new();
//! session
//!     .create_group(&GroupDraft {
//!         name: "Lunch".to_string(),
//!         place: "Canteen".to_string(),
//!         payers: vec!["Alice".to_string()],
//!         date: "2024-03-01".to_string(),
//!     })
//!     .unwrap();
//! session.add_item("Rice", Quantity::from_units(10), Money::new(200)).unwrap();
//! session.add_claim("A", "Rice", Quantity::from_units(6), Money::new(200)).unwrap();
//! assert_eq!(session.available_quantity("Rice", None), Quantity::from_units(4));
//! ```
pub use claims::MemberClaim;
pub use error::{EngineError, Surface};
pub use forms::{
    ClaimDraft, ClaimField, ClaimMode, ExpenseDraft, ExpenseField, ExpenseMode, ItemChoice,
};
pub use group::{GroupContext, GroupDraft};
pub use ledger::{ExpenseItem, Ledger};
pub use money::Money;
pub use notice::{NOTICE_TTL, Notice, NoticeBoard, NoticeLevel};
pub use ops::{ItemAllocation, MemberTotal};
pub use quantity::Quantity;
pub use step::Step;

mod claims;
mod error;
mod forms;
mod group;
mod ledger;
mod money;
mod notice;
mod ops;
mod quantity;
mod step;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Working state of one expense-splitting session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    group: Option<GroupContext>,
    ledger: Ledger,
    claims: Vec<MemberClaim>,
}

impl Session {
    /// Creates an empty session, waiting for its group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a builder for `Session`. Help to build the struct.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    pub fn group(&self) -> Option<&GroupContext> {
        self.group.as_ref()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn items(&self) -> &[ExpenseItem] {
        self.ledger.items()
    }

    pub fn claims(&self) -> &[MemberClaim] {
        &self.claims
    }

    /// The furthest step the session has unlocked.
    pub fn step(&self) -> Step {
        if self.group.is_none() {
            Step::Group
        } else if self.ledger.is_empty() {
            Step::Expenses
        } else {
            Step::Claims
        }
    }

    pub fn is_unlocked(&self, step: Step) -> bool {
        step <= self.step()
    }

    /// Creates the group from its draft. Only one group per session.
    pub fn create_group(&mut self, draft: &GroupDraft) -> ResultEngine<&GroupContext> {
        if self.group.is_some() {
            return Err(EngineError::GroupAlreadyCreated);
        }
        let group = draft
            .validate()
            .inspect_err(|err| tracing::debug!(%err, "group creation rejected"))?;
        tracing::info!(
            name = %group.name,
            place = %group.place,
            payers = group.payers.len(),
            "group created"
        );
        Ok(self.group.insert(group))
    }

    fn require_group(&self) -> ResultEngine<&GroupContext> {
        self.group.as_ref().ok_or(EngineError::GroupNotCreated)
    }
}

/// The builder for `Session`
#[derive(Default)]
pub struct SessionBuilder {
    group: Option<GroupContext>,
}

impl SessionBuilder {
    /// Start from an already validated group.
    pub fn group(mut self, group: GroupContext) -> SessionBuilder {
        self.group = Some(group);
        self
    }

    /// Construct `Session`
    pub fn build(self) -> Session {
        Session {
            group: self.group,
            ..Session::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> GroupDraft {
        GroupDraft {
            name: "Lunch".to_string(),
            place: "Canteen".to_string(),
            payers: vec!["Alice".to_string()],
            date: "2024-03-01".to_string(),
        }
    }

    #[test]
    fn steps_unlock_in_order() {
        let mut session = Session::new();
        assert_eq!(session.step(), Step::Group);
        assert!(!session.is_unlocked(Step::Expenses));

        session.create_group(&draft()).unwrap();
        assert_eq!(session.step(), Step::Expenses);
        assert!(!session.is_unlocked(Step::Claims));

        session
            .add_item("Rice", Quantity::from_units(1), Money::new(100))
            .unwrap();
        assert_eq!(session.step(), Step::Claims);
        assert!(session.is_unlocked(Step::Group));
    }

    #[test]
    fn group_is_created_once() {
        let mut session = Session::new();
        session.create_group(&draft()).unwrap();
        let mut other = draft();
        other.name = "Dinner".to_string();
        assert_eq!(
            session.create_group(&other).unwrap_err(),
            EngineError::GroupAlreadyCreated
        );
        assert_eq!(session.group().unwrap().name, "Lunch");
    }

    #[test]
    fn invalid_group_leaves_session_waiting() {
        let mut session = Session::new();
        let mut bad = draft();
        bad.payers = vec![String::new()];
        assert!(session.create_group(&bad).is_err());
        assert_eq!(session.step(), Step::Group);
    }

    #[test]
    fn ledger_is_gated_behind_group() {
        let mut session = Session::new();
        assert_eq!(
            session
                .add_item("Rice", Quantity::from_units(1), Money::new(100))
                .unwrap_err(),
            EngineError::GroupNotCreated
        );
    }

    #[test]
    fn builder_seeds_group() {
        let group = draft().validate().unwrap();
        let session = Session::builder().group(group.clone()).build();
        assert_eq!(session.group(), Some(&group));
        assert_eq!(session.step(), Step::Expenses);
    }
}

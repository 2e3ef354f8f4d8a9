//! The group an expense-splitting session belongs to.
use chrono::NaiveDate;

use crate::{EngineError, ResultEngine, util::normalize_required};

const REQUIRED: &str = "required";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifying metadata of the session. Created once, never edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupContext {
    pub name: String,
    pub place: String,
    pub payers: Vec<String>,
    pub date: NaiveDate,
}

impl GroupContext {
    /// Payers joined for display, e.g. `Alice, Bob`.
    #[must_use]
    pub fn payers_label(&self) -> String {
        self.payers.join(", ")
    }
}

/// Raw group creation form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupDraft {
    pub name: String,
    pub place: String,
    pub payers: Vec<String>,
    /// `YYYY-MM-DD`.
    pub date: String,
}

impl Default for GroupDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            place: String::new(),
            payers: vec![String::new()],
            date: String::new(),
        }
    }
}

impl GroupDraft {
    /// Appends an empty payer slot.
    pub fn add_payer(&mut self) {
        self.payers.push(String::new());
    }

    /// Removes a payer slot, always keeping at least one.
    pub fn remove_payer(&mut self, index: usize) {
        if self.payers.len() > 1 && index < self.payers.len() {
            self.payers.remove(index);
        }
    }

    /// Validates the draft into a [`GroupContext`].
    ///
    /// Empty payer slots are dropped, the order of the others is kept.
    pub fn validate(&self) -> ResultEngine<GroupContext> {
        let name = normalize_required(&self.name, REQUIRED)?;
        let place = normalize_required(&self.place, REQUIRED)?;
        let date_raw = normalize_required(&self.date, REQUIRED)?;

        let payers: Vec<String> = self
            .payers
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(ToString::to_string)
            .collect();
        if payers.is_empty() {
            return Err(EngineError::MissingField(REQUIRED.to_string()));
        }

        let date = NaiveDate::parse_from_str(&date_raw, DATE_FORMAT)
            .map_err(|_| EngineError::InvalidDate(format!("expected YYYY-MM-DD, got {date_raw}")))?;

        Ok(GroupContext {
            name,
            place,
            payers,
            date,
        })
    }
}

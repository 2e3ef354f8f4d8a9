/// Steps of the session, unlocked in order.
///
/// `Group` until the group exists, `Expenses` while the ledger is empty,
/// `Claims` once at least one item can be claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Group,
    Expenses,
    Claims,
}

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Expenses => "Expenses",
            Self::Claims => "Claims",
        }
    }
}

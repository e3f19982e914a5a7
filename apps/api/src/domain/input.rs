/// Outcome of feeding raw user input into a wizard field
///
/// Rejected input never fails the flow: the field keeps its last valid
/// value and the caller may surface `reason` to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum FieldUpdate {
    Applied,
    Ignored { reason: String },
}

impl FieldUpdate {
    pub fn ignored(reason: impl Into<String>) -> Self {
        FieldUpdate::Ignored {
            reason: reason.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, FieldUpdate::Applied)
    }
}

use crate::field::EditOp;

#[derive(Debug, Clone)]
pub enum FormCommand {
    FocusNextField,
    FocusPrevField,
    Edit(EditOp),
    /// Commit a value chosen from the time picker into the focused field.
    Pick(String),
    Reset,
}

pub(crate) mod input;
pub(crate) mod keymap;
mod masked_form;
mod options;
mod runtime;
mod status;
mod terminal;
mod validation;

pub use masked_form::MaskedForm;
pub use options::UiOptions;
pub use validation::{ValidationOutcome, validate_form};

mod actions;
mod error;
mod layout;
mod reducers;
mod state;

pub use actions::FormCommand;
pub use error::FieldError;
pub use layout::{FieldSpec, FormLayout, payment_form};
pub use reducers::{FormEngine, apply_command};
pub use state::{FormField, FormState};

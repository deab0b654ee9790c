#![deny(rust_2018_idioms)]
//! Live-formatting masked inputs for dates, phone numbers, times and amounts.
//!
//! Each keystroke runs through the same pipeline: the raw text is reduced to
//! its meaningful characters, re-masked for display, the caret is carried
//! across the reformat, and the result is classified and decoded into a
//! canonical value the host stores.
//!
//! ```
//! use maskfield::prelude::*;
//!
//! let mut field = MaskedField::new(FieldKind::Date);
//! let mut last = None;
//! for ch in "12032024".chars() {
//!     last = field.apply(EditOp::Insert(ch.to_string())).or(last);
//! }
//! assert_eq!(field.display(), "12/03/2024");
//! assert_eq!(last.map(|change| change.wire()).as_deref(), Some("2024-03-12"));
//! ```

pub mod domain;
pub mod engine;
pub mod field;
pub mod form;
pub mod io;

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
mod presentation;

#[cfg(feature = "tui")]
pub use app::{MaskedForm, UiOptions, ValidationOutcome, validate_form};
pub use domain::FieldKind;
pub use engine::{CanonicalValue, Validity};
pub use field::{
    CanonicalChange, EditOp, FieldAttributes, FieldReport, MaskedField, SyncOutcome, TimePicker,
};
pub use form::{FieldError, FieldSpec, FormLayout, FormState, payment_form};
pub use io::{
    DocumentFormat, FormDocument, OutputDestination, OutputOptions, emit, parse_document_str,
    read_document,
};

pub mod prelude {
    #[cfg(feature = "tui")]
    pub use super::{MaskedForm, UiOptions};
    pub use super::{
        CanonicalChange, CanonicalValue, EditOp, FieldKind, FormLayout, FormState, MaskedField,
        SyncOutcome, Validity,
    };
}

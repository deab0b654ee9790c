//! The text-shaping pipeline shared by every field kind:
//! raw text → extracted stream → masked display → caret remap → validity →
//! canonical value. Every function here is total over its inputs.

mod calendar;
mod codec;
mod cursor;
mod extract;
mod format;
mod validate;

pub use calendar::{ClockTime, IsoDate, is_leap_year};
pub use codec::{AmountCodec, CanonicalCodec, CanonicalValue, DateCodec, PhoneCodec, TimeCodec};
pub use cursor::{place_after, translate};
pub use extract::{Extracted, extract, extract_with_sources};
pub(crate) use extract::literal_prefix_len;
pub use format::format;
pub use validate::{Assessment, Validity, assess, assess_extracted, classify};

/// Display string for a wire value: `format(encode(wire))`, empty when the
/// value cannot be read.
pub fn render_wire(wire: &str, kind: crate::domain::FieldKind) -> String {
    kind.codec()
        .encode(wire)
        .map(|stream| format(&stream, kind))
        .unwrap_or_default()
}

mod kind;
mod mask;

pub use kind::FieldKind;
pub use mask::{
    AMOUNT_MASK, DATE_MASK, GroupedMask, MaskSpec, PHONE_MASK, SLOT, TIME_MASK, TemplateMask,
};

use serde::{Deserialize, Serialize};

use crate::domain::FieldKind;

use super::{codec::CanonicalValue, extract::extract};

/// Classification of a display string. Only `Invalid` is an error, and even
/// that is a visual state: it never blocks further typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    Empty,
    Partial,
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_error(self) -> bool {
        self == Validity::Invalid
    }

    pub fn is_complete(self) -> bool {
        matches!(self, Validity::Valid | Validity::Invalid)
    }

    pub fn label(self) -> &'static str {
        match self {
            Validity::Empty => "empty",
            Validity::Partial => "partial",
            Validity::Valid => "valid",
            Validity::Invalid => "invalid",
        }
    }
}

/// Validity plus the canonical value it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub validity: Validity,
    pub canonical: Option<CanonicalValue>,
}

pub fn classify(display: &str, kind: FieldKind) -> Validity {
    assess(display, kind).validity
}

pub fn assess(display: &str, kind: FieldKind) -> Assessment {
    if display.is_empty() {
        return Assessment {
            validity: Validity::Empty,
            canonical: None,
        };
    }
    assess_extracted(&extract(display, kind), kind)
}

pub fn assess_extracted(extracted: &str, kind: FieldKind) -> Assessment {
    if extracted.is_empty() {
        return Assessment {
            validity: Validity::Empty,
            canonical: None,
        };
    }
    if let Some(required) = kind.mask().required_len()
        && extracted.len() < required
    {
        return Assessment {
            validity: Validity::Partial,
            canonical: None,
        };
    }
    let canonical = kind.codec().decode(extracted);
    let validity = if canonical.is_some() {
        Validity::Valid
    } else {
        Validity::Invalid
    };
    Assessment {
        validity,
        canonical,
    }
}

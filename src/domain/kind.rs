use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::mask::{AMOUNT_MASK, DATE_MASK, MaskSpec, PHONE_MASK, TIME_MASK};

/// The four masked input flavours a field can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Date,
    Phone,
    Time,
    Amount,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Date,
        FieldKind::Phone,
        FieldKind::Time,
        FieldKind::Amount,
    ];

    pub fn mask(self) -> &'static MaskSpec {
        match self {
            FieldKind::Date => &DATE_MASK,
            FieldKind::Phone => &PHONE_MASK,
            FieldKind::Time => &TIME_MASK,
            FieldKind::Amount => &AMOUNT_MASK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Date => "date",
            FieldKind::Phone => "phone",
            FieldKind::Time => "time",
            FieldKind::Amount => "amount",
        }
    }

    /// Hint rendered while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            FieldKind::Date => "dd/mm/yyyy",
            FieldKind::Phone => "+998 __ ___ __ __",
            FieldKind::Time => "HH:MM",
            FieldKind::Amount => "0.00",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| {
                format!("unknown field kind '{raw}' (expected date, phone, time or amount)")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_names_case_insensitively() {
        assert_eq!("Date".parse::<FieldKind>(), Ok(FieldKind::Date));
        assert_eq!(" amount ".parse::<FieldKind>(), Ok(FieldKind::Amount));
        assert!("email".parse::<FieldKind>().is_err());
    }

    #[test]
    fn display_matches_serde_name() {
        for kind in FieldKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}

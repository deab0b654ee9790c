use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::domain::FieldKind;

use super::{
    calendar::{ClockTime, IsoDate},
    extract::extract,
};

const DATE_DIGITS: usize = 8;
const PHONE_DIGITS: usize = 9;
const TIME_DIGITS: usize = 4;
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;
/// First amount the grouped mask can no longer show in full.
const AMOUNT_LIMIT: f64 = 1e13;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{4})-(\d{1,2})-(\d{1,2})\s*$").expect("valid regex"));
static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").expect("valid regex"));

/// The typed value a field stands for, independent of how it is displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalValue {
    Date(IsoDate),
    /// National number digits under the fixed `+998` country context.
    Phone(String),
    Amount(f64),
    Time(ClockTime),
}

impl CanonicalValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            CanonicalValue::Date(_) => FieldKind::Date,
            CanonicalValue::Phone(_) => FieldKind::Phone,
            CanonicalValue::Amount(_) => FieldKind::Amount,
            CanonicalValue::Time(_) => FieldKind::Time,
        }
    }

    /// String form exchanged with the host (`YYYY-MM-DD`, digits, decimal, `HH:MM`).
    pub fn to_wire(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> Value {
        match self {
            CanonicalValue::Amount(amount) => Value::from(*amount),
            other => Value::String(other.to_string()),
        }
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalValue::Date(date) => fmt::Display::fmt(date, f),
            CanonicalValue::Phone(digits) => f.write_str(digits),
            CanonicalValue::Amount(amount) => write!(f, "{amount}"),
            CanonicalValue::Time(time) => fmt::Display::fmt(time, f),
        }
    }
}

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CanonicalValue::Amount(amount) => serializer.serialize_f64(*amount),
            other => serializer.collect_str(other),
        }
    }
}

/// Two-way mapping between a kind's extracted stream and its canonical value.
///
/// Both directions are total: anything that cannot be read yields `None`.
pub trait CanonicalCodec: Sync {
    fn kind(&self) -> FieldKind;

    /// Decode a complete stream. `None` while incomplete or out of range.
    fn decode(&self, extracted: &str) -> Option<CanonicalValue>;

    /// Turn a wire value into the extracted stream that displays it.
    /// Range checks are left to `decode`, so impossible values still show up
    /// (and classify as invalid) instead of vanishing.
    fn encode(&self, wire: &str) -> Option<String>;

    fn parse_wire(&self, wire: &str) -> Option<CanonicalValue> {
        self.encode(wire).and_then(|stream| self.decode(&stream))
    }
}

pub struct DateCodec;
pub struct PhoneCodec;
pub struct AmountCodec;
pub struct TimeCodec;

impl FieldKind {
    pub fn codec(self) -> &'static dyn CanonicalCodec {
        match self {
            FieldKind::Date => &DateCodec,
            FieldKind::Phone => &PhoneCodec,
            FieldKind::Amount => &AmountCodec,
            FieldKind::Time => &TimeCodec,
        }
    }
}

fn all_digits(stream: &str, len: usize) -> bool {
    stream.len() == len && stream.bytes().all(|byte| byte.is_ascii_digit())
}

impl CanonicalCodec for DateCodec {
    fn kind(&self) -> FieldKind {
        FieldKind::Date
    }

    fn decode(&self, extracted: &str) -> Option<CanonicalValue> {
        if !all_digits(extracted, DATE_DIGITS) {
            return None;
        }
        let day: u32 = extracted[0..2].parse().ok()?;
        let month: u32 = extracted[2..4].parse().ok()?;
        let year: i32 = extracted[4..8].parse().ok()?;
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !YEAR_RANGE.contains(&year)
        {
            return None;
        }
        IsoDate::new(year, month, day).map(CanonicalValue::Date)
    }

    fn encode(&self, wire: &str) -> Option<String> {
        let caps = ISO_DATE.captures(wire)?;
        let year = &caps[1];
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        Some(format!("{day:02}{month:02}{year}"))
    }
}

impl CanonicalCodec for PhoneCodec {
    fn kind(&self) -> FieldKind {
        FieldKind::Phone
    }

    fn decode(&self, extracted: &str) -> Option<CanonicalValue> {
        all_digits(extracted, PHONE_DIGITS).then(|| CanonicalValue::Phone(extracted.to_string()))
    }

    fn encode(&self, wire: &str) -> Option<String> {
        let stream = extract(wire, FieldKind::Phone);
        (!stream.is_empty()).then_some(stream)
    }
}

impl CanonicalCodec for AmountCodec {
    fn kind(&self) -> FieldKind {
        FieldKind::Amount
    }

    fn decode(&self, extracted: &str) -> Option<CanonicalValue> {
        if extracted.is_empty() {
            return None;
        }
        let amount = match extracted.parse::<f64>() {
            Ok(value) if value.is_finite() => value.max(0.0),
            _ => 0.0,
        };
        Some(CanonicalValue::Amount(amount))
    }

    fn encode(&self, wire: &str) -> Option<String> {
        let amount = wire.trim().replace(',', ".").parse::<f64>().ok()?;
        (amount.is_finite() && (0.0..AMOUNT_LIMIT).contains(&amount))
            .then(|| format!("{amount:.2}"))
    }
}

impl CanonicalCodec for TimeCodec {
    fn kind(&self) -> FieldKind {
        FieldKind::Time
    }

    fn decode(&self, extracted: &str) -> Option<CanonicalValue> {
        if !all_digits(extracted, TIME_DIGITS) {
            return None;
        }
        let hour: u8 = extracted[0..2].parse().ok()?;
        let minute: u8 = extracted[2..4].parse().ok()?;
        ClockTime::new(hour, minute).map(CanonicalValue::Time)
    }

    fn encode(&self, wire: &str) -> Option<String> {
        let caps = CLOCK.captures(wire)?;
        let hour: u8 = caps[1].parse().ok()?;
        Some(format!("{hour:02}{}", &caps[2]))
    }
}

/// Placeholder in a template pattern that accepts exactly one digit.
pub const SLOT: char = '#';

/// Display shape of a field kind. Every mask is static data; the engine
/// walks it rather than branching on the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskSpec {
    /// Fixed-width pattern of digit slots and literal separators.
    Template(TemplateMask),
    /// Free-length number grouped from the right with an optional fraction.
    Grouped(GroupedMask),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMask {
    pub pattern: &'static str,
    /// Digits dropped from the front of an over-long stream when they spell
    /// the country code.
    pub country_code: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedMask {
    pub group_len: usize,
    pub group_separator: char,
    pub decimal_separator: char,
    pub accepted_decimals: &'static [char],
    /// Cap on significant integer digits. Leading zeros are free.
    pub integer_digits: usize,
    pub fraction_digits: usize,
}

pub static DATE_MASK: MaskSpec = MaskSpec::Template(TemplateMask {
    pattern: "##/##/####",
    country_code: None,
});

pub static PHONE_MASK: MaskSpec = MaskSpec::Template(TemplateMask {
    pattern: "+998 ## ### ## ##",
    country_code: Some("998"),
});

pub static TIME_MASK: MaskSpec = MaskSpec::Template(TemplateMask {
    pattern: "##:##",
    country_code: None,
});

pub static AMOUNT_MASK: MaskSpec = MaskSpec::Grouped(GroupedMask {
    group_len: 3,
    group_separator: ' ',
    decimal_separator: '.',
    accepted_decimals: &['.', ','],
    // 13 + 2 fraction digits stays within what an f64 holds exactly
    integer_digits: 13,
    fraction_digits: 2,
});

impl TemplateMask {
    pub fn digit_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.pattern
            .chars()
            .enumerate()
            .filter_map(|(pos, ch)| (ch == SLOT).then_some(pos))
    }

    pub fn literal_at(&self, pos: usize) -> Option<char> {
        self.pattern.chars().nth(pos).filter(|ch| *ch != SLOT)
    }

    pub fn max_digits(&self) -> usize {
        self.pattern.chars().filter(|ch| *ch == SLOT).count()
    }

    /// Literal run that precedes the first slot (`+998 ` for phones).
    pub fn leading_literals(&self) -> &'static str {
        let end = self.pattern.find(SLOT).unwrap_or(self.pattern.len());
        &self.pattern[..end]
    }
}

impl MaskSpec {
    /// Upper bound on meaningful characters; `None` when unbounded.
    pub fn max_digits(&self) -> Option<usize> {
        match self {
            MaskSpec::Template(mask) => Some(mask.max_digits()),
            MaskSpec::Grouped(_) => None,
        }
    }

    /// Length the extracted stream must reach before it is judged at all.
    /// Grouped numbers are complete as soon as they hold anything.
    pub fn required_len(&self) -> Option<usize> {
        self.max_digits()
    }

    pub fn leading_literals(&self) -> &'static str {
        match self {
            MaskSpec::Template(mask) => mask.leading_literals(),
            MaskSpec::Grouped(_) => "",
        }
    }
}

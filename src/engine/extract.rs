use crate::domain::{FieldKind, GroupedMask, MaskSpec, TemplateMask};

/// Characters kept from a raw input, each paired with the char index it was
/// taken from. Sources are strictly ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    text: String,
    sources: Vec<usize>,
}

impl Extracted {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    /// Number of kept characters that sat strictly before `caret` in the raw text.
    pub fn kept_before(&self, caret: usize) -> usize {
        self.sources.partition_point(|source| *source < caret)
    }

    fn push(&mut self, ch: char, source: usize) {
        self.text.push(ch);
        self.sources.push(source);
    }
}

/// Reduce `raw` to the characters meaningful for `kind`. Never fails.
pub fn extract(raw: &str, kind: FieldKind) -> String {
    extract_with_sources(raw, kind).into_string()
}

pub fn extract_with_sources(raw: &str, kind: FieldKind) -> Extracted {
    match kind.mask() {
        MaskSpec::Template(mask) => extract_template(raw, mask),
        MaskSpec::Grouped(mask) => extract_grouped(raw, mask),
    }
}

/// Length of the longest prefix of `raw` that also prefixes `literals`.
pub(crate) fn literal_prefix_len(raw: &str, literals: &str) -> usize {
    raw.chars()
        .zip(literals.chars())
        .take_while(|(typed, literal)| typed == literal)
        .count()
}

fn extract_template(raw: &str, mask: &TemplateMask) -> Extracted {
    let skip = literal_prefix_len(raw, mask.leading_literals());
    let digits: Vec<(usize, char)> = raw
        .chars()
        .enumerate()
        .skip(skip)
        .filter(|(_, ch)| ch.is_ascii_digit())
        .collect();

    // Only a bare international number loses its code: no literal run in
    // front and exactly the code plus a national number. Anything else is
    // truncated to the mask.
    let max = mask.max_digits();
    let start = match mask.country_code {
        Some(code)
            if skip == 0
                && digits.len() == max + code.len()
                && digits
                    .iter()
                    .map(|(_, ch)| *ch)
                    .take(code.len())
                    .eq(code.chars()) =>
        {
            code.len()
        }
        _ => 0,
    };

    let mut out = Extracted::default();
    for &(source, ch) in digits.iter().skip(start).take(max) {
        out.push(ch, source);
    }
    out
}

// Separators after the first decimal mark are noise; digits that follow
// them fold into the fraction until it is full. Integer digits past the
// significant-digit cap are dropped like any other overflow.
fn extract_grouped(raw: &str, mask: &GroupedMask) -> Extracted {
    let mut out = Extracted::default();
    let mut seen_decimal = false;
    let mut integer = 0usize;
    let mut fraction = 0usize;
    for (source, ch) in raw.chars().enumerate() {
        if ch.is_ascii_digit() {
            if seen_decimal {
                if fraction >= mask.fraction_digits {
                    continue;
                }
                fraction += 1;
            } else if integer > 0 || ch != '0' {
                if integer >= mask.integer_digits {
                    continue;
                }
                integer += 1;
            }
            out.push(ch, source);
        } else if !seen_decimal && mask.accepted_decimals.contains(&ch) {
            seen_decimal = true;
            out.push(mask.decimal_separator, source);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_keeps_digits_only() {
        assert_eq!(extract("12/03/2024", FieldKind::Date), "12032024");
        assert_eq!(extract("1a2 b/0", FieldKind::Date), "120");
        assert_eq!(extract("", FieldKind::Date), "");
    }

    #[test]
    fn date_caps_at_eight_digits() {
        assert_eq!(extract("1203202499", FieldKind::Date), "12032024");
    }

    #[test]
    fn phone_skips_literal_prefix() {
        assert_eq!(extract("+998 90 123 45 67", FieldKind::Phone), "901234567");
        assert_eq!(extract("+998 9", FieldKind::Phone), "9");
        // prefix damaged by a backspace over its trailing space
        assert_eq!(extract("+99890", FieldKind::Phone), "90");
    }

    #[test]
    fn phone_drops_country_code_from_long_streams() {
        assert_eq!(extract("998901234567", FieldKind::Phone), "901234567");
        assert_eq!(extract("901234567", FieldKind::Phone), "901234567");
        // short streams that merely start with 998 are national digits
        assert_eq!(extract("998", FieldKind::Phone), "998");
        assert_eq!(extract("9989012345678", FieldKind::Phone), "998901234");
    }

    #[test]
    fn phone_overflow_after_prefix_truncates() {
        assert_eq!(extract("+998 99 812 34 567", FieldKind::Phone), "998123456");
        assert_eq!(extract("+998 90 123 45 678", FieldKind::Phone), "901234567");
    }

    #[test]
    fn phone_sources_point_past_country_code() {
        let kept = extract_with_sources("998901234567", FieldKind::Phone);
        assert_eq!(kept.sources().first(), Some(&3));
        assert_eq!(kept.kept_before(3), 0);
        assert_eq!(kept.kept_before(12), 9);
    }

    #[test]
    fn amount_normalizes_first_decimal_mark() {
        assert_eq!(extract("12,5", FieldKind::Amount), "12.5");
        assert_eq!(extract("1 234 567.5", FieldKind::Amount), "1234567.5");
        assert_eq!(extract("$-42", FieldKind::Amount), "42");
    }

    #[test]
    fn amount_folds_repeated_separators_into_fraction() {
        assert_eq!(extract("1.2.3", FieldKind::Amount), "1.23");
        assert_eq!(extract("1,2,3,4", FieldKind::Amount), "1.23");
    }

    #[test]
    fn amount_caps_significant_integer_digits() {
        assert_eq!(
            extract("12345678901234567.89", FieldKind::Amount),
            "1234567890123.89"
        );
        assert_eq!(extract("0001234567890123", FieldKind::Amount), "0001234567890123");
        assert_eq!(extract("99999999999999", FieldKind::Amount), "9999999999999");
    }

    #[test]
    fn amount_caps_fraction_at_two_digits() {
        assert_eq!(extract("0.12345", FieldKind::Amount), "0.12");
    }

    #[test]
    fn non_ascii_digits_are_noise() {
        assert_eq!(extract("١٢/03", FieldKind::Date), "03");
        assert_eq!(extract("🎉1\u{0007}2", FieldKind::Time), "12");
    }

    #[test]
    fn sources_are_char_indices() {
        let kept = extract_with_sources("é1/2", FieldKind::Date);
        assert_eq!(kept.sources(), &[1, 3]);
    }
}

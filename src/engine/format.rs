use crate::domain::{FieldKind, GroupedMask, MaskSpec, SLOT, TemplateMask};

/// Re-insert the mask's literals into an extracted stream.
///
/// Literals are emitted only while digits remain to fill a later slot, so a
/// display never ends with a dangling separator. Stray characters in
/// `extracted` are ignored.
pub fn format(extracted: &str, kind: FieldKind) -> String {
    match kind.mask() {
        MaskSpec::Template(mask) => format_template(extracted, mask),
        MaskSpec::Grouped(mask) => format_grouped(extracted, mask),
    }
}

fn format_template(extracted: &str, mask: &TemplateMask) -> String {
    let mut digits = extracted
        .chars()
        .filter(char::is_ascii_digit)
        .take(mask.max_digits())
        .peekable();
    let mut out = String::with_capacity(mask.pattern.len());
    for symbol in mask.pattern.chars() {
        if digits.peek().is_none() {
            break;
        }
        if symbol == SLOT {
            if let Some(digit) = digits.next() {
                out.push(digit);
            }
        } else {
            out.push(symbol);
        }
    }
    out
}

fn format_grouped(extracted: &str, mask: &GroupedMask) -> String {
    let (integer, fraction) = match extracted.find(mask.decimal_separator) {
        Some(idx) => (
            &extracted[..idx],
            Some(&extracted[idx + mask.decimal_separator.len_utf8()..]),
        ),
        None => (extracted, None),
    };

    let digits: Vec<char> = integer.chars().filter(char::is_ascii_digit).collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / mask.group_len + 4);
    for (idx, digit) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % mask.group_len == 0 {
            out.push(mask.group_separator);
        }
        out.push(*digit);
    }

    if let Some(fraction) = fraction {
        out.push(mask.decimal_separator);
        out.extend(
            fraction
                .chars()
                .filter(char::is_ascii_digit)
                .take(mask.fraction_digits),
        );
    }
    out
}

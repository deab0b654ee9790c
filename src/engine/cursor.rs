use crate::domain::FieldKind;

use super::extract::extract_with_sources;

/// Carry a caret across a reformat.
///
/// Counts the meaningful characters before `old_caret` in `old_display`,
/// then lands right after the character that completes the same count in
/// `new_display`. Positions are char indices.
pub fn translate(kind: FieldKind, old_display: &str, old_caret: usize, new_display: &str) -> usize {
    let before = extract_with_sources(old_display, kind).kept_before(old_caret);
    place_after(kind, new_display, before)
}

/// Caret position just past the `count`-th meaningful character of `display`.
pub fn place_after(kind: FieldKind, display: &str, count: usize) -> usize {
    let len = display.chars().count();
    let kept = extract_with_sources(display, kind);
    let caret = if count == 0 {
        // first editable position, which skips a literal prefix
        kept.sources().first().copied().unwrap_or(len)
    } else {
        kept.sources()
            .get(count - 1)
            .map(|source| source + 1)
            .unwrap_or(len)
    };
    caret.min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{extract, format};

    fn retype(kind: FieldKind, raw: &str, raw_caret: usize) -> (String, usize) {
        let display = format(&extract(raw, kind), kind);
        let caret = translate(kind, raw, raw_caret, &display);
        (display, caret)
    }

    #[test]
    fn completing_a_date_lands_at_end() {
        let (display, caret) = retype(FieldKind::Date, "12/03/2024", 10);
        assert_eq!(display, "12/03/2024");
        assert_eq!(caret, 10);
    }

    #[test]
    fn caret_skips_separator_inserted_before_typed_digit() {
        let (display, caret) = retype(FieldKind::Date, "120", 3);
        assert_eq!(display, "12/0");
        assert_eq!(caret, 4);
    }

    #[test]
    fn mid_string_insert_advances_by_one() {
        // typed '5' at caret 1 of "12/0"
        let (display, caret) = retype(FieldKind::Date, "152/0", 2);
        assert_eq!(display, "15/20");
        assert_eq!(caret, 2);
    }

    #[test]
    fn deleting_a_separator_steps_left_of_it() {
        // backspace right after '/' in "12/03"
        let (display, caret) = retype(FieldKind::Date, "1203", 2);
        assert_eq!(display, "12/03");
        assert_eq!(caret, 2);
    }

    #[test]
    fn deleting_a_digit_keeps_logical_position() {
        // backspace after the '0' of "12/03": two digits remain before the caret
        let (display, caret) = retype(FieldKind::Date, "12/3", 3);
        assert_eq!(display, "12/3");
        assert_eq!(caret, 2);
    }

    #[test]
    fn phone_caret_never_enters_prefix() {
        assert_eq!(place_after(FieldKind::Phone, "+998 90", 0), 5);
        let (display, caret) = retype(FieldKind::Phone, "9", 1);
        assert_eq!(display, "+998 9");
        assert_eq!(caret, 6);
    }

    #[test]
    fn phone_paste_with_country_code_lands_at_end() {
        let (display, caret) = retype(FieldKind::Phone, "998901234567", 12);
        assert_eq!(display, "+998 90 123 45 67");
        assert_eq!(caret, display.chars().count());
    }

    #[test]
    fn amount_caret_tracks_grouping() {
        // typed '4' at the end of "123"
        let (display, caret) = retype(FieldKind::Amount, "1234", 4);
        assert_eq!(display, "1 234");
        assert_eq!(caret, 5);
        // typed '9' at the front of "1 234"
        let (display, caret) = retype(FieldKind::Amount, "91 234", 1);
        assert_eq!(display, "91 234");
        assert_eq!(caret, 1);
    }

    #[test]
    fn overflowing_count_clamps_to_end() {
        assert_eq!(place_after(FieldKind::Date, "12/03", 9), 5);
        assert_eq!(place_after(FieldKind::Date, "", 3), 0);
    }
}

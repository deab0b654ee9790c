use maskfield::engine::{CanonicalValue, ClockTime, IsoDate};
use maskfield::{CanonicalChange, EditOp, FieldKind, MaskedField, SyncOutcome, TimePicker, Validity};

fn typed(kind: FieldKind, keys: &str) -> (MaskedField, Vec<CanonicalChange>) {
    let mut field = MaskedField::new(kind);
    let changes = keys
        .chars()
        .filter_map(|ch| field.apply(EditOp::Insert(ch.to_string())))
        .collect();
    (field, changes)
}

fn pasted(kind: FieldKind, raw: &str) -> MaskedField {
    let mut field = MaskedField::new(kind);
    field.apply(EditOp::input(raw, raw.chars().count()));
    field
}

#[test]
fn last_date_digit_lands_caret_at_end() {
    let (mut field, changes) = typed(FieldKind::Date, "1203202");
    assert!(changes.is_empty());
    assert_eq!(field.display(), "12/03/202");
    assert_eq!(field.caret(), 9);

    let change = field.apply(EditOp::insert("4"));
    assert_eq!(field.display(), "12/03/2024");
    assert_eq!(field.caret(), 10);
    assert_eq!(
        change,
        Some(CanonicalChange::Value(CanonicalValue::Date(
            IsoDate::new(2024, 3, 12).unwrap()
        )))
    );
}

#[test]
fn mid_string_digit_advances_caret_by_one() {
    let (mut field, _) = typed(FieldKind::Date, "120");
    assert_eq!(field.display(), "12/0");
    field.apply(EditOp::SetCaret(1));
    field.apply(EditOp::insert("5"));
    assert_eq!(field.display(), "15/20");
    assert_eq!(field.caret(), 2);
}

#[test]
fn calendar_validity() {
    let cases = [
        ("31022024", Validity::Invalid),
        ("29022024", Validity::Valid),
        ("29022023", Validity::Invalid),
        ("1203", Validity::Partial),
    ];
    for (raw, expected) in cases {
        let field = pasted(FieldKind::Date, raw);
        assert_eq!(field.validity(), expected, "{raw}");
        assert_eq!(field.canonical().is_some(), expected == Validity::Valid, "{raw}");
    }
    assert_eq!(
        pasted(FieldKind::Date, "29022024").canonical().map(|v| v.to_wire()),
        Some("2024-02-29".to_string())
    );
}

#[test]
fn amount_groups_and_pads_on_blur() {
    let mut field = pasted(FieldKind::Amount, "1234567.5");
    assert_eq!(field.display(), "1 234 567.5");
    assert_eq!(field.canonical(), Some(&CanonicalValue::Amount(1234567.5)));
    field.blur();
    assert_eq!(field.display(), "1 234 567.50");
    assert_eq!(field.canonical(), Some(&CanonicalValue::Amount(1234567.5)));

    let comma = pasted(FieldKind::Amount, "12,5");
    assert_eq!(comma.canonical(), Some(&CanonicalValue::Amount(12.5)));
}

#[test]
fn oversized_amount_keeps_the_digits_it_shows() {
    let mut field = pasted(FieldKind::Amount, "12345678901234567.89");
    assert_eq!(field.display(), "1 234 567 890 123.89");
    let shown = field.canonical().map(|value| value.to_wire());
    assert_eq!(shown.as_deref(), Some("1234567890123.89"));

    field.blur();
    assert_eq!(field.display(), "1 234 567 890 123.89");
    assert_eq!(field.canonical().map(|value| value.to_wire()), shown);

    // more integer digits at the end are ignored
    field.apply(EditOp::SetCaret(17));
    field.apply(EditOp::insert("4"));
    assert_eq!(field.display(), "1 234 567 890 123.89");
}

#[test]
fn phone_with_or_without_country_code() {
    let long = pasted(FieldKind::Phone, "998901234567");
    let short = pasted(FieldKind::Phone, "901234567");
    assert_eq!(long.display(), "+998 90 123 45 67");
    assert_eq!(long.display(), short.display());
    assert_eq!(long.canonical(), short.canonical());
    assert_eq!(
        short.canonical(),
        Some(&CanonicalValue::Phone("901234567".to_string()))
    );

    let (partial, changes) = typed(FieldKind::Phone, "9012345");
    assert_eq!(partial.validity(), Validity::Partial);
    assert!(partial.canonical().is_none());
    assert!(changes.is_empty());
}

#[test]
fn typing_into_a_full_phone_keeps_the_number() {
    let mut field = MaskedField::with_value(FieldKind::Phone, "998123456");
    assert_eq!(field.display(), "+998 99 812 34 56");
    assert_eq!(field.validity(), Validity::Valid);

    field.apply(EditOp::End);
    let change = field.apply(EditOp::insert("7"));
    assert_eq!(change, None);
    assert_eq!(field.display(), "+998 99 812 34 56");
    assert_eq!(field.validity(), Validity::Valid);
    assert_eq!(
        field.canonical(),
        Some(&CanonicalValue::Phone("998123456".to_string()))
    );
}

#[test]
fn typed_junk_is_filtered() {
    let (field, changes) = typed(FieldKind::Time, "0a9:3x0");
    assert_eq!(field.display(), "09:30");
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].wire(), "09:30");
}

#[test]
fn partial_display_survives_matching_host_value() {
    let (mut field, _) = typed(FieldKind::Date, "120");
    assert_eq!(field.sync_external("2024-03-12"), SyncOutcome::InProgress);
    assert_eq!(field.display(), "12/0");
    assert_eq!(field.caret(), 4);

    // the host passing the same value again changes nothing
    assert_eq!(field.sync_external("2024-03-12"), SyncOutcome::Unchanged);
    assert_eq!(field.display(), "12/0");
}

#[test]
fn genuine_host_update_replaces_display() {
    let (mut field, _) = typed(FieldKind::Date, "120");
    assert_eq!(field.sync_external("2025-01-01"), SyncOutcome::Applied);
    assert_eq!(field.display(), "01/01/2025");
    assert_eq!(field.caret(), 10);
    assert_eq!(field.validity(), Validity::Valid);
}

#[test]
fn host_echo_of_emitted_value_is_absorbed() {
    let (mut field, changes) = typed(FieldKind::Amount, "12.5");
    assert_eq!(changes.last().map(CanonicalChange::wire).as_deref(), Some("12.5"));
    assert_eq!(field.sync_external("12.50"), SyncOutcome::Echo);
    assert_eq!(field.display(), "12.5");
}

#[test]
fn clearing_emits_once() {
    let mut field = MaskedField::with_value(FieldKind::Time, "07:45");
    assert_eq!(field.display(), "07:45");
    assert_eq!(field.apply(EditOp::Clear), Some(CanonicalChange::Cleared));
    assert_eq!(field.apply(EditOp::Clear), None);
    assert_eq!(field.validity(), Validity::Empty);
}

#[test]
fn picker_feeds_the_time_field() {
    let mut field = MaskedField::with_value(FieldKind::Time, "09:32");
    let mut picker = TimePicker::from_value("09:32", 5);
    assert_eq!(picker.selected_hour_row(), Some(9));
    assert_eq!(picker.selected_minute_row(), None);

    picker.open();
    assert!(picker.take_scroll_request().is_some());
    assert!(picker.take_scroll_request().is_none());

    let chosen = picker.select_minute(45).unwrap();
    assert_eq!(chosen, ClockTime::new(9, 45).unwrap());
    let change = field.pick(&chosen.to_string());
    assert_eq!(change.map(|c| c.wire()).as_deref(), Some("09:45"));
    assert_eq!(field.display(), "09:45");
}

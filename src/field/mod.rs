mod edit;
mod picker;
mod sync;

pub use edit::EditOp;
pub use picker::{DEFAULT_MINUTE_STEP, PickerColumn, ScrollRequest, TimePicker};
pub use sync::{SyncBridge, SyncOutcome};

use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    domain::FieldKind,
    engine::{
        CanonicalValue, Validity, assess, extract, format, literal_prefix_len, render_wire,
        translate,
    },
};

use edit::Applied;
use sync::Reconcile;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAttributes {
    pub id: Option<String>,
    pub placeholder: Option<String>,
    pub disabled: bool,
}

impl FieldAttributes {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// What a field reports to its host after an edit.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalChange {
    Value(CanonicalValue),
    Cleared,
}

impl CanonicalChange {
    /// Wire form of the change; a clear is the empty string.
    pub fn wire(&self) -> String {
        match self {
            CanonicalChange::Value(value) => value.to_wire(),
            CanonicalChange::Cleared => String::new(),
        }
    }
}

/// Snapshot of a field, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub kind: FieldKind,
    pub display: String,
    pub caret: usize,
    pub validity: Validity,
    pub canonical: Option<CanonicalValue>,
}

/// A live-formatting input of one kind.
///
/// The display string is the single source of truth while the user types;
/// the canonical value is derived from it and reported to the host only
/// when it is complete and new.
#[derive(Debug, Clone)]
pub struct MaskedField {
    kind: FieldKind,
    attrs: FieldAttributes,
    display: String,
    caret: usize,
    validity: Validity,
    canonical: Option<CanonicalValue>,
    /// Wire value the host is believed to hold.
    host_value: String,
    bridge: SyncBridge,
}

impl MaskedField {
    pub fn new(kind: FieldKind) -> Self {
        Self::with_value(kind, "")
    }

    /// Mount with an initial wire value. Unreadable values mount empty.
    pub fn with_value(kind: FieldKind, wire: &str) -> Self {
        let mut field = Self {
            kind,
            attrs: FieldAttributes::default(),
            display: String::new(),
            caret: 0,
            validity: Validity::Empty,
            canonical: None,
            host_value: String::new(),
            bridge: SyncBridge::default(),
        };
        field.remount(wire);
        field
    }

    pub fn with_attributes(mut self, attrs: FieldAttributes) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn attributes(&self) -> &FieldAttributes {
        &self.attrs
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.attrs.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.attrs.disabled
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn canonical(&self) -> Option<&CanonicalValue> {
        self.canonical.as_ref()
    }

    pub fn placeholder(&self) -> &str {
        self.attrs
            .placeholder
            .as_deref()
            .unwrap_or_else(|| self.kind.placeholder())
    }

    pub fn report(&self) -> FieldReport {
        FieldReport {
            kind: self.kind,
            display: self.display.clone(),
            caret: self.caret,
            validity: self.validity,
            canonical: self.canonical.clone(),
        }
    }

    pub fn apply(&mut self, op: EditOp) -> Option<CanonicalChange> {
        if self.attrs.disabled {
            return None;
        }
        match edit::apply(&op, &self.display, self.caret, self.floor()) {
            Applied::Text { raw, caret } => self.input(&raw, caret),
            Applied::Caret(caret) => {
                self.caret = caret;
                None
            }
            Applied::Noop => None,
        }
    }

    /// Run a raw post-edit text through the pipeline.
    pub fn input(&mut self, raw: &str, raw_caret: usize) -> Option<CanonicalChange> {
        if self.attrs.disabled {
            return None;
        }
        let extracted = extract(raw, self.kind);
        let display = format(&extracted, self.kind);
        self.caret = translate(self.kind, raw, raw_caret, &display);
        self.display = display;
        self.reassess();
        trace!(
            kind = %self.kind,
            raw,
            display = %self.display,
            caret = self.caret,
            validity = self.validity.label(),
            "field input"
        );
        self.emission()
    }

    /// Normalise the display once the field loses focus.
    pub fn blur(&mut self) {
        if let Some(value) = &self.canonical {
            let display = render_wire(&value.to_wire(), self.kind);
            if display != self.display {
                self.replace_display(display);
            }
        }
        self.caret = self.display.chars().count();
    }

    /// Reconcile a value pushed by the host.
    pub fn sync_external(&mut self, wire: &str) -> SyncOutcome {
        let outcome = match self.bridge.reconcile(self.kind, wire, &self.display) {
            Reconcile::Keep(outcome) => outcome,
            Reconcile::Replace(display) => {
                self.replace_display(display);
                SyncOutcome::Applied
            }
        };
        self.host_value = wire.to_string();
        debug!(kind = %self.kind, wire, ?outcome, display = %self.display, "external sync");
        outcome
    }

    /// Discard local state and show `wire`, as on a fresh mount. Used for
    /// form resets, where an unchanged host value must still win.
    pub fn remount(&mut self, wire: &str) {
        self.bridge.mount(wire);
        self.host_value = wire.to_string();
        self.replace_display(render_wire(wire, self.kind));
        debug!(kind = %self.kind, wire, "field remounted");
    }

    /// Commit a value chosen from a picker. The result is reported like an
    /// edit so the host learns about it.
    pub fn pick(&mut self, wire: &str) -> Option<CanonicalChange> {
        if self.attrs.disabled {
            return None;
        }
        let display = render_wire(wire, self.kind);
        if display.is_empty() {
            return None;
        }
        self.replace_display(display);
        self.emission()
    }

    fn replace_display(&mut self, display: String) {
        self.caret = display.chars().count();
        self.display = display;
        self.reassess();
    }

    fn reassess(&mut self) {
        let assessment = assess(&self.display, self.kind);
        self.validity = assessment.validity;
        self.canonical = assessment.canonical;
    }

    fn floor(&self) -> usize {
        literal_prefix_len(&self.display, self.kind.mask().leading_literals())
    }

    fn emission(&mut self) -> Option<CanonicalChange> {
        let change = match &self.canonical {
            Some(value) if !self.host_holds(value) => CanonicalChange::Value(value.clone()),
            None if self.display.is_empty() && !self.host_value.is_empty() => {
                CanonicalChange::Cleared
            }
            _ => return None,
        };
        self.host_value = change.wire();
        debug!(kind = %self.kind, wire = %self.host_value, "canonical change");
        Some(change)
    }

    fn host_holds(&self, value: &CanonicalValue) -> bool {
        let wire = value.to_wire();
        wire == self.host_value
            || self.kind.codec().parse_wire(&self.host_value).as_ref() == Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(field: &mut MaskedField, keys: &str) -> Vec<CanonicalChange> {
        keys.chars()
            .filter_map(|ch| field.apply(EditOp::Insert(ch.to_string())))
            .collect()
    }

    #[test]
    fn typing_a_date_emits_once_complete() {
        let mut field = MaskedField::new(FieldKind::Date);
        let changes = type_keys(&mut field, "12032024");
        assert_eq!(field.display(), "12/03/2024");
        assert_eq!(field.caret(), 10);
        assert_eq!(field.validity(), Validity::Valid);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].wire(), "2024-03-12");
    }

    #[test]
    fn impossible_date_is_invalid_and_silent() {
        let mut field = MaskedField::new(FieldKind::Date);
        let changes = type_keys(&mut field, "31022024");
        assert_eq!(field.display(), "31/02/2024");
        assert_eq!(field.validity(), Validity::Invalid);
        assert!(changes.is_empty());
    }

    #[test]
    fn phone_prefix_is_not_editable() {
        let mut field = MaskedField::new(FieldKind::Phone);
        type_keys(&mut field, "90");
        assert_eq!(field.display(), "+998 90");
        field.apply(EditOp::Home);
        assert_eq!(field.caret(), 5);
        assert_eq!(field.apply(EditOp::Backspace), None);
        assert_eq!(field.display(), "+998 90");
    }

    #[test]
    fn clearing_emits_once() {
        let mut field = MaskedField::with_value(FieldKind::Time, "09:30");
        assert_eq!(field.display(), "09:30");
        assert_eq!(field.apply(EditOp::Clear), Some(CanonicalChange::Cleared));
        assert_eq!(field.apply(EditOp::Clear), None);
    }

    #[test]
    fn retyping_the_host_value_is_not_reported() {
        let mut field = MaskedField::with_value(FieldKind::Time, "09:30");
        field.apply(EditOp::End);
        field.apply(EditOp::Backspace);
        assert_eq!(field.validity(), Validity::Partial);
        assert_eq!(field.apply(EditOp::insert("0")), None);
        assert_eq!(field.display(), "09:30");
    }

    #[test]
    fn blur_pads_amount_fraction() {
        let mut field = MaskedField::new(FieldKind::Amount);
        type_keys(&mut field, "1234567.5");
        assert_eq!(field.display(), "1 234 567.5");
        field.blur();
        assert_eq!(field.display(), "1 234 567.50");
        assert_eq!(field.caret(), field.display().chars().count());
    }

    #[test]
    fn blur_keeps_partial_display() {
        let mut field = MaskedField::new(FieldKind::Date);
        type_keys(&mut field, "120");
        field.blur();
        assert_eq!(field.display(), "12/0");
    }

    #[test]
    fn disabled_field_ignores_edits() {
        let mut field = MaskedField::new(FieldKind::Phone)
            .with_attributes(FieldAttributes::default().disabled(true));
        assert_eq!(field.apply(EditOp::insert("9")), None);
        assert_eq!(field.display(), "");
        assert_eq!(field.pick("901234567"), None);
    }

    #[test]
    fn pick_commits_time() {
        let mut field = MaskedField::new(FieldKind::Time);
        let change = field.pick("14:05");
        assert_eq!(field.display(), "14:05");
        assert_eq!(change.map(|change| change.wire()).as_deref(), Some("14:05"));
        assert_eq!(field.pick("14:05"), None);
    }

    #[test]
    fn remount_overrides_partial_edit() {
        let mut field = MaskedField::new(FieldKind::Date);
        type_keys(&mut field, "120");
        assert_eq!(field.sync_external(""), SyncOutcome::Unchanged);
        assert_eq!(field.display(), "12/0");
        field.remount("");
        assert_eq!(field.display(), "");
        assert_eq!(field.validity(), Validity::Empty);
    }

    #[test]
    fn placeholder_defaults_to_kind() {
        let field = MaskedField::new(FieldKind::Date);
        assert_eq!(field.placeholder(), "dd/mm/yyyy");
        let field = field.with_attributes(FieldAttributes::default().with_placeholder("birthday"));
        assert_eq!(field.placeholder(), "birthday");
    }
}

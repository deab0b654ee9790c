use serde::Serialize;

use crate::{
    domain::FieldKind,
    engine::{extract, format},
};

/// How an externally pushed canonical value was reconciled with local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Same value as last time, or it already renders as the current display.
    Unchanged,
    /// The local edit already decodes to the pushed value.
    Echo,
    /// The local partial edit is on its way to the pushed value.
    InProgress,
    /// The display was replaced by the pushed value.
    Applied,
}

pub(crate) enum Reconcile {
    Keep(SyncOutcome),
    Replace(String),
}

/// Remembers the last external value so an unchanged value re-passed by the
/// host never touches an in-progress edit, while a genuine change (a form
/// reset, a value picked elsewhere) still lands.
#[derive(Debug, Clone, Default)]
pub struct SyncBridge {
    last_external: Option<String>,
}

impl SyncBridge {
    pub fn last_external(&self) -> Option<&str> {
        self.last_external.as_deref()
    }

    pub(crate) fn mount(&mut self, external: &str) {
        self.last_external = Some(external.to_string());
    }

    pub(crate) fn reconcile(&mut self, kind: FieldKind, external: &str, display: &str) -> Reconcile {
        if self.last_external.as_deref() == Some(external) {
            return Reconcile::Keep(SyncOutcome::Unchanged);
        }
        self.last_external = Some(external.to_string());

        let codec = kind.codec();
        let candidate_stream = codec.encode(external).unwrap_or_default();
        let candidate = format(&candidate_stream, kind);
        if candidate == display {
            return Reconcile::Keep(SyncOutcome::Unchanged);
        }

        let local_stream = extract(display, kind);
        let local_value = codec.decode(&local_stream);
        if local_value.is_some() && local_value == codec.decode(&candidate_stream) {
            return Reconcile::Keep(SyncOutcome::Echo);
        }

        let partial = kind
            .mask()
            .required_len()
            .is_some_and(|required| local_stream.len() < required);
        if partial
            && !local_stream.is_empty()
            && candidate_stream.len() > local_stream.len()
            && candidate_stream.starts_with(&local_stream)
        {
            return Reconcile::Keep(SyncOutcome::InProgress);
        }

        Reconcile::Replace(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(reconcile: Reconcile) -> Option<SyncOutcome> {
        match reconcile {
            Reconcile::Keep(outcome) => Some(outcome),
            Reconcile::Replace(_) => None,
        }
    }

    #[test]
    fn repeated_external_value_is_ignored() {
        let mut bridge = SyncBridge::default();
        bridge.mount("2024-03-12");
        let kept = bridge.reconcile(FieldKind::Date, "2024-03-12", "12/0");
        assert_eq!(outcome(kept), Some(SyncOutcome::Unchanged));
    }

    #[test]
    fn partial_edit_heading_to_external_value_is_kept() {
        let mut bridge = SyncBridge::default();
        let kept = bridge.reconcile(FieldKind::Date, "2024-03-12", "12/0");
        assert_eq!(outcome(kept), Some(SyncOutcome::InProgress));
        assert_eq!(bridge.last_external(), Some("2024-03-12"));
    }

    #[test]
    fn equal_value_with_other_display_is_an_echo() {
        let mut bridge = SyncBridge::default();
        let kept = bridge.reconcile(FieldKind::Amount, "1234.5", "1 234.5");
        assert_eq!(outcome(kept), Some(SyncOutcome::Echo));
    }

    #[test]
    fn new_value_replaces_display() {
        let mut bridge = SyncBridge::default();
        bridge.mount("");
        match bridge.reconcile(FieldKind::Phone, "901234567", "+998 93") {
            Reconcile::Replace(display) => assert_eq!(display, "+998 90 123 45 67"),
            Reconcile::Keep(outcome) => panic!("unexpected {outcome:?}"),
        }
        match bridge.reconcile(FieldKind::Phone, "", "+998 90 123 45 67") {
            Reconcile::Replace(display) => assert!(display.is_empty()),
            Reconcile::Keep(outcome) => panic!("unexpected {outcome:?}"),
        }
    }
}

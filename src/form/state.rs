use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    engine::{CanonicalValue, Validity},
    field::{CanonicalChange, EditOp, FieldAttributes, MaskedField},
};

use super::{
    error::FieldError,
    layout::{FieldSpec, FormLayout},
};

type ChangeHook = Box<dyn FnMut(&str, &CanonicalChange)>;

#[derive(Debug, Clone)]
pub struct FormField {
    pub spec: FieldSpec,
    pub field: MaskedField,
    pub error: Option<String>,
    pub dirty: bool,
}

impl FormField {
    fn new(spec: FieldSpec) -> Self {
        let attrs = FieldAttributes::default()
            .with_id(spec.name.clone())
            .disabled(spec.disabled);
        let field = MaskedField::new(spec.kind).with_attributes(attrs);
        Self {
            spec,
            field,
            error: None,
            dirty: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn pointer(&self) -> String {
        format!("/{}", self.spec.name)
    }

    fn after_edit(&mut self) {
        self.dirty = true;
        self.error = None;
    }
}

/// The host side of a set of masked fields: owns canonical values, routes
/// edits to the focused field and pushes external values back down.
pub struct FormState {
    pub title: String,
    pub fields: Vec<FormField>,
    pub field_index: usize,
    values: IndexMap<String, CanonicalValue>,
    seeds: IndexMap<String, String>,
    on_change: Option<ChangeHook>,
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("title", &self.title)
            .field("fields", &self.fields)
            .field("field_index", &self.field_index)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl FormState {
    pub fn from_layout(layout: &FormLayout) -> Self {
        Self {
            title: layout.title.clone(),
            fields: layout.fields.iter().cloned().map(FormField::new).collect(),
            field_index: 0,
            values: IndexMap::new(),
            seeds: IndexMap::new(),
            on_change: None,
        }
    }

    /// Called with the field name for every change a field reports.
    pub fn set_on_change(&mut self, hook: impl FnMut(&str, &CanonicalChange) + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn values(&self) -> &IndexMap<String, CanonicalValue> {
        &self.values
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.field_index)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.field_index)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn focus_next_field(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev_field(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, delta: i32) {
        if self.fields.is_empty() {
            return;
        }
        if let Some(current) = self.focused_field_mut() {
            current.field.blur();
        }
        let len = self.fields.len() as i32;
        let next = (self.field_index as i32 + delta).rem_euclid(len);
        self.field_index = next as usize;
    }

    /// Route an edit to the focused field and record what it reports.
    pub fn apply_edit(&mut self, op: EditOp) -> Option<CanonicalChange> {
        let changes_text = op.changes_text();
        let entry = self.fields.get_mut(self.field_index)?;
        if entry.field.is_disabled() {
            return None;
        }
        let before = entry.field.display().to_string();
        let change = entry.field.apply(op);
        if changes_text && entry.field.display() != before {
            entry.after_edit();
        }
        if let Some(change) = &change {
            self.record(self.field_index, change);
        }
        change
    }

    /// Commit a picked wire value into the focused field.
    pub fn pick(&mut self, wire: &str) -> Option<CanonicalChange> {
        let entry = self.fields.get_mut(self.field_index)?;
        let change = entry.field.pick(wire)?;
        entry.after_edit();
        self.record(self.field_index, &change);
        Some(change)
    }

    fn record(&mut self, index: usize, change: &CanonicalChange) {
        let Some(entry) = self.fields.get_mut(index) else {
            return;
        };
        let name = entry.spec.name.clone();
        match change {
            CanonicalChange::Value(value) => {
                self.values.insert(name.clone(), value.clone());
            }
            CanonicalChange::Cleared => {
                self.values.shift_remove(&name);
            }
        }
        // the host re-renders with the value it now holds
        entry.field.sync_external(&change.wire());
        debug!(field = %name, wire = %change.wire(), "form value recorded");
        if let Some(hook) = self.on_change.as_mut() {
            hook(&name, change);
        }
    }

    /// Push values from a seed document into the fields; later `reset` calls
    /// return to these values.
    pub fn seed_from_value(&mut self, value: &Value) {
        self.seeds.clear();
        for entry in &self.fields {
            if let Some(wire) = value.get(entry.name()).and_then(wire_of) {
                self.seeds.insert(entry.spec.name.clone(), wire);
            }
        }
        self.push_seeds();
    }

    /// Return every field to its seeded value (empty when none was seeded).
    pub fn reset(&mut self) {
        self.push_seeds();
        for entry in &mut self.fields {
            entry.dirty = false;
            entry.error = None;
        }
    }

    fn push_seeds(&mut self) {
        self.values.clear();
        for entry in &mut self.fields {
            let wire = self.seeds.get(&entry.spec.name).cloned().unwrap_or_default();
            entry.field.remount(&wire);
            if let Some(value) = entry.spec.kind.codec().parse_wire(&wire) {
                self.values.insert(entry.spec.name.clone(), value);
            }
        }
    }

    /// Assemble the record from the canonical values the form holds.
    pub fn try_build_value(&self) -> Result<Value, FieldError> {
        let mut record = Map::new();
        for entry in &self.fields {
            let name = entry.name();
            match entry.field.validity() {
                Validity::Invalid => {
                    return Err(FieldError::new(
                        name,
                        format!("{} is not a valid {}", entry.label(), entry.spec.kind),
                    ));
                }
                Validity::Partial => {
                    return Err(FieldError::new(
                        name,
                        format!("{} is incomplete", entry.label()),
                    ));
                }
                Validity::Empty if entry.spec.required => {
                    return Err(FieldError::new(
                        name,
                        format!("{} is required", entry.label()),
                    ));
                }
                _ => {}
            }
            if let Some(value) = self.values.get(name) {
                record.insert(name.to_string(), value.to_json());
            }
        }
        Ok(Value::Object(record))
    }

    pub fn set_error(&mut self, pointer: &str, message: String) -> bool {
        match self.fields.iter_mut().find(|entry| entry.pointer() == pointer) {
            Some(entry) => {
                entry.error = Some(message);
                true
            }
            None => false,
        }
    }

    pub fn clear_error(&mut self, pointer: &str) {
        for entry in &mut self.fields {
            if entry.pointer() == pointer {
                entry.error = None;
            }
        }
    }

    pub fn clear_errors(&mut self) {
        for entry in &mut self.fields {
            entry.error = None;
        }
    }

    pub fn mark_clean(&mut self) {
        for entry in &mut self.fields {
            entry.dirty = false;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(|entry| entry.dirty)
    }

    pub fn error_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|entry| entry.error.is_some() || entry.field.validity().is_error())
            .count()
    }
}

fn wire_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::FieldKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            description: None,
            disabled: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// JSON Schema fragment accepted for this field's canonical value.
    pub fn value_schema(&self) -> Value {
        let mut schema = match self.kind {
            FieldKind::Date => json!({
                "type": "string",
                "format": "date",
                "pattern": r"^\d{4}-\d{2}-\d{2}$",
            }),
            FieldKind::Phone => json!({
                "type": "string",
                "pattern": r"^\d{9}$",
            }),
            FieldKind::Time => json!({
                "type": "string",
                "pattern": r"^([01]\d|2[0-3]):[0-5]\d$",
            }),
            FieldKind::Amount => json!({
                "type": "number",
                "minimum": 0,
            }),
        };
        if let Value::Object(map) = &mut schema {
            map.insert("title".into(), Value::String(self.label.clone()));
            if let Some(description) = &self.description {
                map.insert("description".into(), Value::String(description.clone()));
            }
        }
        schema
    }
}

/// Ordered description of a host form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormLayout {
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl FormLayout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Draft-07 schema of the record `FormState::try_build_value` produces.
    pub fn record_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            properties.insert(field.name.clone(), field.value_schema());
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
        }
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": self.title,
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

/// Phone, date, amount and time: the payment form the CLI opens by default.
pub fn payment_form() -> FormLayout {
    FormLayout::new("Payment")
        .with_field(
            FieldSpec::new("phone", "Phone", FieldKind::Phone)
                .required()
                .with_description("Payer phone number"),
        )
        .with_field(FieldSpec::new("date", "Date", FieldKind::Date).required())
        .with_field(
            FieldSpec::new("amount", "Amount", FieldKind::Amount)
                .required()
                .with_description("Sum in the account currency"),
        )
        .with_field(FieldSpec::new("time", "Time", FieldKind::Time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_form_lists_all_kinds() {
        let layout = payment_form();
        let kinds: Vec<FieldKind> = layout.fields.iter().map(|field| field.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Phone,
                FieldKind::Date,
                FieldKind::Amount,
                FieldKind::Time
            ]
        );
        assert!(layout.field("time").is_some_and(|field| !field.required));
    }

    #[test]
    fn record_schema_accepts_canonical_record() {
        let schema = payment_form().record_schema();
        let validator = jsonschema::validator_for(&schema).unwrap();
        let record = json!({
            "phone": "901234567",
            "date": "2024-03-12",
            "amount": 1234567.5,
            "time": "09:30",
        });
        assert!(validator.is_valid(&record));
        assert!(!validator.is_valid(&json!({ "phone": "901234567" })));
        assert!(!validator.is_valid(&json!({
            "phone": "90123",
            "date": "2024-03-12",
            "amount": 1,
        })));
    }

    #[test]
    fn layout_reads_from_json() {
        let layout: FormLayout = serde_json::from_value(json!({
            "title": "Shift",
            "fields": [{ "name": "start", "label": "Start", "kind": "time" }],
        }))
        .unwrap();
        assert_eq!(layout.fields[0].kind, FieldKind::Time);
        assert!(!layout.fields[0].required);
    }
}

use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

use crate::form::FormState;

#[derive(Debug)]
pub enum ValidationOutcome {
    Valid(Value),
    Invalid {
        issues: usize,
        global_errors: Vec<String>,
    },
    /// A field is partial, invalid or missing, so no record could be built.
    BuildError {
        message: String,
    },
}

/// Submit-time check: build the record, then run it through the schema.
pub fn validate_form(form_state: &mut FormState, validator: &Validator) -> ValidationOutcome {
    form_state.clear_errors();
    let value = match form_state.try_build_value() {
        Ok(value) => value,
        Err(err) => {
            debug!(pointer = %err.pointer, "record incomplete");
            form_state.set_error(&err.pointer, err.message.clone());
            return ValidationOutcome::BuildError {
                message: err.to_string(),
            };
        }
    };
    if validator.is_valid(&value) {
        return ValidationOutcome::Valid(value);
    }

    let mut issues = 0usize;
    let mut global = Vec::new();
    for error in validator.iter_errors(&value) {
        issues += 1;
        let pointer = error.instance_path.to_string();
        let message = error.to_string();
        if !form_state.set_error(&pointer, message.clone()) {
            let prefix = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            global.push(format!("{prefix}: {message}"));
        }
    }
    debug!(issues, "record rejected by schema");
    ValidationOutcome::Invalid {
        issues,
        global_errors: global,
    }
}

#[cfg(test)]
mod tests {
    use jsonschema::validator_for;
    use serde_json::json;

    use super::*;
    use crate::{
        field::EditOp,
        form::{FieldSpec, FormLayout, payment_form},
        domain::FieldKind,
    };

    #[test]
    fn missing_required_field_is_a_build_error() {
        let layout = payment_form();
        let validator = validator_for(&layout.record_schema()).unwrap();
        let mut state = FormState::from_layout(&layout);
        match validate_form(&mut state, &validator) {
            ValidationOutcome::BuildError { message } => assert!(message.starts_with("/phone")),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(state.fields[0].error.as_deref(), Some("Phone is required"));
    }

    #[test]
    fn complete_record_passes() {
        let layout = FormLayout::new("Shift").with_field(FieldSpec::new("start", "Start", FieldKind::Time).required());
        let validator = validator_for(&layout.record_schema()).unwrap();
        let mut state = FormState::from_layout(&layout);
        state.pick("07:45");
        match validate_form(&mut state, &validator) {
            ValidationOutcome::Valid(value) => assert_eq!(value, json!({ "start": "07:45" })),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn schema_errors_attach_to_fields() {
        let layout = FormLayout::new("Shift").with_field(FieldSpec::new("start", "Start", FieldKind::Time));
        let strict = json!({
            "type": "object",
            "properties": { "start": { "type": "string", "pattern": "^0" } }
        });
        let validator = validator_for(&strict).unwrap();
        let mut state = FormState::from_layout(&layout);
        for ch in "1830".chars() {
            state.apply_edit(EditOp::Insert(ch.to_string()));
        }
        match validate_form(&mut state, &validator) {
            ValidationOutcome::Invalid { issues, global_errors } => {
                assert_eq!(issues, 1);
                assert!(global_errors.is_empty());
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(state.fields[0].error.is_some());
    }
}

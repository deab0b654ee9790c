use jsonschema::Validator;

use crate::field::CanonicalChange;

use super::{actions::FormCommand, state::FormState};

pub fn apply_command(state: &mut FormState, command: FormCommand) -> Option<CanonicalChange> {
    match command {
        FormCommand::FocusNextField => {
            state.focus_next_field();
            None
        }
        FormCommand::FocusPrevField => {
            state.focus_prev_field();
            None
        }
        FormCommand::Edit(op) => state.apply_edit(op),
        FormCommand::Pick(wire) => state.pick(&wire),
        FormCommand::Reset => {
            state.reset();
            None
        }
    }
}

/// Applies commands and re-checks the touched field against the record schema
/// whenever a field reports a new value.
pub struct FormEngine<'a> {
    state: &'a mut FormState,
    validator: &'a Validator,
}

impl<'a> FormEngine<'a> {
    pub fn new(state: &'a mut FormState, validator: &'a Validator) -> Self {
        Self { state, validator }
    }

    pub fn dispatch(&mut self, command: FormCommand) -> Option<CanonicalChange> {
        let change = apply_command(self.state, command);
        if change.is_some()
            && let Some(pointer) = self.state.focused_field().map(|entry| entry.pointer())
        {
            self.validate_field(&pointer);
        }
        change
    }

    fn validate_field(&mut self, pointer: &str) {
        self.state.clear_error(pointer);
        let Ok(value) = self.state.try_build_value() else {
            // the record is still incomplete; only schema errors are reported here
            return;
        };
        for error in self.validator.iter_errors(&value) {
            let err_pointer = error.instance_path.to_string();
            if err_pointer == pointer {
                self.state.set_error(&err_pointer, error.to_string());
            }
        }
    }
}

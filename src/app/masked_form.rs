use anyhow::{Context, Result};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::{
    form::{FormLayout, FormState},
    io::{OutputOptions, emit},
};

use super::{options::UiOptions, runtime::App};

/// Interactive terminal form built from a [`FormLayout`].
#[derive(Debug)]
pub struct MaskedForm {
    layout: FormLayout,
    values: Option<Value>,
    options: UiOptions,
    output: Option<OutputOptions>,
}

impl MaskedForm {
    pub fn new(layout: FormLayout) -> Self {
        Self {
            layout,
            values: None,
            options: UiOptions::default(),
            output: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.layout.title = title.into();
        self
    }

    /// Seed the fields from a map of canonical values keyed by field name.
    pub fn with_values(mut self, values: Value) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_output(mut self, output: OutputOptions) -> Self {
        self.output = Some(output);
        self
    }

    pub(crate) fn into_app(self) -> Result<(App, Option<OutputOptions>)> {
        let MaskedForm {
            layout,
            values,
            options,
            output,
        } = self;

        let schema = layout.record_schema();
        let validator = validator_for(&schema).context("failed to compile record schema")?;
        let mut form_state = FormState::from_layout(&layout);
        if let Some(values) = values.as_ref() {
            form_state.seed_from_value(values);
        }
        debug!(title = %layout.title, fields = layout.fields.len(), "form ready");
        Ok((App::new(form_state, validator, options), output))
    }

    /// Run until the user saves and quits; the saved record is returned and
    /// written to the configured outputs.
    pub fn run(self) -> Result<Value> {
        let (mut app, output) = self.into_app()?;
        let value = app.run()?;
        if let Some(options) = output.as_ref() {
            emit(&value, options)?;
        }
        Ok(value)
    }
}

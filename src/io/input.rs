use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::form::FormLayout;

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Read a document from a file path, `-` for stdin, or an inline JSON payload.
pub fn read_document(spec: &str) -> Result<Value> {
    let trimmed = spec.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return parse_document_str(spec, DocumentFormat::Json);
    }
    if spec == "-" {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context("failed to read document from stdin")?;
        return parse_document_str(&contents, DocumentFormat::Json);
    }
    let path = Path::new(spec);
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let format = DocumentFormat::from_path(path).unwrap_or_default();
    parse_document_str(&contents, format).with_context(|| format!("in {}", path.display()))
}

/// A seed document: either a bare map of field values, or an object with an
/// optional `layout` and a `values` map.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDocument {
    pub layout: Option<FormLayout>,
    pub values: Value,
}

impl FormDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            anyhow::bail!("form document must be an object");
        };
        if !map.contains_key("layout") && !map.contains_key("values") {
            return Ok(Self {
                layout: None,
                values: Value::Object(map),
            });
        }
        let layout = map
            .remove("layout")
            .map(serde_json::from_value::<FormLayout>)
            .transpose()
            .context("invalid form layout")?;
        let values = map.remove("values").unwrap_or(Value::Null);
        Ok(Self { layout, values })
    }
}

//! The exchange rate document persisted for the consuming application.

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};
use std::path::Path;

/// Provider-owned block holding the currency code to rate mapping.
pub const DATA_FIELD: &str = "data";
/// Field stamped by this tool on every successful update.
pub const UPDATE_TIME_FIELD: &str = "updateTime";
pub const UPDATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A validated rate document.
///
/// Every field the provider returns is kept as-is. Only `updateTime` is
/// written by us, so a document always holds a top-level `data` block.
#[derive(Debug, Clone, PartialEq)]
pub struct RateDocument {
    fields: Map<String, Value>,
}

impl RateDocument {
    /// Parses a provider response body and checks it carries a `data` block.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .context("Failed to parse exchange rate response as JSON")?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) if fields.contains_key(DATA_FIELD) => Ok(Self { fields }),
            _ => bail!("Downloaded JSON does not contain the '{DATA_FIELD}' block."),
        }
    }

    /// Reads a document previously written to disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rate document: {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid rate document: {}", path.display()))
    }

    pub fn data(&self) -> &Value {
        &self.fields[DATA_FIELD]
    }

    /// Number of currencies in the `data` block, zero when it isn't an object.
    pub fn currency_count(&self) -> usize {
        self.data().as_object().map_or(0, Map::len)
    }

    /// Sets `updateTime`, replacing any value the provider or an earlier run left.
    pub fn stamp(&mut self, now: NaiveDateTime) {
        let timestamp = now.format(UPDATE_TIME_FORMAT).to_string();
        self.fields
            .insert(UPDATE_TIME_FIELD.to_string(), Value::String(timestamp));
    }

    pub fn update_time(&self) -> Option<&str> {
        self.fields.get(UPDATE_TIME_FIELD).and_then(Value::as_str)
    }

    /// The provider's own `meta.last_updated_at`, when it sent one.
    pub fn provider_updated_at(&self) -> Option<&str> {
        self.fields
            .get("meta")
            .and_then(|meta| meta.get("last_updated_at"))
            .and_then(Value::as_str)
    }

    /// Serializes with 4-space indentation.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.fields
            .serialize(&mut serializer)
            .context("Failed to serialize rate document")?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

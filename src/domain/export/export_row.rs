//! Product rows in standard export shape.
//!
//! A row arrives as `{identifier, uuid, family, values, ...}` where `values`
//! maps attribute codes to either a scalar or a list of localized/scoped
//! entries (`[{"locale": .., "scope": .., "data": ..}]`). Rows are filtered
//! in place, then flattened to `header -> cell` maps for the flat file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::foundation::ValidationError;

/// One product as handed to the export writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Absent only for malformed rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Map<String, Value>>,
    /// Categories, enabled flag, groups and other product fields.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ExportRow {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            uuid: None,
            family: None,
            values: Some(Map::new()),
            properties: Map::new(),
        }
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_value(mut self, code: impl Into<String>, value: Value) -> Self {
        self.values
            .get_or_insert_with(Map::new)
            .insert(code.into(), value);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// `identifier` if present, else the uuid.
    pub fn item_identifier(&self) -> Result<String, ValidationError> {
        match (&self.identifier, &self.uuid) {
            (Some(identifier), _) => Ok(identifier.clone()),
            (None, Some(uuid)) => Ok(uuid.to_string()),
            (None, None) => Err(ValidationError::missing_required("identifier")),
        }
    }

    /// Removes every value whose code matches `hide`; returns how many went.
    pub fn remove_values(&mut self, hide: impl Fn(&str) -> bool) -> Result<usize, ValidationError> {
        let values = self
            .values
            .as_mut()
            .ok_or_else(|| ValidationError::missing_required("values"))?;

        let before = values.len();
        values.retain(|code, _| !hide(code));
        Ok(before - values.len())
    }

    pub fn value_codes(&self) -> Vec<&str> {
        self.values
            .as_ref()
            .map(|values| values.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Flattens the row into `header -> cell`.
    pub fn flatten(&self, with_uuid: bool) -> BTreeMap<String, String> {
        let mut cells = BTreeMap::new();

        if with_uuid {
            if let Some(uuid) = &self.uuid {
                cells.insert("uuid".to_string(), uuid.to_string());
            }
        }
        if let Some(identifier) = &self.identifier {
            cells.insert("identifier".to_string(), identifier.clone());
        }
        cells.insert(
            "family".to_string(),
            self.family.clone().unwrap_or_default(),
        );

        for (key, value) in &self.properties {
            cells.insert(key.clone(), scalar_cell(value));
        }

        if let Some(values) = &self.values {
            for (code, value) in values {
                flatten_value(code, value, &mut cells);
            }
        }

        cells
    }
}

fn flatten_value(code: &str, value: &Value, cells: &mut BTreeMap<String, String>) {
    match value {
        Value::Array(entries) if entries.iter().all(is_contextual_entry) && !entries.is_empty() => {
            for entry in entries {
                let mut column = code.to_string();
                if let Some(locale) = entry.get("locale").and_then(Value::as_str) {
                    column.push('-');
                    column.push_str(locale);
                }
                if let Some(scope) = entry.get("scope").and_then(Value::as_str) {
                    column.push('-');
                    column.push_str(scope);
                }
                flatten_data(&column, entry.get("data").unwrap_or(&Value::Null), cells);
            }
        }
        other => flatten_data(code, other, cells),
    }
}

fn flatten_data(column: &str, data: &Value, cells: &mut BTreeMap<String, String>) {
    // Metric
    if let Some(object) = data.as_object() {
        if let (Some(amount), Some(unit)) = (object.get("amount"), object.get("unit")) {
            cells.insert(column.to_string(), scalar_cell(amount));
            cells.insert(format!("{}-unit", column), scalar_cell(unit));
            return;
        }
    }

    // Price collection
    if let Some(prices) = data.as_array() {
        if !prices.is_empty() && prices.iter().all(|p| p.get("currency").is_some()) {
            for price in prices {
                let currency = price.get("currency").and_then(Value::as_str).unwrap_or_default();
                cells.insert(
                    format!("{}-{}", column, currency),
                    scalar_cell(price.get("amount").unwrap_or(&Value::Null)),
                );
            }
            return;
        }
    }

    cells.insert(column.to_string(), scalar_cell(data));
}

fn is_contextual_entry(entry: &Value) -> bool {
    entry
        .as_object()
        .is_some_and(|o| o.contains_key("data") && (o.contains_key("locale") || o.contains_key("scope")))
}

fn scalar_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(scalar_cell).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

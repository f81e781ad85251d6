//! TOML serializer for agent configuration files.

use serde_json::{Map, Value};

use super::{ConfigFormat, ConfigSerializer};
use crate::error::{ConversionError, Result};

/// TOML configuration file serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlSerializer;

impl ConfigSerializer for TomlSerializer {
    fn decode(&self, content: &str) -> Result<Map<String, Value>> {
        let table: toml::Table = toml::from_str(content).map_err(|err| ConversionError::Syntax {
            format: ConfigFormat::Toml,
            message: err.message().to_string(),
        })?;
        Ok(table
            .into_iter()
            .map(|(key, value)| (key, toml_to_json_value(value)))
            .collect())
    }

    fn encode(&self, map: &Map<String, Value>) -> Result<String> {
        let mut table = toml::Table::new();
        for (key, value) in map {
            if let Some(value) = json_to_toml_value(value)? {
                table.insert(key.clone(), value);
            }
        }
        toml::to_string_pretty(&table).map_err(|err| ConversionError::Serialize {
            format: ConfigFormat::Toml,
            message: err.to_string(),
        })
    }

    fn format(&self) -> ConfigFormat {
        ConfigFormat::Toml
    }
}

/// Convert a single TOML value to a JSON value.
fn toml_to_json_value(toml_value: toml::Value) -> Value {
    match toml_value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => {
            // serde_json::Number doesn't support NaN/Infinity, fall back to string
            serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string()))
        }
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json_value).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json_value(value)))
                .collect(),
        ),
    }
}

/// Convert a single JSON value to a TOML value. TOML has no null, so null
/// values (and null array elements) are left out.
fn json_to_toml_value(json_value: &Value) -> Result<Option<toml::Value>> {
    let value = match json_value {
        Value::Null => return Ok(None),
        Value::Bool(b) => toml::Value::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                toml::Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                toml::Value::Float(f)
            } else {
                return Err(ConversionError::Serialize {
                    format: ConfigFormat::Toml,
                    message: format!("number {n} is out of range"),
                });
            }
        }
        Value::String(s) => toml::Value::String(s.clone()),
        Value::Array(arr) => {
            let mut items = Vec::with_capacity(arr.len());
            for item in arr {
                if let Some(item) = json_to_toml_value(item)? {
                    items.push(item);
                }
            }
            toml::Value::Array(items)
        }
        Value::Object(obj) => {
            let mut table = toml::Table::new();
            for (key, value) in obj {
                if let Some(value) = json_to_toml_value(value)? {
                    table.insert(key.clone(), value);
                }
            }
            toml::Value::Table(table)
        }
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_values_are_skipped() {
        let map = json!({"keep": "yes", "drop": null, "list": [1, null, 2]});
        let text = TomlSerializer
            .encode(map.as_object().unwrap())
            .expect("encode");

        assert!(text.contains("keep"));
        assert!(!text.contains("drop"));

        let decoded = TomlSerializer.decode(&text).expect("decode");
        assert_eq!(decoded.get("list"), Some(&json!([1, 2])));
    }

    #[test]
    fn datetime_decodes_as_string() {
        let decoded = TomlSerializer
            .decode("updated = 1979-05-27T07:32:00Z\n")
            .expect("decode");
        assert_eq!(decoded.get("updated"), Some(&json!("1979-05-27T07:32:00Z")));
    }
}

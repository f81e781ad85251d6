//! JSON serializer for agent configuration files.

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_json::{Map, Value};

use super::{ConfigFormat, ConfigSerializer};
use crate::error::{ConversionError, Result};

/// JSON configuration file serializer.
///
/// Output is pretty-printed with two-space indentation; keys keep their
/// insertion order.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl ConfigSerializer for JsonSerializer {
    fn decode(&self, content: &str) -> Result<Map<String, Value>> {
        let value: Value =
            serde_json::from_str(content).map_err(|err| ConversionError::Syntax {
                format: ConfigFormat::Json,
                message: err.to_string(),
            })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(ConversionError::RootNotObject {
                format: ConfigFormat::Json,
            }),
        }
    }

    fn encode(&self, map: &Map<String, Value>) -> Result<String> {
        let mut content =
            serde_json::to_string_pretty(map).map_err(|err| ConversionError::Serialize {
                format: ConfigFormat::Json,
                message: err.to_string(),
            })?;
        content.push('\n');
        Ok(content)
    }

    fn format(&self) -> ConfigFormat {
        ConfigFormat::Json
    }
}

/// Entries of the object stored under `key` at the document root, in source
/// order. `serde_json::Map` keeps only the last value of a repeated name, so
/// the table is read again here with every entry kept.
pub(super) fn ordered_table(content: &str, key: &str) -> Result<Vec<(String, Value)>> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    RootTable { key }
        .deserialize(&mut deserializer)
        .map_err(|err| ConversionError::Syntax {
            format: ConfigFormat::Json,
            message: err.to_string(),
        })
}

struct RootTable<'a> {
    key: &'a str,
}

impl<'de> DeserializeSeed<'de> for RootTable<'_> {
    type Value = Vec<(String, Value)>;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for RootTable<'_> {
    type Value = Vec<(String, Value)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some(name) = map.next_key::<String>()? {
            if name == self.key {
                entries = map.next_value_seed(OrderedEntries)?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(entries)
    }
}

/// Reads one object as `(name, value)` pairs without merging repeated names.
struct OrderedEntries;

impl<'de> DeserializeSeed<'de> for OrderedEntries {
    type Value = Vec<(String, Value)>;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for OrderedEntries {
    type Value = Vec<(String, Value)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ordered_table_keeps_repeated_names() {
        let content = r#"{
            "other": [1, {"a": 2}],
            "mcpServers": {"a": {"command": "first"}, "b": {}, "a": {"command": "second"}}
        }"#;

        let entries = ordered_table(content, "mcpServers").expect("ordered table");

        let names: Vec<_> = entries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(entries[0].1, json!({"command": "first"}));
        assert_eq!(entries[2].1, json!({"command": "second"}));
    }

    #[test]
    fn ordered_table_without_key_is_empty() {
        let entries = ordered_table(r#"{"servers": {"a": {}}}"#, "mcpServers").expect("table");
        assert!(entries.is_empty());
    }
}

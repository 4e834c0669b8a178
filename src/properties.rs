//! Property definitions with defaults from properties.json
//!
//! properties.json is embedded at compile time and holds every property's
//! default value, so defaults live in ONE place. `PropertyReader` layers
//! user-supplied values (command line, environment) on top of them.

use serde::Deserialize;
use std::collections::HashMap;

/// properties.json embedded at compile time
const PROPERTIES_JSON: &str = include_str!("../properties.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
    #[serde(rename = "IntegerProperty")]
    Integer,
}

/// Property definition from properties.json
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For EnumeratedProperty, the valid values
    #[serde(default, rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct PropertiesFile {
    properties: Vec<PropertyDef>,
}

/// Registry of all properties with their defaults
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse properties.json and build the registry
    ///
    /// Panics if properties.json is malformed, which a test catches since
    /// the file is embedded at compile time.
    pub fn from_properties_json() -> Self {
        let file: PropertiesFile =
            serde_json::from_str(PROPERTIES_JSON).expect("properties.json is invalid");

        let properties = file
            .properties
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();

        Self { properties }
    }

    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

static REGISTRY: std::sync::OnceLock<PropertyRegistry> = std::sync::OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(PropertyRegistry::from_properties_json)
}

/// Typed property reader
///
/// User values win over the defaults from properties.json. Empty user
/// values count as "not set".
#[derive(Debug, Clone, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    pub fn new<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let user_values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();

        Self { user_values }
    }

    /// Set a user value, replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.user_values.insert(name.into(), value);
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.user_values.contains_key(name)
    }

    /// Get string property (user value or default)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get enumerated property with validation
    ///
    /// An invalid user value is logged and replaced by the default.
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.to_lowercase();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            tracing::warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value,
                name,
                valid_values,
                default
            );
        }

        default.to_string()
    }

    /// Get u32 property within `[min, max]`, falling back to the default
    pub fn get_u32_in_range(&self, name: &str, min: u32, max: u32) -> u32 {
        let default = registry()
            .get_default(name)
            .and_then(|d| d.parse::<u32>().ok())
            .unwrap_or(min);

        let Some(raw) = self.user_values.get(name) else {
            return default;
        };

        match raw.trim().parse::<u32>() {
            Ok(v) if (min..=max).contains(&v) => v,
            Ok(v) => {
                tracing::warn!(
                    "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
                    v,
                    name,
                    min,
                    max,
                    default
                );
                default
            }
            Err(_) => {
                tracing::warn!(
                    "Invalid integer value '{}' for property '{}'. Using default: {}",
                    raw,
                    name,
                    default
                );
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads() {
        let reg = registry();
        for name in [
            "source.url",
            "column.order",
            "blank.character",
            "origin",
            "collision",
            "max.coordinate",
        ] {
            assert!(reg.get_property(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_registry_defaults() {
        let reg = registry();
        assert_eq!(reg.get_default("origin"), Some("top-left"));
        assert_eq!(reg.get_default("collision"), Some("last"));
        assert_eq!(reg.get_default("blank.character"), Some(" "));
        assert_eq!(
            reg.get_property("max.coordinate").map(|p| p.kind),
            Some(PropertyKind::Integer)
        );
    }

    #[test]
    fn test_enum_validation() {
        let reg = registry();
        assert!(reg.is_valid_enum_value("collision", "first"));
        assert!(reg.is_valid_enum_value("origin", "Bottom-Left"));
        assert!(!reg.is_valid_enum_value("collision", "mean"));
        // Non-enumerated properties accept anything
        assert!(reg.is_valid_enum_value("column.order", "whatever"));
    }

    #[test]
    fn test_reader_defaults() {
        let reader = PropertyReader::default();
        assert_eq!(reader.get_enum("origin"), "top-left");
        assert_eq!(reader.get_string("column.order"), "x,character,y");
        assert_eq!(reader.get_u32_in_range("max.coordinate", 1, 65_535), 1024);
    }

    #[test]
    fn test_reader_user_values() {
        let reader = PropertyReader::new([
            ("origin", "BOTTOM-LEFT"),
            ("collision", "mean"),
            ("column.order", ""),
            ("max.coordinate", "200"),
        ]);
        assert_eq!(reader.get_enum("origin"), "bottom-left");
        assert_eq!(reader.get_enum("collision"), "last"); // invalid -> default
        assert!(!reader.is_set("column.order")); // empty = not set
        assert_eq!(reader.get_u32_in_range("max.coordinate", 1, 65_535), 200);
    }

    #[test]
    fn test_reader_integer_fallbacks() {
        let mut reader = PropertyReader::default();
        reader.set("max.coordinate", "lots");
        assert_eq!(reader.get_u32_in_range("max.coordinate", 1, 65_535), 1024);

        reader.set("max.coordinate", "0");
        assert_eq!(reader.get_u32_in_range("max.coordinate", 1, 65_535), 1024);
    }
}

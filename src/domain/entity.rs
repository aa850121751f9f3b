//! Raw and canonical entity representations
//!
//! A [`RawEntity`] is whatever JSON a platform returned for one record.
//! A [`CanonicalEntity`] is the platform-independent record handed to the
//! sync engine. Its identity is `(platform, entity_type, source_id)`.

use super::platform::EntityType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Platform-native representation of a single record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEntity(Value);

impl RawEntity {
    /// Wrap a JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the underlying JSON
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Read a top-level field as an identifier string
    ///
    /// Numeric identifiers (Greenhouse, BambooHR) are rendered in decimal.
    pub fn field_as_id(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Value> for RawEntity {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Platform-independent record produced by the data mapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEntity {
    /// Name of the platform the record came from
    pub platform: String,

    /// Kind of record
    pub entity_type: EntityType,

    /// Identifier of the record on the source platform, when it has one
    pub source_id: Option<String>,

    /// SHA-256 over the key-sorted JSON of `data`
    pub checksum: String,

    /// Canonical payload
    pub data: Value,
}

impl CanonicalEntity {
    /// Create a canonical entity, computing its checksum
    pub fn new(
        platform: impl Into<String>,
        entity_type: EntityType,
        source_id: Option<String>,
        data: Value,
    ) -> Self {
        let checksum = calculate_checksum(&data);
        Self {
            platform: platform.into(),
            entity_type,
            source_id,
            checksum,
            data,
        }
    }

    /// Key under which the record is stored
    ///
    /// Records without a source id fall back to their checksum, so identical
    /// anonymous payloads collapse into one record.
    pub fn identity_key(&self) -> String {
        match &self.source_id {
            Some(id) => format!("id:{id}"),
            None => format!("sha256:{}", self.checksum),
        }
    }
}

/// Hex SHA-256 of a JSON value with object keys sorted recursively
pub fn calculate_checksum(data: &Value) -> String {
    let normalized = normalize_json(data);
    let mut hasher = Sha256::new();
    hasher.update(normalized.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn normalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, normalize_json(v))).collect();
            Value::Object(sorted.into_iter().map(|(k, v)| (k.clone(), v)).collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize_json).collect()),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_as_id() {
        let raw = RawEntity::new(json!({"id": 4012, "userId": "jdoe", "empty": ""}));
        assert_eq!(raw.field_as_id("id"), Some("4012".to_string()));
        assert_eq!(raw.field_as_id("userId"), Some("jdoe".to_string()));
        assert_eq!(raw.field_as_id("empty"), None);
        assert_eq!(raw.field_as_id("missing"), None);
    }

    #[test]
    fn test_checksum_ignores_key_order() {
        let a = json!({"name": "Ada", "tags": [{"x": 1, "y": 2}]});
        let b = json!({"tags": [{"y": 2, "x": 1}], "name": "Ada"});
        assert_eq!(calculate_checksum(&a), calculate_checksum(&b));
        assert_eq!(calculate_checksum(&a).len(), 64);
    }

    #[test]
    fn test_checksum_detects_changes() {
        let a = json!({"status": "open"});
        let b = json!({"status": "closed"});
        assert_ne!(calculate_checksum(&a), calculate_checksum(&b));
    }

    #[test]
    fn test_identity_key() {
        let with_id =
            CanonicalEntity::new("greenhouse", EntityType::Jobs, Some("7".into()), json!({}));
        assert_eq!(with_id.identity_key(), "id:7");

        let anonymous = CanonicalEntity::new("greenhouse", EntityType::Jobs, None, json!({"a": 1}));
        assert!(anonymous.identity_key().starts_with("sha256:"));
    }
}

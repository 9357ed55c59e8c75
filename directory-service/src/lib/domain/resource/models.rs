use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use uuid::Uuid;

use crate::resource::errors::DocumentIdError;
use crate::resource::errors::ResourceError;

/// Reserved key: store-assigned, ignored on add, mandatory on update.
pub const ID_FIELD: &str = "id";

/// Document unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    /// Generate a new random document ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a document ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, DocumentIdError> {
        Uuid::parse_str(s)
            .map(DocumentId)
            .map_err(|e| DocumentIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Declarative field schema binding a domain to its collection.
///
/// One instance per domain (shelter, food, healthcare, outreach, counseling);
/// the service logic is identical across all of them.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    /// Domain tag as it appears in the route path
    pub domain: &'static str,
    /// Backing collection name
    pub collection: &'static str,
    /// Ordered required field names; also the complete set of allowed fields
    pub required_fields: &'static [&'static str],
}

impl ResourceSchema {
    /// Validate a parsed field map against this schema.
    ///
    /// Every key must be a schema field; every required field must be present
    /// and non-empty after trimming.
    ///
    /// # Errors
    /// * `UnknownField` - Key outside the schema
    /// * `MissingField` - Required field absent or empty
    pub fn validate(&self, fields: &BTreeMap<String, String>) -> Result<(), ResourceError> {
        for key in fields.keys() {
            if !self.required_fields.contains(&key.as_str()) {
                return Err(ResourceError::UnknownField { field: key.clone() });
            }
        }

        for required in self.required_fields {
            match fields.get(*required) {
                Some(value) if !value.trim().is_empty() => {}
                _ => {
                    return Err(ResourceError::MissingField {
                        field: (*required).to_string(),
                    })
                }
            }
        }

        Ok(())
    }
}

/// Loosely-typed input for add and update operations.
///
/// The reserved `id` key is split out during parsing; everything else is a
/// flat string map.
#[derive(Debug, Clone, Default)]
pub struct ResourceInput {
    pub id: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl ResourceInput {
    /// Parse a raw JSON object into a flat field map.
    ///
    /// Scalar values (string, number, bool) coerce to strings; arrays,
    /// objects, and null are rejected.
    ///
    /// # Errors
    /// * `InvalidFieldValue` - Value is not a scalar
    pub fn from_json(object: &serde_json::Map<String, Value>) -> Result<Self, ResourceError> {
        let mut id = None;
        let mut fields = BTreeMap::new();

        for (key, value) in object {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(ResourceError::InvalidFieldValue { field: key.clone() });
                }
            };

            if key == ID_FIELD {
                id = Some(text);
            } else {
                fields.insert(key.clone(), text);
            }
        }

        Ok(Self { id, fields })
    }
}

/// A stored resource record: store-assigned id plus its flat field map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub id: DocumentId,
    pub fields: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> ResourceSchema {
        ResourceSchema {
            domain: "shelter",
            collection: "shelters",
            required_fields: &["organization", "location", "capacity"],
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        let complete = fields(&[
            ("organization", "City Shelter"),
            ("location", "Springfield"),
            ("capacity", "40"),
        ]);
        assert!(schema().validate(&complete).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_field() {
        let input = fields(&[
            ("organization", "City Shelter"),
            ("location", "Springfield"),
            ("capacity", "40"),
            ("phone", "555-1234"),
        ]);
        assert!(matches!(
            schema().validate(&input),
            Err(ResourceError::UnknownField { field }) if field == "phone"
        ));
    }

    #[test]
    fn test_validate_rejects_missing_and_empty_fields() {
        let missing = fields(&[("organization", "City Shelter"), ("capacity", "40")]);
        assert!(matches!(
            schema().validate(&missing),
            Err(ResourceError::MissingField { field }) if field == "location"
        ));

        let empty = fields(&[
            ("organization", "City Shelter"),
            ("location", "   "),
            ("capacity", "40"),
        ]);
        assert!(matches!(
            schema().validate(&empty),
            Err(ResourceError::MissingField { field }) if field == "location"
        ));
    }

    #[test]
    fn test_from_json_coerces_scalars_and_splits_id() {
        let body = json!({
            "id": "3e9bd6f2-8b8a-4f9e-9a1d-111111111111",
            "organization": "City Shelter",
            "capacity": 40,
            "active": true
        });

        let input = ResourceInput::from_json(body.as_object().unwrap()).unwrap();
        assert_eq!(
            input.id.as_deref(),
            Some("3e9bd6f2-8b8a-4f9e-9a1d-111111111111")
        );
        assert_eq!(input.fields.get("capacity").unwrap(), "40");
        assert_eq!(input.fields.get("active").unwrap(), "true");
        assert!(!input.fields.contains_key("id"));
    }

    #[test]
    fn test_from_json_rejects_nested_values() {
        let body = json!({ "organization": { "name": "nested" } });
        assert!(matches!(
            ResourceInput::from_json(body.as_object().unwrap()),
            Err(ResourceError::InvalidFieldValue { field }) if field == "organization"
        ));
    }
}

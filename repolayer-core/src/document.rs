//! Documents, identifiers, and the one modeled record shape.
//!
//! The repository is schema-agnostic: it moves [`bson::Document`] values in
//! and out of the store without validating their shape. The only parsing the
//! core performs is on externally supplied identifier strings.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::{RepositoryError, RepositoryResult};

/// Decodes an externally supplied identifier string into the store's
/// canonical 12-byte object identifier.
///
/// Malformed input is a caller error ([`RepositoryError::InvalidIdentifier`]),
/// raised before any store operation is attempted.
pub fn parse_identifier(id: &str) -> RepositoryResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| RepositoryError::InvalidIdentifier(id.to_string()))
}

/// Convenience shape for the one modeled entity, a user record.
///
/// Nothing in the core enforces this shape; it exists so callers that do know
/// they are handling users get a typed view. Every field is absent-tolerant,
/// and the identifier is store-generated and immutable once assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl UserRecord {
    /// Name of the collection user records persist to.
    pub const COLLECTION: &'static str = "user";
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;

    #[test]
    fn valid_hex_string_parses() {
        let id = ObjectId::new();
        assert_eq!(parse_identifier(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn malformed_identifiers_are_caller_errors() {
        for bad in ["", "not-hex", "abc123", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            let err = parse_identifier(bad).unwrap_err();
            assert_eq!(err.kind(), "invalid_identifier");
        }
    }

    #[test]
    fn absent_fields_are_omitted_from_serialized_records() {
        let record = UserRecord {
            full_name: Some("Ann".into()),
            email: Some("ann@x.com".into()),
            ..Default::default()
        };
        let bson = bson::ser::serialize_to_bson(&record).unwrap();
        let doc = bson.as_document().unwrap();
        assert_eq!(doc.get("fullName"), Some(&Bson::String("Ann".into())));
        assert_eq!(doc.get("email"), Some(&Bson::String("ann@x.com".into())));
        assert!(!doc.contains_key("_id"));
        assert!(!doc.contains_key("passwordHash"));
    }

    #[test]
    fn records_round_trip_through_json() {
        let record = UserRecord {
            id: Some(ObjectId::new()),
            full_name: Some("Ann".into()),
            email: Some("ann@x.com".into()),
            password_hash: Some("hash".into()),
        };
        let json = serde_json::to_value(&record).unwrap();
        let back: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}

//! # Message-Schema Registry
//!
//! The validated, immutable allow-list. Loading rejects duplicate message
//! type identifiers; after that the registry is read-only and lookups are
//! pure and total.

use std::collections::HashMap;

use lattice_core::SchemaError;

use crate::schema::MessageSchema;

/// Immutable allow-list of message schemas keyed by type identifier.
///
/// Serves as both the gate (only listed message kinds may be typed-data
/// signed) and the schema source for type-graph construction. Entries keep
/// their load order; the index exists only for O(1) lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSchemaRegistry {
    schemas: Vec<MessageSchema>,
    index: HashMap<String, usize>,
}

impl MessageSchemaRegistry {
    /// Validate and load an allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateTypeId`] naming the first identifier
    /// that appears twice.
    pub fn load(schemas: Vec<MessageSchema>) -> Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(schemas.len());
        for (i, schema) in schemas.iter().enumerate() {
            if index.insert(schema.type_id.clone(), i).is_some() {
                return Err(SchemaError::DuplicateTypeId(schema.type_id.clone()));
            }
        }
        Ok(Self { schemas, index })
    }

    /// Look up a schema by message type identifier.
    pub fn lookup(&self, type_id: &str) -> Option<&MessageSchema> {
        self.index.get(type_id).map(|&i| &self.schemas[i])
    }

    /// All schemas in load order.
    pub fn schemas(&self) -> &[MessageSchema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeField;

    fn send_schema() -> MessageSchema {
        MessageSchema::new(
            "/cosmos.bank.v1beta1.MsgSend",
            "MsgValueSend",
            vec![
                TypeField::new("from_address", "string"),
                TypeField::new("to_address", "string"),
                TypeField::new("amount", "Coin[]"),
            ],
        )
    }

    #[test]
    fn lookup_finds_loaded_schema() {
        let reg = MessageSchemaRegistry::load(vec![send_schema()]).unwrap();
        let schema = reg.lookup("/cosmos.bank.v1beta1.MsgSend").unwrap();
        assert_eq!(schema.value_type_name, "MsgValueSend");
        assert!(reg.lookup("/cosmos.bank.v1beta1.MsgMultiSend").is_none());
    }

    #[test]
    fn duplicate_type_id_rejected() {
        let err = MessageSchemaRegistry::load(vec![send_schema(), send_schema()]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateTypeId("/cosmos.bank.v1beta1.MsgSend".into())
        );
    }

    #[test]
    fn empty_registry_is_valid() {
        let reg = MessageSchemaRegistry::load(vec![]).unwrap();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }
}

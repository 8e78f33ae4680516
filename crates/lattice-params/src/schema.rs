//! # Allow-List Schema Types
//!
//! The wire shape of one allow-list entry: a message type identifier, the
//! name of its EIP-712 value type, the value type's ordered field list, and
//! any nested types the fields reference.
//!
//! Field lists are ordered sequences everywhere. Struct hashing is
//! order-sensitive, so no unordered container may stand in for them.

use serde::{Deserialize, Serialize};

/// One named, typed field of an EIP-712 struct type.
///
/// The `(name, type)` pair is order-significant within its field list and
/// serializes as `{"name": ..., "type": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeField {
    /// Field name as it appears in the signed payload.
    pub name: String,
    /// EIP-712 type string: a primitive (`string`, `uint64`), a named
    /// struct (`Coin`), or an array (`Coin[]`).
    #[serde(rename = "type")]
    pub r#type: String,
}

impl TypeField {
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
        }
    }
}

/// A nested struct type declared by a schema, registered under its own name.
///
/// Nested types shared across unrelated schemas (`Coin` is the common case)
/// collapse to a single type-graph entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedType {
    /// Type-graph name for the nested struct.
    pub name: String,
    /// Ordered field list of the nested struct.
    pub attrs: Vec<TypeField>,
}

impl NestedType {
    pub fn new(name: impl Into<String>, attrs: Vec<TypeField>) -> Self {
        Self {
            name: name.into(),
            attrs,
        }
    }
}

/// One entry of the message-schema allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSchema {
    /// Message type identifier, e.g. `/cosmos.bank.v1beta1.MsgSend`.
    /// Unique within a registry.
    pub type_id: String,
    /// Name of the EIP-712 value type, e.g. `MsgValueSend`.
    pub value_type_name: String,
    /// Ordered field list of the value type.
    pub value_fields: Vec<TypeField>,
    /// Nested types referenced by the value fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_types: Vec<NestedType>,
}

impl MessageSchema {
    pub fn new(
        type_id: impl Into<String>,
        value_type_name: impl Into<String>,
        value_fields: Vec<TypeField>,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            value_type_name: value_type_name.into(),
            value_fields,
            nested_types: Vec::new(),
        }
    }

    /// Attach nested type declarations.
    pub fn with_nested(mut self, nested_types: Vec<NestedType>) -> Self {
        self.nested_types = nested_types;
        self
    }
}

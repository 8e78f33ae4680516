//! # Typed-Data Structures
//!
//! The named-type graph, the signing domain, the typed-data envelope, and
//! the capability interface messages plug into.
//!
//! ## Determinism Invariant
//!
//! Field lists and the graph itself are insertion-ordered everywhere.
//! Struct hashing walks fields in declared order and external verifiers
//! recompute the same walk independently, so no unordered container may be
//! substituted anywhere in the graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use lattice_core::SigningError;
use lattice_params::TypeField;

/// Chain-fixed domain constants. Only the chain id varies per deployment.
pub const DOMAIN_NAME: &str = "Lattice Cosmos";
pub const DOMAIN_VERSION: &str = "1.0.0";
pub const DOMAIN_VERIFYING_CONTRACT: &str = "latticeCosmos";
pub const DOMAIN_SALT: &str = "0";

/// Mapping from type name to its ordered field list.
///
/// Grows by insert-if-absent merges from multiple sources (roots,
/// per-message wrappers, value types, nested types). The first
/// registration for a name wins; later registrations of the same name are
/// silently ignored and are NOT checked for field-list equality. Two schema
/// families reusing a name with different fields will silently keep the
/// first version — a latent compatibility gap carried over from the wire
/// format this implements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeGraph(IndexMap<String, Vec<TypeField>>);

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `fields` under `name` unless the name is already present.
    /// Returns whether the registration took effect.
    pub fn register_if_absent(&mut self, name: impl Into<String>, fields: Vec<TypeField>) -> bool {
        let name = name.into();
        if self.0.contains_key(&name) {
            return false;
        }
        self.0.insert(name, fields);
        true
    }

    /// Register or overwrite `name`. Used by the fee-delegation patch,
    /// which redefines the Fee type wholesale.
    pub fn replace(&mut self, name: impl Into<String>, fields: Vec<TypeField>) {
        self.0.insert(name.into(), fields);
    }

    /// Append a field to an existing (or new) type's field list.
    pub fn append_field(&mut self, name: impl Into<String>, field: TypeField) {
        self.0.entry(name.into()).or_default().push(field);
    }

    /// The ordered field list of `name`, if registered.
    pub fn get(&self, name: &str) -> Option<&[TypeField]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Type names in insertion order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Seed graph holding the four fixed root types.
///
/// `timeout_height` is deliberately absent from Tx: the legacy sign path
/// never fills it.
pub fn root_type_graph() -> TypeGraph {
    let mut graph = TypeGraph::new();
    graph.register_if_absent(
        "EIP712Domain",
        vec![
            TypeField::new("name", "string"),
            TypeField::new("version", "string"),
            TypeField::new("chainId", "uint256"),
            TypeField::new("verifyingContract", "string"),
            TypeField::new("salt", "string"),
        ],
    );
    graph.register_if_absent(
        "Tx",
        vec![
            TypeField::new("account_number", "string"),
            TypeField::new("chain_id", "string"),
            TypeField::new("fee", "Fee"),
            TypeField::new("memo", "string"),
            TypeField::new("sequence", "string"),
        ],
    );
    graph.register_if_absent(
        "Fee",
        vec![
            TypeField::new("amount", "Coin[]"),
            TypeField::new("gas", "string"),
        ],
    );
    graph.register_if_absent(
        "Coin",
        vec![
            TypeField::new("denom", "string"),
            TypeField::new("amount", "string"),
        ],
    );
    graph
}

/// The EIP-712 signing domain.
///
/// Name, version, verifying contract, and salt are fixed constants binding
/// signatures to the Lattice typed-data context; the chain id is the sole
/// per-chain variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    pub version: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    #[serde(rename = "verifyingContract")]
    pub verifying_contract: String,
    pub salt: String,
}

impl Domain {
    /// The domain for a given EIP-155 chain id.
    pub fn for_chain(chain_id: u64) -> Self {
        Self {
            name: DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id,
            verifying_contract: DOMAIN_VERIFYING_CONTRACT.to_string(),
            salt: DOMAIN_SALT.to_string(),
        }
    }

    /// The domain rendered as a message payload for struct hashing.
    pub fn as_message(&self) -> serde_json::Map<String, Value> {
        let mut map = serde_json::Map::new();
        map.insert("name".into(), Value::String(self.name.clone()));
        map.insert("version".into(), Value::String(self.version.clone()));
        map.insert("chainId".into(), Value::from(self.chain_id));
        map.insert(
            "verifyingContract".into(),
            Value::String(self.verifying_contract.clone()),
        );
        map.insert("salt".into(), Value::String(self.salt.clone()));
        map
    }
}

/// The assembled typed-data envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedData {
    pub types: TypeGraph,
    #[serde(rename = "primaryType")]
    pub primary_type: String,
    pub domain: Domain,
    pub message: Value,
}

/// Capability interface for messages entering the signing pipeline.
///
/// Concrete message kinds are data plugged into the pipeline, not a type
/// hierarchy: the pipeline only needs the type identifier (for the
/// allow-list lookup) and the message's own legacy-signable serialization.
pub trait SignableMessage {
    /// The message type identifier, e.g. `/cosmos.bank.v1beta1.MsgSend`.
    fn type_id(&self) -> &str;

    /// The message's legacy amino-JSON signable bytes
    /// (`{"type": ..., "value": {...}}`).
    fn sign_bytes(&self) -> Result<Vec<u8>, SigningError>;
}

//! # lattice-params — Message-Schema Allow-List
//!
//! Governance-controlled configuration for the typed-data signing path.
//! Only message kinds listed here may participate in EIP-712 signing; the
//! same entries are the schema source for type-graph construction.
//!
//! The allow-list is process-wide, read-only configuration for the duration
//! of a parameter epoch. It is modeled as an explicit value handed to every
//! operation that needs it — never a mutated-in-place singleton. Epoch
//! replacement goes through [`RegistryCell`], which swaps a complete
//! snapshot atomically so concurrent readers never observe a partially
//! updated registry.

pub mod migration;
pub mod registry;
pub mod schema;
pub mod store;

pub use migration::{
    default_schema_set, load_registry, migrate_allowed_schemas, MigrationError, MigrationOutcome,
};
pub use registry::MessageSchemaRegistry;
pub use schema::{MessageSchema, NestedType, TypeField};
pub use store::{MemParamStore, ParamStore, RegistryCell, SIGN_SCHEMAS_PARAM_KEY};

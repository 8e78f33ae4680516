//! # lattice-core — Foundational Types for the Lattice Signing Stack
//!
//! This crate is the leaf of the workspace DAG. It defines the primitives
//! every other crate builds on:
//!
//! 1. **`SignDocBytes` newtype.** ALL legacy sign-document byte production
//!    flows through `SignDocBytes::new()`. No raw `serde_json::to_vec()` for
//!    signing bytes, ever. External verifiers recompute these bytes
//!    independently; a second serialization path is a consensus bug waiting
//!    to happen.
//!
//! 2. **`Hash32` + `keccak256()`.** The 256-bit hash primitive is wrapped
//!    exactly once. Every digest in the workspace is a `Hash32`.
//!
//! 3. **Shared error taxonomy.** `SchemaError` and `PayloadError` are
//!    recoverable and expected during normal operation; `InternalFault`
//!    means a trusted collaborator broke its contract and the request must
//!    be aborted, never silently patched over.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lattice-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;

pub use canonical::SignDocBytes;
pub use digest::{keccak256, Hash32};
pub use error::{InternalFault, PayloadError, SchemaError, SigningError};

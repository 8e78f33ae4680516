//! # lattice-eip712 — Typed-Data Pipeline
//!
//! Converts a Lattice transaction envelope into an EIP-712 typed-data
//! structure hashed deterministically for external-wallet signing, gated
//! by the governance-controlled schema allow-list.
//!
//! The pipeline is a single linear flow, every stage pure and idempotent
//! on identical input:
//!
//! ```text
//! registry lookup → type-graph build → (optional) fee patch
//!                 → assemble → hash
//! ```
//!
//! A sibling path, [`signdoc::canonical_sign_doc`], produces the legacy
//! deterministic JSON sign document feeding the non-typed signing path.
//!
//! ## Determinism
//!
//! Everything downstream of the registry must be byte-for-byte
//! reproducible: wallets and contract-side verifiers recompute the type
//! graph, the canonical document, and every hash independently. Field
//! lists are ordered sequences, the graph is insertion-ordered, and the
//! canonical document sorts keys lexicographically at every level.

pub mod assemble;
pub mod fee;
pub mod graph;
pub mod hash;
pub mod signdoc;
pub mod types;

pub use assemble::wrap_tx_to_typed_data;
pub use fee::FeeDelegation;
pub use graph::build_type_graph;
pub use hash::{domain_separator, sign_hash, struct_hash};
pub use signdoc::{canonical_sign_doc, Coin, StdFee};
pub use types::{root_type_graph, Domain, SignableMessage, TypeGraph, TypedData};

//! # Typed-Data Assembly
//!
//! Wraps a canonical sign document into the EIP-712 envelope: build the
//! type graph against the allow-list, apply the optional fee-delegation
//! patch, and combine domain, graph, primary type, and payload.

use serde_json::Value;
use tracing::debug;

use lattice_core::{PayloadError, SigningError};
use lattice_params::MessageSchemaRegistry;

use crate::fee::{apply_fee_delegation, FeeDelegation};
use crate::graph::build_type_graph;
use crate::types::{Domain, SignableMessage, TypedData};

/// Wrap a transaction's canonical sign document into typed data.
///
/// `sign_doc` is the canonical per-message sign document (see
/// [`crate::signdoc::canonical_sign_doc`]); its decoded object becomes the
/// envelope's message payload verbatim.
pub fn wrap_tx_to_typed_data(
    chain_id: u64,
    msgs: &[&dyn SignableMessage],
    sign_doc: &[u8],
    fee_delegation: Option<&FeeDelegation>,
    registry: &MessageSchemaRegistry,
) -> Result<TypedData, SigningError> {
    let mut message: Value = serde_json::from_slice::<serde_json::Map<String, Value>>(sign_doc)
        .map(Value::Object)
        .map_err(PayloadError::Decode)?;

    let mut types = build_type_graph(msgs, registry)?;

    if let Some(delegation) = fee_delegation {
        apply_fee_delegation(&mut message, &mut types, delegation)?;
    }

    debug!(
        chain_id,
        messages = msgs.len(),
        delegated = fee_delegation.is_some(),
        "assembled typed data"
    );
    Ok(TypedData {
        types,
        primary_type: "Tx".to_string(),
        domain: Domain::for_chain(chain_id),
        message,
    })
}

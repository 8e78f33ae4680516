//! # Fee Delegation
//!
//! Optional transform for fee-delegated transactions: a third party pays
//! the fee on the signer's behalf, so the signed payload must carry the
//! payer's address and the Fee type must declare it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lattice_core::PayloadError;
use lattice_params::TypeField;

use crate::types::TypeGraph;

/// Request-scoped fee-delegation options. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDelegation {
    /// Bech32 address of the account paying the fee.
    pub fee_payer: String,
}

/// The Fee type's fixed field order under delegation.
pub fn delegated_fee_fields() -> Vec<TypeField> {
    vec![
        TypeField::new("feePayer", "string"),
        TypeField::new("amount", "Coin[]"),
        TypeField::new("gas", "string"),
    ]
}

/// Inject the fee payer into a transaction payload and redefine the Fee
/// type accordingly.
///
/// # Errors
///
/// [`PayloadError::MalformedFeePayload`] if the payload has no fee object
/// to patch.
pub fn apply_fee_delegation(
    tx_payload: &mut Value,
    types: &mut TypeGraph,
    delegation: &FeeDelegation,
) -> Result<(), PayloadError> {
    let fee = tx_payload
        .get_mut("fee")
        .and_then(Value::as_object_mut)
        .ok_or(PayloadError::MalformedFeePayload)?;

    fee.insert(
        "feePayer".to_string(),
        Value::String(delegation.fee_payer.clone()),
    );
    types.replace("Fee", delegated_fee_fields());
    Ok(())
}

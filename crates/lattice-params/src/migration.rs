//! # Allow-List Store Migration
//!
//! One-time upgrade seeding the allow-list parameter with the fixed,
//! versioned set of permitted message schemas. Runs at the upgrade height;
//! if the target store's key table does not yet recognize the parameter
//! key, the migration aborts loudly instead of silently no-opping.

use thiserror::Error;
use tracing::info;

use lattice_core::SchemaError;

use crate::registry::MessageSchemaRegistry;
use crate::schema::{MessageSchema, NestedType, TypeField};
use crate::store::{ParamStore, SIGN_SCHEMAS_PARAM_KEY};

/// Error aborting an allow-list migration.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The store's key table does not recognize the allow-list parameter
    /// key. The upgrade wiring is incomplete; refusing is the only safe
    /// option.
    #[error("param store key table does not recognize \"{key}\"")]
    UnrecognizedParamKey {
        /// The unrecognized parameter key.
        key: String,
    },

    /// The fixed default schema set failed registry validation.
    #[error("default schema set is invalid: {0}")]
    InvalidDefaults(#[from] SchemaError),

    /// The schema set could not be encoded for persistence.
    #[error("failed to encode schema set: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What a migration run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The parameter was absent and has been seeded with this many schemas.
    Seeded(usize),
    /// The parameter was already present; the store was left untouched.
    AlreadySeeded,
}

/// Seed the allow-list parameter with [`default_schema_set()`] when absent.
///
/// Exactly-once per upgrade height: a rerun observes the existing parameter
/// and reports [`MigrationOutcome::AlreadySeeded`] without rewriting.
///
/// # Errors
///
/// [`MigrationError::UnrecognizedParamKey`] if the store's key table does
/// not recognize [`SIGN_SCHEMAS_PARAM_KEY`].
pub fn migrate_allowed_schemas(
    store: &mut dyn ParamStore,
) -> Result<MigrationOutcome, MigrationError> {
    if !store.recognizes(SIGN_SCHEMAS_PARAM_KEY) {
        return Err(MigrationError::UnrecognizedParamKey {
            key: SIGN_SCHEMAS_PARAM_KEY.to_string(),
        });
    }

    if store.has(SIGN_SCHEMAS_PARAM_KEY) {
        info!(key = SIGN_SCHEMAS_PARAM_KEY, "allow-list already seeded");
        return Ok(MigrationOutcome::AlreadySeeded);
    }

    let schemas = default_schema_set();
    // The fixed set must itself load cleanly; a duplicate here is a defect
    // in this module, not in caller input.
    MessageSchemaRegistry::load(schemas.clone())?;

    let bytes = serde_json::to_vec(&schemas)?;
    store.set_raw(SIGN_SCHEMAS_PARAM_KEY, bytes);
    info!(
        key = SIGN_SCHEMAS_PARAM_KEY,
        count = schemas.len(),
        "seeded allow-list parameter"
    );
    Ok(MigrationOutcome::Seeded(schemas.len()))
}

/// Decode a persisted allow-list back into a validated registry.
pub fn load_registry(store: &dyn ParamStore) -> Result<Option<MessageSchemaRegistry>, MigrationError> {
    let Some(bytes) = store.get_raw(SIGN_SCHEMAS_PARAM_KEY) else {
        return Ok(None);
    };
    let schemas: Vec<MessageSchema> = serde_json::from_slice(&bytes)?;
    Ok(Some(MessageSchemaRegistry::load(schemas)?))
}

/// The fixed, versioned default allow-list.
///
/// Bank send, the three staking operations, governance voting, and the
/// Lattice-specific ERC20 bridge and reward-claim messages.
pub fn default_schema_set() -> Vec<MessageSchema> {
    let coin = || {
        NestedType::new(
            "Coin",
            vec![
                TypeField::new("denom", "string"),
                TypeField::new("amount", "string"),
            ],
        )
    };
    let reward_selection = || {
        NestedType::new(
            "RewardSelection",
            vec![
                TypeField::new("denom", "string"),
                TypeField::new("multiplier_name", "string"),
            ],
        )
    };

    vec![
        // x/bank
        MessageSchema::new(
            "/cosmos.bank.v1beta1.MsgSend",
            "MsgValueSend",
            vec![
                TypeField::new("from_address", "string"),
                TypeField::new("to_address", "string"),
                TypeField::new("amount", "Coin[]"),
            ],
        ),
        // x/staking
        MessageSchema::new(
            "/cosmos.staking.v1beta1.MsgDelegate",
            "MsgValueStakingDelegate",
            vec![
                TypeField::new("delegator_address", "string"),
                TypeField::new("validator_address", "string"),
                TypeField::new("amount", "Coin"),
            ],
        )
        .with_nested(vec![coin()]),
        MessageSchema::new(
            "/cosmos.staking.v1beta1.MsgUndelegate",
            "MsgValueStakingUndelegate",
            vec![
                TypeField::new("delegator_address", "string"),
                TypeField::new("validator_address", "string"),
                TypeField::new("amount", "Coin"),
            ],
        )
        .with_nested(vec![coin()]),
        MessageSchema::new(
            "/cosmos.staking.v1beta1.MsgBeginRedelegate",
            "MsgValueStakingBeginRedelegate",
            vec![
                TypeField::new("delegator_address", "string"),
                TypeField::new("validator_src_address", "string"),
                TypeField::new("validator_dst_address", "string"),
                TypeField::new("amount", "Coin"),
            ],
        )
        .with_nested(vec![coin()]),
        // x/gov
        MessageSchema::new(
            "/cosmos.gov.v1beta1.MsgVote",
            "MsgValueGovVote",
            vec![
                TypeField::new("proposal_id", "uint64"),
                TypeField::new("voter", "string"),
                TypeField::new("option", "int32"),
            ],
        ),
        // x/erc20 bridge
        MessageSchema::new(
            "/lattice.erc20.v1.MsgConvertCoin",
            "MsgValueConvertCoin",
            vec![
                TypeField::new("initiator", "string"),
                TypeField::new("receiver", "string"),
                TypeField::new("amount", "Coin"),
            ],
        )
        .with_nested(vec![coin()]),
        MessageSchema::new(
            "/lattice.erc20.v1.MsgConvertERC20",
            "MsgValueConvertERC20",
            vec![
                TypeField::new("initiator", "string"),
                TypeField::new("receiver", "string"),
                TypeField::new("contract_address", "string"),
                TypeField::new("amount", "string"),
            ],
        ),
        // x/rewards
        MessageSchema::new(
            "/lattice.rewards.v1.MsgClaimRewards",
            "MsgValueClaimRewards",
            vec![
                TypeField::new("sender", "string"),
                TypeField::new("denoms_to_claim", "RewardSelection[]"),
            ],
        )
        .with_nested(vec![reward_selection()]),
    ]
}

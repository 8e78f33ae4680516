//! # Canonical Sign-Document Builder
//!
//! The legacy (non-typed) signing path: a deterministic JSON sign document
//! with one field per message instead of an aggregate list.
//!
//! The base document carries the aggregate `msgs` array the chain has
//! always signed. For typed-data display each message becomes its own
//! `msg1..msgN` entry, the aggregate entry is removed, and the result is
//! re-serialized with canonical key ordering so semantically identical
//! documents always produce byte-identical output.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use lattice_core::{InternalFault, SignDocBytes, SigningError};

use crate::types::SignableMessage;

/// A single fee coin, amounts rendered as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// The legacy standard fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

impl StdFee {
    pub fn new(amount: Vec<Coin>, gas: impl Into<String>) -> Self {
        Self {
            amount,
            gas: gas.into(),
        }
    }
}

/// The base legacy sign document. Integers are rendered as strings, the
/// amino JSON convention for 64-bit values.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StdSignDoc {
    account_number: String,
    chain_id: String,
    fee: StdFee,
    memo: String,
    msgs: Vec<Value>,
    sequence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_height: Option<String>,
}

/// Build the per-message canonical sign document.
///
/// Produces the base document, removes the aggregate `msgs` entry, inserts
/// `msg1..msgN` (each holding that message's own legacy-signable
/// serialization), and re-serializes with lexicographic key ordering at
/// every nesting level.
///
/// # Errors
///
/// [`InternalFault`] if a message's sign bytes or the base document fail
/// to round-trip through JSON — that is a contract violation by a trusted
/// collaborator, not a recoverable input error.
#[allow(clippy::too_many_arguments)]
pub fn canonical_sign_doc(
    chain_id: &str,
    account_number: u64,
    sequence: u64,
    timeout_height: u64,
    fee: &StdFee,
    msgs: &[&dyn SignableMessage],
    memo: &str,
) -> Result<SignDocBytes, SigningError> {
    let mut msg_values = Vec::with_capacity(msgs.len());
    for msg in msgs {
        let bytes = msg.sign_bytes()?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| InternalFault::round_trip("message sign bytes", &e))?;
        msg_values.push(value);
    }

    let doc = StdSignDoc {
        account_number: account_number.to_string(),
        chain_id: chain_id.to_string(),
        fee: fee.clone(),
        memo: memo.to_string(),
        msgs: msg_values,
        sequence: sequence.to_string(),
        timeout_height: (timeout_height != 0).then(|| timeout_height.to_string()),
    };

    let mut fields = match serde_json::to_value(&doc)
        .map_err(|e| InternalFault::round_trip("std sign doc", &e))?
    {
        Value::Object(map) => map,
        // StdSignDoc is a struct; anything else is a serializer defect.
        other => {
            return Err(InternalFault(format!(
                "std sign doc serialized to non-object: {other:?}"
            ))
            .into())
        }
    };

    fields.remove("msgs");
    for (i, value) in doc.msgs.into_iter().enumerate() {
        fields.insert(format!("msg{}", i + 1), value);
    }

    debug!(chain_id, messages = msgs.len(), "built canonical sign doc");
    Ok(SignDocBytes::new(&fields)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AminoMsg {
        type_id: &'static str,
        amino: Value,
    }

    impl SignableMessage for AminoMsg {
        fn type_id(&self) -> &str {
            self.type_id
        }

        fn sign_bytes(&self) -> Result<Vec<u8>, SigningError> {
            serde_json::to_vec(&self.amino)
                .map_err(|e| SigningError::Payload(lattice_core::PayloadError::Decode(e)))
        }
    }

    struct BrokenMsg;

    impl SignableMessage for BrokenMsg {
        fn type_id(&self) -> &str {
            "/x.v1.MsgBroken"
        }

        fn sign_bytes(&self) -> Result<Vec<u8>, SigningError> {
            Ok(b"not json at all".to_vec())
        }
    }

    fn send_msg(amount: &str) -> AminoMsg {
        AminoMsg {
            type_id: "/cosmos.bank.v1beta1.MsgSend",
            amino: serde_json::json!({
                "type": "cosmos-sdk/MsgSend",
                "value": {
                    "from_address": "lattice1from",
                    "to_address": "lattice1to",
                    "amount": [{"denom": "ulat", "amount": amount}]
                }
            }),
        }
    }

    fn std_fee() -> StdFee {
        StdFee::new(vec![Coin::new("ulat", "5000")], "200000")
    }

    fn parsed(doc: &SignDocBytes) -> serde_json::Map<String, Value> {
        serde_json::from_slice::<Value>(doc.as_bytes())
            .unwrap()
            .as_object()
            .unwrap()
            .clone()
    }

    #[test]
    fn aggregate_msgs_replaced_by_indexed_fields() {
        let m1 = send_msg("1");
        let m2 = send_msg("2");
        let doc =
            canonical_sign_doc("lattice_1-1", 4, 9, 0, &std_fee(), &[&m1, &m2], "").unwrap();
        let fields = parsed(&doc);

        assert!(!fields.contains_key("msgs"));
        assert!(fields.contains_key("msg1"));
        assert!(fields.contains_key("msg2"));
        assert!(!fields.contains_key("msg3"));
        assert_eq!(fields["msg1"]["value"]["amount"][0]["amount"], "1");
        assert_eq!(fields["msg2"]["value"]["amount"][0]["amount"], "2");
        assert_eq!(fields["account_number"], "4");
        assert_eq!(fields["sequence"], "9");
    }

    #[test]
    fn serialization_is_byte_identical_across_runs() {
        let m1 = send_msg("1");
        let a = canonical_sign_doc("lattice_1-1", 4, 9, 0, &std_fee(), &[&m1], "memo").unwrap();
        let b = canonical_sign_doc("lattice_1-1", 4, 9, 0, &std_fee(), &[&m1], "memo").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn keys_are_lexicographically_sorted() {
        let m1 = send_msg("1");
        let doc = canonical_sign_doc("lattice_1-1", 4, 9, 0, &std_fee(), &[&m1], "").unwrap();
        let s = std::str::from_utf8(doc.as_bytes()).unwrap();
        let account = s.find("\"account_number\"").unwrap();
        let chain = s.find("\"chain_id\"").unwrap();
        let fee = s.find("\"fee\"").unwrap();
        let memo = s.find("\"memo\"").unwrap();
        let msg1 = s.find("\"msg1\"").unwrap();
        let sequence = s.find("\"sequence\"").unwrap();
        assert!(account < chain && chain < fee && fee < memo && memo < msg1 && msg1 < sequence);
    }

    #[test]
    fn zero_timeout_height_is_omitted() {
        let m1 = send_msg("1");
        let doc = canonical_sign_doc("lattice_1-1", 4, 9, 0, &std_fee(), &[&m1], "").unwrap();
        assert!(!parsed(&doc).contains_key("timeout_height"));

        let doc = canonical_sign_doc("lattice_1-1", 4, 9, 100, &std_fee(), &[&m1], "").unwrap();
        assert_eq!(parsed(&doc)["timeout_height"], "100");
    }

    #[test]
    fn empty_message_list_keeps_base_fields_only() {
        let doc = canonical_sign_doc("lattice_1-1", 4, 9, 0, &std_fee(), &[], "").unwrap();
        let fields = parsed(&doc);
        let keys: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["account_number", "chain_id", "fee", "memo", "sequence"]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Same logical inputs always produce byte-identical documents,
            /// and the aggregate entry never survives.
            #[test]
            fn doc_is_deterministic(
                account in any::<u64>(),
                sequence in any::<u64>(),
                memo in "[a-zA-Z0-9 ]{0,32}",
                amounts in prop::collection::vec("[1-9][0-9]{0,12}", 0..4),
            ) {
                let msgs: Vec<AminoMsg> =
                    amounts.iter().map(|a| send_msg_owned(a.clone())).collect();
                let refs: Vec<&dyn SignableMessage> =
                    msgs.iter().map(|m| m as &dyn SignableMessage).collect();

                let a = canonical_sign_doc(
                    "lattice_1-1", account, sequence, 0, &std_fee(), &refs, &memo,
                ).unwrap();
                let b = canonical_sign_doc(
                    "lattice_1-1", account, sequence, 0, &std_fee(), &refs, &memo,
                ).unwrap();
                prop_assert_eq!(a.as_bytes(), b.as_bytes());

                let fields: Value = serde_json::from_slice(a.as_bytes()).unwrap();
                prop_assert!(fields.get("msgs").is_none());
                for i in 1..=refs.len() {
                    let key = format!("msg{}", i);
                    prop_assert!(fields.get(key).is_some());
                }
            }
        }

        fn send_msg_owned(amount: String) -> AminoMsg {
            AminoMsg {
                type_id: "/cosmos.bank.v1beta1.MsgSend",
                amino: serde_json::json!({
                    "type": "cosmos-sdk/MsgSend",
                    "value": {
                        "from_address": "lattice1from",
                        "to_address": "lattice1to",
                        "amount": [{"denom": "ulat", "amount": amount}]
                    }
                }),
            }
        }
    }

    #[test]
    fn non_json_sign_bytes_is_an_internal_fault() {
        let broken = BrokenMsg;
        let err = canonical_sign_doc("lattice_1-1", 4, 9, 0, &std_fee(), &[&broken], "")
            .unwrap_err();
        assert!(matches!(err, SigningError::Internal(_)));
        assert!(err.to_string().starts_with("internal fault:"));
    }
}

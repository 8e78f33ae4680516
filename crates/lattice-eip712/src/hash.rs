//! # Typed-Data Hashing
//!
//! EIP-712 encoding and digest computation: type encoding, struct hashing,
//! the domain separator, and the final signing digest
//! `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash(primaryType))`.
//!
//! ## Determinism Invariant
//!
//! Fields are encoded strictly in TypeGraph-declared order. External
//! verifiers recompute every hash here independently; reordering for any
//! reason breaks interoperability silently.

use serde_json::{Map, Value};

use lattice_core::{keccak256, Hash32, SchemaError, SigningError};

use crate::types::{TypeGraph, TypedData};

/// The domain separator: the struct hash of the envelope's domain, binding
/// every signature to the Lattice typed-data context and chain id.
pub fn domain_separator(typed_data: &TypedData) -> Result<Hash32, SchemaError> {
    struct_hash(
        &typed_data.types,
        "EIP712Domain",
        &typed_data.domain.as_message(),
    )
}

/// Compute the final signing digest for a typed-data envelope.
pub fn sign_hash(typed_data: &TypedData) -> Result<Hash32, SigningError> {
    let domain_separator = domain_separator(typed_data)?;

    let message = typed_data
        .message
        .as_object()
        .ok_or_else(|| mismatch(&typed_data.primary_type, "*"))?;
    let primary_hash = struct_hash(&typed_data.types, &typed_data.primary_type, message)?;

    let mut preimage = Vec::with_capacity(2 + 32 + 32);
    preimage.extend_from_slice(&[0x19, 0x01]);
    preimage.extend_from_slice(domain_separator.as_bytes());
    preimage.extend_from_slice(primary_hash.as_bytes());
    Ok(keccak256(&preimage))
}

/// `keccak256(typeHash ‖ enc(field_1) ‖ … ‖ enc(field_n))` in declared
/// field order.
///
/// # Errors
///
/// [`SchemaError::SchemaMismatch`] when the payload and the graph disagree:
/// a declared field missing from the payload, a payload key not declared in
/// the graph, or a value whose shape does not fit its declared type.
pub fn struct_hash(
    types: &TypeGraph,
    type_name: &str,
    data: &Map<String, Value>,
) -> Result<Hash32, SchemaError> {
    let fields = types
        .get(type_name)
        .ok_or_else(|| mismatch(type_name, "*"))?;

    let mut encoded = Vec::with_capacity(32 * (fields.len() + 1));
    encoded.extend_from_slice(type_hash(types, type_name)?.as_bytes());

    for field in fields {
        let value = data
            .get(&field.name)
            .ok_or_else(|| mismatch(type_name, &field.name))?;
        let word = encode_value(types, &field.r#type, value, type_name, &field.name)?;
        encoded.extend_from_slice(&word);
    }

    // The divergence check runs both ways: undeclared payload keys are as
    // fatal as missing ones.
    for key in data.keys() {
        if !fields.iter().any(|f| &f.name == key) {
            return Err(mismatch(type_name, key));
        }
    }

    Ok(keccak256(&encoded))
}

/// `keccak256(encodeType(typeName))`.
pub fn type_hash(types: &TypeGraph, type_name: &str) -> Result<Hash32, SchemaError> {
    Ok(keccak256(encode_type(types, type_name)?.as_bytes()))
}

/// The type's encoded signature: the primary type first, then every
/// transitively referenced struct type in alphabetical order, each rendered
/// as `Name(type name,...)`.
pub fn encode_type(types: &TypeGraph, type_name: &str) -> Result<String, SchemaError> {
    let mut deps = Vec::new();
    collect_dependencies(types, type_name, &mut deps)?;
    deps.retain(|d| d != type_name);
    deps.sort_unstable();

    let mut out = String::new();
    for name in std::iter::once(type_name.to_string()).chain(deps) {
        let fields = types.get(&name).ok_or_else(|| mismatch(&name, "*"))?;
        out.push_str(&name);
        out.push('(');
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&field.r#type);
            out.push(' ');
            out.push_str(&field.name);
        }
        out.push(')');
    }
    Ok(out)
}

fn collect_dependencies(
    types: &TypeGraph,
    type_name: &str,
    deps: &mut Vec<String>,
) -> Result<(), SchemaError> {
    let fields = types
        .get(type_name)
        .ok_or_else(|| mismatch(type_name, "*"))?;
    for field in fields {
        let referenced = field.r#type.strip_suffix("[]").unwrap_or(&field.r#type);
        if types.contains(referenced) && !deps.iter().any(|d| d == referenced) {
            deps.push(referenced.to_string());
            collect_dependencies(types, referenced, deps)?;
        }
    }
    Ok(())
}

/// Encode one field value as a 32-byte word per its declared type.
fn encode_value(
    types: &TypeGraph,
    declared: &str,
    value: &Value,
    ctx_type: &str,
    ctx_field: &str,
) -> Result<[u8; 32], SchemaError> {
    // Arrays: element-wise encoding, hashed together.
    if let Some(element_type) = declared.strip_suffix("[]") {
        let Value::Array(items) = value else {
            return Err(mismatch(ctx_type, ctx_field));
        };
        let mut encoded = Vec::with_capacity(32 * items.len());
        for item in items {
            let word = encode_value(types, element_type, item, ctx_type, ctx_field)?;
            encoded.extend_from_slice(&word);
        }
        return Ok(keccak256(&encoded).0);
    }

    // Named struct references hash recursively.
    if types.contains(declared) {
        let Value::Object(obj) = value else {
            return Err(mismatch(ctx_type, ctx_field));
        };
        return Ok(struct_hash(types, declared, obj)?.0);
    }

    // Primitives.
    match declared {
        "string" => {
            let s = value.as_str().ok_or_else(|| mismatch(ctx_type, ctx_field))?;
            Ok(keccak256(s.as_bytes()).0)
        }
        "bool" => {
            let b = value.as_bool().ok_or_else(|| mismatch(ctx_type, ctx_field))?;
            let mut word = [0u8; 32];
            word[31] = b as u8;
            Ok(word)
        }
        "address" => {
            let s = value.as_str().ok_or_else(|| mismatch(ctx_type, ctx_field))?;
            let raw = hex::decode(s.strip_prefix("0x").unwrap_or(s))
                .map_err(|_| mismatch(ctx_type, ctx_field))?;
            if raw.len() != 20 {
                return Err(mismatch(ctx_type, ctx_field));
            }
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(&raw);
            Ok(word)
        }
        t if t.starts_with("uint") || t.starts_with("int") => {
            integer_word(value).ok_or_else(|| mismatch(ctx_type, ctx_field))
        }
        _ => Err(mismatch(ctx_type, ctx_field)),
    }
}

/// A 256-bit big-endian word for an integer value.
///
/// Amino JSON renders 64-bit integers as strings, so both JSON numbers and
/// decimal strings are accepted. Decimal strings cover the full unsigned
/// 256-bit range; negative values are two's-complement sign-extended and
/// bounded to `i128` precision.
fn integer_word(value: &Value) -> Option<[u8; 32]> {
    let signed: i128;
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Some(unsigned_word(u as u128));
            }
            signed = n.as_i64()? as i128;
        }
        Value::String(s) => {
            if let Some(word) = decimal_word(s) {
                return Some(word);
            }
            signed = s.parse::<i128>().ok()?;
        }
        _ => return None,
    }
    if signed >= 0 {
        return Some(unsigned_word(signed as u128));
    }
    let mut word = [0xffu8; 32];
    word[16..].copy_from_slice(&(signed as u128).to_be_bytes());
    Some(word)
}

/// Decode a non-negative decimal string into a 256-bit big-endian word.
///
/// Returns `None` on any non-digit byte or when the value exceeds
/// 2^256 − 1.
fn decimal_word(s: &str) -> Option<[u8; 32]> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut word = [0u8; 32];
    for digit in s.bytes().map(|b| b - b'0') {
        let mut carry = u16::from(digit);
        for byte in word.iter_mut().rev() {
            let v = u16::from(*byte) * 10 + carry;
            *byte = (v & 0xff) as u8;
            carry = v >> 8;
        }
        if carry != 0 {
            return None;
        }
    }
    Some(word)
}

fn unsigned_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn mismatch(type_name: &str, field: &str) -> SchemaError {
    SchemaError::SchemaMismatch {
        type_name: type_name.to_string(),
        field: field.to_string(),
    }
}

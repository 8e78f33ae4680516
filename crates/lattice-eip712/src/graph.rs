//! # Type-Graph Construction
//!
//! Builds the full named-type graph for an ordered message list against the
//! schema allow-list.
//!
//! Message order is load-bearing: the payload mirrors the 1-based
//! `msg1..msgN` numbering, so the i-th message always becomes the `MsgI`
//! wrapper type regardless of which schema it uses. Two indices sharing a
//! schema get distinct wrapper types referencing the same value type.

use tracing::debug;

use lattice_core::SchemaError;
use lattice_params::{MessageSchemaRegistry, TypeField};

use crate::types::{root_type_graph, SignableMessage, TypeGraph};

/// Build the type graph for `msgs` in input order.
///
/// Seeds the four root types, then per message: looks up the schema by
/// type identifier, appends `(msgI, MsgI)` to Tx, registers the `MsgI`
/// wrapper, and registers the value type and its nested types
/// insert-if-absent.
///
/// # Errors
///
/// [`SchemaError::UnpermittedMessageType`] naming the first message type
/// identifier missing from the registry. On error no graph is returned, so
/// no partial graph is observable by the caller.
pub fn build_type_graph(
    msgs: &[&dyn SignableMessage],
    registry: &MessageSchemaRegistry,
) -> Result<TypeGraph, SchemaError> {
    let mut graph = root_type_graph();

    for (i, msg) in msgs.iter().enumerate() {
        let index = i + 1;
        let schema = registry
            .lookup(msg.type_id())
            .ok_or_else(|| SchemaError::UnpermittedMessageType(msg.type_id().to_string()))?;

        let attr_name = format!("msg{index}");
        let wrapper_name = format!("Msg{index}");

        graph.append_field("Tx", TypeField::new(&attr_name, &wrapper_name));
        graph.replace(
            &wrapper_name,
            vec![
                TypeField::new("type", "string"),
                TypeField::new("value", &schema.value_type_name),
            ],
        );
        graph.register_if_absent(&schema.value_type_name, schema.value_fields.clone());
        for nested in &schema.nested_types {
            graph.register_if_absent(&nested.name, nested.attrs.clone());
        }
    }

    debug!(
        messages = msgs.len(),
        types = graph.len(),
        "built typed-data graph"
    );
    Ok(graph)
}

use petgraph::stable_graph::NodeIndex;

use crate::{DataType, Input, IrGraph, IrNode, OperandIndex, Value};

pub fn enc_uint_scalar(bit_width: u32) -> Value {
    Value::encrypted_scalar(DataType::unsigned(bit_width).unwrap())
}

pub fn clear_uint_scalar(bit_width: u32) -> Value {
    Value::clear_scalar(DataType::unsigned(bit_width).unwrap())
}

pub fn enc_int_tensor(bit_width: u32, shape: &[usize]) -> Value {
    Value::encrypted_tensor(DataType::signed(bit_width).unwrap(), shape).unwrap()
}

pub fn clear_int_tensor(bit_width: u32, shape: &[usize]) -> Value {
    Value::clear_tensor(DataType::signed(bit_width).unwrap(), shape).unwrap()
}

pub fn enc_float_tensor(bit_width: u32, shape: &[usize]) -> Value {
    Value::encrypted_tensor(DataType::float(bit_width).unwrap(), shape).unwrap()
}

pub fn clear_float_tensor(bit_width: u32, shape: &[usize]) -> Value {
    Value::clear_tensor(DataType::float(bit_width).unwrap(), shape).unwrap()
}

/// Adds an [`Input`] node for program parameter `index` to the graph.
pub fn input_node(
    graph: &mut IrGraph,
    value: Value,
    name: impl Into<String>,
    index: usize,
) -> NodeIndex {
    graph.add_node(Input::new(value, name, index).into())
}

/// Adds a two-operand node, wiring `left` and `right` to its operand slots.
pub fn binary_node(
    graph: &mut IrGraph,
    node: IrNode,
    left: NodeIndex,
    right: NodeIndex,
) -> NodeIndex {
    let id = graph.add_node(node);

    graph.add_edge(left, id, OperandIndex(0));
    graph.add_edge(right, id, OperandIndex(1));

    id
}

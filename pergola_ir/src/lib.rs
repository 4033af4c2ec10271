#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
//! This crate provides the symbolic intermediate representation sitting at
//! the top of the Pergola compiler: typed computation-graph nodes, a
//! plaintext evaluator for simulating them, a conservative structural
//! equivalence check, and the graph analysis passes built on top of those
//! pieces.
//!
//! Each node carries [`Value`] descriptors for its operand slots and its
//! result: the element type ([`DataType`]), the shape, and whether the
//! data is encrypted. The nodes themselves are symbolic: concrete data
//! only appears when a node or a whole [`IrGraph`] is simulated over
//! [`PlainValue`]s, or when the excluded native backend compiles the graph
//! down to FHE operations.
//!
//! # Example
//! ```rust
//! use pergola_ir::{
//!     Add, DataType, Input, IrGraph, IrNode, Mul, OperandIndex, PlainValue, Value,
//!     common_subexpression_elimination, simulate,
//! };
//!
//! let x = Value::encrypted_scalar(DataType::unsigned(16)?);
//! let y = Value::encrypted_scalar(DataType::unsigned(16)?);
//!
//! // Build (x + y) * (x + y), wiring producers to operand slots.
//! let mut graph = IrGraph::new();
//! let x_id = graph.add_node(Input::new(x.clone(), "x", 0).into());
//! let y_id = graph.add_node(Input::new(y.clone(), "y", 1).into());
//!
//! let add = |graph: &mut IrGraph| {
//!     let id = graph.add_node(IrNode::from(Add::new(vec![x.clone(), y.clone()]).unwrap()));
//!     graph.add_edge(x_id, id, OperandIndex(0));
//!     graph.add_edge(y_id, id, OperandIndex(1));
//!     id
//! };
//!
//! let lhs = add(&mut graph);
//! let rhs = add(&mut graph);
//!
//! let sum = Value::encrypted_scalar(DataType::unsigned(16)?);
//! let product = graph.add_node(IrNode::from(Mul::new(vec![sum.clone(), sum])?));
//! graph.add_edge(lhs, product, OperandIndex(0));
//! graph.add_edge(rhs, product, OperandIndex(1));
//!
//! // The two sums are structurally equivalent, so CSE merges them.
//! common_subexpression_elimination(&mut graph);
//! assert_eq!(graph.node_count(), 4);
//!
//! let results = simulate(&graph, &[7.into(), 3.into()])?;
//! assert_eq!(results[&product], PlainValue::Int(100));
//! # Ok::<(), pergola_ir::Error>(())
//! ```

mod analysis;
mod dtypes;
mod error;
mod graph;
mod node;
mod plain;
mod values;

#[doc(hidden)]
pub mod test_utils;

pub use analysis::flood_replace_missing;
pub use dtypes::{DataType, FloatType, IntegerType};
pub use error::{Error, Result};
pub use graph::{
    DeferredIndex, GraphQuery, GraphTransforms, IrGraph, OperandIndex, Transform, TransformList,
    TransformNodeIndex, common_subexpression_elimination, forward_traverse, forward_traverse_mut,
    simulate,
};
pub use node::{
    Add, Constant, Dot, DotFn, Input, IrNode, KwArgs, Mul, Sub, Univariate, UnivariateFn,
    are_equivalent, kwarg,
};
pub use plain::PlainValue;
pub use values::Value;

use std::sync::Arc;

use crate::{DotFn, IrNode, Value};

/// Decides whether two nodes are interchangeable for graph-simplification
/// purposes.
///
/// # Remarks
/// This is a proper equivalence relation over nodes of the same variant:
/// reflexive, symmetric, and transitive. It is deliberately stricter than
/// "produces the same result": a false positive here would let a
/// simplification pass merge two nodes that compute different things,
/// silently corrupting the compiled program, so every ambiguous comparison
/// resolves to `false`. In particular, opaque callables ([`DotFn`] and
/// [`UnivariateFn`](crate::UnivariateFn)) compare by pointer identity:
/// two separately-built closures with identical bodies are not equivalent.
pub fn are_equivalent(left: &IrNode, right: &IrNode) -> bool {
    if left.output() != right.output() {
        return false;
    }

    match (left, right) {
        (IrNode::Constant(a), IrNode::Constant(b)) => {
            // PlainValue equality is variant-sensitive, so an int literal
            // never matches an equal-valued float literal.
            a.value() == b.value()
        }
        (IrNode::Input(a), IrNode::Input(b)) => {
            a.inputs() == b.inputs() && a.name() == b.name() && a.index() == b.index()
        }
        (IrNode::Add(a), IrNode::Add(b)) => commuted_match(a.inputs(), b.inputs()),
        (IrNode::Mul(a), IrNode::Mul(b)) => commuted_match(a.inputs(), b.inputs()),
        (IrNode::Sub(a), IrNode::Sub(b)) => a.inputs() == b.inputs(),
        (IrNode::Dot(a), IrNode::Dot(b)) => {
            a.inputs() == b.inputs() && delegates_match(a.delegate(), b.delegate())
        }
        (IrNode::Univariate(a), IrNode::Univariate(b)) => {
            a.inputs() == b.inputs()
                && a.op_args() == b.op_args()
                && a.op_kwargs() == b.op_kwargs()
                && Arc::ptr_eq(a.function(), b.function())
        }
        _ => false,
    }
}

/// Unordered operand matching for commutative operations.
fn commuted_match(a: &[Value], b: &[Value]) -> bool {
    (a[0] == b[0] && a[1] == b[1]) || (a[0] == b[1] && a[1] == b[0])
}

fn delegates_match(a: Option<&DotFn>, b: Option<&DotFn>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

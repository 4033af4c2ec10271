use std::fmt;

use crate::{Error, PlainValue, Result, Value};

mod arith;
mod constant;
mod dot;
mod equivalence;
mod input;
mod univariate;

#[cfg(test)]
mod tests;

pub use arith::{Add, Mul, Sub};
pub use constant::Constant;
pub use dot::{Dot, DotFn};
pub use equivalence::are_equivalent;
pub use input::Input;
pub use univariate::{KwArgs, Univariate, UnivariateFn, kwarg};

#[derive(Clone)]
/// One operation in the symbolic computation graph.
///
/// # Remarks
/// Every variant carries [`Value`] descriptors for its operand slots and
/// its result. Nodes are immutable once constructed; graph edges between
/// producers and consumers live in an
/// [`IrGraph`](crate::IrGraph), not in the nodes themselves.
pub enum IrNode {
    /// A literal integer or float.
    Constant(Constant),

    /// One formal parameter of the program.
    Input(Input),

    /// Elementwise addition of two operands.
    Add(Add),

    /// Elementwise subtraction of two operands.
    Sub(Sub),

    /// Elementwise multiplication of two operands.
    Mul(Mul),

    /// A dot product over two tensors of equal shape.
    Dot(Dot),

    /// An opaque univariate function applied to one operand.
    Univariate(Univariate),
}

impl IrNode {
    /// The descriptors of this node's operand slots, in positional order.
    pub fn inputs(&self) -> &[Value] {
        match self {
            Self::Constant(_) => &[],
            Self::Input(x) => x.inputs(),
            Self::Add(x) => x.inputs(),
            Self::Sub(x) => x.inputs(),
            Self::Mul(x) => x.inputs(),
            Self::Dot(x) => x.inputs(),
            Self::Univariate(x) => x.inputs(),
        }
    }

    /// The descriptor of this node's result.
    pub fn output(&self) -> &Value {
        match self {
            Self::Constant(x) => x.output(),
            Self::Input(x) => x.output(),
            Self::Add(x) => x.output(),
            Self::Sub(x) => x.output(),
            Self::Mul(x) => x.output(),
            Self::Dot(x) => x.output(),
            Self::Univariate(x) => x.output(),
        }
    }

    /// Whether this operation's operands commute.
    pub fn is_commutative(&self) -> bool {
        matches!(self, Self::Add(_) | Self::Mul(_))
    }

    /// Runs this node's computation over concrete operand data.
    ///
    /// # Remarks
    /// `data` binds positionally to [`IrNode::inputs`]; supplying any other
    /// number of values fails with [`Error::ArityMismatch`]. Evaluation is
    /// pure: the same node and data always produce the same result, so
    /// callers may memoize freely.
    pub fn evaluate(&self, data: &[PlainValue]) -> Result<PlainValue> {
        if data.len() != self.inputs().len() {
            return Err(Error::arity_mismatch(self.inputs().len(), data.len()));
        }

        match self {
            Self::Constant(x) => x.evaluate(),
            Self::Input(x) => x.evaluate(data),
            Self::Add(x) => x.evaluate(data),
            Self::Sub(x) => x.evaluate(data),
            Self::Mul(x) => x.evaluate(data),
            Self::Dot(x) => x.evaluate(data),
            Self::Univariate(x) => x.evaluate(data),
        }
    }

    fn op_name(&self) -> &'static str {
        match self {
            Self::Constant(_) => "Constant",
            Self::Input(_) => "Input",
            Self::Add(_) => "Add",
            Self::Sub(_) => "Sub",
            Self::Mul(_) => "Mul",
            Self::Dot(_) => "Dot",
            Self::Univariate(_) => "Univariate",
        }
    }
}

// Can't derive Debug because Dot and Univariate hold opaque callables.
impl fmt::Debug for IrNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(x) => write!(f, "Constant({:?})", x.value()),
            Self::Input(x) => write!(f, "Input({}, index={})", x.name(), x.index()),
            _ => write!(f, "{}(-> {})", self.op_name(), self.output()),
        }
    }
}

impl From<Constant> for IrNode {
    fn from(x: Constant) -> Self {
        Self::Constant(x)
    }
}

impl From<Input> for IrNode {
    fn from(x: Input) -> Self {
        Self::Input(x)
    }
}

impl From<Add> for IrNode {
    fn from(x: Add) -> Self {
        Self::Add(x)
    }
}

impl From<Sub> for IrNode {
    fn from(x: Sub) -> Self {
        Self::Sub(x)
    }
}

impl From<Mul> for IrNode {
    fn from(x: Mul) -> Self {
        Self::Mul(x)
    }
}

impl From<Dot> for IrNode {
    fn from(x: Dot) -> Self {
        Self::Dot(x)
    }
}

impl From<Univariate> for IrNode {
    fn from(x: Univariate) -> Self {
        Self::Univariate(x)
    }
}

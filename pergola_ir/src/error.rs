use thiserror::Error;

use crate::PlainValue;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Errors that can occur while constructing, evaluating, or analyzing IR nodes.
pub enum Error {
    /// A node or evaluation received the wrong number of operands.
    #[error("Expected {expected} operands, but {actual} were given")]
    ArityMismatch {
        /// The number of operands the operation requires.
        expected: usize,

        /// The number of operands actually supplied.
        actual: usize,
    },

    /// An integer type was declared with a zero bit width.
    #[error("Integer types must have a bit width greater than zero")]
    ZeroIntegerWidth,

    /// A float type was declared with a width other than 32 or 64.
    #[error("{bit_width} is not a supported float width (expected 32 or 64)")]
    UnsupportedFloatWidth {
        /// The rejected width.
        bit_width: u32,
    },

    /// A tensor value was declared with an empty shape or a zero dimension.
    #[error("Tensor shapes require at least one dimension and no zero dimensions")]
    InvalidShape,

    /// Two operand shapes cannot be reconciled.
    #[error("Operand shapes {left:?} and {right:?} are incompatible")]
    ShapeMismatch {
        /// The left operand's shape.
        left: Vec<usize>,

        /// The right operand's shape.
        right: Vec<usize>,
    },

    /// A dot product was given a scalar operand.
    #[error("Dot products require tensor operands, but a scalar was given")]
    ScalarOperand,

    /// A constant was given a non-scalar literal.
    #[error("Constants must be integer or float scalars")]
    UnsupportedConstant,

    /// Plaintext arithmetic was attempted between incompatible data kinds.
    #[error("Cannot combine {left} and {right} plaintext data")]
    DataMismatch {
        /// The kind of the left operand.
        left: &'static str,

        /// The kind of the right operand.
        right: &'static str,
    },

    /// Two tensor operands have differing element counts.
    #[error("Tensor operands have {left} and {right} elements")]
    LengthMismatch {
        /// The left operand's element count.
        left: usize,

        /// The right operand's element count.
        right: usize,
    },

    /// A univariate function looked up a captured argument that was never
    /// supplied.
    #[error("No captured argument named `{0}`")]
    MissingCapture(String),

    /// A graph simulation referenced a program input with no bound argument.
    #[error("No argument bound for program input {index}")]
    MissingProgramInput {
        /// The program input index with no argument.
        index: usize,
    },

    /// A graph node's operand slot has no producer edge.
    #[error("No producer for operand slot {slot}")]
    MissingOperand {
        /// The unbound operand slot.
        slot: usize,
    },

    /// Flood replacement was invoked on a sequence with no known entries.
    #[error("Cannot flood missing values when every entry is missing")]
    AllValuesMissing,
}

impl Error {
    pub(crate) fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::ArityMismatch { expected, actual }
    }

    pub(crate) fn shape_mismatch(left: &[usize], right: &[usize]) -> Self {
        Self::ShapeMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }

    pub(crate) fn data_mismatch(left: &PlainValue, right: &PlainValue) -> Self {
        Self::DataMismatch {
            left: left.kind(),
            right: right.kind(),
        }
    }
}

/// A [`Result`](std::result::Result) specialized over this crate's [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

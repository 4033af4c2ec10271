#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
/// Errors that can occur while describing or encoding packed integers.
pub enum Error {
    /// A packed type was declared with widths the codec cannot express.
    #[error(
        "Bit width {bit_width} and msg width {msg_width} are invalid: the bit width must be a \
         nonzero multiple of the msg width, at most 64"
    )]
    InvalidWidth {
        /// The declared total bit width.
        bit_width: u32,

        /// The declared per-digit message width.
        msg_width: u32,
    },

    /// A value of an unsupported kind was given to the codec.
    #[error("Can only pack integer scalars and tensors, but got {kind}")]
    UnsupportedValue {
        /// The kind of the rejected value.
        kind: &'static str,
    },

    /// An encoded buffer's length is not a whole number of digit groups.
    #[error("Expected a multiple of {digits_per_value} digits, but got {len}")]
    ShapeMismatch {
        /// The rejected buffer length.
        len: usize,

        /// The digit-group size of the packed type.
        digits_per_value: usize,
    },

    /// A value exceeds the largest value the packed type represents.
    #[error("Value {value} has bigger elements than what the dtype can support (max {max})")]
    ValueTooLarge {
        /// The rejected value.
        value: i128,

        /// The largest representable value.
        max: i128,
    },

    /// A value is below the smallest value the packed type represents.
    #[error("Value {value} has smaller elements than what the dtype can support (min {min})")]
    ValueTooSmall {
        /// The rejected value.
        value: i128,

        /// The smallest representable value.
        min: i128,
    },
}

/// A [`Result`](std::result::Result) specialized over this crate's [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

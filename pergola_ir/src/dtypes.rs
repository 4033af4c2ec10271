use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A signed or unsigned integer element type of a given bit width.
pub struct IntegerType {
    bit_width: u32,
    is_signed: bool,
}

impl IntegerType {
    /// Creates an [`IntegerType`] with the given width and signedness.
    ///
    /// # Remarks
    /// Fails with [`Error::ZeroIntegerWidth`] when `bit_width` is zero.
    pub fn new(bit_width: u32, is_signed: bool) -> Result<Self> {
        if bit_width == 0 {
            return Err(Error::ZeroIntegerWidth);
        }

        Ok(Self {
            bit_width,
            is_signed,
        })
    }

    /// Creates a signed [`IntegerType`] of the given width.
    pub fn signed(bit_width: u32) -> Result<Self> {
        Self::new(bit_width, true)
    }

    /// Creates an unsigned [`IntegerType`] of the given width.
    pub fn unsigned(bit_width: u32) -> Result<Self> {
        Self::new(bit_width, false)
    }

    /// Returns the smallest type that represents `value`.
    ///
    /// # Remarks
    /// Non-negative values take the smallest unsigned width that holds them
    /// (at least 1 bit), negative values the smallest signed width. The
    /// policy is deterministic so equal literals always produce equal types.
    pub fn to_hold(value: i128) -> Self {
        if value >= 0 {
            Self {
                bit_width: u32::max(1, 128 - value.leading_zeros()),
                is_signed: false,
            }
        } else {
            Self {
                bit_width: 128 - (!value).leading_zeros() + 1,
                is_signed: true,
            }
        }
    }

    /// The number of bits in this type.
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Whether this type is signed.
    pub fn is_signed(&self) -> bool {
        self.is_signed
    }

    /// The smallest value this type represents.
    pub fn min_value(&self) -> i128 {
        if !self.is_signed {
            0
        } else if self.bit_width >= 128 {
            i128::MIN
        } else {
            -(1i128 << (self.bit_width - 1))
        }
    }

    /// The largest value this type represents.
    pub fn max_value(&self) -> i128 {
        let value_bits = if self.is_signed {
            self.bit_width - 1
        } else {
            self.bit_width
        };

        if value_bits >= 127 {
            i128::MAX
        } else {
            (1i128 << value_bits) - 1
        }
    }

    /// Whether `value` lies within this type's range.
    pub fn can_represent(&self, value: i128) -> bool {
        self.min_value() <= value && value <= self.max_value()
    }
}

impl fmt::Display for IntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.is_signed { "int" } else { "uint" };

        write!(f, "{prefix}{}", self.bit_width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// An IEEE-754 float element type of 32 or 64 bits.
pub struct FloatType {
    bit_width: u32,
}

impl FloatType {
    /// Creates a [`FloatType`] of the given width.
    ///
    /// # Remarks
    /// Fails with [`Error::UnsupportedFloatWidth`] for widths other than
    /// 32 and 64.
    pub fn new(bit_width: u32) -> Result<Self> {
        if !matches!(bit_width, 32 | 64) {
            return Err(Error::UnsupportedFloatWidth { bit_width });
        }

        Ok(Self { bit_width })
    }

    /// The 32-bit float type.
    pub fn single() -> Self {
        Self { bit_width: 32 }
    }

    /// The 64-bit float type.
    pub fn double() -> Self {
        Self { bit_width: 64 }
    }

    /// The number of bits in this type.
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }
}

impl fmt::Display for FloatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "float{}", self.bit_width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The element type of data flowing over a graph edge.
///
/// # Remarks
/// [`DataType`]s are value objects: two are equal iff they have the same
/// variant and the same fields. An integer type is never equal to a float
/// type, regardless of width.
pub enum DataType {
    /// A signed or unsigned integer type.
    Integer(IntegerType),

    /// A float type.
    Float(FloatType),
}

impl DataType {
    /// Creates an integer [`DataType`] with the given width and signedness.
    pub fn integer(bit_width: u32, is_signed: bool) -> Result<Self> {
        Ok(Self::Integer(IntegerType::new(bit_width, is_signed)?))
    }

    /// Creates a signed integer [`DataType`] of the given width.
    pub fn signed(bit_width: u32) -> Result<Self> {
        Self::integer(bit_width, true)
    }

    /// Creates an unsigned integer [`DataType`] of the given width.
    pub fn unsigned(bit_width: u32) -> Result<Self> {
        Self::integer(bit_width, false)
    }

    /// Creates a float [`DataType`] of the given width.
    pub fn float(bit_width: u32) -> Result<Self> {
        Ok(Self::Float(FloatType::new(bit_width)?))
    }

    /// Whether this is an integer type.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Whether this is a float type.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// The number of bits in this type.
    pub fn bit_width(&self) -> u32 {
        match self {
            Self::Integer(x) => x.bit_width(),
            Self::Float(x) => x.bit_width(),
        }
    }

    /// Returns the smallest type able to hold values of both `self` and
    /// `other`.
    ///
    /// # Remarks
    /// Any float operand makes the result a float of the widest float width
    /// present. Two integers produce an integer that is signed iff either
    /// operand is; an unsigned operand gains a bit when the result is
    /// signed so its full range remains representable.
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => {
                let widest = if a.bit_width() >= b.bit_width() { a } else { b };

                Self::Float(widest)
            }
            (Self::Float(a), Self::Integer(_)) | (Self::Integer(_), Self::Float(a)) => {
                Self::Float(a)
            }
            (Self::Integer(a), Self::Integer(b)) => {
                let is_signed = a.is_signed() || b.is_signed();

                let holding_width = |x: IntegerType| {
                    if is_signed && !x.is_signed() {
                        x.bit_width() + 1
                    } else {
                        x.bit_width()
                    }
                };

                Self::Integer(IntegerType {
                    bit_width: u32::max(holding_width(a), holding_width(b)),
                    is_signed,
                })
            }
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(x) => x.fmt(f),
            Self::Float(x) => x.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_equality_is_structural() {
        assert_eq!(IntegerType::new(7, false).unwrap(), IntegerType::new(7, false).unwrap());
        assert_ne!(IntegerType::new(7, false).unwrap(), IntegerType::new(8, false).unwrap());
        assert_ne!(IntegerType::new(7, false).unwrap(), IntegerType::new(7, true).unwrap());
    }

    #[test]
    fn integer_never_equals_float() {
        assert_ne!(
            DataType::unsigned(32).unwrap(),
            DataType::float(32).unwrap()
        );
        assert_ne!(DataType::signed(64).unwrap(), DataType::float(64).unwrap());
    }

    #[test]
    fn rejects_zero_width() {
        assert_eq!(IntegerType::new(0, true), Err(Error::ZeroIntegerWidth));
        assert_eq!(DataType::unsigned(0), Err(Error::ZeroIntegerWidth));
    }

    #[test]
    fn rejects_unsupported_float_widths() {
        for bit_width in [0, 16, 48, 128] {
            assert_eq!(
                FloatType::new(bit_width),
                Err(Error::UnsupportedFloatWidth { bit_width })
            );
        }
    }

    #[test]
    fn smallest_holding_type() {
        assert_eq!(IntegerType::to_hold(0), IntegerType::new(1, false).unwrap());
        assert_eq!(IntegerType::to_hold(1), IntegerType::new(1, false).unwrap());
        assert_eq!(IntegerType::to_hold(42), IntegerType::new(6, false).unwrap());
        assert_eq!(IntegerType::to_hold(255), IntegerType::new(8, false).unwrap());
        assert_eq!(IntegerType::to_hold(256), IntegerType::new(9, false).unwrap());
        assert_eq!(IntegerType::to_hold(-1), IntegerType::new(1, true).unwrap());
        assert_eq!(IntegerType::to_hold(-42), IntegerType::new(7, true).unwrap());
        assert_eq!(IntegerType::to_hold(-128), IntegerType::new(8, true).unwrap());
        assert_eq!(IntegerType::to_hold(-129), IntegerType::new(9, true).unwrap());
    }

    #[test]
    fn integer_bounds() {
        let uint8 = IntegerType::new(8, false).unwrap();
        assert_eq!((uint8.min_value(), uint8.max_value()), (0, 255));

        let int8 = IntegerType::new(8, true).unwrap();
        assert_eq!((int8.min_value(), int8.max_value()), (-128, 127));

        assert!(int8.can_represent(-128));
        assert!(!int8.can_represent(128));
        assert!(!uint8.can_represent(-1));
    }

    #[test]
    fn combine_widens_integers() {
        let u16 = DataType::unsigned(16).unwrap();
        let u32 = DataType::unsigned(32).unwrap();
        let i32 = DataType::signed(32).unwrap();

        assert_eq!(u16.combine(u32), u32);
        assert_eq!(u32.combine(i32), DataType::signed(33).unwrap());
        assert_eq!(i32.combine(i32), i32);
    }

    #[test]
    fn combine_prefers_floats() {
        let f32 = DataType::float(32).unwrap();
        let f64 = DataType::float(64).unwrap();
        let u64 = DataType::unsigned(64).unwrap();

        assert_eq!(f32.combine(f64), f64);
        assert_eq!(u64.combine(f32), f32);
        assert_eq!(f64.combine(u64), f64);
    }

    #[test]
    fn displays_like_the_mlir_frontend() {
        assert_eq!(DataType::unsigned(7).unwrap().to_string(), "uint7");
        assert_eq!(DataType::signed(32).unwrap().to_string(), "int32");
        assert_eq!(DataType::float(64).unwrap().to_string(), "float64");
    }
}

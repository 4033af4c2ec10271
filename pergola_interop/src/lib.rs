#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
//! This crate provides the packed-integer codec Pergola uses to exchange
//! integers with an external encrypted-integer representation.
//!
//! The external format splits an integer into `bit_width / msg_width`
//! digit groups of `msg_width` bits each (one ciphertext per group on the
//! wire), most significant group first. [`PackedIntegerType`] describes
//! such a format and converts between plain integers and digit groups;
//! [`PackedInteger`] pairs a value with its format and validates that the
//! value actually fits.
//!
//! # Example
//! ```rust
//! use pergola_interop::{PackedIntegerType, PackedParams};
//! use pergola_ir::PlainValue;
//!
//! let params = PackedParams {
//!     lwe_dimension: 909,
//!     glwe_dimension: 1,
//!     polynomial_size: 4096,
//!     pbs_base_log: 15,
//!     pbs_level: 2,
//! };
//!
//! let dtype = PackedIntegerType::uint8_2_2(params);
//!
//! let digits = dtype.encode(&PlainValue::Int(0b0110_1100))?;
//! assert_eq!(digits, vec![1, 2, 3, 0]);
//!
//! assert_eq!(dtype.decode(&digits)?, PlainValue::Int(0b0110_1100));
//! # Ok::<(), pergola_interop::Error>(())
//! ```

use std::fmt;

use pergola_ir::{IntegerType, PlainValue};
use serde::{Deserialize, Serialize};

mod error;
pub use error::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The crypto parameters backing a packed integer on the wire.
///
/// # Remarks
/// These describe the external system's ciphertexts; this crate never
/// interprets them, but two packed types only interoperate when their
/// parameters match exactly, so they participate in equality and hashing.
pub struct PackedParams {
    /// The LWE dimension.
    pub lwe_dimension: usize,

    /// The GLWE dimension.
    pub glwe_dimension: usize,

    /// The GLWE polynomial size.
    pub polynomial_size: usize,

    /// The base log of the programmable bootstrap.
    pub pbs_base_log: u32,

    /// The level count of the programmable bootstrap.
    pub pbs_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Describes an integer format of the external encrypted-integer system:
/// signedness, total width, and how many bits each wire digit carries.
pub struct PackedIntegerType {
    int: IntegerType,
    carry_width: u32,
    msg_width: u32,
    params: PackedParams,
}

impl PackedIntegerType {
    /// Creates a [`PackedIntegerType`].
    ///
    /// # Remarks
    /// Fails with [`Error::InvalidWidth`] unless `bit_width` is a nonzero
    /// multiple of `msg_width` no greater than 64 bits.
    pub fn new(
        is_signed: bool,
        bit_width: u32,
        carry_width: u32,
        msg_width: u32,
        params: PackedParams,
    ) -> Result<Self> {
        if bit_width == 0 || bit_width > 64 || msg_width == 0 || bit_width % msg_width != 0 {
            return Err(Error::InvalidWidth {
                bit_width,
                msg_width,
            });
        }

        let int = IntegerType::new(bit_width, is_signed).map_err(|_| Error::InvalidWidth {
            bit_width,
            msg_width,
        })?;

        Ok(Self {
            int,
            carry_width,
            msg_width,
            params,
        })
    }

    /// A signed 8-bit integer packed as 2-bit digits with 2 carry bits.
    pub fn int8_2_2(params: PackedParams) -> Self {
        Self::known(true, 8, params)
    }

    /// An unsigned 8-bit integer packed as 2-bit digits with 2 carry bits.
    pub fn uint8_2_2(params: PackedParams) -> Self {
        Self::known(false, 8, params)
    }

    /// A signed 16-bit integer packed as 2-bit digits with 2 carry bits.
    pub fn int16_2_2(params: PackedParams) -> Self {
        Self::known(true, 16, params)
    }

    /// An unsigned 16-bit integer packed as 2-bit digits with 2 carry bits.
    pub fn uint16_2_2(params: PackedParams) -> Self {
        Self::known(false, 16, params)
    }

    fn known(is_signed: bool, bit_width: u32, params: PackedParams) -> Self {
        Self::new(is_signed, bit_width, 2, 2, params)
            .expect("Statically known widths are valid.")
    }

    /// Whether this type is signed.
    pub fn is_signed(&self) -> bool {
        self.int.is_signed()
    }

    /// The total number of bits in this type.
    pub fn bit_width(&self) -> u32 {
        self.int.bit_width()
    }

    /// The number of carry bits each wire digit reserves.
    pub fn carry_width(&self) -> u32 {
        self.carry_width
    }

    /// The number of message bits each wire digit carries.
    pub fn msg_width(&self) -> u32 {
        self.msg_width
    }

    /// The crypto parameters backing this type on the wire.
    pub fn params(&self) -> &PackedParams {
        &self.params
    }

    /// The number of digit groups a single value packs into.
    pub fn digits_per_value(&self) -> usize {
        (self.int.bit_width() / self.msg_width) as usize
    }

    /// The smallest value this type represents.
    pub fn min_value(&self) -> i128 {
        self.int.min_value()
    }

    /// The largest value this type represents.
    pub fn max_value(&self) -> i128 {
        self.int.max_value()
    }

    /// Packs an integer scalar or tensor into wire digits.
    ///
    /// # Remarks
    /// A scalar becomes [`PackedIntegerType::digits_per_value`] digits,
    /// most significant first, each in `[0, 2^msg_width)`. Tensor elements
    /// pack back to back, so the digit dimension trails the value
    /// dimension. Values are reduced to their two's-complement bit pattern
    /// before packing; use [`PackedInteger`] to reject out-of-range values
    /// instead.
    ///
    /// Float values fail with [`Error::UnsupportedValue`].
    pub fn encode(&self, value: &PlainValue) -> Result<Vec<u64>> {
        match value {
            PlainValue::Int(x) => Ok(self.encode_scalar(*x)),
            PlainValue::IntTensor(xs) => {
                Ok(xs.iter().flat_map(|x| self.encode_scalar(*x)).collect())
            }
            _ => Err(Error::UnsupportedValue { kind: value.kind() }),
        }
    }

    /// Unpacks wire digits produced by [`PackedIntegerType::encode`].
    ///
    /// # Remarks
    /// Exactly [`PackedIntegerType::digits_per_value`] digits decode to a
    /// scalar; any other multiple of it decodes to a tensor. Anything else
    /// fails with [`Error::ShapeMismatch`]. Signed types sign-extend the
    /// decoded bit pattern.
    pub fn decode(&self, digits: &[u64]) -> Result<PlainValue> {
        let digits_per_value = self.digits_per_value();

        if digits.len() == digits_per_value {
            Ok(PlainValue::Int(self.decode_scalar(digits)))
        } else if digits.len() % digits_per_value == 0 {
            Ok(PlainValue::IntTensor(
                digits
                    .chunks_exact(digits_per_value)
                    .map(|chunk| self.decode_scalar(chunk))
                    .collect(),
            ))
        } else {
            Err(Error::ShapeMismatch {
                len: digits.len(),
                digits_per_value,
            })
        }
    }

    fn encode_scalar(&self, value: i128) -> Vec<u64> {
        let bit_width = self.int.bit_width();
        let mask = (1u128 << bit_width) - 1;
        let digit_mask = (1u128 << self.msg_width) - 1;

        let pattern = (value as u128) & mask;

        // msb first
        (0..self.digits_per_value() as u32)
            .rev()
            .map(|i| ((pattern >> (i * self.msg_width)) & digit_mask) as u64)
            .collect()
    }

    fn decode_scalar(&self, digits: &[u64]) -> i128 {
        let bit_width = self.int.bit_width();
        let digit_mask = (1u128 << self.msg_width) - 1;

        let pattern = digits
            .iter()
            .fold(0u128, |acc, x| (acc << self.msg_width) | (*x as u128 & digit_mask));

        let sign_bit = (pattern >> (bit_width - 1)) & 1 == 1;

        if self.int.is_signed() && sign_bit {
            pattern.wrapping_sub(1u128 << bit_width) as i128
        } else {
            pattern as i128
        }
    }
}

impl fmt::Display for PackedIntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "packed<{}, carry={}, msg={}>",
            self.int, self.carry_width, self.msg_width
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
/// An integer value paired with its packed format, validated to fit.
pub struct PackedInteger {
    dtype: PackedIntegerType,
    value: PlainValue,
}

impl PackedInteger {
    /// Creates a [`PackedInteger`], validating that every element of
    /// `value` lies within the format's representable range.
    ///
    /// # Remarks
    /// Fails with [`Error::ValueTooLarge`]/[`Error::ValueTooSmall`] for
    /// out-of-range elements and with [`Error::UnsupportedValue`] for
    /// non-integer values.
    pub fn new(dtype: PackedIntegerType, value: impl Into<PlainValue>) -> Result<Self> {
        let value = value.into();

        match &value {
            PlainValue::Int(x) => Self::check_range(&dtype, *x)?,
            PlainValue::IntTensor(xs) => {
                for x in xs {
                    Self::check_range(&dtype, *x)?;
                }
            }
            _ => return Err(Error::UnsupportedValue { kind: value.kind() }),
        }

        Ok(Self { dtype, value })
    }

    fn check_range(dtype: &PackedIntegerType, value: i128) -> Result<()> {
        if value > dtype.max_value() {
            return Err(Error::ValueTooLarge {
                value,
                max: dtype.max_value(),
            });
        }

        if value < dtype.min_value() {
            return Err(Error::ValueTooSmall {
                value,
                min: dtype.min_value(),
            });
        }

        Ok(())
    }

    /// The packed format of this value.
    pub fn dtype(&self) -> &PackedIntegerType {
        &self.dtype
    }

    /// The held value.
    pub fn value(&self) -> &PlainValue {
        &self.value
    }

    /// Packs the held value into wire digits.
    pub fn encode(&self) -> Vec<u64> {
        match &self.value {
            PlainValue::Int(x) => self.dtype.encode_scalar(*x),
            PlainValue::IntTensor(xs) => {
                xs.iter().flat_map(|x| self.dtype.encode_scalar(*x)).collect()
            }
            // Construction rejects every other kind.
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;
    use rand::{Rng, thread_rng};

    use super::*;

    fn default_params() -> PackedParams {
        PackedParams {
            lwe_dimension: 909,
            glwe_dimension: 1,
            polynomial_size: 4096,
            pbs_base_log: 15,
            pbs_level: 2,
        }
    }

    #[test]
    fn packs_msb_first() {
        let dtype = PackedIntegerType::uint8_2_2(default_params());

        assert_eq!(
            dtype.encode(&PlainValue::Int(0b0110_1100)).unwrap(),
            vec![1, 2, 3, 0]
        );
    }

    #[test]
    fn unsigned_scalars_round_trip() {
        let dtype = PackedIntegerType::uint8_2_2(default_params());

        for value in 0..256i128 {
            let digits = dtype.encode(&PlainValue::Int(value)).unwrap();

            assert_eq!(digits.len(), 4);
            assert!(digits.iter().all(|x| *x < 4));
            assert_eq!(dtype.decode(&digits).unwrap(), PlainValue::Int(value));
        }
    }

    #[test]
    fn signed_scalars_round_trip() {
        let dtype = PackedIntegerType::int8_2_2(default_params());

        for value in -128..128i128 {
            let digits = dtype.encode(&PlainValue::Int(value)).unwrap();

            assert_eq!(dtype.decode(&digits).unwrap(), PlainValue::Int(value));
        }
    }

    #[test]
    fn tensors_round_trip_with_a_trailing_digit_dimension() {
        let dtype = PackedIntegerType::uint16_2_2(default_params());

        let values = (0..20)
            .map(|_| thread_rng().gen_range(0..1 << 10))
            .collect::<Vec<i128>>();

        let encoded = dtype.encode(&PlainValue::IntTensor(values.clone())).unwrap();

        assert_eq!(encoded.len(), values.len() * dtype.digits_per_value());
        assert_eq!(
            dtype.decode(&encoded).unwrap(),
            PlainValue::IntTensor(values)
        );
    }

    #[test]
    fn every_width_pairing_round_trips() {
        for (bit_width, msg_width) in iproduct!([8u32, 16, 32, 64], [1u32, 2, 4, 8]) {
            let dtype =
                PackedIntegerType::new(false, bit_width, 2, msg_width, default_params()).unwrap();

            for _ in 0..100 {
                let value = thread_rng().gen_range(0..1i128 << (bit_width.min(63)));
                let digits = dtype.encode(&PlainValue::Int(value)).unwrap();

                assert_eq!(digits.len(), (bit_width / msg_width) as usize);
                assert_eq!(dtype.decode(&digits).unwrap(), PlainValue::Int(value));
            }
        }
    }

    #[test]
    fn rejects_bad_encoded_lengths() {
        let dtype = PackedIntegerType::uint8_2_2(default_params());

        assert_eq!(
            dtype.decode(&[1, 2, 3]).unwrap_err(),
            Error::ShapeMismatch {
                len: 3,
                digits_per_value: 4
            }
        );
    }

    #[test]
    fn rejects_non_integer_values() {
        let dtype = PackedIntegerType::uint8_2_2(default_params());

        assert_eq!(
            dtype.encode(&PlainValue::Float(1.0)).unwrap_err(),
            Error::UnsupportedValue { kind: "float" }
        );

        assert_eq!(
            PackedInteger::new(dtype, PlainValue::FloatTensor(vec![1.0])).unwrap_err(),
            Error::UnsupportedValue {
                kind: "float tensor"
            }
        );
    }

    #[test]
    fn rejects_widths_that_do_not_pack() {
        for (bit_width, msg_width) in [(8, 3), (8, 0), (0, 2), (128, 2), (2, 4)] {
            assert_eq!(
                PackedIntegerType::new(false, bit_width, 2, msg_width, default_params())
                    .unwrap_err(),
                Error::InvalidWidth {
                    bit_width,
                    msg_width
                }
            );
        }
    }

    #[test]
    fn validates_value_ranges() {
        let dtype = PackedIntegerType::uint8_2_2(default_params());

        assert!(PackedInteger::new(dtype, PlainValue::Int(255)).is_ok());

        assert_eq!(
            PackedInteger::new(dtype, PlainValue::IntTensor(vec![1, 1 << 10])).unwrap_err(),
            Error::ValueTooLarge {
                value: 1 << 10,
                max: 255
            }
        );

        assert_eq!(
            PackedInteger::new(dtype, PlainValue::IntTensor(vec![1, -2])).unwrap_err(),
            Error::ValueTooSmall { value: -2, min: 0 }
        );
    }

    #[test]
    fn packed_integers_encode_their_value() {
        let dtype = PackedIntegerType::int16_2_2(default_params());

        let packed = PackedInteger::new(dtype, PlainValue::Int(-12345)).unwrap();
        let digits = packed.encode();

        assert_eq!(dtype.decode(&digits).unwrap(), PlainValue::Int(-12345));
    }
}

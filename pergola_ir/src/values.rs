use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DataType, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Describes the data flowing over one edge of the computation graph: its
/// element type, whether it is encrypted, and its shape.
///
/// # Remarks
/// A [`Value`] describes data, not the data itself. The concrete contents
/// live in [`PlainValue`](crate::PlainValue)s during simulation and in
/// ciphertexts at runtime. An empty shape denotes a scalar. Values are
/// immutable once constructed and compare structurally over all three
/// fields.
pub struct Value {
    dtype: DataType,
    is_encrypted: bool,
    shape: Vec<usize>,
}

impl Value {
    /// Creates a clear (unencrypted) scalar descriptor.
    pub fn clear_scalar(dtype: DataType) -> Self {
        Self {
            dtype,
            is_encrypted: false,
            shape: vec![],
        }
    }

    /// Creates an encrypted scalar descriptor.
    pub fn encrypted_scalar(dtype: DataType) -> Self {
        Self {
            dtype,
            is_encrypted: true,
            shape: vec![],
        }
    }

    /// Creates a clear (unencrypted) tensor descriptor.
    ///
    /// # Remarks
    /// Fails with [`Error::InvalidShape`] when `shape` is empty or contains
    /// a zero dimension.
    pub fn clear_tensor(dtype: DataType, shape: &[usize]) -> Result<Self> {
        Self::tensor(dtype, shape, false)
    }

    /// Creates an encrypted tensor descriptor.
    ///
    /// # Remarks
    /// Fails with [`Error::InvalidShape`] when `shape` is empty or contains
    /// a zero dimension.
    pub fn encrypted_tensor(dtype: DataType, shape: &[usize]) -> Result<Self> {
        Self::tensor(dtype, shape, true)
    }

    fn tensor(dtype: DataType, shape: &[usize], is_encrypted: bool) -> Result<Self> {
        if shape.is_empty() || shape.contains(&0) {
            return Err(Error::InvalidShape);
        }

        Ok(Self {
            dtype,
            is_encrypted,
            shape: shape.to_vec(),
        })
    }

    /// The element type of this value.
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// Whether this value is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.is_encrypted
    }

    /// Whether this value is clear (unencrypted).
    pub fn is_clear(&self) -> bool {
        !self.is_encrypted
    }

    /// The shape of this value. Empty for scalars.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Whether this value is a scalar.
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// The number of elements this value holds. 1 for scalars.
    pub fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns this descriptor with its element type replaced, keeping the
    /// shape and encryption status.
    pub fn with_dtype(&self, dtype: DataType) -> Self {
        Self {
            dtype,
            is_encrypted: self.is_encrypted,
            shape: self.shape.clone(),
        }
    }

    /// Resolves the descriptor of an arithmetic operation over `self` and
    /// `other`.
    ///
    /// # Remarks
    /// The element types combine per [`DataType::combine`], the result is
    /// encrypted when either operand is, and a scalar broadcasts against a
    /// tensor. Two tensors must agree on shape exactly; mismatched shapes
    /// fail with [`Error::ShapeMismatch`].
    pub fn combine(&self, other: &Self) -> Result<Self> {
        let shape = if self.shape == other.shape {
            self.shape.clone()
        } else if self.is_scalar() {
            other.shape.clone()
        } else if other.is_scalar() {
            self.shape.clone()
        } else {
            return Err(Error::shape_mismatch(&self.shape, &other.shape));
        };

        Ok(Self {
            dtype: self.dtype.combine(other.dtype),
            is_encrypted: self.is_encrypted || other.is_encrypted,
            shape,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encrypted = if self.is_encrypted { "Encrypted" } else { "Clear" };

        if self.is_scalar() {
            write!(f, "{encrypted}Scalar<{}>", self.dtype)
        } else {
            write!(f, "{encrypted}Tensor<{}, shape={:?}>", self.dtype, self.shape)
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Concrete data manipulated during plaintext simulation of the graph.
///
/// # Remarks
/// Simulation runs on native `i128`/`f64` arithmetic; values are not
/// clamped to the bit width their [`Value`](crate::Value) descriptor
/// declares. Width enforcement happens in the compilation backend, not at
/// this layer.
pub enum PlainValue {
    /// An integer scalar.
    Int(i128),

    /// A float scalar.
    Float(f64),

    /// A tensor of integers, stored flat. The shape lives in the
    /// [`Value`](crate::Value) descriptor.
    IntTensor(Vec<i128>),

    /// A tensor of floats, stored flat.
    FloatTensor(Vec<f64>),
}

impl PlainValue {
    /// A short name for this value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::IntTensor(_) => "int tensor",
            Self::FloatTensor(_) => "float tensor",
        }
    }

    /// Whether this is a scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// The number of elements this value holds. 1 for scalars.
    pub fn num_elements(&self) -> usize {
        match self {
            Self::Int(_) | Self::Float(_) => 1,
            Self::IntTensor(x) => x.len(),
            Self::FloatTensor(x) => x.len(),
        }
    }

    /// Elementwise addition with int-to-float promotion and scalar
    /// broadcast.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.binary(other, |a, b| a.wrapping_add(b), |a, b| a + b)
    }

    /// Elementwise subtraction with int-to-float promotion and scalar
    /// broadcast.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.binary(other, |a, b| a.wrapping_sub(b), |a, b| a - b)
    }

    /// Elementwise multiplication with int-to-float promotion and scalar
    /// broadcast.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.binary(other, |a, b| a.wrapping_mul(b), |a, b| a * b)
    }

    fn binary(
        &self,
        other: &Self,
        int_op: fn(i128, i128) -> i128,
        float_op: fn(f64, f64) -> f64,
    ) -> Result<Self> {
        use PlainValue::*;

        let result = match (self, other) {
            (Int(a), Int(b)) => Int(int_op(*a, *b)),
            (Int(a), Float(b)) => Float(float_op(*a as f64, *b)),
            (Float(a), Int(b)) => Float(float_op(*a, *b as f64)),
            (Float(a), Float(b)) => Float(float_op(*a, *b)),

            // Scalar broadcast against a tensor.
            (Int(a), IntTensor(b)) => IntTensor(b.iter().map(|x| int_op(*a, *x)).collect()),
            (IntTensor(a), Int(b)) => IntTensor(a.iter().map(|x| int_op(*x, *b)).collect()),
            (Float(a), FloatTensor(b)) => {
                FloatTensor(b.iter().map(|x| float_op(*a, *x)).collect())
            }
            (FloatTensor(a), Float(b)) => {
                FloatTensor(a.iter().map(|x| float_op(*x, *b)).collect())
            }
            (Int(a), FloatTensor(b)) => {
                FloatTensor(b.iter().map(|x| float_op(*a as f64, *x)).collect())
            }
            (FloatTensor(a), Int(b)) => {
                FloatTensor(a.iter().map(|x| float_op(*x, *b as f64)).collect())
            }
            (Float(a), IntTensor(b)) => {
                FloatTensor(b.iter().map(|x| float_op(*a, *x as f64)).collect())
            }
            (IntTensor(a), Float(b)) => {
                FloatTensor(a.iter().map(|x| float_op(*x as f64, *b)).collect())
            }

            (IntTensor(a), IntTensor(b)) => {
                check_lengths(a.len(), b.len())?;

                IntTensor(a.iter().zip(b).map(|(x, y)| int_op(*x, *y)).collect())
            }
            (FloatTensor(a), FloatTensor(b)) => {
                check_lengths(a.len(), b.len())?;

                FloatTensor(a.iter().zip(b).map(|(x, y)| float_op(*x, *y)).collect())
            }
            (IntTensor(a), FloatTensor(b)) => {
                check_lengths(a.len(), b.len())?;

                FloatTensor(
                    a.iter()
                        .zip(b)
                        .map(|(x, y)| float_op(*x as f64, *y))
                        .collect(),
                )
            }
            (FloatTensor(a), IntTensor(b)) => {
                check_lengths(a.len(), b.len())?;

                FloatTensor(
                    a.iter()
                        .zip(b)
                        .map(|(x, y)| float_op(*x, *y as f64))
                        .collect(),
                )
            }
        };

        Ok(result)
    }
}

fn check_lengths(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(Error::LengthMismatch { left, right });
    }

    Ok(())
}

impl From<i128> for PlainValue {
    fn from(value: i128) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for PlainValue {
    fn from(value: i64) -> Self {
        Self::Int(value as i128)
    }
}

impl From<i32> for PlainValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i128)
    }
}

impl From<u64> for PlainValue {
    fn from(value: u64) -> Self {
        Self::Int(value as i128)
    }
}

impl From<f64> for PlainValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<i128>> for PlainValue {
    fn from(value: Vec<i128>) -> Self {
        Self::IntTensor(value)
    }
}

impl From<Vec<f64>> for PlainValue {
    fn from(value: Vec<f64>) -> Self {
        Self::FloatTensor(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_arithmetic() {
        let a = PlainValue::Int(10);
        let b = PlainValue::Int(4589);

        assert_eq!(a.add(&b).unwrap(), PlainValue::Int(4599));
        assert_eq!(a.sub(&b).unwrap(), PlainValue::Int(-4579));
        assert_eq!(a.mul(&b).unwrap(), PlainValue::Int(45890));
    }

    #[test]
    fn mixing_promotes_to_float() {
        let a = PlainValue::Int(3);
        let b = PlainValue::Float(0.5);

        assert_eq!(a.add(&b).unwrap(), PlainValue::Float(3.5));
        assert_eq!(b.mul(&a).unwrap(), PlainValue::Float(1.5));
    }

    #[test]
    fn tensors_combine_elementwise() {
        let a = PlainValue::IntTensor(vec![1, 2, 3]);
        let b = PlainValue::IntTensor(vec![10, 20, 30]);

        assert_eq!(a.add(&b).unwrap(), PlainValue::IntTensor(vec![11, 22, 33]));
    }

    #[test]
    fn scalars_broadcast_against_tensors() {
        let t = PlainValue::IntTensor(vec![1, 2, 3]);
        let s = PlainValue::Int(10);

        assert_eq!(s.mul(&t).unwrap(), PlainValue::IntTensor(vec![10, 20, 30]));
        assert_eq!(t.sub(&s).unwrap(), PlainValue::IntTensor(vec![-9, -8, -7]));
    }

    #[test]
    fn rejects_mismatched_tensor_lengths() {
        let a = PlainValue::IntTensor(vec![1, 2, 3]);
        let b = PlainValue::IntTensor(vec![1, 2]);

        assert_eq!(
            a.add(&b),
            Err(Error::LengthMismatch { left: 3, right: 2 })
        );
    }

    #[test]
    fn int_and_float_literals_are_distinct() {
        assert_ne!(PlainValue::Int(10), PlainValue::Float(10.0));
    }
}

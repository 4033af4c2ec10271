use std::fmt;
use std::sync::Arc;

use crate::{DataType, Error, PlainValue, Result, Value};

/// A pluggable dot-product reduction shared between nodes.
///
/// # Remarks
/// Delegates are compared by pointer identity during equivalence checking;
/// behavioral equality of two distinct callables cannot be established.
pub type DotFn = Arc<dyn Fn(&PlainValue, &PlainValue) -> Result<PlainValue> + Send + Sync>;

#[derive(Clone)]
/// A dot product over two tensors of equal shape, producing a scalar.
pub struct Dot {
    inputs: [Value; 2],
    output: Value,
    delegate: Option<DotFn>,
}

// Can't derive Debug because `delegate` holds an opaque callable.
impl fmt::Debug for Dot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dot(-> {})", self.output)
    }
}

impl Dot {
    /// Creates a [`Dot`] with the default multiply-then-sum reduction.
    ///
    /// # Remarks
    /// Fails with [`Error::ArityMismatch`] unless exactly two operands are
    /// given, with [`Error::ScalarOperand`] when either operand is rank 0,
    /// and with [`Error::ShapeMismatch`] when the shapes differ. The output
    /// is a scalar of `output_dtype`, encrypted when either operand is.
    pub fn new(inputs: Vec<Value>, output_dtype: DataType) -> Result<Self> {
        Self::build(inputs, output_dtype, None)
    }

    /// Creates a [`Dot`] whose evaluation defers to `delegate` instead of
    /// the default reduction.
    pub fn with_delegate(
        inputs: Vec<Value>,
        output_dtype: DataType,
        delegate: DotFn,
    ) -> Result<Self> {
        Self::build(inputs, output_dtype, Some(delegate))
    }

    fn build(inputs: Vec<Value>, output_dtype: DataType, delegate: Option<DotFn>) -> Result<Self> {
        let operands: [Value; 2] = inputs
            .try_into()
            .map_err(|v: Vec<Value>| Error::arity_mismatch(2, v.len()))?;

        if operands.iter().any(|x| x.is_scalar()) {
            return Err(Error::ScalarOperand);
        }

        if operands[0].shape() != operands[1].shape() {
            return Err(Error::shape_mismatch(
                operands[0].shape(),
                operands[1].shape(),
            ));
        }

        let output = if operands.iter().any(|x| x.is_encrypted()) {
            Value::encrypted_scalar(output_dtype)
        } else {
            Value::clear_scalar(output_dtype)
        };

        Ok(Self {
            inputs: operands,
            output,
            delegate,
        })
    }

    /// The two operand descriptors.
    pub fn inputs(&self) -> &[Value] {
        &self.inputs
    }

    /// The result descriptor.
    pub fn output(&self) -> &Value {
        &self.output
    }

    /// The pluggable reduction, if one was supplied.
    pub fn delegate(&self) -> Option<&DotFn> {
        self.delegate.as_ref()
    }

    pub(crate) fn evaluate(&self, data: &[PlainValue]) -> Result<PlainValue> {
        match &self.delegate {
            Some(f) => f(&data[0], &data[1]),
            None => dot_product(&data[0], &data[1]),
        }
    }
}

/// Sums the elementwise products of two flat tensors.
fn dot_product(left: &PlainValue, right: &PlainValue) -> Result<PlainValue> {
    use PlainValue::*;

    match (left, right) {
        (IntTensor(a), IntTensor(b)) => {
            check_lengths(a.len(), b.len())?;

            Ok(Int(a
                .iter()
                .zip(b)
                .fold(0i128, |acc, (x, y)| acc.wrapping_add(x.wrapping_mul(*y)))))
        }
        (FloatTensor(a), FloatTensor(b)) => {
            check_lengths(a.len(), b.len())?;

            Ok(Float(a.iter().zip(b).map(|(x, y)| x * y).sum()))
        }
        (IntTensor(a), FloatTensor(b)) => {
            check_lengths(a.len(), b.len())?;

            Ok(Float(a.iter().zip(b).map(|(x, y)| *x as f64 * y).sum()))
        }
        (FloatTensor(a), IntTensor(b)) => {
            check_lengths(a.len(), b.len())?;

            Ok(Float(a.iter().zip(b).map(|(x, y)| x * *y as f64).sum()))
        }
        _ => Err(Error::data_mismatch(left, right)),
    }
}

fn check_lengths(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(Error::LengthMismatch { left, right });
    }

    Ok(())
}

use crate::{Error, PlainValue, Result, Value};

/// Validates a two-operand input list and resolves the output descriptor.
fn binary_operands(inputs: Vec<Value>) -> Result<([Value; 2], Value)> {
    let operands: [Value; 2] = inputs
        .try_into()
        .map_err(|v: Vec<Value>| Error::arity_mismatch(2, v.len()))?;

    let output = operands[0].combine(&operands[1])?;

    Ok((operands, output))
}

#[derive(Debug, Clone)]
/// Elementwise addition of two operands. Commutative.
pub struct Add {
    inputs: [Value; 2],
    output: Value,
}

impl Add {
    /// Creates an [`Add`] over exactly two operand descriptors.
    ///
    /// # Remarks
    /// Fails with [`Error::ArityMismatch`] for any other operand count and
    /// with [`Error::ShapeMismatch`] when the shapes don't broadcast. The
    /// output descriptor is resolved via [`Value::combine`].
    pub fn new(inputs: Vec<Value>) -> Result<Self> {
        let (inputs, output) = binary_operands(inputs)?;

        Ok(Self { inputs, output })
    }

    /// The two operand descriptors.
    pub fn inputs(&self) -> &[Value] {
        &self.inputs
    }

    /// The result descriptor.
    pub fn output(&self) -> &Value {
        &self.output
    }

    pub(crate) fn evaluate(&self, data: &[PlainValue]) -> Result<PlainValue> {
        data[0].add(&data[1])
    }
}

#[derive(Debug, Clone)]
/// Elementwise subtraction of two operands. Not commutative.
pub struct Sub {
    inputs: [Value; 2],
    output: Value,
}

impl Sub {
    /// Creates a [`Sub`] over exactly two operand descriptors.
    pub fn new(inputs: Vec<Value>) -> Result<Self> {
        let (inputs, output) = binary_operands(inputs)?;

        Ok(Self { inputs, output })
    }

    /// The two operand descriptors, minuend first.
    pub fn inputs(&self) -> &[Value] {
        &self.inputs
    }

    /// The result descriptor.
    pub fn output(&self) -> &Value {
        &self.output
    }

    pub(crate) fn evaluate(&self, data: &[PlainValue]) -> Result<PlainValue> {
        data[0].sub(&data[1])
    }
}

#[derive(Debug, Clone)]
/// Elementwise multiplication of two operands. Commutative.
pub struct Mul {
    inputs: [Value; 2],
    output: Value,
}

impl Mul {
    /// Creates a [`Mul`] over exactly two operand descriptors.
    pub fn new(inputs: Vec<Value>) -> Result<Self> {
        let (inputs, output) = binary_operands(inputs)?;

        Ok(Self { inputs, output })
    }

    /// The two operand descriptors.
    pub fn inputs(&self) -> &[Value] {
        &self.inputs
    }

    /// The result descriptor.
    pub fn output(&self) -> &Value {
        &self.output
    }

    pub(crate) fn evaluate(&self, data: &[PlainValue]) -> Result<PlainValue> {
        data[0].mul(&data[1])
    }
}

use std::slice;

use crate::{PlainValue, Result, Value};

#[derive(Debug, Clone)]
/// One formal parameter of the program.
///
/// # Remarks
/// An [`Input`] passes its single operand through unchanged; the binding
/// of concrete data to its `index` happens when the whole graph is
/// simulated or compiled. Its identity for equivalence purposes includes
/// both the parameter name and the program index, so two inputs with the
/// same descriptor but different positions never merge.
pub struct Input {
    value: Value,
    name: String,
    index: usize,
}

impl Input {
    /// Creates an [`Input`] for the program parameter `name` at position
    /// `index`.
    pub fn new(value: Value, name: impl Into<String>, index: usize) -> Self {
        Self {
            value,
            name: name.into(),
            index,
        }
    }

    /// The single operand descriptor.
    pub fn inputs(&self) -> &[Value] {
        slice::from_ref(&self.value)
    }

    /// The result descriptor. Identical to the operand descriptor.
    pub fn output(&self) -> &Value {
        &self.value
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The position of this parameter in the program signature.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn evaluate(&self, data: &[PlainValue]) -> Result<PlainValue> {
        Ok(data[0].clone())
    }
}

use crate::{DataType, Error, FloatType, IntegerType, PlainValue, Result, Value};

#[derive(Debug, Clone)]
/// A literal integer or float embedded in the graph.
pub struct Constant {
    value: PlainValue,
    output: Value,
}

impl Constant {
    /// Creates a [`Constant`] from an integer or float literal.
    ///
    /// # Remarks
    /// The output descriptor is derived from the literal: integers take the
    /// smallest type that holds them (see [`IntegerType::to_hold`]), floats
    /// are always 64-bit. Constants are clear scalars; tensor literals fail
    /// with [`Error::UnsupportedConstant`].
    pub fn new(value: impl Into<PlainValue>) -> Result<Self> {
        let value = value.into();

        let output = match &value {
            PlainValue::Int(x) => {
                Value::clear_scalar(DataType::Integer(IntegerType::to_hold(*x)))
            }
            PlainValue::Float(_) => Value::clear_scalar(DataType::Float(FloatType::double())),
            _ => return Err(Error::UnsupportedConstant),
        };

        Ok(Self { value, output })
    }

    /// The stored literal.
    pub fn value(&self) -> &PlainValue {
        &self.value
    }

    /// The result descriptor.
    pub fn output(&self) -> &Value {
        &self.output
    }

    pub(crate) fn evaluate(&self) -> Result<PlainValue> {
        Ok(self.value.clone())
    }
}

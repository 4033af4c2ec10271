use std::{collections::BTreeMap, sync::Arc};

use crate::{DataType, Error, PlainValue, Result, Value};

/// Named arguments captured by a [`Univariate`] node at construction time.
pub type KwArgs = BTreeMap<String, PlainValue>;

/// An opaque univariate callable shared between nodes.
///
/// # Remarks
/// The callable receives the single operand's data plus the positional and
/// named arguments the node captured when it was built. Like
/// [`DotFn`](crate::DotFn), it is compared by pointer identity during
/// equivalence checking.
pub type UnivariateFn =
    Arc<dyn Fn(&PlainValue, &[PlainValue], &KwArgs) -> Result<PlainValue> + Send + Sync>;

/// Looks up a captured named argument, failing with
/// [`Error::MissingCapture`] when absent.
pub fn kwarg<'a>(kwargs: &'a KwArgs, name: &str) -> Result<&'a PlainValue> {
    kwargs
        .get(name)
        .ok_or_else(|| Error::MissingCapture(name.to_owned()))
}

#[derive(Clone)]
/// An opaque univariate function applied to one operand.
///
/// # Remarks
/// The captured `op_args`/`op_kwargs` are snapshotted at construction, so
/// mutating the caller's collections afterwards never changes the node.
/// The function itself is stored by reference and shared between clones.
pub struct Univariate {
    input: Value,
    output: Value,
    function: UnivariateFn,
    op_args: Vec<PlainValue>,
    op_kwargs: KwArgs,
}

impl Univariate {
    /// Creates a [`Univariate`] with no captured arguments.
    ///
    /// # Remarks
    /// The output keeps the operand's shape and encryption status; only the
    /// element type changes to `output_dtype`.
    pub fn new(input: Value, function: UnivariateFn, output_dtype: DataType) -> Self {
        Self::with_captures(input, function, output_dtype, vec![], KwArgs::new())
    }

    /// Creates a [`Univariate`] capturing positional and named arguments
    /// that evaluation passes to `function` alongside the operand data.
    pub fn with_captures(
        input: Value,
        function: UnivariateFn,
        output_dtype: DataType,
        op_args: Vec<PlainValue>,
        op_kwargs: KwArgs,
    ) -> Self {
        let output = input.with_dtype(output_dtype);

        Self {
            input,
            output,
            function,
            op_args,
            op_kwargs,
        }
    }

    /// The single operand descriptor.
    pub fn inputs(&self) -> &[Value] {
        std::slice::from_ref(&self.input)
    }

    /// The result descriptor.
    pub fn output(&self) -> &Value {
        &self.output
    }

    /// The stored callable.
    pub fn function(&self) -> &UnivariateFn {
        &self.function
    }

    /// The captured positional arguments.
    pub fn op_args(&self) -> &[PlainValue] {
        &self.op_args
    }

    /// The captured named arguments.
    pub fn op_kwargs(&self) -> &KwArgs {
        &self.op_kwargs
    }

    pub(crate) fn evaluate(&self, data: &[PlainValue]) -> Result<PlainValue> {
        (self.function)(&data[0], &self.op_args, &self.op_kwargs)
    }
}

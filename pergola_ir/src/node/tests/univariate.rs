use std::sync::Arc;

use crate::{
    DataType, Error, IrNode, KwArgs, PlainValue, Univariate, UnivariateFn, kwarg, test_utils::*,
};

fn uint7() -> DataType {
    DataType::unsigned(7).unwrap()
}

#[test]
fn applies_the_function_to_the_operand() {
    let plus_three: UnivariateFn = Arc::new(|x, _args, _kwargs| x.add(&PlainValue::Int(3)));

    let node: IrNode = Univariate::new(enc_uint_scalar(7), plus_three, uint7()).into();

    assert_eq!(
        node.evaluate(&[PlainValue::Int(10)]).unwrap(),
        PlainValue::Int(13)
    );
}

#[test]
fn passes_captured_named_arguments() {
    let add_y: UnivariateFn = Arc::new(|x, _args, kwargs| x.add(kwarg(kwargs, "y")?));

    let node: IrNode = Univariate::with_captures(
        enc_uint_scalar(7),
        add_y,
        uint7(),
        vec![],
        KwArgs::from([("y".to_owned(), PlainValue::Int(3))]),
    )
    .into();

    assert_eq!(
        node.evaluate(&[PlainValue::Int(10)]).unwrap(),
        PlainValue::Int(13)
    );
}

#[test]
fn captured_tables_support_indexing() {
    let index_table: UnivariateFn = Arc::new(|x, _args, kwargs| {
        match (x, kwarg(kwargs, "table")?) {
            (PlainValue::Int(i), PlainValue::IntTensor(table)) => {
                Ok(PlainValue::Int(table[*i as usize]))
            }
            (x, table) => Err(Error::DataMismatch {
                left: x.kind(),
                right: table.kind(),
            }),
        }
    });

    let node: IrNode = Univariate::with_captures(
        enc_uint_scalar(7),
        index_table,
        uint7(),
        vec![],
        KwArgs::from([("table".to_owned(), PlainValue::IntTensor(vec![1, 2, 3, 4]))]),
    )
    .into();

    assert_eq!(
        node.evaluate(&[PlainValue::Int(2)]).unwrap(),
        PlainValue::Int(3)
    );
}

#[test]
fn passes_captured_positional_arguments() {
    let add_first_arg: UnivariateFn = Arc::new(|x, args, _kwargs| x.add(&args[0]));

    let node: IrNode = Univariate::with_captures(
        enc_uint_scalar(7),
        add_first_arg,
        uint7(),
        vec![PlainValue::Int(5)],
        KwArgs::new(),
    )
    .into();

    assert_eq!(
        node.evaluate(&[PlainValue::Int(10)]).unwrap(),
        PlainValue::Int(15)
    );
}

#[test]
fn missing_captures_fail() {
    let add_y: UnivariateFn = Arc::new(|x, _args, kwargs| x.add(kwarg(kwargs, "y")?));

    let node: IrNode = Univariate::new(enc_uint_scalar(7), add_y, uint7()).into();

    assert_eq!(
        node.evaluate(&[PlainValue::Int(10)]).unwrap_err(),
        Error::MissingCapture("y".to_owned())
    );
}

#[test]
fn output_keeps_the_operand_shape_and_encryption() {
    let identity: UnivariateFn = Arc::new(|x, _args, _kwargs| Ok(x.clone()));

    let node = Univariate::new(
        enc_int_tensor(8, &[4]),
        identity,
        DataType::unsigned(16).unwrap(),
    );

    assert!(node.output().is_encrypted());
    assert_eq!(node.output().shape(), &[4]);
    assert_eq!(node.output().dtype(), DataType::unsigned(16).unwrap());
}

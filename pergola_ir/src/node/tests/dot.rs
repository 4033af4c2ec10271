use std::sync::Arc;

use crate::{DataType, Dot, DotFn, Error, IrNode, PlainValue, test_utils::*};

fn int32() -> DataType {
    DataType::signed(32).unwrap()
}

#[test]
fn evaluates_the_default_reduction() {
    let node: IrNode = Dot::new(
        vec![enc_int_tensor(32, &[4]), clear_int_tensor(32, &[4])],
        int32(),
    )
    .unwrap()
    .into();

    let result = node
        .evaluate(&[
            PlainValue::IntTensor(vec![1, 2, 3, 4]),
            PlainValue::IntTensor(vec![4, 3, 2, 1]),
        ])
        .unwrap();

    assert_eq!(result, PlainValue::Int(20));
}

#[test]
fn evaluates_float_tensors() {
    let node: IrNode = Dot::new(
        vec![enc_float_tensor(32, &[4]), clear_float_tensor(32, &[4])],
        DataType::float(32).unwrap(),
    )
    .unwrap()
    .into();

    let result = node
        .evaluate(&[
            PlainValue::FloatTensor(vec![1.0, 2.0, 3.0, 4.0]),
            PlainValue::FloatTensor(vec![4.0, 3.0, 2.0, 1.0]),
        ])
        .unwrap();

    assert_eq!(result, PlainValue::Float(20.0));
}

#[test]
fn defers_to_the_delegate_when_present() {
    let delegate: DotFn = Arc::new(|left, right| match (left, right) {
        (PlainValue::IntTensor(a), PlainValue::IntTensor(b)) => Ok(PlainValue::Int(
            a.iter().zip(b).map(|(x, y)| x * y).sum(),
        )),
        _ => Err(Error::DataMismatch {
            left: left.kind(),
            right: right.kind(),
        }),
    });

    let node: IrNode = Dot::with_delegate(
        vec![enc_int_tensor(32, &[4]), clear_int_tensor(32, &[4])],
        int32(),
        delegate,
    )
    .unwrap()
    .into();

    let result = node
        .evaluate(&[
            PlainValue::IntTensor(vec![1, 2, 3, 4]),
            PlainValue::IntTensor(vec![4, 3, 2, 1]),
        ])
        .unwrap();

    assert_eq!(result, PlainValue::Int(20));
}

#[test]
fn output_is_an_encrypted_scalar_when_either_operand_is_encrypted() {
    let node = Dot::new(
        vec![enc_int_tensor(32, &[4]), clear_int_tensor(32, &[4])],
        int32(),
    )
    .unwrap();

    assert!(node.output().is_encrypted());
    assert!(node.output().is_scalar());
    assert_eq!(node.output().dtype(), int32());

    let node = Dot::new(
        vec![clear_int_tensor(32, &[4]), clear_int_tensor(32, &[4])],
        int32(),
    )
    .unwrap();

    assert!(node.output().is_clear());
}

#[test]
fn rejects_mismatched_shapes() {
    assert_eq!(
        Dot::new(
            vec![enc_int_tensor(32, &[4]), clear_int_tensor(32, &[5])],
            int32()
        )
        .unwrap_err(),
        Error::ShapeMismatch {
            left: vec![4],
            right: vec![5]
        }
    );
}

#[test]
fn rejects_scalar_operands() {
    assert_eq!(
        Dot::new(vec![enc_uint_scalar(32), enc_uint_scalar(32)], int32()).unwrap_err(),
        Error::ScalarOperand
    );
}

#[test]
fn rejects_operand_counts_other_than_two() {
    assert_eq!(
        Dot::new(vec![enc_int_tensor(32, &[4])], int32()).unwrap_err(),
        Error::ArityMismatch {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn rejects_scalar_operand_data() {
    let node: IrNode = Dot::new(
        vec![enc_int_tensor(32, &[4]), clear_int_tensor(32, &[4])],
        int32(),
    )
    .unwrap()
    .into();

    assert_eq!(
        node.evaluate(&[PlainValue::Int(1), PlainValue::Int(2)])
            .unwrap_err(),
        Error::DataMismatch {
            left: "int",
            right: "int"
        }
    );
}

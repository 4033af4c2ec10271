use crate::{Error, IrNode, Mul, PlainValue, test_utils::*};

#[test]
fn evaluates_product() {
    let node: IrNode = Mul::new(vec![enc_uint_scalar(64), enc_uint_scalar(64)])
        .unwrap()
        .into();

    let result = node
        .evaluate(&[PlainValue::Int(10), PlainValue::Int(4589)])
        .unwrap();

    assert_eq!(result, PlainValue::Int(45890));
}

#[test]
fn multiplies_tensors_elementwise() {
    let node: IrNode = Mul::new(vec![
        enc_int_tensor(32, &[3]),
        clear_int_tensor(32, &[3]),
    ])
    .unwrap()
    .into();

    let result = node
        .evaluate(&[
            PlainValue::IntTensor(vec![1, 2, 3]),
            PlainValue::IntTensor(vec![4, 5, 6]),
        ])
        .unwrap();

    assert_eq!(result, PlainValue::IntTensor(vec![4, 10, 18]));
}

#[test]
fn rejects_operand_counts_other_than_two() {
    assert_eq!(
        Mul::new(vec![enc_uint_scalar(8); 4]).unwrap_err(),
        Error::ArityMismatch {
            expected: 2,
            actual: 4
        }
    );
}

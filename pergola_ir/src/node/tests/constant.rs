use crate::{Constant, DataType, Error, IrNode, PlainValue, Value};

#[test]
fn evaluates_to_its_literal() {
    let node: IrNode = Constant::new(42).unwrap().into();
    assert_eq!(node.evaluate(&[]).unwrap(), PlainValue::Int(42));

    let node: IrNode = Constant::new(-42).unwrap().into();
    assert_eq!(node.evaluate(&[]).unwrap(), PlainValue::Int(-42));
}

#[test]
fn takes_no_operands() {
    let node: IrNode = Constant::new(42).unwrap().into();

    assert!(node.inputs().is_empty());
    assert_eq!(
        node.evaluate(&[PlainValue::Int(1)]).unwrap_err(),
        Error::ArityMismatch {
            expected: 0,
            actual: 1
        }
    );
}

#[test]
fn integer_literals_take_the_smallest_holding_type() {
    let node = Constant::new(42).unwrap();
    assert_eq!(node.output(), &Value::clear_scalar(DataType::unsigned(6).unwrap()));

    let node = Constant::new(-42).unwrap();
    assert_eq!(node.output(), &Value::clear_scalar(DataType::signed(7).unwrap()));

    let node = Constant::new(0).unwrap();
    assert_eq!(node.output(), &Value::clear_scalar(DataType::unsigned(1).unwrap()));
}

#[test]
fn float_literals_are_double_width() {
    let node = Constant::new(2.5).unwrap();

    assert_eq!(node.output(), &Value::clear_scalar(DataType::float(64).unwrap()));
    assert_eq!(
        IrNode::from(node).evaluate(&[]).unwrap(),
        PlainValue::Float(2.5)
    );
}

#[test]
fn rejects_tensor_literals() {
    assert_eq!(
        Constant::new(PlainValue::IntTensor(vec![1, 2])).unwrap_err(),
        Error::UnsupportedConstant
    );
}

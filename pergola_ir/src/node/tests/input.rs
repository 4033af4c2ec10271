use crate::{Input, IrNode, PlainValue, test_utils::*};

#[test]
fn passes_its_argument_through() {
    let node: IrNode = Input::new(clear_uint_scalar(32), "in", 0).into();

    assert_eq!(
        node.evaluate(&[PlainValue::Int(42)]).unwrap(),
        PlainValue::Int(42)
    );
}

#[test]
fn output_matches_the_declared_value() {
    let input = Input::new(enc_uint_scalar(7), "x", 3);

    assert_eq!(input.output(), &enc_uint_scalar(7));
    assert_eq!(input.inputs(), &[enc_uint_scalar(7)]);
    assert_eq!(input.name(), "x");
    assert_eq!(input.index(), 3);
}

//! Constants category: push a typed constant derived from the opcode or an inline immediate.
use crate::interpreter::Frame;
use crate::interpreter::Word;

pub fn aconst_null(frame: &mut Frame) {
    frame.push_raw(Word::Ref(0));
}

pub fn iconst(frame: &mut Frame, value: i32) {
    frame.push_raw(Word::Int(value));
}

pub fn lconst(frame: &mut Frame, value: i64) {
    frame.push_pair(Word::Long(value));
}

pub fn fconst(frame: &mut Frame, value: f32) {
    frame.push_raw(Word::Float(value));
}

pub fn dconst(frame: &mut Frame, value: f64) {
    frame.push_pair(Word::Double(value));
}

pub fn bipush(frame: &mut Frame, value: i8) {
    frame.push_raw(Word::Int(value as i32));
}

pub fn sipush(frame: &mut Frame, value: i16) {
    frame.push_raw(Word::Int(value as i32));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::frame_for_test;

    #[test]
    fn bipush_sign_extends() {
        let mut frame = frame_for_test(0);
        bipush(&mut frame, -1);
        assert_eq!(frame.pop_raw(), Word::Int(-1));
    }

    #[test]
    fn lconst_pushes_pair_with_value_on_top() {
        let mut frame = frame_for_test(0);
        lconst(&mut frame, 1);
        assert_eq!(frame.pop_raw(), Word::Long(1));
        assert_eq!(frame.pop_raw(), Word::Empty);
    }
}

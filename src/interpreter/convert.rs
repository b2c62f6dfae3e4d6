//! Numeric conversions. Widening conversions are value-preserving; narrowing ones truncate.
//! `f2i`/`f2l`/`d2i`/`d2l` rely on Rust's `as` float-to-int cast, which has saturated (NaN -> 0,
//! out-of-range -> MIN/MAX) since the cast was defined not to be UB — exactly the JVM's rule, so
//! no manual clamping is needed here.
use crate::interpreter::frame::Frame;
use crate::interpreter::word::Word;

pub fn i2l(frame: &mut Frame) {
    let a = frame.pop_raw().as_int();
    frame.push_pair(Word::Long(a as i64));
}

pub fn i2f(frame: &mut Frame) {
    let a = frame.pop_raw().as_int();
    frame.push_raw(Word::Float(a as f32));
}

pub fn i2d(frame: &mut Frame) {
    let a = frame.pop_raw().as_int();
    frame.push_pair(Word::Double(a as f64));
}

pub fn l2i(frame: &mut Frame) {
    let a = frame.pop_pair().as_long();
    frame.push_raw(Word::Int(a as i32));
}

pub fn l2f(frame: &mut Frame) {
    let a = frame.pop_pair().as_long();
    frame.push_raw(Word::Float(a as f32));
}

pub fn l2d(frame: &mut Frame) {
    let a = frame.pop_pair().as_long();
    frame.push_pair(Word::Double(a as f64));
}

pub fn f2i(frame: &mut Frame) {
    let a = frame.pop_raw().as_float();
    frame.push_raw(Word::Int(a as i32));
}

pub fn f2l(frame: &mut Frame) {
    let a = frame.pop_raw().as_float();
    frame.push_pair(Word::Long(a as i64));
}

pub fn f2d(frame: &mut Frame) {
    let a = frame.pop_raw().as_float();
    frame.push_pair(Word::Double(a as f64));
}

pub fn d2i(frame: &mut Frame) {
    let a = frame.pop_pair().as_double();
    frame.push_raw(Word::Int(a as i32));
}

pub fn d2l(frame: &mut Frame) {
    let a = frame.pop_pair().as_double();
    frame.push_pair(Word::Long(a as i64));
}

pub fn d2f(frame: &mut Frame) {
    let a = frame.pop_pair().as_double();
    frame.push_raw(Word::Float(a as f32));
}

pub fn i2b(frame: &mut Frame) {
    let a = frame.pop_raw().as_int();
    frame.push_raw(Word::Int((a as i8) as i32));
}

pub fn i2c(frame: &mut Frame) {
    let a = frame.pop_raw().as_int();
    frame.push_raw(Word::Int((a as u16) as i32));
}

pub fn i2s(frame: &mut Frame) {
    let a = frame.pop_raw().as_int();
    frame.push_raw(Word::Int((a as i16) as i32));
}

//! Loads and stores: copy between the operand stack and the locals array. Long/Double use the
//! pair forms; everything else moves a single raw cell.
use crate::interpreter::Frame;

pub fn iload(frame: &mut Frame, index: u16) {
    frame.push_raw(frame.get_local(index));
}

pub fn fload(frame: &mut Frame, index: u16) {
    frame.push_raw(frame.get_local(index));
}

pub fn aload(frame: &mut Frame, index: u16) {
    frame.push_raw(frame.get_local(index));
}

pub fn lload(frame: &mut Frame, index: u16) {
    let value = frame.get_local(index);
    frame.push_pair(value);
}

pub fn dload(frame: &mut Frame, index: u16) {
    let value = frame.get_local(index);
    frame.push_pair(value);
}

pub fn istore(frame: &mut Frame, index: u16) {
    let value = frame.pop_raw();
    frame.set_local(index, value);
}

pub fn fstore(frame: &mut Frame, index: u16) {
    let value = frame.pop_raw();
    frame.set_local(index, value);
}

pub fn astore(frame: &mut Frame, index: u16) {
    let value = frame.pop_raw();
    frame.set_local(index, value);
}

pub fn lstore(frame: &mut Frame, index: u16) {
    let value = frame.pop_pair();
    frame.set_local_pair(index, value);
}

pub fn dstore(frame: &mut Frame, index: u16) {
    let value = frame.pop_pair();
    frame.set_local_pair(index, value);
}

/// `iinc`: add a signed immediate to a local in place, wrapping on overflow like the other
/// integer arithmetic ops. Used directly by the dispatch loop and, with widened operands, by the
/// `wide` prefix.
pub fn iinc(frame: &mut Frame, index: u16, increment: i32) {
    let value = frame.get_local(index).as_int();
    frame.set_local(index, crate::interpreter::Word::Int(value.wrapping_add(increment)));
}

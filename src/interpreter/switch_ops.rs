//! `tableswitch` and `lookupswitch`. Both pad past the opcode's operand bytes to the next 4-byte
//! boundary before reading their table, counted as an absolute offset into the method's code —
//! equivalent to counting from the opcode address, per the JVM specification.
use crate::interpreter::frame::Frame;

fn pad_to_four_byte_boundary(frame: &mut Frame) {
    while frame.ip() % 4 != 0 {
        frame.read_u8();
    }
}

fn jump(frame: &mut Frame, opcode_address: usize, offset: i32) {
    frame.set_ip((opcode_address as i64 + offset as i64) as usize);
}

pub fn tableswitch(frame: &mut Frame, opcode_address: usize) {
    pad_to_four_byte_boundary(frame);
    let default = frame.read_i32();
    let low = frame.read_i32();
    let high = frame.read_i32();

    let count = (high - low + 1).max(0) as usize;
    let mut offsets = Vec::with_capacity(count);
    for _ in 0..count {
        offsets.push(frame.read_i32());
    }

    let key = frame.pop_raw().as_int();
    let offset = if key < low || key > high {
        default
    } else {
        offsets[(key - low) as usize]
    };
    jump(frame, opcode_address, offset);
}

pub fn lookupswitch(frame: &mut Frame, opcode_address: usize) {
    pad_to_four_byte_boundary(frame);
    let default = frame.read_i32();
    let npairs = frame.read_i32().max(0) as usize;

    let mut pairs = Vec::with_capacity(npairs);
    for _ in 0..npairs {
        let match_value = frame.read_i32();
        let offset = frame.read_i32();
        pairs.push((match_value, offset));
    }

    let key = frame.pop_raw().as_int();
    let offset = pairs
        .iter()
        .find(|(m, _)| *m == key)
        .map(|(_, o)| *o)
        .unwrap_or(default);
    jump(frame, opcode_address, offset);
}

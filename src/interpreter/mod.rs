//! The bytecode interpreter: a stack-machine core for a single method activation, plus the
//! `Context`/`Host` boundary a caller uses to drive it and delegate whatever this crate does not
//! implement on its own (heap access, `invoke*`, `ldc*`, exceptions).
mod arithmetic;
mod branch;
mod compare;
mod context;
mod convert;
mod dispatch;
mod frame;
mod locals;
mod opcode;
mod push_const;
mod shift_bitwise;
mod stack_ops;
mod switch_ops;
mod word;
mod wide;

pub use context::{Context, Host};
pub use dispatch::execute;
pub use frame::Frame;
pub use word::Word;

#[cfg(test)]
pub(crate) fn frame_for_test(max_locals: u16) -> Frame<'static> {
    Frame::new(&[], max_locals)
}

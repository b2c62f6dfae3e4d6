//! `Context`: the call stack, and the `Host` boundary the interpreter delegates through.
use crate::error::ExecError;
use crate::interpreter::frame::Frame;

/// An execution thread's private call stack. Not `Sync`; running the same `Context` from two
/// threads at once is undefined, but independent `Context`s may run in parallel as long as they
/// never share a `Frame`.
#[derive(Default)]
pub struct Context<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> Context<'a> {
    pub fn new() -> Self {
        Context { frames: Vec::new() }
    }

    pub fn push_frame(&mut self, frame: Frame<'a>) {
        trace!("push_frame (depth now {})", self.frames.len() + 1);
        self.frames.push(frame);
    }

    /// Pops the current (callee) frame, transferring its top `consumes` operand-stack cells (0,
    /// 1, or 2) onto the new top-of-stack (the caller) in their original relative order. Popping
    /// the last frame on the context with `consumes > 0` is a no-op transfer: there is no caller
    /// left to receive the result, which is exactly what happens when a host finishes running a
    /// top-level invocation.
    pub fn pop_frame(&mut self, consumes: u8) -> Result<(), ExecError> {
        let mut callee = self.frames.pop().ok_or(ExecError::NoCurrentFrame)?;
        if consumes == 0 {
            return Ok(());
        }
        debug_assert!(consumes <= 2, "a frame can only return a category-1 or category-2 value");

        let mut transferred = Vec::with_capacity(consumes as usize);
        for _ in 0..consumes {
            transferred.push(callee.pop_raw());
        }
        transferred.reverse();

        if let Some(caller) = self.frames.last_mut() {
            for word in transferred {
                caller.push_raw(word);
            }
        }
        Ok(())
    }

    pub fn current_frame(&self) -> Option<&Frame<'a>> {
        self.frames.last()
    }

    pub fn current_frame_mut(&mut self) -> Option<&mut Frame<'a>> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// The collaborator a host must supply so the interpreter can hand off everything it does not
/// implement itself: object/array allocation, field access, `invoke*`, `athrow`, monitor ops,
/// `checkcast`/`instanceof`, and the `ldc*` family (which need to resolve into live heap values).
pub trait Host {
    /// Handles one opcode the interpreter does not implement. `opcode` has already been consumed
    /// from the frame's code stream; any operand bytes it carries have not. Returning `0`
    /// continues the fetch-decode loop; a nonzero return exits [`crate::interpreter::execute`]
    /// with that value.
    fn execute_op(&mut self, ctx: &mut Context, opcode: u8) -> i32;

    /// Requests that the host raise a guest-visible exception of the given class, with the given
    /// message. Raised for integer division/remainder by zero and unsupported `wide` forms; the
    /// interpreter itself never unwinds a frame.
    fn throw(&mut self, class_name: &str, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::word::Word;

    #[test]
    fn pop_frame_transfers_top_k_in_order() {
        let mut ctx = Context::new();
        let mut caller = Frame::new(&[], 0);
        caller.push_raw(Word::Int(1));
        ctx.push_frame(caller);

        let mut callee = Frame::new(&[], 0);
        callee.push_pair(Word::Long(99));
        ctx.push_frame(callee);

        ctx.pop_frame(2).unwrap();

        let caller = ctx.current_frame_mut().unwrap();
        assert_eq!(caller.pop_raw(), Word::Long(99));
        assert_eq!(caller.pop_raw(), Word::Empty);
        assert_eq!(caller.pop_raw(), Word::Int(1));
    }

    #[test]
    fn pop_frame_on_sole_frame_is_a_no_op_transfer() {
        let mut ctx = Context::new();
        let mut only = Frame::new(&[], 0);
        only.push_raw(Word::Int(7));
        ctx.push_frame(only);

        ctx.pop_frame(1).unwrap();
        assert!(ctx.current_frame().is_none());
    }

    #[test]
    fn pop_frame_on_empty_context_is_an_error() {
        let mut ctx: Context = Context::new();
        assert_eq!(ctx.pop_frame(0), Err(ExecError::NoCurrentFrame));
    }
}

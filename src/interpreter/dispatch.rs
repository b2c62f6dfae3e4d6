//! The fetch-decode-execute loop: reads one opcode at a time from `ctx.current_frame`, dispatches
//! it to the category it belongs to, and keeps going until a host delegation returns nonzero.
use crate::error::ExecError;
use crate::interpreter::arithmetic::ArithError;
use crate::interpreter::context::{Context, Host};
use crate::interpreter::frame::Frame;
use crate::interpreter::opcode;
use crate::interpreter::{arithmetic, branch, compare, convert, locals, push_const, shift_bitwise, stack_ops, switch_ops, wide};

/// Runs `ctx.current_frame` until either a host delegation returns nonzero (propagated as the
/// return value here) or the context itself is empty to start with.
///
/// Division/remainder by zero and unrecognized `wide` forms are not returned as errors: the
/// interpreter does not unwind on a guest-level exception, it asks `host.throw` to raise one and
/// keeps running from wherever `ip` now points (the host is expected to reposition `ip` to a
/// handler before the next call, if it wants the exception actually handled).
pub fn execute(ctx: &mut Context, host: &mut dyn Host) -> Result<i32, ExecError> {
    loop {
        let opcode_address = ctx.current_frame().ok_or(ExecError::NoCurrentFrame)?.ip();
        let opcode = ctx
            .current_frame_mut()
            .ok_or(ExecError::NoCurrentFrame)?
            .read_u8();

        match opcode {
            opcode::NOP => {}

            // --- constants
            opcode::ACONST_NULL => with_frame(ctx, push_const::aconst_null)?,
            opcode::ICONST_M1..=opcode::ICONST_5 => with_frame(ctx, |f| {
                push_const::iconst(f, opcode as i32 - opcode::ICONST_0 as i32)
            })?,
            opcode::LCONST_0 | opcode::LCONST_1 => {
                with_frame(ctx, |f| push_const::lconst(f, (opcode - opcode::LCONST_0) as i64))?
            }
            opcode::FCONST_0..=opcode::FCONST_2 => {
                with_frame(ctx, |f| push_const::fconst(f, (opcode - opcode::FCONST_0) as f32))?
            }
            opcode::DCONST_0 | opcode::DCONST_1 => {
                with_frame(ctx, |f| push_const::dconst(f, (opcode - opcode::DCONST_0) as f64))?
            }
            opcode::BIPUSH => with_frame(ctx, |f| {
                let value = f.read_i8();
                push_const::bipush(f, value);
            })?,
            opcode::SIPUSH => with_frame(ctx, |f| {
                let value = f.read_i16();
                push_const::sipush(f, value);
            })?,

            // --- loads
            opcode::ILOAD => with_indexed_local(ctx, locals::iload)?,
            opcode::LLOAD => with_indexed_local(ctx, locals::lload)?,
            opcode::FLOAD => with_indexed_local(ctx, locals::fload)?,
            opcode::DLOAD => with_indexed_local(ctx, locals::dload)?,
            opcode::ALOAD => with_indexed_local(ctx, locals::aload)?,
            opcode::ILOAD_0..=opcode::ILOAD_3 => {
                with_frame(ctx, |f| locals::iload(f, (opcode - opcode::ILOAD_0) as u16))?
            }
            opcode::LLOAD_0..=opcode::LLOAD_3 => {
                with_frame(ctx, |f| locals::lload(f, (opcode - opcode::LLOAD_0) as u16))?
            }
            opcode::FLOAD_0..=opcode::FLOAD_3 => {
                with_frame(ctx, |f| locals::fload(f, (opcode - opcode::FLOAD_0) as u16))?
            }
            opcode::DLOAD_0..=opcode::DLOAD_3 => {
                with_frame(ctx, |f| locals::dload(f, (opcode - opcode::DLOAD_0) as u16))?
            }
            opcode::ALOAD_0..=opcode::ALOAD_3 => {
                with_frame(ctx, |f| locals::aload(f, (opcode - opcode::ALOAD_0) as u16))?
            }

            // --- stores
            opcode::ISTORE => with_indexed_local(ctx, locals::istore)?,
            opcode::LSTORE => with_indexed_local(ctx, locals::lstore)?,
            opcode::FSTORE => with_indexed_local(ctx, locals::fstore)?,
            opcode::DSTORE => with_indexed_local(ctx, locals::dstore)?,
            opcode::ASTORE => with_indexed_local(ctx, locals::astore)?,
            opcode::ISTORE_0..=opcode::ISTORE_3 => {
                with_frame(ctx, |f| locals::istore(f, (opcode - opcode::ISTORE_0) as u16))?
            }
            opcode::LSTORE_0..=opcode::LSTORE_3 => {
                with_frame(ctx, |f| locals::lstore(f, (opcode - opcode::LSTORE_0) as u16))?
            }
            opcode::FSTORE_0..=opcode::FSTORE_3 => {
                with_frame(ctx, |f| locals::fstore(f, (opcode - opcode::FSTORE_0) as u16))?
            }
            opcode::DSTORE_0..=opcode::DSTORE_3 => {
                with_frame(ctx, |f| locals::dstore(f, (opcode - opcode::DSTORE_0) as u16))?
            }
            opcode::ASTORE_0..=opcode::ASTORE_3 => {
                with_frame(ctx, |f| locals::astore(f, (opcode - opcode::ASTORE_0) as u16))?
            }

            // --- stack manipulation
            opcode::POP => with_frame(ctx, stack_ops::pop)?,
            opcode::POP2 => with_frame(ctx, stack_ops::pop2)?,
            opcode::DUP => with_frame(ctx, stack_ops::dup)?,
            opcode::DUP_X1 => with_frame(ctx, stack_ops::dup_x1)?,
            opcode::DUP_X2 => with_frame(ctx, stack_ops::dup_x2)?,
            opcode::DUP2 => with_frame(ctx, stack_ops::dup2)?,
            opcode::DUP2_X1 => with_frame(ctx, stack_ops::dup2_x1)?,
            opcode::DUP2_X2 => with_frame(ctx, stack_ops::dup2_x2)?,
            opcode::SWAP => with_frame(ctx, stack_ops::swap)?,

            // --- arithmetic
            opcode::IADD => with_frame(ctx, arithmetic::iadd)?,
            opcode::ISUB => with_frame(ctx, arithmetic::isub)?,
            opcode::IMUL => with_frame(ctx, arithmetic::imul)?,
            opcode::INEG => with_frame(ctx, arithmetic::ineg)?,
            opcode::LADD => with_frame(ctx, arithmetic::ladd)?,
            opcode::LSUB => with_frame(ctx, arithmetic::lsub)?,
            opcode::LMUL => with_frame(ctx, arithmetic::lmul)?,
            opcode::LNEG => with_frame(ctx, arithmetic::lneg)?,
            opcode::FADD => with_frame(ctx, arithmetic::fadd)?,
            opcode::FSUB => with_frame(ctx, arithmetic::fsub)?,
            opcode::FMUL => with_frame(ctx, arithmetic::fmul)?,
            opcode::FDIV => with_frame(ctx, arithmetic::fdiv)?,
            opcode::FREM => with_frame(ctx, arithmetic::frem)?,
            opcode::FNEG => with_frame(ctx, arithmetic::fneg)?,
            opcode::DADD => with_frame(ctx, arithmetic::dadd)?,
            opcode::DSUB => with_frame(ctx, arithmetic::dsub)?,
            opcode::DMUL => with_frame(ctx, arithmetic::dmul)?,
            opcode::DDIV => with_frame(ctx, arithmetic::ddiv)?,
            opcode::DREM => with_frame(ctx, arithmetic::drem)?,
            opcode::DNEG => with_frame(ctx, arithmetic::dneg)?,
            opcode::IDIV => dispatch_checked_arith(ctx, host, arithmetic::idiv)?,
            opcode::IREM => dispatch_checked_arith(ctx, host, arithmetic::irem)?,
            opcode::LDIV => dispatch_checked_arith(ctx, host, arithmetic::ldiv)?,
            opcode::LREM => dispatch_checked_arith(ctx, host, arithmetic::lrem)?,

            // --- shifts / bitwise
            opcode::ISHL => with_frame(ctx, shift_bitwise::ishl)?,
            opcode::ISHR => with_frame(ctx, shift_bitwise::ishr)?,
            opcode::IUSHR => with_frame(ctx, shift_bitwise::iushr)?,
            opcode::LSHL => with_frame(ctx, shift_bitwise::lshl)?,
            opcode::LSHR => with_frame(ctx, shift_bitwise::lshr)?,
            opcode::LUSHR => with_frame(ctx, shift_bitwise::lushr)?,
            opcode::IAND => with_frame(ctx, shift_bitwise::iand)?,
            opcode::IOR => with_frame(ctx, shift_bitwise::ior)?,
            opcode::IXOR => with_frame(ctx, shift_bitwise::ixor)?,
            opcode::LAND => with_frame(ctx, shift_bitwise::land)?,
            opcode::LOR => with_frame(ctx, shift_bitwise::lor)?,
            opcode::LXOR => with_frame(ctx, shift_bitwise::lxor)?,

            // --- increment
            opcode::IINC => with_frame(ctx, |f| {
                let index = f.read_u8() as u16;
                let increment = f.read_i8();
                locals::iinc(f, index, increment as i32);
            })?,

            // --- conversions
            opcode::I2L => with_frame(ctx, convert::i2l)?,
            opcode::I2F => with_frame(ctx, convert::i2f)?,
            opcode::I2D => with_frame(ctx, convert::i2d)?,
            opcode::L2I => with_frame(ctx, convert::l2i)?,
            opcode::L2F => with_frame(ctx, convert::l2f)?,
            opcode::L2D => with_frame(ctx, convert::l2d)?,
            opcode::F2I => with_frame(ctx, convert::f2i)?,
            opcode::F2L => with_frame(ctx, convert::f2l)?,
            opcode::F2D => with_frame(ctx, convert::f2d)?,
            opcode::D2I => with_frame(ctx, convert::d2i)?,
            opcode::D2L => with_frame(ctx, convert::d2l)?,
            opcode::D2F => with_frame(ctx, convert::d2f)?,
            opcode::I2B => with_frame(ctx, convert::i2b)?,
            opcode::I2C => with_frame(ctx, convert::i2c)?,
            opcode::I2S => with_frame(ctx, convert::i2s)?,

            // --- compares
            opcode::LCMP => with_frame(ctx, compare::lcmp)?,
            opcode::FCMPL => with_frame(ctx, compare::fcmpl)?,
            opcode::FCMPG => with_frame(ctx, compare::fcmpg)?,
            opcode::DCMPL => with_frame(ctx, compare::dcmpl)?,
            opcode::DCMPG => with_frame(ctx, compare::dcmpg)?,

            // --- conditional branches
            opcode::IFEQ => with_branch(ctx, opcode_address, branch::ifeq)?,
            opcode::IFNE => with_branch(ctx, opcode_address, branch::ifne)?,
            opcode::IFLT => with_branch(ctx, opcode_address, branch::iflt)?,
            opcode::IFGE => with_branch(ctx, opcode_address, branch::ifge)?,
            opcode::IFGT => with_branch(ctx, opcode_address, branch::ifgt)?,
            opcode::IFLE => with_branch(ctx, opcode_address, branch::ifle)?,
            opcode::IF_ICMPEQ => with_branch(ctx, opcode_address, branch::if_icmpeq)?,
            opcode::IF_ICMPNE => with_branch(ctx, opcode_address, branch::if_icmpne)?,
            opcode::IF_ICMPLT => with_branch(ctx, opcode_address, branch::if_icmplt)?,
            opcode::IF_ICMPGE => with_branch(ctx, opcode_address, branch::if_icmpge)?,
            opcode::IF_ICMPGT => with_branch(ctx, opcode_address, branch::if_icmpgt)?,
            opcode::IF_ICMPLE => with_branch(ctx, opcode_address, branch::if_icmple)?,
            opcode::IF_ACMPEQ => with_branch(ctx, opcode_address, branch::if_acmpeq)?,
            opcode::IF_ACMPNE => with_branch(ctx, opcode_address, branch::if_acmpne)?,
            opcode::IFNULL => with_branch(ctx, opcode_address, branch::ifnull)?,
            opcode::IFNONNULL => with_branch(ctx, opcode_address, branch::ifnonnull)?,

            // --- unconditional branches
            opcode::GOTO => with_frame(ctx, |f| {
                let offset = f.read_i16() as i32;
                branch::goto(f, opcode_address, offset);
            })?,
            opcode::GOTO_W => with_frame(ctx, |f| {
                let offset = f.read_i32();
                branch::goto(f, opcode_address, offset);
            })?,
            opcode::JSR => with_frame(ctx, |f| {
                let offset = f.read_i16() as i32;
                let return_address = f.ip();
                branch::jsr(f, opcode_address, offset, return_address);
            })?,
            opcode::JSR_W => with_frame(ctx, |f| {
                let offset = f.read_i32();
                let return_address = f.ip();
                branch::jsr(f, opcode_address, offset, return_address);
            })?,
            opcode::RET => with_frame(ctx, |f| {
                let index = f.read_u8() as u16;
                branch::ret(f, index);
            })?,

            // --- switches
            opcode::TABLESWITCH => with_frame(ctx, |f| switch_ops::tableswitch(f, opcode_address))?,
            opcode::LOOKUPSWITCH => with_frame(ctx, |f| switch_ops::lookupswitch(f, opcode_address))?,

            // --- wide prefix
            opcode::WIDE => {
                let frame = ctx.current_frame_mut().ok_or(ExecError::NoCurrentFrame)?;
                wide::wide(frame, host);
            }

            // Everything else (object/array allocation, field access, invoke*, athrow, monitor
            // ops, checkcast/instanceof, ldc*, and the return family) belongs to the host.
            other => {
                let result = host.execute_op(ctx, other);
                if result != 0 {
                    return Ok(result);
                }
            }
        }
    }
}

fn with_frame<F: FnOnce(&mut Frame)>(ctx: &mut Context, f: F) -> Result<(), ExecError> {
    let frame = ctx.current_frame_mut().ok_or(ExecError::NoCurrentFrame)?;
    f(frame);
    Ok(())
}

fn with_indexed_local(
    ctx: &mut Context,
    f: fn(&mut Frame, u16),
) -> Result<(), ExecError> {
    with_frame(ctx, |frame| {
        let index = frame.read_u8() as u16;
        f(frame, index);
    })
}

fn with_branch(
    ctx: &mut Context,
    opcode_address: usize,
    f: fn(&mut Frame, usize, i32),
) -> Result<(), ExecError> {
    with_frame(ctx, |frame| {
        let offset = frame.read_i16() as i32;
        f(frame, opcode_address, offset);
    })
}

fn dispatch_checked_arith(
    ctx: &mut Context,
    host: &mut dyn Host,
    f: fn(&mut Frame) -> Result<(), ArithError>,
) -> Result<(), ExecError> {
    let frame = ctx.current_frame_mut().ok_or(ExecError::NoCurrentFrame)?;
    if let Err(ArithError::DivideByZero) = f(frame) {
        debug!("integer division/remainder by zero, requesting host exception");
        host.throw("java/lang/ArithmeticException", "/ by zero");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::word::Word;

    /// Stops the loop the first time it sees any opcode in `stop_on`, recording nothing else.
    struct StoppingHost {
        stop_on: Vec<u8>,
    }

    impl Host for StoppingHost {
        fn execute_op(&mut self, _ctx: &mut Context, opcode: u8) -> i32 {
            if self.stop_on.contains(&opcode) {
                1
            } else {
                0
            }
        }

        fn throw(&mut self, _class_name: &str, _message: &str) {}
    }

    #[test]
    fn goto_w_jumps_on_a_32_bit_offset() {
        // goto_w +8 skips a "wrong" bipush/return pair (indices 5-7), landing on the "right" one
        // (index 8): opcode (1) + 4-byte offset + wrong bipush (2) + wrong return (1) = 8.
        let mut code = vec![opcode::GOTO_W];
        code.extend_from_slice(&8i32.to_be_bytes());
        code.push(opcode::BIPUSH);
        code.push(0xFF); // -1, the "wrong branch was taken" marker
        code.push(opcode::RETURN);
        code.push(opcode::BIPUSH);
        code.push(0x2A); // 42, the "correct branch was taken" marker
        code.push(opcode::RETURN);

        let mut ctx = Context::new();
        ctx.push_frame(Frame::new(&code, 0));
        let mut host = StoppingHost { stop_on: vec![opcode::RETURN] };

        execute(&mut ctx, &mut host).unwrap();
        assert_eq!(ctx.current_frame_mut().unwrap().pop_raw(), Word::Int(42));
    }

    #[test]
    fn jsr_w_pushes_return_address_then_jumps_on_a_32_bit_offset() {
        // jsr_w +5 jumps straight onto the `return` right after its own operand; the pushed
        // return address should be the address of that `return` (5: opcode byte + 4 offset bytes).
        let mut code = vec![opcode::JSR_W];
        code.extend_from_slice(&5i32.to_be_bytes());
        code.push(opcode::RETURN);

        let mut ctx = Context::new();
        ctx.push_frame(Frame::new(&code, 0));
        let mut host = StoppingHost { stop_on: vec![opcode::RETURN] };

        execute(&mut ctx, &mut host).unwrap();
        assert_eq!(ctx.current_frame_mut().unwrap().pop_raw(), Word::Int(5));
    }
}

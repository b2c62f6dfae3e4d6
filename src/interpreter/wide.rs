//! The `wide` prefix: widens the following opcode's index operand from `u8` to `u16` (and, for
//! `iinc`, its increment from `i8` to `i16` as well).
use crate::interpreter::branch;
use crate::interpreter::context::Host;
use crate::interpreter::frame::Frame;
use crate::interpreter::locals;
use crate::interpreter::opcode;

/// Reads and executes the widened form of the opcode that follows `wide`. Any opcode `wide` does
/// not know how to widen is a host-level `RuntimeException` request; the interpreter does not
/// unwind on its own.
pub fn wide(frame: &mut Frame, host: &mut dyn Host) {
    let sub_opcode = frame.read_u8();
    match sub_opcode {
        opcode::ILOAD => {
            let index = frame.read_u16();
            locals::iload(frame, index);
        }
        opcode::LLOAD => {
            let index = frame.read_u16();
            locals::lload(frame, index);
        }
        opcode::FLOAD => {
            let index = frame.read_u16();
            locals::fload(frame, index);
        }
        opcode::DLOAD => {
            let index = frame.read_u16();
            locals::dload(frame, index);
        }
        opcode::ALOAD => {
            let index = frame.read_u16();
            locals::aload(frame, index);
        }
        opcode::ISTORE => {
            let index = frame.read_u16();
            locals::istore(frame, index);
        }
        opcode::LSTORE => {
            let index = frame.read_u16();
            locals::lstore(frame, index);
        }
        opcode::FSTORE => {
            let index = frame.read_u16();
            locals::fstore(frame, index);
        }
        opcode::DSTORE => {
            let index = frame.read_u16();
            locals::dstore(frame, index);
        }
        opcode::ASTORE => {
            let index = frame.read_u16();
            locals::astore(frame, index);
        }
        opcode::RET => {
            let index = frame.read_u16();
            branch::ret(frame, index);
        }
        opcode::IINC => {
            let index = frame.read_u16();
            let increment = frame.read_i16();
            locals::iinc(frame, index, increment as i32);
        }
        other => {
            warn!("unsupported wide opcode {:#04x}, requesting a host exception", other);
            host.throw("java/lang/RuntimeException", "unsupported wide instruction");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::word::Word;

    struct RecordingHost {
        thrown: Option<(String, String)>,
    }

    impl Host for RecordingHost {
        fn execute_op(&mut self, _ctx: &mut crate::interpreter::Context, _opcode: u8) -> i32 {
            0
        }

        fn throw(&mut self, class_name: &str, message: &str) {
            self.thrown = Some((class_name.to_string(), message.to_string()));
        }
    }

    #[test]
    fn wide_iload_reads_a_u16_index() {
        let code = [opcode::ILOAD, 0x01, 0x00]; // index 0x0100 = 256
        let mut frame = Frame::new(&code, 257);
        frame.set_local(256, Word::Int(77));
        frame.set_ip(1); // as if `wide` itself was already consumed
        let mut host = RecordingHost { thrown: None };
        wide(&mut frame, &mut host);
        assert_eq!(frame.pop_raw(), Word::Int(77));
        assert!(host.thrown.is_none());
    }

    #[test]
    fn wide_iinc_reads_u16_index_and_i16_increment() {
        let mut code = vec![opcode::IINC];
        code.extend_from_slice(&0u16.to_be_bytes());
        code.extend_from_slice(&(-5i16).to_be_bytes());
        let mut frame = Frame::new(&code, 1);
        frame.set_local(0, Word::Int(10));
        frame.set_ip(1);
        let mut host = RecordingHost { thrown: None };
        wide(&mut frame, &mut host);
        assert_eq!(frame.get_local(0), Word::Int(5));
    }

    #[test]
    fn wide_unsupported_opcode_requests_a_throw() {
        let code = [0xff];
        let mut frame = Frame::new(&code, 0);
        frame.set_ip(1);
        let mut host = RecordingHost { thrown: None };
        wide(&mut frame, &mut host);
        assert_eq!(
            host.thrown,
            Some((
                "java/lang/RuntimeException".to_string(),
                "unsupported wide instruction".to_string()
            ))
        );
    }
}

//! Stack manipulation: `pop`, `pop2`, `dup*`, `swap`. These operate on raw cells without any type
//! awareness and do not honor the Long/Double pair discipline — that discipline belongs to the
//! loads/stores/arithmetic categories, not here, exactly as the JVM specification describes it.
use crate::interpreter::Frame;

pub fn pop(frame: &mut Frame) {
    frame.pop_raw();
}

pub fn pop2(frame: &mut Frame) {
    frame.pop_raw();
    frame.pop_raw();
}

pub fn dup(frame: &mut Frame) {
    let top = frame.peek_raw(0);
    frame.push_raw(top);
}

pub fn dup_x1(frame: &mut Frame) {
    let v1 = frame.pop_raw();
    let v2 = frame.pop_raw();
    frame.push_raw(v1);
    frame.push_raw(v2);
    frame.push_raw(v1);
}

pub fn dup_x2(frame: &mut Frame) {
    let v1 = frame.pop_raw();
    let v2 = frame.pop_raw();
    let v3 = frame.pop_raw();
    frame.push_raw(v1);
    frame.push_raw(v3);
    frame.push_raw(v2);
    frame.push_raw(v1);
}

pub fn dup2(frame: &mut Frame) {
    let v1 = frame.pop_raw();
    let v2 = frame.pop_raw();
    frame.push_raw(v2);
    frame.push_raw(v1);
    frame.push_raw(v2);
    frame.push_raw(v1);
}

pub fn dup2_x1(frame: &mut Frame) {
    let v1 = frame.pop_raw();
    let v2 = frame.pop_raw();
    let v3 = frame.pop_raw();
    frame.push_raw(v2);
    frame.push_raw(v1);
    frame.push_raw(v3);
    frame.push_raw(v2);
    frame.push_raw(v1);
}

pub fn dup2_x2(frame: &mut Frame) {
    let v1 = frame.pop_raw();
    let v2 = frame.pop_raw();
    let v3 = frame.pop_raw();
    let v4 = frame.pop_raw();
    frame.push_raw(v2);
    frame.push_raw(v1);
    frame.push_raw(v4);
    frame.push_raw(v3);
    frame.push_raw(v2);
    frame.push_raw(v1);
}

pub fn swap(frame: &mut Frame) {
    let v1 = frame.pop_raw();
    let v2 = frame.pop_raw();
    frame.push_raw(v1);
    frame.push_raw(v2);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{frame_for_test, Word};

    fn pushed(words: &[Word]) -> Frame {
        let mut frame = frame_for_test(0);
        for w in words {
            frame.push_raw(*w);
        }
        frame
    }

    fn drain(frame: &mut Frame) -> Vec<Word> {
        let mut out = Vec::new();
        while frame.stack_length() > 0 {
            out.push(frame.pop_raw());
        }
        out.reverse();
        out
    }

    #[test]
    fn dup_duplicates_top() {
        let mut frame = pushed(&[Word::Int(1), Word::Int(2)]);
        dup(&mut frame);
        assert_eq!(drain(&mut frame), vec![Word::Int(1), Word::Int(2), Word::Int(2)]);
    }

    #[test]
    fn dup_x1_inserts_below_second() {
        let mut frame = pushed(&[Word::Int(1), Word::Int(2)]);
        dup_x1(&mut frame);
        assert_eq!(
            drain(&mut frame),
            vec![Word::Int(2), Word::Int(1), Word::Int(2)]
        );
    }

    #[test]
    fn dup_x2_inserts_below_third() {
        // ..., 1, 2, 3 -> ..., 3, 1, 2, 3
        let mut frame = pushed(&[Word::Int(1), Word::Int(2), Word::Int(3)]);
        dup_x2(&mut frame);
        assert_eq!(
            drain(&mut frame),
            vec![Word::Int(3), Word::Int(1), Word::Int(2), Word::Int(3)]
        );
    }

    #[test]
    fn dup2_duplicates_top_pair_of_raw_cells() {
        // ..., 1, 2 -> ..., 1, 2, 1, 2
        let mut frame = pushed(&[Word::Int(1), Word::Int(2)]);
        dup2(&mut frame);
        assert_eq!(
            drain(&mut frame),
            vec![Word::Int(1), Word::Int(2), Word::Int(1), Word::Int(2)]
        );
    }

    #[test]
    fn dup2_x1_inserts_pair_below_third() {
        // ..., 1, 2, 3 -> ..., 2, 3, 1, 2, 3
        let mut frame = pushed(&[Word::Int(1), Word::Int(2), Word::Int(3)]);
        dup2_x1(&mut frame);
        assert_eq!(
            drain(&mut frame),
            vec![Word::Int(2), Word::Int(3), Word::Int(1), Word::Int(2), Word::Int(3)]
        );
    }

    #[test]
    fn dup2_x2_inserts_pair_below_fourth() {
        // ..., 1, 2, 3, 4 -> ..., 3, 4, 1, 2, 3, 4
        let mut frame = pushed(&[Word::Int(1), Word::Int(2), Word::Int(3), Word::Int(4)]);
        dup2_x2(&mut frame);
        assert_eq!(
            drain(&mut frame),
            vec![
                Word::Int(3),
                Word::Int(4),
                Word::Int(1),
                Word::Int(2),
                Word::Int(3),
                Word::Int(4),
            ]
        );
    }

    #[test]
    fn swap_exchanges_top_two() {
        let mut frame = pushed(&[Word::Int(1), Word::Int(2)]);
        swap(&mut frame);
        assert_eq!(drain(&mut frame), vec![Word::Int(2), Word::Int(1)]);
    }
}

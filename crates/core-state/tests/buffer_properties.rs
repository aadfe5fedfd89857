use core_state::TextBuffer;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Delete(usize),
    Insert(usize),
    Replace(usize, String),
    Rotate(usize, usize, isize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::Delete),
        (0usize..8).prop_map(Op::Insert),
        (0usize..8, "[a-z]{0,4}").prop_map(|(n, s)| Op::Replace(n, s)),
        (0usize..8, 0usize..8, -9isize..9).prop_map(|(s, r, d)| Op::Rotate(s, r, d)),
    ]
}

fn apply(buf: &mut TextBuffer, op: &Op) {
    match op {
        Op::Delete(n) => {
            buf.delete_line(*n);
        }
        Op::Insert(n) => {
            buf.insert_empty_line(*n);
        }
        Op::Replace(n, s) => {
            buf.replace_line(*n, s);
        }
        Op::Rotate(s, r, d) => {
            buf.rotate_lines(*s, *r, *d);
        }
    }
}

fn snapshot(buf: &TextBuffer) -> Vec<String> {
    buf.lines().iter().map(|l| l.to_string()).collect()
}

proptest! {
    #[test]
    fn undo_all_restores_load_and_redo_all_restores_edits(
        initial in proptest::collection::vec("[a-z]{0,3}", 0..6),
        ops in proptest::collection::vec(op(), 0..12),
    ) {
        let mut buf = TextBuffer::from_lines("p.txt", &initial);
        for op in &ops {
            apply(&mut buf, op);
        }
        let edited = snapshot(&buf);
        while buf.undo_step(-1) {}
        prop_assert_eq!(snapshot(&buf), initial);
        while buf.undo_step(1) {}
        prop_assert_eq!(snapshot(&buf), edited);
    }

    #[test]
    fn rotation_round_trips(
        lines in proptest::collection::vec("[a-z]{1,3}", 1..8),
        start in 0usize..8,
        range in 0usize..8,
        distance in -20isize..20,
    ) {
        let mut buf = TextBuffer::from_lines("p.txt", &lines);
        buf.rotate_lines(start, range, distance);
        buf.rotate_lines(start, range, -distance);
        prop_assert_eq!(snapshot(&buf), lines);
    }

    #[test]
    fn single_steps_cycle_back_to_the_start(
        lines in proptest::collection::vec("[a-z]{1,3}", 1..8),
        start in 0usize..8,
        range in 1usize..8,
    ) {
        prop_assume!(start + range <= lines.len());
        let mut buf = TextBuffer::from_lines("p.txt", &lines);
        for _ in 0..range {
            buf.rotate_lines(start, range, 1);
        }
        prop_assert_eq!(snapshot(&buf), lines);
    }

    #[test]
    fn delete_insert_replace_restores_lines(
        lines in proptest::collection::vec("[a-z]{0,3}", 1..8),
        n in 0usize..8,
    ) {
        prop_assume!(n < lines.len());
        let mut buf = TextBuffer::from_lines("p.txt", &lines);
        prop_assert!(buf.delete_line(n));
        prop_assert!(buf.insert_empty_line(n));
        buf.replace_line(n, &lines[n]);
        prop_assert_eq!(snapshot(&buf), lines.clone());
        prop_assert_eq!(buf.files().map(|(_, c)| c).sum::<usize>(), lines.len());
    }

    #[test]
    fn file_counts_track_line_count(ops in proptest::collection::vec(op(), 0..16)) {
        let mut buf = TextBuffer::from_lines("p.txt", ["a", "b", "c"]);
        for op in &ops {
            apply(&mut buf, op);
            let total: usize = buf.files().map(|(_, n)| n).sum();
            prop_assert_eq!(total, buf.line_count());
        }
    }
}

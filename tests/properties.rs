use boolfuck::{run, Config, Instruction, Interpreter, Program};
use proptest::prelude::*;

/// Builds a balanced program out of arbitrary bytes: opening brackets are
/// closed as we go or at the end.
fn balanced(choices: &[u8]) -> String {
    let mut source = String::new();
    let mut depth = 0usize;
    for choice in choices {
        match choice % 8 {
            0 => source.push('+'),
            1 => source.push('<'),
            2 => source.push('>'),
            3 => source.push(','),
            4 => source.push(';'),
            5 => {
                source.push('[');
                depth += 1;
            }
            6 if depth > 0 => {
                source.push(']');
                depth -= 1;
            }
            _ => source.push_str(" comment "),
        }
    }
    source.push_str(&"]".repeat(depth));
    source
}

proptest! {
    #[test]
    fn jump_table_pairs_round_trip(choices in prop::collection::vec(any::<u8>(), 0..200)) {
        let program: Program = balanced(&choices).parse().unwrap();
        for (i, instruction) in program.instructions().iter().enumerate() {
            match program.matching(i) {
                Some(j) => {
                    prop_assert!(instruction.is_jump());
                    prop_assert_eq!(program.matching(j), Some(i));
                    if *instruction == Instruction::JumpIfZero {
                        prop_assert!(j > i);
                    } else {
                        prop_assert!(j < i);
                    }
                }
                None => prop_assert!(!instruction.is_jump()),
            }
        }
    }

    #[test]
    fn parsing_is_deterministic(choices in prop::collection::vec(any::<u8>(), 0..200)) {
        let source = balanced(&choices);
        let first: Program = source.parse().unwrap();
        let second: Program = source.parse().unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.to_string().parse::<Program>().unwrap(), second);
    }

    #[test]
    fn extra_close_bracket_fails(choices in prop::collection::vec(any::<u8>(), 0..100), at in any::<prop::sample::Index>()) {
        let mut source = balanced(&choices);
        let mut cut = at.index(source.len() + 1);
        while !source.is_char_boundary(cut) {
            cut -= 1;
        }
        source.insert(cut, ']');
        prop_assert!(source.parse::<Program>().is_err());
    }

    #[test]
    fn missing_close_bracket_fails(choices in prop::collection::vec(any::<u8>(), 1..100), at in any::<prop::sample::Index>()) {
        let source = balanced(&choices);
        let closes: Vec<_> = source.match_indices(']').map(|(i, _)| i).collect();
        prop_assume!(!closes.is_empty());
        let mut source = source;
        source.remove(*at.get(&closes));
        prop_assert!(source.parse::<Program>().is_err());
    }

    #[test]
    fn toggle_parity(count in 0usize..64) {
        let program: Program = "+".repeat(count).parse().unwrap();
        let mut interp = Interpreter::new(&program, std::io::empty(), std::io::sink(), &Config::default());
        interp.run().unwrap();
        prop_assert_eq!(interp.tape().read_current(), count % 2 == 1);
    }

    #[test]
    fn eight_bit_echo(byte in any::<u8>()) {
        let outcome = run(&",;".repeat(8), &[byte]);
        prop_assert_eq!(outcome.output, vec![byte]);
    }

    #[test]
    fn echo_preserves_streams(input in prop::collection::vec(any::<u8>(), 0..16)) {
        let source = ",;".repeat(8 * input.len());
        let outcome = run(&source, &input);
        prop_assert_eq!(outcome.output, input);
    }
}

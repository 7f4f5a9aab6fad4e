//! Hard-coded example automata, transcribed from the original corpus's
//! `examples.cpp`. These are data: fixtures for manual experimentation,
//! demos, and tests, not part of the engine itself.

use crate::automaton::Automaton;

fn ab() -> Vec<String> {
    vec!["A".to_string(), "B".to_string()]
}

/// Namespace for the bundled example/property automata.
pub struct Fixtures;

impl Fixtures {
    /// An `size`-state cycle over {"A", "B"}: `A` advances, `B` retreats.
    ///
    /// Transcribed faithfully from the original, including its one quirk:
    /// state 0's `B` transition is `⊥` rather than `size - 1`, an artifact
    /// of the original's `(i - 1) % size` computed in C's
    /// truncating-toward-zero modulo (`-1 % size == -1`, which collides
    /// with the dummy sentinel).
    pub fn ex_cycle(size: usize) -> Automaton {
        let mut rows = Vec::with_capacity(size);
        for i in 0..size {
            let forward = (i + 1) % size;
            let backward = if i == 0 { None } else { Some(i - 1) };
            rows.push(vec![Some(forward), backward]);
        }
        Automaton::new(size, ab(), 0, [], rows).expect("ex_cycle is well-formed")
    }

    /// A 6-state automaton with a non-cyclic, partially-sinking shape.
    pub fn ex_cdm() -> Automaton {
        Automaton::from_flat(6, ab(), 0, [], &[1, 1, 2, 3, 4, 5, 5, 4, 5, 5, -1, -1])
            .expect("ex_cdm is well-formed")
    }

    /// The 3-state linear pattern `{0:[1,1], 1:[2,2], 2:[⊥,⊥]}`.
    pub fn ex_linear() -> Automaton {
        Automaton::from_flat(3, ab(), 0, [], &[1, 1, 2, 2, -1, -1])
            .expect("ex_linear is well-formed")
    }

    /// A 3-state automaton that oscillates between states 1 and 2 once past
    /// state 0.
    pub fn ex_twoway() -> Automaton {
        Automaton::from_flat(3, ab(), 0, [], &[1, -1, 2, 0, -1, 1])
            .expect("ex_twoway is well-formed")
    }

    /// The 3-state sink pattern `{0:[1,2], 1:[2,2], 2:[⊥,⊥]}`.
    pub fn ex_sink() -> Automaton {
        Automaton::from_flat(3, ab(), 0, [], &[1, 2, 2, 2, -1, -1]).expect("ex_sink is well-formed")
    }

    /// A 3-state automaton whose last state self-loops on both symbols.
    pub fn ex_fancy() -> Automaton {
        Automaton::from_flat(3, ab(), 0, [], &[1, 2, 2, 2, 0, 0]).expect("ex_fancy is well-formed")
    }

    /// The property fixture used throughout the test suite: 6 states in a
    /// line on a single symbol "A", with state 5 unreachable-onward (⊥).
    pub fn prop_five() -> Automaton {
        Automaton::from_flat(6, vec!["A".to_string()], 0, [], &[1, 2, 3, 4, 5, -1])
            .expect("prop_five is well-formed")
    }
}

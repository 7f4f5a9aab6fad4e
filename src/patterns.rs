//! Catalog of the six hard-coded human-error failure patterns.
//!
//! Each pattern is a (before, after) pair of 3-state, 2-symbol DFAs over
//! the alphabet `{"A", "B"}`. These are data, transcribed from
//! `pattern_lib.cpp` in the original corpus; no logic lives here beyond
//! the constructors that assemble the literal transition tables.

use crate::automaton::Automaton;

/// A named (before, after) rewrite rule.
#[derive(Debug, Clone)]
pub struct PatternMap {
    pub name: &'static str,
    pub before: Automaton,
    pub after: Automaton,
}

fn symbols() -> Vec<String> {
    vec!["A".to_string(), "B".to_string()]
}

fn three_state(transitions: [[i64; 2]; 3]) -> Automaton {
    let flat: Vec<i64> = transitions.iter().flatten().copied().collect();
    Automaton::from_flat(3, symbols(), 0, [], &flat)
        .expect("pattern library constants are well-formed")
}

/// `{0:[1,⊥], 1:[⊥,2], 2:[⊥,⊥]}` — the shared "before" shape for every
/// pattern except `intrusion` (which under-constrains further) and
/// `premature-start` (which reuses it directly).
fn generic_pre() -> Automaton {
    three_state([[1, -1], [-1, 2], [-1, -1]])
}

fn premature_start_after() -> Automaton {
    three_state([[1, 1], [-1, 2], [-1, -1]])
}

fn delay_start_after() -> Automaton {
    three_state([[1, -1], [2, 2], [-1, -1]])
}

fn omission_after() -> Automaton {
    three_state([[2, 2], [-1, 2], [-1, -1]])
}

fn reversal_after() -> Automaton {
    three_state([[1, 1], [2, 2], [-1, -1]])
}

fn intrusion_before() -> Automaton {
    three_state([[1, -1], [-1, -1], [-1, -1]])
}

fn intrusion_after() -> Automaton {
    three_state([[1, 1], [2, -1], [-1, -1]])
}

fn repetition_after() -> Automaton {
    three_state([[0, 1], [0, 2], [-1, -1]])
}

/// Catalog of the library's pattern registry.
pub struct PatternLibrary;

impl PatternLibrary {
    /// Builds the six-entry mapping list, in the order the original
    /// corpus's `patternlib_init` registered them.
    pub fn init() -> Vec<PatternMap> {
        vec![
            PatternMap {
                name: "premature-start",
                before: generic_pre(),
                after: premature_start_after(),
            },
            PatternMap {
                name: "delay-start",
                before: generic_pre(),
                after: delay_start_after(),
            },
            PatternMap {
                name: "omission",
                before: generic_pre(),
                after: omission_after(),
            },
            PatternMap {
                name: "reversal",
                before: generic_pre(),
                after: reversal_after(),
            },
            PatternMap {
                name: "intrusion",
                before: intrusion_before(),
                after: intrusion_after(),
            },
            PatternMap {
                name: "repetition",
                before: generic_pre(),
                after: repetition_after(),
            },
        ]
    }
}

//! Labeled subgraph pattern matching: locating an injective embedding of a
//! small pattern automaton inside a larger host automaton.

use crate::automaton::{Automaton, StateId};
use crate::enumerator::Enumerator;
use crate::error::{EngineError, Result};

/// An injective mapping of a pattern's states and symbols into a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedding {
    /// `state_map[i]` is the host state matched to pattern state `i`.
    pub state_map: Vec<StateId>,
    /// `symbol_map[j]` is the host symbol index matched to pattern symbol `j`.
    pub symbol_map: Vec<usize>,
}

/// Finds the `skip`-th (zero-indexed) embedding of `pattern` into `host`,
/// in the deterministic lexicographic order of the design: state-map
/// permutations outermost, symbol-map permutations innermost.
pub fn find_embedding(host: &Automaton, pattern: &Automaton, skip: usize) -> Result<Embedding> {
    let pattern_states = pattern.state_count();
    let host_states = host.state_count();
    let pattern_alpha = pattern.alphabet_len();
    let host_alpha = host.alphabet_len();

    if pattern_states > host_states || pattern_alpha > host_alpha {
        return Err(EngineError::PatternNotFound);
    }

    let mut remaining = skip;
    let mut state_enum = Enumerator::new(pattern_states, host_states.saturating_sub(1));

    while let Some(state_map) = state_enum.next() {
        let state_map = state_map.to_vec();
        let reduced = reduce_by_state_map(host, pattern, &state_map);

        let mut symbol_enum = Enumerator::new(pattern_alpha, host_alpha.saturating_sub(1));
        while let Some(symbol_map) = symbol_enum.next() {
            if matches_reduced(&reduced, pattern, &symbol_map, pattern_states, pattern_alpha) {
                if remaining == 0 {
                    return Ok(Embedding {
                        state_map,
                        symbol_map: symbol_map.to_vec(),
                    });
                }
                remaining -= 1;
            }
        }
    }

    Err(EngineError::PatternNotFound)
}

/// Precomputes, for each host symbol index, the host transition from each
/// candidate-mapped state expressed in pattern-state indices (or `None`
/// when it lands outside the mapped state set). This turns the symbol-map
/// inner loop into a cheap cell-by-cell compare, per the optimization note
/// in the design (§4.C) — required only to preserve the naive enumeration
/// order, which it does.
fn reduce_by_state_map(
    host: &Automaton,
    pattern: &Automaton,
    state_map: &[StateId],
) -> Vec<Vec<Option<usize>>> {
    let pattern_states = pattern.state_count();
    let mut table = vec![vec![None; pattern_states]; host.alphabet_len()];
    for host_symbol in 0..host.alphabet_len() {
        for (pattern_state, &host_state) in state_map.iter().enumerate() {
            let dest = host.step_by_index(host_state, host_symbol);
            table[host_symbol][pattern_state] = dest.and_then(|d| {
                state_map.iter().position(|&mapped| mapped == d)
            });
        }
    }
    table
}

fn matches_reduced(
    reduced: &[Vec<Option<usize>>],
    pattern: &Automaton,
    symbol_map: &[usize],
    pattern_states: usize,
    pattern_alpha: usize,
) -> bool {
    for pattern_symbol in 0..pattern_alpha {
        let host_symbol = symbol_map[pattern_symbol];
        for pattern_state in 0..pattern_states {
            let host_dest = reduced[host_symbol][pattern_state];
            let pattern_dest = pattern.step_by_index(pattern_state, pattern_symbol);
            match pattern_dest {
                None => continue, // pattern ⊥ is a wildcard
                Some(p) => {
                    if host_dest != Some(p) {
                        return false;
                    }
                }
            }
        }
    }
    true
}

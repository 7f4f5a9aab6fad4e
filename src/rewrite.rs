//! Graph rewriting: applying an (before → after) pattern pair at a located
//! embedding to mutate a host automaton's transition table in place.

use crate::automaton::Automaton;
use crate::error::{EngineError, Result};
use crate::matcher::find_embedding;

/// Applies `before -> after` to `host` at the `skip`-th embedding of
/// `before`, returning a rewritten copy of `host`.
///
/// Only same-shape rewrites are supported: `before` and `after` must have
/// equal state counts and alphabet sizes.
pub fn apply(host: &Automaton, before: &Automaton, after: &Automaton, skip: usize) -> Result<Automaton> {
    if before.state_count() != after.state_count() || before.alphabet_len() != after.alphabet_len() {
        return Err(EngineError::NotYetImpl);
    }

    let embedding = find_embedding(host, before, skip)?;
    let mut rewritten = host.clone();

    for pattern_state in 0..before.state_count() {
        let host_state = embedding.state_map[pattern_state];
        for pattern_symbol in 0..before.alphabet_len() {
            let host_symbol = embedding.symbol_map[pattern_symbol];
            let after_target = after.step_by_index(pattern_state, pattern_symbol);
            let new_target = after_target.map(|t| embedding.state_map[t]);
            rewritten.set_transition(host_state, host_symbol, new_target);
        }
    }

    Ok(rewritten)
}

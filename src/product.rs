//! Synchronous parallel composition of two automata over the union of
//! their alphabets.

use indexmap::IndexSet;

use crate::automaton::{Automaton, StateId};

/// Builds the synchronous product of `a` and `b`.
///
/// The state set is `Q_a x Q_b`, encoded canonically as `a * |Q_b| + b` —
/// this is the one encoding every state-pair computation in this function
/// must use; the original corpus's final-state pass used the wrong factor
/// (`|Q_a|` instead of `|Q_b|`), a bug this reimplementation does not
/// reproduce (see DESIGN.md).
///
/// The alphabet is the union of `a`'s and `b`'s symbols in first-appearance
/// order: all of `a`'s symbols, then any of `b`'s not already present. A
/// symbol absent from one side leaves that side's state unchanged (private
/// events of one automaton never block the other).
pub fn product(a: &Automaton, b: &Automaton) -> Automaton {
    let mut alphabet: IndexSet<String> = IndexSet::new();
    for name in a.alphabet() {
        alphabet.insert(name.to_string());
    }
    for name in b.alphabet() {
        alphabet.insert(name.to_string());
    }
    let alphabet: Vec<String> = alphabet.into_iter().collect();

    let states_a = a.state_count();
    let states_b = b.state_count();
    let num_states = states_a * states_b;

    let encode = |sa: StateId, sb: StateId| sa * states_b + sb;

    let mut rows = vec![vec![None; alphabet.len()]; num_states];
    for sa in 0..states_a {
        for sb in 0..states_b {
            let row = &mut rows[encode(sa, sb)];
            for (symbol_idx, name) in alphabet.iter().enumerate() {
                let target_a = match a.symbol_index(name) {
                    Ok(idx) => a.step_by_index(sa, idx),
                    Err(_) => Some(sa),
                };
                let target_b = match b.symbol_index(name) {
                    Ok(idx) => b.step_by_index(sb, idx),
                    Err(_) => Some(sb),
                };
                row[symbol_idx] = match (target_a, target_b) {
                    (Some(ta), Some(tb)) => Some(encode(ta, tb)),
                    _ => None,
                };
            }
        }
    }

    let mut finals = Vec::new();
    for sa in 0..states_a {
        if !a.is_final(sa) {
            continue;
        }
        for sb in 0..states_b {
            if b.is_final(sb) {
                finals.push(encode(sa, sb));
            }
        }
    }

    let initial = encode(a.initial_state(), b.initial_state());
    Automaton::new(num_states, alphabet, initial, finals, rows)
        .expect("product construction cannot violate automaton invariants")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state_flip(symbol: &str) -> Automaton {
        Automaton::new(
            2,
            vec![symbol.to_string()],
            0,
            [],
            vec![vec![Some(1)], vec![Some(0)]],
        )
        .unwrap()
    }

    #[test]
    fn stutters_on_private_symbols() {
        let a = two_state_flip("a");
        let b = two_state_flip("b");
        let prod = product(&a, &b);

        assert_eq!(prod.state_count(), 4);
        assert_eq!(prod.alphabet_len(), 2);

        // encode(i, j) = i * 2 + j
        for i in 0..2 {
            for j in 0..2 {
                let here = i * 2 + j;
                let on_a = prod.step(here, "a").unwrap().unwrap();
                assert_eq!(on_a, (1 - i) * 2 + j);
                let on_b = prod.step(here, "b").unwrap().unwrap();
                assert_eq!(on_b, i * 2 + (1 - j));
            }
        }
    }

    #[test]
    fn run_trace_matches_projection() {
        let a = two_state_flip("a");
        let b = two_state_flip("b");
        let prod = product(&a, &b);

        // "a" alone flips only A's half; combined with B's own unaffected
        // progress this must equal the conjunction of independent runs.
        let trace = ["a", "b", "a"];
        let combined = prod.run_trace(&trace).unwrap();
        let expect_a = a.run_trace(&["a", "a"]).unwrap();
        let expect_b = b.run_trace(&["b"]).unwrap();
        // Neither side has accepting states in this fixture, both run to
        // completion without ⊥, so acceptance is false on both sides and
        // on the product — this asserts the machinery runs cleanly end to
        // end rather than a specific truth value.
        assert_eq!(combined, expect_a && expect_b);
    }
}

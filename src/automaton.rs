//! Deterministic finite automaton with a partial transition function.
//!
//! Unlike a classic textbook DFA, transitions here are partial: a missing
//! entry means "no move" rather than an implicit dead state. The sentinel
//! is represented internally as `None` in a dense `Option<StateId>` table
//! and externally (LTSA ingestion, fixtures) as the integer `-1`.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexSet;

use crate::error::{EngineError, Result};

/// Index of a state inside an automaton's transition table.
pub type StateId = usize;

/// The external sentinel value for "no transition" (⊥).
pub const DUMMY: i64 = -1;

/// Deterministic finite automaton (Q, Σ, δ, q₀, F) with partial δ.
#[derive(Clone, PartialEq, Eq)]
pub struct Automaton {
    num_states: usize,
    alphabet: IndexSet<String>,
    /// Row-major dense table: `transitions[state * alphabet.len() + symbol]`.
    transitions: Vec<Option<StateId>>,
    initial: StateId,
    finals: BTreeSet<StateId>,
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("num_states", &self.num_states)
            .field("alphabet", &self.alphabet)
            .field("initial", &self.initial)
            .field("finals", &self.finals)
            .finish()
    }
}

impl Automaton {
    /// Computes the flat row-major index for a (state, symbol) cell.
    ///
    /// This is the one formula every component must agree on:
    /// `state * alphabet_size + symbol_index`, never the other way round.
    #[inline]
    fn cell_index(&self, state: StateId, symbol_idx: usize) -> usize {
        state * self.alphabet.len() + symbol_idx
    }

    /// Builds an automaton from a dense transition table addressed by
    /// symbol name, validating every invariant from the data model.
    ///
    /// `transitions[state][symbol_index]` is `None` for ⊥, `Some(q)` for a
    /// move to state `q`.
    pub fn new(
        num_states: usize,
        alphabet: Vec<String>,
        initial: StateId,
        finals: impl IntoIterator<Item = StateId>,
        transitions: Vec<Vec<Option<StateId>>>,
    ) -> Result<Self> {
        if initial >= num_states {
            return Err(EngineError::InvalidArg(format!(
                "initial state {initial} is outside 0..{num_states}"
            )));
        }
        let mut seen = IndexSet::new();
        for name in &alphabet {
            if !seen.insert(name.clone()) {
                return Err(EngineError::InvalidArg(format!(
                    "duplicate symbol '{name}' in alphabet"
                )));
            }
        }
        if transitions.len() != num_states {
            return Err(EngineError::InvalidArg(format!(
                "transition table has {} rows, expected {num_states}",
                transitions.len()
            )));
        }
        let alphabet_len = alphabet.len();
        let mut flat = vec![None; num_states * alphabet_len];
        for (state, row) in transitions.into_iter().enumerate() {
            if row.len() != alphabet_len {
                return Err(EngineError::InvalidArg(format!(
                    "row for state {state} has {} columns, expected {alphabet_len}",
                    row.len()
                )));
            }
            for (symbol_idx, target) in row.into_iter().enumerate() {
                if let Some(t) = target {
                    if t >= num_states {
                        return Err(EngineError::InvalidArg(format!(
                            "transition from state {state} targets out-of-range state {t}"
                        )));
                    }
                }
                flat[state * alphabet_len + symbol_idx] = target;
            }
        }
        let mut finals_set = BTreeSet::new();
        for f in finals {
            if f >= num_states {
                return Err(EngineError::InvalidArg(format!(
                    "final state {f} is outside 0..{num_states}"
                )));
            }
            finals_set.insert(f);
        }
        Ok(Self {
            num_states,
            alphabet: seen,
            transitions: flat,
            initial,
            finals: finals_set,
        })
    }

    /// Builds an automaton from a flat row-major table using `-1` as the
    /// external ⊥ sentinel, matching the callable API of §6.
    pub fn from_flat(
        num_states: usize,
        alphabet: Vec<String>,
        initial: StateId,
        finals: impl IntoIterator<Item = StateId>,
        flat: &[i64],
    ) -> Result<Self> {
        let alphabet_len = alphabet.len();
        if flat.len() != num_states * alphabet_len {
            return Err(EngineError::InvalidArg(format!(
                "flat transition table has {} entries, expected {}",
                flat.len(),
                num_states * alphabet_len
            )));
        }
        let mut rows = Vec::with_capacity(num_states);
        for state in 0..num_states {
            let mut row = Vec::with_capacity(alphabet_len);
            for symbol in 0..alphabet_len {
                let raw = flat[state * alphabet_len + symbol];
                row.push(if raw == DUMMY {
                    None
                } else if raw < 0 || raw as usize >= num_states {
                    return Err(EngineError::InvalidArg(format!(
                        "transition value {raw} is neither ⊥ nor a valid state"
                    )));
                } else {
                    Some(raw as usize)
                });
            }
            rows.push(row);
        }
        Self::new(num_states, alphabet, initial, finals, rows)
    }

    /// Number of states in `Q`.
    pub fn state_count(&self) -> usize {
        self.num_states
    }

    /// Number of symbols in `Σ`.
    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }

    /// Iterates over the alphabet in insertion order.
    pub fn alphabet(&self) -> impl Iterator<Item = &str> {
        self.alphabet.iter().map(String::as_str)
    }

    /// The automaton's initial state `q₀`.
    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// Whether `state` is accepting.
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// Looks up a symbol's index by name.
    pub fn symbol_index(&self, name: &str) -> Result<usize> {
        self.alphabet
            .get_index_of(name)
            .ok_or_else(|| EngineError::InvalidSymbol(name.to_string()))
    }

    /// Resolves a symbol index back to its name. Panics if `idx` is out of
    /// range; callers within the crate only ever pass indices derived from
    /// this automaton's own alphabet.
    pub fn symbol_name(&self, idx: usize) -> &str {
        self.alphabet
            .get_index(idx)
            .expect("symbol index out of range")
    }

    /// Reads the raw transition cell for `(state, symbol_idx)` without
    /// bounds-checking against the public API; used internally by the
    /// matcher, rewriter, product, and property checker where indices are
    /// already known to be valid.
    pub(crate) fn step_by_index(&self, state: StateId, symbol_idx: usize) -> Option<StateId> {
        self.transitions[self.cell_index(state, symbol_idx)]
    }

    /// Overwrites the transition cell for `(state, symbol_idx)`; used only
    /// by [`crate::rewrite::apply`].
    pub(crate) fn set_transition(
        &mut self,
        state: StateId,
        symbol_idx: usize,
        target: Option<StateId>,
    ) {
        let idx = self.cell_index(state, symbol_idx);
        self.transitions[idx] = target;
    }

    /// Single-symbol step by name: `δ(q, name)`.
    pub fn step(&self, state: StateId, name: &str) -> Result<Option<StateId>> {
        let idx = self.symbol_index(name)?;
        Ok(self.step_by_index(state, idx))
    }

    /// Runs a trace of symbol names left to right from `q₀`, rejecting on
    /// the first ⊥ transition and erroring on the first unknown symbol.
    /// Returns whether the resulting state is accepting.
    pub fn run_trace<S: AsRef<str>>(&self, trace: &[S]) -> Result<bool> {
        let mut state = self.initial;
        for symbol in trace {
            let symbol = symbol.as_ref();
            let next = self.step(state, symbol).map_err(|_| {
                EngineError::InvalidArg(format!("unknown trace symbol '{symbol}'"))
            })?;
            match next {
                Some(next) => state = next,
                None => return Ok(false),
            }
        }
        Ok(self.is_final(state))
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Num states: {}; Alphabet size {}",
            self.num_states,
            self.alphabet.len()
        )?;
        writeln!(f, "Initial state: {}", self.initial)?;
        write!(f, "Final state(s): ")?;
        for state in &self.finals {
            write!(f, "{state} ")?;
        }
        writeln!(f)?;
        writeln!(f, "Alphabet symbol(s):")?;
        for (idx, name) in self.alphabet.iter().enumerate() {
            writeln!(f, "{idx} - {name}")?;
        }
        writeln!(f, "Transition matrix:")?;
        for state in 0..self.num_states {
            for symbol in 0..self.alphabet.len() {
                let cell = self.step_by_index(state, symbol);
                write!(f, "{} ", cell.map(|s| s as i64).unwrap_or(DUMMY))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trace_acceptance_scenario() {
        // Q={0,1,2}, Σ=[a,b], initial=0, F={2}, δ=[[1,⊥],[2,0],[⊥,⊥]]
        let a = Automaton::new(
            3,
            sym(&["a", "b"]),
            0,
            [2],
            vec![
                vec![Some(1), None],
                vec![Some(2), Some(0)],
                vec![None, None],
            ],
        )
        .unwrap();

        assert!(a.run_trace(&["a", "a"]).unwrap());
        assert!(!a.run_trace(&["a", "b"]).unwrap());
        assert!(!a.run_trace(&["b"]).unwrap());
        assert!(matches!(
            a.run_trace(&["c"]),
            Err(EngineError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn construction_rejects_out_of_range_initial() {
        let err = Automaton::new(2, sym(&["a"]), 5, [], vec![vec![None], vec![None]])
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidArg(_)));
    }

    #[test]
    fn construction_rejects_out_of_range_target() {
        let err = Automaton::new(2, sym(&["a"]), 0, [], vec![vec![Some(9)], vec![None]])
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidArg(_)));
    }

    #[test]
    fn from_flat_round_trips_dummy_sentinel() {
        let a = Automaton::from_flat(2, sym(&["a", "b"]), 0, [1], &[1, -1, -1, -1]).unwrap();
        assert_eq!(a.step(0, "a").unwrap(), Some(1));
        assert_eq!(a.step(0, "b").unwrap(), None);
        assert!(a.is_final(1));
    }

    #[test]
    fn clone_is_independent() {
        let a = Automaton::from_flat(2, sym(&["a"]), 0, [], &[1, -1]).unwrap();
        let mut b = a.clone();
        b.set_transition(0, 0, None);
        assert_eq!(a.step(0, "a").unwrap(), Some(1));
        assert_eq!(b.step(0, "a").unwrap(), None);
    }

    #[test]
    fn step_determinism() {
        let a = Automaton::from_flat(2, sym(&["a"]), 0, [], &[1, -1]).unwrap();
        assert_eq!(a.step(0, "a").unwrap(), a.step(0, "a").unwrap());
    }
}

//! Bounded reachability search over the synchronous product of a host and
//! a property automaton.

use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use crate::automaton::{Automaton, StateId};

/// Interpretation of a property move the property automaton cannot take.
///
/// `Error` is reserved in the data model but treated identically to `Nop`
/// by this implementation — the original design never exercised a
/// distinct `ERROR` code path either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    /// A symbol the property cannot take (⊥ or absent from its alphabet)
    /// leaves the property's state unchanged.
    Nop,
    /// Reserved; currently behaves identically to [`Interpretation::Nop`].
    Error,
}

/// A safety property: a DFA to run in lockstep with a host, plus the set
/// of its states that constitute a violation.
#[derive(Debug, Clone)]
pub struct Property {
    sim_dfa: Automaton,
    mode: Interpretation,
    error_states: HashSet<StateId>,
}

/// A node in the synchronous product explored by the checker.
type CheckState = (StateId, StateId);

impl Property {
    /// Builds a property from its simulating DFA, interpretation mode, and
    /// error-state set.
    pub fn new(
        sim_dfa: Automaton,
        mode: Interpretation,
        error_states: impl IntoIterator<Item = StateId>,
    ) -> Self {
        Self {
            sim_dfa,
            mode,
            error_states: error_states.into_iter().collect(),
        }
    }

    /// Runs a bounded BFS from `(q0_host, q0_property)` looking for any
    /// path into an error state, honoring `deadline`. Returns `true` if
    /// the property holds (no violation found, including on timeout) and
    /// `false` if a violation was found.
    pub fn check(&self, host: &Automaton, deadline: Instant) -> bool {
        let start: CheckState = (host.initial_state(), self.sim_dfa.initial_state());

        let mut visited: HashSet<CheckState> = HashSet::new();
        visited.insert(start);
        let mut queue: VecDeque<CheckState> = VecDeque::new();
        queue.push_back(start);

        while let Some((q_host, q_prop)) = queue.pop_front() {
            if Instant::now() >= deadline {
                tracing::debug!("property check timed out; returning holds");
                return true;
            }

            for symbol in 0..host.alphabet_len() {
                let q_host_next = match host.step_by_index(q_host, symbol) {
                    Some(next) => next,
                    None => continue,
                };

                let q_prop_next = self.property_step(q_host, q_prop, symbol, host);

                if self.error_states.contains(&q_prop_next) {
                    tracing::trace!(q_host, q_prop, "property violated");
                    return false;
                }

                let next = (q_host_next, q_prop_next);
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        true
    }

    fn property_step(
        &self,
        _q_host: StateId,
        q_prop: StateId,
        host_symbol: usize,
        host: &Automaton,
    ) -> StateId {
        let name = host.symbol_name(host_symbol);
        match self.sim_dfa.symbol_index(name) {
            Ok(prop_symbol) => match self.sim_dfa.step_by_index(q_prop, prop_symbol) {
                Some(next) => next,
                None => self.nop_or(q_prop),
            },
            Err(_) => self.nop_or(q_prop),
        }
    }

    fn nop_or(&self, q_prop: StateId) -> StateId {
        match self.mode {
            Interpretation::Nop | Interpretation::Error => q_prop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn prop_five() -> Automaton {
        // 6 states in a line on "A"; error state 5.
        Automaton::from_flat(6, vec!["A".into()], 0, [], &[1, 2, 3, 4, 5, -1]).unwrap()
    }

    fn long_chain_host() -> Automaton {
        // 6-state linear host over {A}, reaching a trace of length 5.
        Automaton::from_flat(6, vec!["A".into()], 0, [], &[1, 2, 3, 4, 5, -1]).unwrap()
    }

    fn ex_cdm() -> Automaton {
        Automaton::from_flat(
            6,
            vec!["A".into(), "B".into()],
            0,
            [],
            &[1, 1, 2, 3, 4, 5, 5, 4, 5, 5, -1, -1],
        )
        .unwrap()
    }

    #[test]
    fn detects_violation_on_long_chain() {
        let prop = Property::new(prop_five(), Interpretation::Nop, [5]);
        let host = long_chain_host();
        let deadline = Instant::now() + Duration::from_secs(5);
        assert!(!prop.check(&host, deadline));
    }

    #[test]
    fn holds_when_no_such_trace_exists() {
        let prop = Property::new(prop_five(), Interpretation::Nop, [5]);
        let host = ex_cdm();
        let deadline = Instant::now() + Duration::from_secs(5);
        assert!(prop.check(&host, deadline));
    }

    #[test]
    fn timeout_is_conservative() {
        let prop = Property::new(prop_five(), Interpretation::Nop, [5]);
        let host = long_chain_host();
        let deadline = Instant::now(); // already elapsed
        assert!(prop.check(&host, deadline));
    }

    #[test]
    fn stutters_on_symbols_outside_property_alphabet() {
        // Host has a symbol "B" the property doesn't know about; taking it
        // must not move the property state nor trip the error set.
        let host = Automaton::from_flat(
            2,
            vec!["A".into(), "B".into()],
            0,
            [],
            &[-1, 1, -1, -1],
        )
        .unwrap();
        let prop = Property::new(
            Automaton::from_flat(1, vec!["A".into()], 0, [], &[-1]).unwrap(),
            Interpretation::Nop,
            [],
        );
        let deadline = Instant::now() + Duration::from_secs(1);
        assert!(prop.check(&host, deadline));
    }
}

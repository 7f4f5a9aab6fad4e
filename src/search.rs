//! Iterative-deepening search over pattern-application sequences: for each
//! sequence of rewrites up to a bounded depth, compose the rewritten
//! operator with the machine and check the property.

use std::time::{Duration, Instant};

use crate::automaton::Automaton;
use crate::error::EngineError;
use crate::patterns::PatternMap;
use crate::product::product;
use crate::property::Property;
use crate::rewrite;

/// A rewritten operator that, composed with the machine, violates the
/// property — together with the sequence of pattern names applied to
/// reach it.
#[derive(Debug, Clone)]
pub struct Violator {
    pub operator: Automaton,
    pub applied: Vec<&'static str>,
}

/// Outcome of a full search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one violator was found and emitted to the sink.
    Success { violators: usize, tried: usize },
    /// The search space was exhausted without finding a violator.
    NotFound { tried: usize },
}

/// Per-level cursor into the (pattern_index, skip_count) enumeration.
/// `skip` doubles as both "the next embedding index to try" and "how many
/// embeddings of this pattern have been tried so far", since it only ever
/// increases by one between attempts.
#[derive(Debug, Clone, Copy, Default)]
struct LevelCursor {
    pattern_idx: usize,
    skip: usize,
}

/// Tries the current cursor against `base`, rolling forward through
/// patterns (and resetting `skip`) on `PatternNotFound` or a structural
/// rewrite failure, and respecting `limit_per_level`. Returns the
/// rewritten host and the pattern applied, or `None` once every pattern
/// has been exhausted at this level.
fn advance_to_next_host(
    base: &Automaton,
    patterns: &[PatternMap],
    cursor: &mut LevelCursor,
    limit_per_level: usize,
) -> Option<(Automaton, &'static str)> {
    loop {
        if cursor.pattern_idx >= patterns.len() {
            return None;
        }
        if cursor.skip >= limit_per_level {
            cursor.pattern_idx += 1;
            cursor.skip = 0;
            continue;
        }
        let map = &patterns[cursor.pattern_idx];
        match rewrite::apply(base, &map.before, &map.after, cursor.skip) {
            Ok(host) => return Some((host, map.name)),
            Err(EngineError::PatternNotFound) => {
                cursor.pattern_idx += 1;
                cursor.skip = 0;
            }
            Err(other) => {
                tracing::warn!(pattern = map.name, error = %other, "rewrite failed structurally");
                cursor.pattern_idx += 1;
                cursor.skip = 0;
            }
        }
    }
}

/// Runs the iterative-deepening modification search.
///
/// Enumerates every sequence of exactly `depth` pattern applications
/// (bounded by `limit_per_level` embeddings tried per pattern per level),
/// composing each resulting operator with `machine` and checking it
/// against `property` with a per-check `check_timeout` deadline. Every
/// violator is passed to `sink` as it is found.
pub fn search(
    operator: &Automaton,
    machine: &Automaton,
    property: &Property,
    patterns: &[PatternMap],
    depth: usize,
    limit_per_level: usize,
    check_timeout: Duration,
    mut sink: impl FnMut(Violator),
) -> SearchOutcome {
    let span = tracing::info_span!("search", depth, limit_per_level);
    let _enter = span.enter();

    let mut tried = 0usize;
    let mut violators = 0usize;

    let mut check_and_record = |host: &Automaton, applied: &[&'static str], tried: &mut usize| {
        *tried += 1;
        let composed = product(host, machine);
        let deadline = Instant::now() + check_timeout;
        if !property.check(&composed, deadline) {
            tracing::info!(applied = ?applied, "found violator");
            sink(Violator {
                operator: host.clone(),
                applied: applied.to_vec(),
            });
            true
        } else {
            false
        }
    };

    if depth == 0 {
        if check_and_record(operator, &[], &mut tried) {
            violators += 1;
        }
        return finish(violators, tried);
    }

    let mut cursors: Vec<LevelCursor> = vec![LevelCursor::default(); depth];
    let mut hosts: Vec<Automaton> = Vec::with_capacity(depth);
    let mut names: Vec<&'static str> = Vec::with_capacity(depth);
    let mut level = 0usize;

    loop {
        let base = if level == 0 {
            operator
        } else {
            &hosts[level - 1]
        };

        match advance_to_next_host(base, patterns, &mut cursors[level], limit_per_level) {
            Some((host, name)) => {
                if hosts.len() > level {
                    hosts[level] = host;
                    names[level] = name;
                } else {
                    hosts.push(host);
                    names.push(name);
                }

                if level == depth - 1 {
                    if check_and_record(&hosts[level], &names, &mut tried) {
                        violators += 1;
                    }
                    cursors[level].skip += 1;
                } else {
                    level += 1;
                }
            }
            None => {
                if level == 0 {
                    break;
                }
                cursors[level] = LevelCursor::default();
                hosts.truncate(level);
                names.truncate(level);
                level -= 1;
                cursors[level].skip += 1;
            }
        }
    }

    finish(violators, tried)
}

fn finish(violators: usize, tried: usize) -> SearchOutcome {
    if violators > 0 {
        SearchOutcome::Success { violators, tried }
    } else {
        SearchOutcome::NotFound { tried }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Interpretation;

    fn sym(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn cycle4() -> Automaton {
        let mut rows = Vec::new();
        for i in 0..4usize {
            rows.push(vec![Some((i + 1) % 4), Some((i + 3) % 4)]);
        }
        Automaton::new(4, sym(&["A", "B"]), 0, [], rows).unwrap()
    }

    fn trivial_machine() -> Automaton {
        Automaton::from_flat(1, sym(&["A", "B"]), 0, [0], &[0, 0]).unwrap()
    }

    fn always_holds_property() -> Property {
        // A single-state property with no error states can never violate.
        let dfa = Automaton::from_flat(1, sym(&["A"]), 0, [], &[0]).unwrap();
        Property::new(dfa, Interpretation::Nop, [])
    }

    #[test]
    fn depth_zero_checks_only_the_original_operator() {
        let operator = cycle4();
        let machine = trivial_machine();
        let property = always_holds_property();
        let patterns = crate::patterns::PatternLibrary::init();

        let mut seen = Vec::new();
        let outcome = search(
            &operator,
            &machine,
            &property,
            &patterns,
            0,
            16,
            Duration::from_millis(200),
            |v| seen.push(v),
        );
        assert_eq!(outcome, SearchOutcome::NotFound { tried: 1 });
        assert!(seen.is_empty());
    }

    #[test]
    fn exhausted_search_space_reports_not_found_deterministically() {
        let operator = cycle4();
        let machine = trivial_machine();
        let property = always_holds_property();
        let patterns = crate::patterns::PatternLibrary::init();

        let mut seen = Vec::new();
        let outcome = search(
            &operator,
            &machine,
            &property,
            &patterns,
            1,
            8,
            Duration::from_millis(200),
            |v| seen.push(v),
        );
        match outcome {
            SearchOutcome::NotFound { .. } => {}
            SearchOutcome::Success { .. } => panic!("property never violates; expected NotFound"),
        }
        assert!(seen.is_empty());
    }

    #[test]
    fn finds_a_violator_when_one_exists() {
        // property: single-state machine whose one state *is* the error
        // state. Any product of operator and machine over a shared symbol
        // transitions straight into it, so the very first candidate (the
        // unmodified operator, depth 0) already violates.
        let dfa = Automaton::from_flat(1, sym(&["A"]), 0, [], &[0]).unwrap();
        let property = Property::new(dfa, Interpretation::Nop, [0]);

        let operator = cycle4();
        let machine = trivial_machine();
        let patterns = crate::patterns::PatternLibrary::init();

        let mut seen = Vec::new();
        let outcome = search(
            &operator,
            &machine,
            &property,
            &patterns,
            0,
            8,
            Duration::from_millis(200),
            |v| seen.push(v),
        );
        assert!(matches!(outcome, SearchOutcome::Success { .. }));
        assert_eq!(seen.len(), 1);
        assert!(seen[0].applied.is_empty());
    }
}

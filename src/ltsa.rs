//! Parser for the LTSA transition-list text format.
//!
//! Transcribed from `ltsa_parser.cpp`: a seven-line header (three ignored
//! lines, the state count, three more ignored lines) followed by one block
//! of transition lines per state. Each line contributes one transition to
//! the current state; a trailing comma closes out that state's block and
//! advances to the next, while a line with no trailing comma means more
//! transitions for the same state follow on the next line. A bare `STOP`
//! line marks a sink state whose every symbol self-loops.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexSet;

use crate::automaton::Automaton;
use crate::error::{EngineError, Result};

/// Loads an LTSA-format automaton from a file path.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Automaton> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse(BufReader::new(file))
}

/// Parses an LTSA-format automaton from any buffered reader.
///
/// Alphabet symbols are accumulated in first-appearance order. States
/// without an explicit STOP marker default every unmentioned (state,
/// symbol) pair to ⊥. The initial state is always 0; final states are
/// always empty (the format carries no acceptance information).
pub fn parse<R: BufRead>(mut reader: R) -> Result<Automaton> {
    let mut line = String::new();
    skip_lines(&mut reader, &mut line, 3)?;

    line.clear();
    read_line(&mut reader, &mut line)?;
    let num_states: usize = line
        .trim()
        .parse()
        .map_err(|_| EngineError::Ltsa {
            line: 4,
            message: format!("expected an integer state count, got '{}'", line.trim()),
        })?;

    skip_lines(&mut reader, &mut line, 3)?;

    let mut alphabet: IndexSet<String> = IndexSet::new();
    let mut transitions: Vec<BTreeMap<usize, usize>> = vec![BTreeMap::new(); num_states];
    let mut sinks: Vec<usize> = Vec::new();

    let mut current_state = 0usize;
    let mut lineno = 7usize;

    loop {
        line.clear();
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            break;
        }
        lineno += 1;
        let text = line.trim_end_matches(['\n', '\r']);
        if text.trim().is_empty() {
            continue;
        }

        if text.contains("STOP") {
            sinks.push(current_state);
            current_state += 1;
            continue;
        }

        if current_state >= num_states {
            return Err(EngineError::Ltsa {
                line: lineno,
                message: format!("more transition blocks than the declared {num_states} states"),
            });
        }

        let names = parse_symbol_names(text, lineno)?;
        let target = parse_target_state(text, lineno)?;
        if target >= num_states {
            return Err(EngineError::Ltsa {
                line: lineno,
                message: format!("target state {target} is outside 0..{num_states}"),
            });
        }

        for name in names {
            let idx = alphabet.insert_full(name).0;
            transitions[current_state].insert(idx, target);
        }

        if text.trim_end().ends_with(',') {
            current_state += 1;
        }
        // no trailing comma: more transitions follow for this same state
    }

    let alphabet_len = alphabet.len();
    let mut rows = Vec::with_capacity(num_states);
    for state in 0..num_states {
        if sinks.contains(&state) {
            rows.push(vec![Some(state); alphabet_len]);
            continue;
        }
        let mut row = Vec::with_capacity(alphabet_len);
        for symbol in 0..alphabet_len {
            row.push(transitions[state].get(&symbol).copied());
        }
        rows.push(row);
    }

    if alphabet_len == 0 {
        tracing::warn!("parsed LTSA automaton with an empty alphabet");
    }

    Automaton::new(num_states, alphabet.into_iter().collect(), 0, [], rows)
}

fn skip_lines<R: BufRead>(reader: &mut R, buf: &mut String, count: usize) -> Result<()> {
    for _ in 0..count {
        buf.clear();
        read_line(reader, buf)?;
    }
    Ok(())
}

fn read_line<R: BufRead>(reader: &mut R, buf: &mut String) -> Result<()> {
    let n = reader.read_line(buf)?;
    if n == 0 {
        return Err(EngineError::Ltsa {
            line: 0,
            message: "unexpected end of input while reading header".to_string(),
        });
    }
    Ok(())
}

/// Extracts the comma-separated symbol name(s) from a transition line:
/// `(name -> Qn`, `| name -> Qn`, or `{n1, n2} -> Qn`.
fn parse_symbol_names(text: &str, lineno: usize) -> Result<Vec<String>> {
    if let (Some(open), Some(close)) = (text.find('{'), text.find('}')) {
        return Ok(text[open + 1..close]
            .split(',')
            .map(|s| s.chars().filter(|c| !c.is_whitespace()).collect())
            .collect());
    }

    let start = text
        .find('(')
        .map(|i| i + 1)
        .or_else(|| text.find('|').map(|i| i + 1));
    let arrow = text.find("->");
    match (start, arrow) {
        (Some(start), Some(arrow)) if arrow > start => {
            let name: String = text[start..arrow]
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            Ok(vec![name])
        }
        _ => Err(EngineError::Ltsa {
            line: lineno,
            message: format!("could not find a transition name in '{text}'"),
        }),
    }
}

/// Extracts the target state index from the last `Qn` token on the line.
fn parse_target_state(text: &str, lineno: usize) -> Result<usize> {
    let q_pos = text.rfind('Q').ok_or_else(|| EngineError::Ltsa {
        line: lineno,
        message: format!("no target state marker in '{text}'"),
    })?;
    let digits: String = text[q_pos + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().map_err(|_| EngineError::Ltsa {
        line: lineno,
        message: format!("could not parse target state in '{text}'"),
    })
}

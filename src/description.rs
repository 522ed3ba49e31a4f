//! The textual automaton description.
//!
//! Line 1 is the state count N. Line 2 is the whitespace-separated list
//! of accept states (present but empty when there are none). Every
//! further non-empty line is one transition `from to symbol` with
//! `from, to < N` and `symbol` in `0..=3`.

use std::fmt::Write as _;

use log::debug;

use crate::automaton::Automaton;
use crate::quadtree::Quadrant;
use crate::QuadfaError;

/// Serializes an automaton into its textual description.
///
/// The output is canonical: accept states ascend and transitions are
/// ordered by (from, symbol, to), so equal automata serialize to
/// byte-identical text.
pub fn write_description(automaton: &Automaton) -> String {
    let mut out = String::new();
    writeln!(out, "{}", automaton.state_count()).expect("write to string");

    let accept: Vec<String> = automaton
        .accept_states()
        .iter()
        .map(u32::to_string)
        .collect();
    writeln!(out, "{}", accept.join(" ")).expect("write to string");

    for (from, on, to) in automaton.transitions() {
        writeln!(out, "{} {} {}", from, to, on.symbol()).expect("write to string");
    }
    out
}

/// Parses a textual description back into an automaton.
///
/// Parsing is fail-fast: the first malformed line aborts the whole
/// decode with no partial output.
pub fn parse_description(text: &str) -> Result<Automaton, QuadfaError> {
    let mut lines = text.lines().enumerate();

    let (line_no, header) = lines.next().ok_or(QuadfaError::InvalidDescription {
        line: 1,
        message: "missing state count".into(),
    })?;
    let state_count = parse_int(header.trim(), line_no)?;

    let mut automaton = Automaton::new();
    if state_count > 0 {
        // Register the full id range so states without transitions survive
        // a round trip.
        automaton.add_state(state_count - 1);
    }

    let (line_no, accept_line) = lines.next().ok_or(QuadfaError::InvalidDescription {
        line: 2,
        message: "missing accept state list".into(),
    })?;
    for token in accept_line.split_whitespace() {
        let state = parse_int(token, line_no)?;
        if state >= state_count {
            return Err(QuadfaError::AcceptStateOutOfRange {
                state,
                count: state_count,
            });
        }
        automaton.add_accept_state(state);
    }

    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(QuadfaError::InvalidDescription {
                line: line_no + 1,
                message: format!("expected `from to symbol`, got {} fields", fields.len()),
            });
        }
        let from = parse_int(fields[0], line_no)?;
        let to = parse_int(fields[1], line_no)?;
        let symbol = parse_int(fields[2], line_no)?;

        if from >= state_count || to >= state_count {
            return Err(QuadfaError::TransitionOutOfRange {
                from,
                to,
                count: state_count,
            });
        }
        let on = Quadrant::from_symbol(symbol.try_into().unwrap_or(u8::MAX))
            .ok_or(QuadfaError::InvalidSymbol { symbol })?;
        automaton.add_transition(from, to, on);
    }

    debug!(
        "parsed automaton description: {} states, {} accept states",
        automaton.state_count(),
        automaton.accept_states().len()
    );
    Ok(automaton)
}

fn parse_int(token: &str, line_no: usize) -> Result<u32, QuadfaError> {
    token
        .parse()
        .map_err(|_| QuadfaError::InvalidDescription {
            line: line_no + 1,
            message: format!("`{token}` is not a non-negative integer"),
        })
}

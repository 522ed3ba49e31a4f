//! Residual-language quotient construction of the address automaton.
//!
//! Every state under construction is a set of word suffixes (a residual
//! language); two prefixes reaching set-equal residuals are the same
//! state. The construction therefore yields the quotient DFA directly,
//! without passing through a trie or an NFA.

use std::collections::BTreeSet;

use log::debug;
use rustc_hash::FxHashMap;

use crate::automaton::Automaton;
use crate::quadtree::{Quadrant, Word};

/// Multi-resolution transform applied after the quotient construction,
/// selected on the wire as 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Mode 1: pick the top-level quadrant with the fewest black blocks
    /// as the implicit background and self-loop the accept state on every
    /// other symbol, so coverage of the elided quadrant is inferred
    /// rather than stored.
    Elision,
    /// Mode 2: the exact construction. Coarser reconstructions are a
    /// decode-time word-length bound, not an encode-time transform.
    #[default]
    Exact,
    /// Mode 3: every reachable state accepts, collapsing the automaton to
    /// its prefix language for coarse reconstruction.
    AllAccepting,
}

impl ResolutionMode {
    /// Parses the wire selector `1..=3`.
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            1 => Some(ResolutionMode::Elision),
            2 => Some(ResolutionMode::Exact),
            3 => Some(ResolutionMode::AllAccepting),
            _ => None,
        }
    }

    /// The wire selector of this mode.
    pub fn selector(self) -> u8 {
        match self {
            ResolutionMode::Elision => 1,
            ResolutionMode::Exact => 2,
            ResolutionMode::AllAccepting => 3,
        }
    }
}

/// Builds the automaton whose language is exactly `words`, then applies
/// the selected multi-resolution transform.
///
/// State indices are assigned in strict discovery order with symbols
/// scanned ascending, so the result is reproducible byte for byte from
/// the same word set regardless of how the set was produced.
pub fn build(words: &BTreeSet<Word>, mode: ResolutionMode) -> Automaton {
    let mut automaton = Automaton::new();
    automaton.add_state(0);

    // language-state list, scanned by index; grows as residuals are
    // discovered
    let mut languages: Vec<BTreeSet<Word>> = vec![words.clone()];
    let mut index_of: FxHashMap<BTreeSet<Word>, u32> = FxHashMap::default();
    index_of.insert(words.clone(), 0);

    let alphabet = working_alphabet(words);

    let mut i = 0;
    while i < languages.len() {
        if languages[i].contains(&Word::root()) {
            automaton.add_accept_state(i as u32);
        }

        for &symbol in &alphabet {
            let residual: BTreeSet<Word> = languages[i]
                .iter()
                .filter(|word| word.first() == Some(symbol))
                .map(Word::tail)
                .collect();
            if residual.is_empty() {
                continue;
            }

            let next = match index_of.get(&residual) {
                Some(&index) => index,
                None => {
                    let index = languages.len() as u32;
                    index_of.insert(residual.clone(), index);
                    languages.push(residual);
                    automaton.add_state(index);
                    index
                }
            };
            automaton.add_transition(i as u32, next, symbol);
        }

        i += 1;
    }

    debug!(
        "quotient construction: {} words -> {} states ({:?})",
        words.len(),
        automaton.state_count(),
        mode
    );

    match mode {
        ResolutionMode::Elision => apply_elision(&mut automaton, words),
        ResolutionMode::Exact => {}
        ResolutionMode::AllAccepting => {
            for state in 0..automaton.state_count() {
                automaton.add_accept_state(state);
            }
        }
    }

    automaton
}

/// The symbols occurring anywhere in the word set. Symbols not present
/// induce no transitions anywhere in the construction, so scanning them
/// would be wasted work rather than an error.
fn working_alphabet(words: &BTreeSet<Word>) -> Vec<Quadrant> {
    let mut present: BTreeSet<Quadrant> = BTreeSet::new();
    for word in words {
        present.extend(word.symbols().iter().copied());
    }
    present.into_iter().collect()
}

/// Mode 1: counts black blocks per top-level quadrant over the original
/// word set, elects the quadrant with the smallest count (ties to the
/// smallest symbol) as the implicit background, and adds self-loops on
/// the first-discovered accept state for every other symbol.
///
/// An empty language has no accept state and nothing to elide.
fn apply_elision(automaton: &mut Automaton, words: &BTreeSet<Word>) {
    let Some(&accept) = automaton.accept_states().iter().next() else {
        return;
    };

    let mut counts = [0usize; 4];
    for word in words {
        if let Some(first) = word.first() {
            counts[first.symbol() as usize] += 1;
        }
    }

    // min() returns the first minimum, which is the smallest symbol.
    let default = counts
        .iter()
        .enumerate()
        .min_by_key(|&(_, count)| count)
        .map(|(symbol, _)| symbol as u8)
        .expect("counts is non-empty");

    debug!(
        "elision: per-quadrant counts {:?}, default quadrant {}",
        counts, default
    );

    for quadrant in Quadrant::ALL {
        if quadrant.symbol() != default {
            automaton.add_transition(accept, accept, quadrant);
        }
    }
}

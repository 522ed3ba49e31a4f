//! The automaton data structure: states, accept set, transition relation,
//! and bounded enumeration of accepted words.

use std::collections::{BTreeSet, VecDeque};

use crate::quadtree::{Quadrant, Word};

/// A finite automaton over the quadrant alphabet.
///
/// States are small integers with 0 as the initial state. The state count
/// is the largest id ever seen plus one, not a strict counter, so the
/// builder's dynamically growing state list and a parsed description with
/// transition-free states are both represented faithfully. Transitions are
/// accumulated as a relation; duplicates collapse in the ordered set and
/// the relation is reduced to a functional table before any traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    max_state: Option<u32>,
    accept: BTreeSet<u32>,
    transitions: BTreeSet<(u32, Quadrant, u32)>,
}

impl Automaton {
    /// Creates an automaton with no states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a state id. Adding an id twice, or out of order, is fine.
    pub fn add_state(&mut self, id: u32) {
        self.max_state = Some(self.max_state.map_or(id, |m| m.max(id)));
    }

    /// Marks a state as accepting, registering it if new.
    pub fn add_accept_state(&mut self, id: u32) {
        self.add_state(id);
        self.accept.insert(id);
    }

    /// Adds a transition, registering both endpoints if new.
    pub fn add_transition(&mut self, from: u32, to: u32, on: Quadrant) {
        self.add_state(from);
        self.add_state(to);
        self.transitions.insert((from, on, to));
    }

    /// Number of states, i.e. the largest registered id plus one.
    pub fn state_count(&self) -> u32 {
        self.max_state.map_or(0, |m| m + 1)
    }

    /// The accept states, in ascending order.
    pub fn accept_states(&self) -> &BTreeSet<u32> {
        &self.accept
    }

    /// True when `state` is accepting.
    pub fn is_accepting(&self, state: u32) -> bool {
        self.accept.contains(&state)
    }

    /// The transition relation, ordered by (from, symbol, to).
    pub fn transitions(&self) -> impl Iterator<Item = (u32, Quadrant, u32)> + '_ {
        self.transitions.iter().copied()
    }

    /// Reduces the transition relation to one destination per (state,
    /// symbol). When the relation holds duplicates for a pair, the
    /// smallest destination wins, keeping the reduction deterministic.
    pub fn transition_table(&self) -> Vec<[Option<u32>; 4]> {
        let mut table = vec![[None; 4]; self.state_count() as usize];
        for &(from, on, to) in &self.transitions {
            let slot = &mut table[from as usize][on.symbol() as usize];
            if slot.is_none() {
                *slot = Some(to);
            }
        }
        table
    }

    /// Enumerates every accepted word of length at most `max_len`,
    /// starting from the initial state 0.
    ///
    /// The bound makes the traversal terminate even when the relation has
    /// cycles, which the multi-resolution elision transform introduces.
    pub fn words_up_to(&self, max_len: usize) -> Vec<Word> {
        self.words_from(0, max_len)
    }

    /// Enumerates accepted words of length at most `max_len` as if `state`
    /// were the initial state. Shorter words come first.
    pub fn words_from(&self, state: u32, max_len: usize) -> Vec<Word> {
        if state >= self.state_count() {
            return Vec::new();
        }

        let table = self.transition_table();
        let mut words = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back((state, Word::root()));

        while let Some((current, word)) = queue.pop_front() {
            if self.is_accepting(current) {
                words.push(word.clone());
            }
            if word.len() == max_len {
                continue;
            }
            for quadrant in Quadrant::ALL {
                if let Some(next) = table[current as usize][quadrant.symbol() as usize] {
                    queue.push_back((next, word.child(quadrant)));
                }
            }
        }

        words
    }
}

// Integration tests for the residual-language quotient construction
mod common;

use common::{image_from_rows, make_checkerboard, word_set};
use quadfa::builder::{build, ResolutionMode};
use quadfa::description::write_description;
use quadfa::quadtree::find_black_blocks;
use quadfa::{Quadrant, Word};
use std::collections::BTreeSet;

#[test]
fn empty_language_yields_the_degenerate_automaton() {
    let automaton = build(&BTreeSet::new(), ResolutionMode::Exact);
    assert_eq!(automaton.state_count(), 1);
    assert!(automaton.accept_states().is_empty());
    assert_eq!(automaton.transitions().count(), 0);
    assert_eq!(write_description(&automaton), "1\n\n");
}

#[test]
fn root_word_language_accepts_at_the_initial_state() {
    let automaton = build(&word_set(&[""]), ResolutionMode::Exact);
    assert_eq!(automaton.state_count(), 1);
    assert!(automaton.is_accepting(0));
    assert_eq!(automaton.transitions().count(), 0);
    assert_eq!(write_description(&automaton), "1\n0\n");
}

#[test]
fn single_word_language_builds_a_two_state_chain() {
    let automaton = build(&word_set(&["0"]), ResolutionMode::Exact);
    assert_eq!(automaton.state_count(), 2);
    assert_eq!(automaton.accept_states(), &BTreeSet::from([1]));
    let transitions: Vec<_> = automaton.transitions().collect();
    assert_eq!(transitions, vec![(0, Quadrant::BottomLeft, 1)]);
    assert_eq!(write_description(&automaton), "2\n1\n0 1 0\n");
}

#[test]
fn set_equal_residuals_share_a_state() {
    // Both "01" and "21" leave the residual {"1"}; the construction must
    // route them through the same intermediate state.
    let automaton = build(&word_set(&["01", "21"]), ResolutionMode::Exact);
    assert_eq!(automaton.state_count(), 3);
    let table = automaton.transition_table();
    assert_eq!(table[0][0], table[0][2]);
}

#[test]
fn construction_is_deterministic() {
    let img = make_checkerboard(8);
    let words: BTreeSet<Word> = find_black_blocks(&img, 3).into_iter().collect();
    for mode in [
        ResolutionMode::Elision,
        ResolutionMode::Exact,
        ResolutionMode::AllAccepting,
    ] {
        let first = write_description(&build(&words, mode));
        let second = write_description(&build(&words, mode));
        assert_eq!(first, second, "mode {:?} output is not reproducible", mode);
    }
}

#[test]
fn accepted_language_equals_the_quadtree_word_set() {
    let img = image_from_rows(&["...#", "....", "##..", "##.."]);
    let words: BTreeSet<Word> = find_black_blocks(&img, 2).into_iter().collect();
    let automaton = build(&words, ResolutionMode::Exact);
    let accepted: BTreeSet<Word> = automaton.words_up_to(2).into_iter().collect();
    assert_eq!(accepted, words);
}

#[test]
fn no_two_states_have_equal_residual_languages() {
    let img = image_from_rows(&[
        "##.#....",
        "##......",
        "........",
        "....##..",
        "#...##..",
        "........",
        "......##",
        "......##",
    ]);
    let words: BTreeSet<Word> = find_black_blocks(&img, 3).into_iter().collect();
    let automaton = build(&words, ResolutionMode::Exact);

    let bound = automaton.state_count() as usize;
    let languages: Vec<BTreeSet<Word>> = (0..automaton.state_count())
        .map(|state| automaton.words_from(state, bound).into_iter().collect())
        .collect();
    for i in 0..languages.len() {
        for j in i + 1..languages.len() {
            assert_ne!(
                languages[i], languages[j],
                "states {i} and {j} recognize the same residual language"
            );
        }
    }
}

#[test]
fn elision_picks_the_least_covered_quadrant_with_ties_to_smallest_symbol() {
    // Top-level counts [5, 5, 1, 5]: quadrant 2 must be elected.
    let words = word_set(&[
        "00", "01", "02", "03", "000", // 5 words under quadrant 0
        "10", "11", "12", "13", "100", // 5 words under quadrant 1
        "2", // 1 word under quadrant 2
        "30", "31", "32", "33", "300", // 5 words under quadrant 3
    ]);
    let automaton = build(&words, ResolutionMode::Elision);

    let accept = *automaton.accept_states().iter().next().unwrap();
    let loops: Vec<u8> = automaton
        .transitions()
        .filter(|&(from, _, to)| from == accept && to == accept)
        .map(|(_, on, _)| on.symbol())
        .collect();
    assert_eq!(loops, vec![0, 1, 3]);
}

#[test]
fn elision_breaks_an_all_way_tie_to_quadrant_zero() {
    let automaton = build(&word_set(&[""]), ResolutionMode::Elision);
    let loops: Vec<u8> = automaton
        .transitions()
        .filter(|&(from, _, to)| from == 0 && to == 0)
        .map(|(_, on, _)| on.symbol())
        .collect();
    assert_eq!(loops, vec![1, 2, 3]);
}

#[test]
fn elision_of_the_empty_language_is_a_no_op() {
    let exact = build(&BTreeSet::new(), ResolutionMode::Exact);
    let elided = build(&BTreeSet::new(), ResolutionMode::Elision);
    assert_eq!(write_description(&exact), write_description(&elided));
}

#[test]
fn all_accepting_marks_every_state() {
    let words = word_set(&["01", "23"]);
    let automaton = build(&words, ResolutionMode::AllAccepting);
    for state in 0..automaton.state_count() {
        assert!(automaton.is_accepting(state), "state {state} is not accepting");
    }
    // The accepted language is now the prefix closure of the word set.
    let accepted: BTreeSet<Word> = automaton.words_up_to(2).into_iter().collect();
    assert_eq!(accepted, word_set(&["", "0", "01", "2", "23"]));
}

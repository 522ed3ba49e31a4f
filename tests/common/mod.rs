//! Common utility functions for integration tests

use quadfa::{BitImage, Word};
use std::collections::BTreeSet;

/// Build a BitImage from ASCII art: '#' is black, anything else white.
#[allow(dead_code)]
pub fn image_from_rows(rows: &[&str]) -> BitImage {
    let height = rows.len();
    let width = rows[0].len();
    let mut img = BitImage::new(width, height).unwrap();
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), width, "ragged row in test image");
        for (x, c) in row.chars().enumerate() {
            if c == '#' {
                img.set(x, y, true);
            }
        }
    }
    img
}

/// Render a BitImage back to ASCII art rows, for assert messages.
#[allow(dead_code)]
pub fn rows_from_image(img: &BitImage) -> Vec<String> {
    (0..img.height)
        .map(|y| {
            (0..img.width)
                .map(|x| if img.get(x, y) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

/// Build a side x side checkerboard with a black top-left pixel.
#[allow(dead_code)]
pub fn make_checkerboard(side: usize) -> BitImage {
    let mut img = BitImage::new(side, side).unwrap();
    for y in 0..side {
        for x in 0..side {
            if (x + y) % 2 == 0 {
                img.set(x, y, true);
            }
        }
    }
    img
}

/// Parse a slice of digit strings into a word set.
#[allow(dead_code)]
pub fn word_set(words: &[&str]) -> BTreeSet<Word> {
    words.iter().map(|w| w.parse().unwrap()).collect()
}

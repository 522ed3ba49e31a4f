//! Rasterizing the accepted address words back onto a canvas.

use log::debug;

use crate::automaton::Automaton;
use crate::bitimage::BitImage;
use crate::quadtree::Word;
use crate::QuadfaError;

/// Enumerates the automaton's accepted words and paints the blocks they
/// address onto an all-white canvas.
///
/// When `bound` is given it caps the enumerated word length and fixes the
/// canvas side at `2^bound`; it is mandatory for automata with cycles
/// (the elision transform adds self-loops). Without a bound the
/// enumeration is capped at `state_count - 1`, which no accepted word of
/// an acyclic quotient automaton can exceed, and the canvas side is
/// derived from the longest word actually found.
pub fn rasterize(automaton: &Automaton, bound: Option<usize>) -> Result<BitImage, QuadfaError> {
    // Depth 24 already means a 16M-pixel canvas side.
    const MAX_DEPTH: usize = BitImage::MAX_DIMENSION.trailing_zeros() as usize;
    if let Some(depth) = bound {
        if depth > MAX_DEPTH {
            return Err(QuadfaError::DimensionOutOfRange {
                value: depth,
                max: MAX_DEPTH,
            });
        }
    }

    let limit = bound.unwrap_or_else(|| automaton.state_count().saturating_sub(1) as usize);
    let words = automaton.words_up_to(limit);

    let depth = match bound {
        Some(depth) => depth,
        None => words.iter().map(Word::len).max().unwrap_or(0),
    };
    if depth > MAX_DEPTH {
        return Err(QuadfaError::DimensionOutOfRange {
            value: depth,
            max: MAX_DEPTH,
        });
    }
    let side = 1usize << depth;

    debug!(
        "rasterizing {} words onto a {side}x{side} canvas (depth {depth})",
        words.len()
    );

    let mut canvas = BitImage::new(side, side)?;
    for word in &words {
        paint(&mut canvas, word, side);
    }
    Ok(canvas)
}

/// Paints the block addressed by `word` black.
///
/// Both axes start as the full half-open range `[0, side)` and are
/// narrowed per symbol to the half the quadrant numbering assigns to
/// that axis. A full-depth word narrows to a single pixel; a shorter
/// word leaves a whole sub-square, giving the coarse-resolution fill.
fn paint(canvas: &mut BitImage, word: &Word, side: usize) {
    let (mut y0, mut y1) = (0, side);
    let (mut x0, mut x1) = (0, side);

    for &quadrant in word.symbols() {
        let half = (y1 - y0) / 2;
        if half == 0 {
            break;
        }
        let (lower_rows, right_cols) = quadrant.halves();
        if lower_rows {
            y0 += half;
        } else {
            y1 -= half;
        }
        if right_cols {
            x0 += half;
        } else {
            x1 -= half;
        }
    }

    for y in y0..y1 {
        for x in x0..x1 {
            canvas.set(x, y, true);
        }
    }
}

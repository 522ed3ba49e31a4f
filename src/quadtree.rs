//! Quadtree decomposition of a bilevel image into base-4 address words.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::bitimage::BitImage;
use crate::QuadfaError;

/// One quadrant selector at a single quadtree level.
///
/// The numbering is the wire convention shared by the encoder and the
/// decoder:
///
/// ```text
/// | 1 3 |
/// | 0 2 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Quadrant {
    /// Symbol 0
    BottomLeft = 0,
    /// Symbol 1
    TopLeft = 1,
    /// Symbol 2
    BottomRight = 2,
    /// Symbol 3
    TopRight = 3,
}

impl Quadrant {
    /// All quadrants in ascending symbol order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::BottomLeft,
        Quadrant::TopLeft,
        Quadrant::BottomRight,
        Quadrant::TopRight,
    ];

    /// Parses a wire symbol in `0..=3`.
    pub fn from_symbol(symbol: u8) -> Option<Quadrant> {
        match symbol {
            0 => Some(Quadrant::BottomLeft),
            1 => Some(Quadrant::TopLeft),
            2 => Some(Quadrant::BottomRight),
            3 => Some(Quadrant::TopRight),
            _ => None,
        }
    }

    /// The wire symbol of this quadrant.
    #[inline]
    pub fn symbol(self) -> u8 {
        self as u8
    }

    /// Which halves of the current square this quadrant covers, as
    /// `(lower_rows, right_columns)`. Row indices grow downward, so the
    /// "bottom" quadrants cover the numerically larger row half.
    #[inline]
    pub fn halves(self) -> (bool, bool) {
        match self {
            Quadrant::BottomLeft => (true, false),
            Quadrant::TopLeft => (false, false),
            Quadrant::BottomRight => (true, true),
            Quadrant::TopRight => (false, true),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A quadtree address: the path from the image's root square to one
/// maximal black block, one symbol per level. The empty word addresses
/// the whole image.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(Vec<Quadrant>);

impl Word {
    /// The empty address, denoting the root square.
    pub fn root() -> Self {
        Word(Vec::new())
    }

    /// Number of symbols, i.e. the quadtree depth of the block.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the root address.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first symbol, if any.
    pub fn first(&self) -> Option<Quadrant> {
        self.0.first().copied()
    }

    /// The suffix after stripping the first symbol.
    pub fn tail(&self) -> Word {
        Word(self.0[1..].to_vec())
    }

    /// This address extended by one quadrant selection.
    pub fn child(&self, quadrant: Quadrant) -> Word {
        let mut symbols = Vec::with_capacity(self.0.len() + 1);
        symbols.extend_from_slice(&self.0);
        symbols.push(quadrant);
        Word(symbols)
    }

    /// The symbols of this address, root-first.
    pub fn symbols(&self) -> &[Quadrant] {
        &self.0
    }

    /// True when `self` is a proper prefix of `other`.
    pub fn is_proper_prefix_of(&self, other: &Word) -> bool {
        self.0.len() < other.0.len() && other.0[..self.0.len()] == self.0[..]
    }
}

impl FromIterator<Quadrant> for Word {
    fn from_iter<I: IntoIterator<Item = Quadrant>>(iter: I) -> Self {
        Word(iter.into_iter().collect())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for quadrant in &self.0 {
            write!(f, "{quadrant}")?;
        }
        Ok(())
    }
}

impl FromStr for Word {
    type Err = QuadfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| {
                c.to_digit(10)
                    .and_then(|d| Quadrant::from_symbol(d as u8))
                    .ok_or(QuadfaError::InvalidSymbol { symbol: c as u32 })
            })
            .collect()
    }
}

/// A half-open square region of the source image.
#[derive(Debug, Clone, Copy)]
struct Region {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl Region {
    fn side(&self) -> usize {
        self.x1 - self.x0
    }

    /// The sub-square covered by `quadrant`.
    fn quadrant(&self, quadrant: Quadrant) -> Region {
        let half = self.side() / 2;
        let (lower_rows, right_cols) = quadrant.halves();
        Region {
            x0: if right_cols { self.x0 + half } else { self.x0 },
            x1: if right_cols { self.x1 } else { self.x1 - half },
            y0: if lower_rows { self.y0 + half } else { self.y0 },
            y1: if lower_rows { self.y1 } else { self.y1 - half },
        }
    }
}

/// Recursively partitions `image` into quadrants and returns one address
/// word per maximal uniformly-black region.
///
/// `max_depth` bounds the recursion. For a power-of-two image it equals
/// log2 of the side length, in which case the single-pixel base case is
/// reached before the budget runs out; the budget exists as a safety
/// bound only.
///
/// An all-white image yields an empty list.
pub fn find_black_blocks(image: &BitImage, max_depth: usize) -> Vec<Word> {
    let mut words = Vec::new();
    let root = Region {
        x0: 0,
        x1: image.width,
        y0: 0,
        y1: image.height,
    };
    descend(image, root, max_depth, Word::root(), &mut words);
    debug!(
        "quadtree pass over {}x{} image found {} black blocks",
        image.width,
        image.height,
        words.len()
    );
    words
}

fn descend(image: &BitImage, region: Region, depth_left: usize, prefix: Word, out: &mut Vec<Word>) {
    if region.side() == 1 {
        if image.get(region.x0, region.y0) {
            out.push(prefix);
        }
        return;
    }

    // Maximality rule: a fully black block is emitted as one word and
    // never subdivided.
    if image.region_all_black(region.x0, region.x1, region.y0, region.y1) {
        out.push(prefix);
        return;
    }

    if depth_left == 0 {
        return;
    }

    for quadrant in Quadrant::ALL {
        descend(
            image,
            region.quadrant(quadrant),
            depth_left - 1,
            prefix.child(quadrant),
            out,
        );
    }
}

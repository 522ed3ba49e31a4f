//! Bilevel image codec backed by a finite automaton.
//!
//! Compression decomposes a square, power-of-two black-and-white image
//! into the quadtree addresses of its maximal black blocks, then builds
//! the deterministic finite automaton whose language is exactly that word
//! set and serializes it as a short textual description. Decompression
//! enumerates the accepted words and rasterizes each back to the block of
//! pixels it addresses.
//!
//! Three multi-resolution modes trade exactness for compactness; see
//! [`ResolutionMode`].

#![warn(missing_docs)]

// Re-export commonly used types
pub use ndarray::Array2;

use log::info;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur while encoding or decoding.
#[derive(Error, Debug)]
pub enum QuadfaError {
    /// Compression requires a square input
    #[error("input image is {width}x{height}, expected a square")]
    NotSquare {
        /// Input width in pixels
        width: usize,
        /// Input height in pixels
        height: usize,
    },

    /// Compression requires a power-of-two side length
    #[error("image side {side} is not a power of two")]
    NotPowerOfTwo {
        /// Input side length in pixels
        side: usize,
    },

    /// Requested bitmap dimension outside the supported range
    #[error("dimension {value} outside supported range 1..={max}")]
    DimensionOutOfRange {
        /// The rejected dimension
        value: usize,
        /// Largest accepted dimension
        max: usize,
    },

    /// Raw input buffer does not match the declared geometry
    #[error("input buffer size mismatch: expected {expected} bytes, got {actual} for {width}x{height} image")]
    BufferSizeMismatch {
        /// Bytes required by the geometry
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },

    /// Packed 1-bit-per-pixel data supplied where unpacked bytes are expected
    #[error("input appears to be packed binary data (1 bit per pixel), but the encoder expects unpacked data (1 byte per pixel)")]
    PackedDataDetected,

    /// A description line failed to parse
    #[error("invalid automaton description at line {line}: {message}")]
    InvalidDescription {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// An accept state id is outside the declared state range
    #[error("accept state {state} out of range for {count} states")]
    AcceptStateOutOfRange {
        /// The offending state id
        state: u32,
        /// Declared state count
        count: u32,
    },

    /// A transition endpoint is outside the declared state range
    #[error("transition {from} -> {to} references a state out of range for {count} states")]
    TransitionOutOfRange {
        /// Source state of the transition
        from: u32,
        /// Destination state of the transition
        to: u32,
        /// Declared state count
        count: u32,
    },

    /// A symbol outside the quadrant alphabet
    #[error("symbol {symbol} outside the quadrant alphabet 0..=3")]
    InvalidSymbol {
        /// The rejected symbol value
        symbol: u32,
    },

    /// Array shape error during raw-buffer conversion
    #[error("array shape error")]
    ArrayShapeError(#[from] ndarray::ShapeError),
}

// Module declarations
pub mod automaton;
pub mod bitimage;
pub mod builder;
pub mod decoder;
pub mod description;
pub mod pbm;
pub mod quadtree;

// Re-export the main types and entry points
pub use automaton::Automaton;
pub use bitimage::BitImage;
pub use builder::ResolutionMode;
pub use quadtree::{Quadrant, Word};

/// Compresses a square, power-of-two bilevel image into the textual
/// automaton description.
pub fn compress(image: &BitImage, mode: ResolutionMode) -> Result<String, QuadfaError> {
    if image.width != image.height {
        return Err(QuadfaError::NotSquare {
            width: image.width,
            height: image.height,
        });
    }
    let side = image.side();
    if !side.is_power_of_two() {
        return Err(QuadfaError::NotPowerOfTwo { side });
    }

    let max_depth = side.trailing_zeros() as usize;
    let words: BTreeSet<Word> = quadtree::find_black_blocks(image, max_depth)
        .into_iter()
        .collect();
    info!(
        "compressing {side}x{side} image: {} black pixels, {} maximal blocks, mode {}",
        image.count_ones(),
        words.len(),
        mode.selector()
    );

    let automaton = builder::build(&words, mode);
    Ok(description::write_description(&automaton))
}

/// Compresses an unpacked pixel buffer (one byte per pixel, row-major,
/// nonzero = black) of a `width` x `height` image.
///
/// Packed 1-bit-per-pixel buffers are detected and rejected with a
/// dedicated error rather than misread.
pub fn compress_raw(
    input: &[u8],
    width: usize,
    height: usize,
    mode: ResolutionMode,
) -> Result<String, QuadfaError> {
    let expected = width * height;
    if input.len() < expected {
        let packed_size = expected.div_ceil(8);
        if input.len() == packed_size {
            return Err(QuadfaError::PackedDataDetected);
        }
        return Err(QuadfaError::BufferSizeMismatch {
            expected,
            actual: input.len(),
            width,
            height,
        });
    }

    let array = Array2::from_shape_vec((height, width), input[..expected].to_vec())?;
    let image = BitImage::from_array(&array)?;
    compress(&image, mode)
}

/// Decompresses a textual automaton description back into a bitmap.
///
/// `word_len`, when given, bounds the enumerated word length and fixes
/// the canvas side at `2^word_len`; it is required for descriptions
/// produced with [`ResolutionMode::Elision`], whose self-loops make the
/// automaton cyclic. Without it the side is inferred from the longest
/// accepted word.
pub fn decompress(text: &str, word_len: Option<usize>) -> Result<BitImage, QuadfaError> {
    let automaton = description::parse_description(text)?;
    info!(
        "decompressing automaton with {} states, bound {:?}",
        automaton.state_count(),
        word_len
    );
    decoder::rasterize(&automaton, word_len)
}

/// Get the version string for the crate
pub fn get_version() -> String {
    let build_ts = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown");
    format!("quadfa {} (built {})", env!("CARGO_PKG_VERSION"), build_ts)
}

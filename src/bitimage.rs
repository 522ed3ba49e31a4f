//! The core bilevel raster type and its conversions.
//!
//! A set bit is a black pixel; a clear bit is white. Storage is MSB-first
//! so packed rows can be written straight into a binary PBM body.

use bitvec::order::Msb0;
use bitvec::prelude::*;
use ndarray::Array2;

use crate::QuadfaError;

/// A bilevel image with MSB-first bit ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitImage {
    /// Width of the bitmap in pixels
    pub width: usize,
    /// Height of the bitmap in pixels
    pub height: usize,
    /// Bitmap data, row-major, one bit per pixel
    bits: BitVec<u8, Msb0>,
}

impl BitImage {
    /// Largest accepted width or height.
    pub const MAX_DIMENSION: usize = 1 << 24;

    /// Creates a new all-white bitmap with the given dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, QuadfaError> {
        for value in [width, height] {
            if value == 0 || value > Self::MAX_DIMENSION {
                return Err(QuadfaError::DimensionOutOfRange {
                    value,
                    max: Self::MAX_DIMENSION,
                });
            }
        }

        let mut bits = BitVec::with_capacity(width * height);
        bits.resize(width * height, false);

        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Gets a pixel value at (x, y). Out-of-bounds reads are white.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[y * self.width + x]
    }

    /// Sets a pixel value at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x < self.width && y < self.height {
            self.bits.set(y * self.width + x, value);
        }
    }

    /// Tests whether every pixel in the half-open region
    /// `[x0, x1) x [y0, y1)` is black.
    pub fn region_all_black(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> bool {
        debug_assert!(x1 <= self.width && y1 <= self.height);
        (y0..y1).all(|y| {
            let row = y * self.width;
            self.bits[row + x0..row + x1].all()
        })
    }

    /// Number of black pixels.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Side length, valid only for square images.
    pub fn side(&self) -> usize {
        debug_assert_eq!(self.width, self.height);
        self.width
    }

    /// Converts an unpacked pixel array (one byte per pixel, nonzero = black).
    pub fn from_array(array: &Array2<u8>) -> Result<Self, QuadfaError> {
        let (height, width) = array.dim();
        let mut image = Self::new(width, height)?;
        for (y, row) in array.rows().into_iter().enumerate() {
            for (x, &pixel) in row.iter().enumerate() {
                if pixel > 0 {
                    image.set(x, y, true);
                }
            }
        }
        Ok(image)
    }

    /// Converts back into an unpacked pixel array (1 = black, 0 = white).
    pub fn to_array(&self) -> Array2<u8> {
        Array2::from_shape_fn((self.height, self.width), |(y, x)| self.get(x, y) as u8)
    }

    /// Packs each row into bytes, MSB-first, rows padded to a byte boundary.
    /// This is the body layout of a binary PBM (P4) file.
    pub fn to_row_bytes(&self) -> Vec<u8> {
        let bytes_per_row = self.width.div_ceil(8);
        let mut out = Vec::with_capacity(bytes_per_row * self.height);
        for y in 0..self.height {
            for byte_x in 0..bytes_per_row {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let x = byte_x * 8 + bit;
                    if x < self.width && self.get(x, y) {
                        byte |= 0x80 >> bit;
                    }
                }
                out.push(byte);
            }
        }
        out
    }

    /// Rebuilds an image from byte-padded rows as produced by
    /// [`to_row_bytes`](Self::to_row_bytes).
    pub fn from_row_bytes(width: usize, height: usize, data: &[u8]) -> Result<Self, QuadfaError> {
        let bytes_per_row = width.div_ceil(8);
        let expected = bytes_per_row * height;
        if data.len() < expected {
            return Err(QuadfaError::BufferSizeMismatch {
                expected,
                actual: data.len(),
                width,
                height,
            });
        }

        let mut image = Self::new(width, height)?;
        for y in 0..height {
            let row = &data[y * bytes_per_row..(y + 1) * bytes_per_row];
            for x in 0..width {
                if (row[x / 8] >> (7 - (x % 8))) & 1 == 1 {
                    image.set(x, y, true);
                }
            }
        }
        Ok(image)
    }
}

//! Binary PBM (P4) reading and writing.
//!
//! PBM is the crate's raster container: one bit per pixel, 1 = black,
//! rows padded to a byte boundary, exactly the layout of
//! [`BitImage::to_row_bytes`].

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::bitimage::BitImage;

/// Loads a binary PBM file.
pub fn read_pbm(path: &Path) -> Result<BitImage> {
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufReader::new(&mut file);

    let mut line = String::new();
    reader.read_line(&mut line)?;
    if line.trim() != "P4" {
        return Err(anyhow!("unsupported PBM magic number: {}", line.trim()));
    }

    // Skip comments before the dimension line.
    loop {
        line.clear();
        reader.read_line(&mut line)?;
        let trimmed = line.trim();
        if !trimmed.starts_with('#') && !trimmed.is_empty() {
            break;
        }
    }

    let dims: Vec<&str> = line.trim().split_whitespace().collect();
    if dims.len() != 2 {
        return Err(anyhow!("invalid PBM dimensions line: {}", line.trim()));
    }
    let width: usize = dims[0].parse().context("invalid PBM width")?;
    let height: usize = dims[1].parse().context("invalid PBM height")?;

    let data_start = reader.stream_position()?;
    file.seek(std::io::SeekFrom::Start(data_start))?;

    let bytes_per_row = width.div_ceil(8);
    let mut data = vec![0u8; bytes_per_row * height];
    file.read_exact(&mut data)
        .context("truncated PBM pixel data")?;

    debug!("read {width}x{height} PBM from {}", path.display());
    Ok(BitImage::from_row_bytes(width, height, &data)?)
}

/// Writes a binary PBM file.
pub fn write_pbm(path: &Path, image: &BitImage) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(&mut file, "P4\n{} {}", image.width, image.height)?;
    file.write_all(&image.to_row_bytes())?;
    debug!(
        "wrote {}x{} PBM to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}

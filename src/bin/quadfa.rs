use anyhow::{anyhow, Context, Result};
use clap::Parser;
use env_logger::Builder;
use env_logger::Env;
use log::info;
use log::LevelFilter;
use quadfa::{compress, decompress, get_version, pbm, ResolutionMode};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input file: PBM image when compressing, automaton description when
    /// decompressing
    #[clap(short, long, value_parser)]
    input: PathBuf,

    /// Output file: automaton description when compressing, PBM image when
    /// decompressing
    #[clap(short, long, value_parser)]
    output: PathBuf,

    /// Decompress instead of compress
    #[clap(short, long)]
    decompress: bool,

    /// Multi-resolution mode for compression: 1 = quadrant elision,
    /// 2 = exact, 3 = all-accepting
    #[clap(short, long, default_value_t = 2)]
    mode: u8,

    /// Word-length bound for decompression; the canvas side becomes 2^N.
    /// Required for descriptions produced with mode 1.
    #[clap(short, long)]
    word_len: Option<usize>,

    /// Suppress console log output
    #[clap(long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let default_log_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut builder = Builder::from_env(Env::new().default_filter_or(default_log_level));
    if cfg!(debug_assertions) {
        builder.filter_module("quadfa", LevelFilter::Debug);
    } else {
        builder.filter_module("quadfa", LevelFilter::Info);
    }
    if args.quiet {
        builder.filter_level(LevelFilter::Off);
    }
    builder.init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    info!("{}", get_version());
    info!(
        "command line: {}",
        std::env::args().collect::<Vec<_>>().join(" ")
    );

    if args.decompress {
        let text = fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read {}", args.input.display()))?;
        let image = decompress(&text, args.word_len)?;
        pbm::write_pbm(&args.output, &image)?;
        info!(
            "decompressed {} -> {} ({}x{})",
            args.input.display(),
            args.output.display(),
            image.width,
            image.height
        );
    } else {
        let mode = ResolutionMode::from_selector(args.mode)
            .ok_or_else(|| anyhow!("invalid multi-resolution mode {}, expected 1..=3", args.mode))?;
        let image = pbm::read_pbm(&args.input)?;
        let text = compress(&image, mode)?;
        fs::write(&args.output, &text)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
        info!(
            "compressed {} ({}x{}) -> {} ({} bytes)",
            args.input.display(),
            image.width,
            image.height,
            args.output.display(),
            text.len()
        );
    }

    Ok(())
}

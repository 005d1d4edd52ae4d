use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use stridetris_engine::Dimensions;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::prelude::*;

use crate::{
    output::{GridFormat, Output},
    session::{self, SessionOptions},
};

/// Plays a game of falling blocks driven by one command per input line.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Board width; when omitted, the first input line is read as `WIDTH HEIGHT`
    #[arg(long, requires = "height")]
    width: Option<usize>,
    /// Board height
    #[arg(long, requires = "width")]
    height: Option<usize>,
    /// Read commands from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
    /// Write grids to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// How each grid is printed
    #[arg(long, value_enum, default_value_t = GridFormat::Text)]
    format: GridFormat,
    /// Log more (-v info, -vv debug, -vvv trace); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl CommandArgs {
    fn dimensions(&self) -> anyhow::Result<Option<Dimensions>> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => {
                let dimensions = Dimensions::new(width, height)
                    .with_context(|| format!("Invalid board size {width}x{height}"))?;
                Ok(Some(dimensions))
            }
            _ => Ok(None),
        }
    }

    fn open_input(&self) -> anyhow::Result<Box<dyn BufRead>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            None => Ok(Box::new(io::stdin().lock())),
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(level)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);

    let options = SessionOptions {
        dimensions: args.dimensions()?,
        format: args.format,
    };
    let input = args.open_input()?;
    let output = Output::from_output_path(args.output.clone())?;
    let output_path = output.display_path();

    let summary = session::run(input, output, &options)
        .with_context(|| format!("Session writing to {output_path} failed"))?;
    info!(
        commands = summary.stats.commands(),
        locked_pieces = summary.stats.locked_pieces(),
        cleared_rows = summary.stats.cleared_rows(),
        game_over = summary.game_over,
        "session finished"
    );
    Ok(())
}

use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write},
    path::PathBuf,
};

use anyhow::Context;
use serde::Serialize;
use stridetris_engine::{Command, GridSnapshot, Outcome};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GridFormat {
    /// Rows of `-` and `0`, each grid followed by a blank line
    #[default]
    Text,
    /// One JSON document per line
    Json,
}

/// A grid printed after a protocol step, with the step that produced it.
#[derive(Debug, Serialize)]
pub struct Frame<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub grid: &'a GridSnapshot,
}

impl<'a> Frame<'a> {
    pub fn grid(grid: &'a GridSnapshot) -> Self {
        Self {
            command: None,
            outcome: None,
            grid,
        }
    }

    pub fn command(command: Command, outcome: Outcome, grid: &'a GridSnapshot) -> Self {
        Self {
            command: Some(command),
            outcome: Some(outcome),
            grid,
        }
    }

    fn is_game_over(&self) -> bool {
        self.outcome.is_some_and(|outcome| outcome.is_game_over())
    }
}

#[derive(Debug)]
pub struct FrameWriter<W> {
    writer: W,
    format: GridFormat,
}

impl<W> FrameWriter<W>
where
    W: Write,
{
    pub fn new(writer: W, format: GridFormat) -> Self {
        Self { writer, format }
    }

    pub fn write_frame(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        match self.format {
            GridFormat::Text => {
                write!(self.writer, "{}", frame.grid).context("Failed to write grid")?;
                writeln!(self.writer).context("Failed to write grid")?;
                if frame.is_game_over() {
                    writeln!(self.writer, "Game Over!").context("Failed to write grid")?;
                }
            }
            GridFormat::Json => {
                serde_json::to_writer(&mut self.writer, frame)
                    .context("Failed to write JSON frame")?;
                writeln!(self.writer).context("Failed to write JSON frame")?;
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> anyhow::Result<W> {
        self.writer.flush().context("Failed to flush output")?;
        Ok(self.writer)
    }
}

use std::io::{BufRead, Lines};

use anyhow::{Context, bail};
use stridetris_engine::{Command, Dimensions, PieceKind};
use tracing::warn;

/// One unit of the line protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Command(Command),
    /// Show the locked cells without the active piece.
    Break,
    Exit,
}

/// Reads tokens from a line-oriented command stream.
///
/// Blank lines are skipped and surrounding whitespace is ignored. Lines that are
/// not part of the protocol are logged and skipped.
#[derive(Debug)]
pub struct TokenReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R> TokenReader<R>
where
    R: BufRead,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line =
                line.with_context(|| format!("Failed to read input line {}", self.line_number))?;
            let line = line.trim();
            if !line.is_empty() {
                return Ok(Some(line.to_owned()));
            }
        }
        Ok(None)
    }

    /// Reads the `WIDTH HEIGHT` header line.
    pub fn read_dimensions(&mut self) -> anyhow::Result<Dimensions> {
        let Some(line) = self.next_line()? else {
            bail!("Input ended before the board size line");
        };
        parse_dimensions(&line)
            .with_context(|| format!("Invalid board size on line {}", self.line_number))
    }

    pub fn next_token(&mut self) -> anyhow::Result<Option<Token>> {
        while let Some(line) = self.next_line()? {
            let token = match line.as_str() {
                "exit" => Token::Exit,
                "break" => Token::Break,
                "piece" => {
                    let Some(shape) = self.next_line()? else {
                        warn!(line = self.line_number, "input ended before the piece shape");
                        return Ok(None);
                    };
                    match shape.parse::<PieceKind>() {
                        Ok(kind) => Token::Command(Command::Spawn(kind)),
                        Err(err) => {
                            warn!(line = self.line_number, %err, "skipping piece");
                            continue;
                        }
                    }
                }
                other => match other.parse::<Command>() {
                    Ok(command) => Token::Command(command),
                    Err(err) => {
                        warn!(line = self.line_number, %err, "skipping line");
                        continue;
                    }
                },
            };
            return Ok(Some(token));
        }
        Ok(None)
    }
}

pub fn parse_dimensions(line: &str) -> anyhow::Result<Dimensions> {
    let mut fields = line.split_whitespace();
    let (Some(width), Some(height), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("Expected `WIDTH HEIGHT`, got {line:?}");
    };
    let width = width
        .parse()
        .with_context(|| format!("Invalid board width: {width:?}"))?;
    let height = height
        .parse()
        .with_context(|| format!("Invalid board height: {height:?}"))?;
    Ok(Dimensions::new(width, height)?)
}

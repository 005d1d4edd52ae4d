use std::io::{BufRead, Write};

use anyhow::Context;
use stridetris_engine::{Dimensions, Engine, EngineStats};
use tracing::{debug, warn};

use crate::{
    input::{Token, TokenReader},
    output::{Frame, FrameWriter, GridFormat},
};

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Board size; `None` reads it from the first input line.
    pub dimensions: Option<Dimensions>,
    pub format: GridFormat,
}

#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub stats: EngineStats,
    pub game_over: bool,
}

/// Runs the line protocol until `exit`, game over, or end of input.
///
/// The empty board is printed first, then one grid per applied command. `break`
/// prints the locked cells only.
pub fn run<R, W>(input: R, output: W, options: &SessionOptions) -> anyhow::Result<SessionSummary>
where
    R: BufRead,
    W: Write,
{
    let mut tokens = TokenReader::new(input);
    let dimensions = match options.dimensions {
        Some(dimensions) => dimensions,
        None => tokens.read_dimensions()?,
    };
    debug!(
        width = dimensions.width(),
        height = dimensions.height(),
        "starting session"
    );

    let mut engine = Engine::new(dimensions);
    let mut frames = FrameWriter::new(output, options.format);
    frames.write_frame(&Frame::grid(&engine.snapshot()))?;

    while let Some(token) = tokens.next_token()? {
        let command = match token {
            Token::Exit => break,
            Token::Break => {
                frames.write_frame(&Frame::grid(&engine.locked_snapshot()))?;
                continue;
            }
            Token::Command(command) => command,
        };

        let outcome = match engine.apply(command) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%command, %err, "command rejected");
                continue;
            }
        };
        frames.write_frame(&Frame::command(command, outcome, &engine.snapshot()))?;
        if outcome.is_game_over() {
            break;
        }
    }

    frames.finish().context("Failed to finish output")?;
    Ok(SessionSummary {
        stats: engine.stats().clone(),
        game_over: engine.state().is_game_over(),
    })
}

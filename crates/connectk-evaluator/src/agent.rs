//! Column pickers consumed by the game loop.
//!
//! Every seat of a match is an [`Agent`]. The game loop only ever asks an agent
//! for a column given the current position; whether the answer comes from a
//! search, a random draw or a person at a terminal is up to the implementation.

use std::io::{self, BufRead, Write};

use connectk_engine::{Column, GridState};
use rand::{Rng, seq::IndexedRandom as _};
use tracing::warn;

use crate::search_engine::SearchEngine;

/// A participant choosing columns.
pub trait Agent {
    fn name(&self) -> &str;

    /// Picks the column to play in `state`.
    ///
    /// Returns `None` when no move can be produced: the position has no legal
    /// moves, or an interactive agent ran out of input.
    fn select_target(&mut self, state: &GridState) -> Option<Column>;

    /// Returns the number of states the last [`Agent::select_target`] call
    /// examined, for agents that search.
    fn states_visited(&self) -> Option<u64> {
        None
    }
}

/// Agent delegating to a [`SearchEngine`].
#[derive(Debug)]
pub struct EngineAgent {
    name: String,
    engine: SearchEngine,
}

impl EngineAgent {
    #[must_use]
    pub fn new(name: impl Into<String>, engine: SearchEngine) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}

impl Agent for EngineAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn select_target(&mut self, state: &GridState) -> Option<Column> {
        self.engine.select_target(state)
    }

    fn states_visited(&self) -> Option<u64> {
        Some(self.engine.states_visited())
    }
}

/// Agent picking uniformly among the legal columns.
#[derive(Debug)]
pub struct RandomAgent<R> {
    name: String,
    rng: R,
}

impl<R> RandomAgent<R>
where
    R: Rng,
{
    #[must_use]
    pub fn new(name: impl Into<String>, rng: R) -> Self {
        Self {
            name: name.into(),
            rng,
        }
    }
}

impl<R> Agent for RandomAgent<R>
where
    R: Rng,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn select_target(&mut self, state: &GridState) -> Option<Column> {
        state.legal_moves().choose(&mut self.rng).copied()
    }
}

/// Source of the lines a [`HumanAgent`] reads.
pub trait LineInput {
    /// Appends the next line, including its terminator, to `buf`.
    ///
    /// Returns the number of bytes read, `0` at end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<R> LineInput for R
where
    R: BufRead,
{
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// The process's standard input, locked only while a line is read.
///
/// Any number of seats may hold one; they all share the buffer of
/// [`io::stdin`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinInput;

impl LineInput for StdinInput {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::stdin().read_line(buf)
    }
}

/// Agent reading columns typed by a person.
///
/// Malformed numbers and columns that are full or off the grid are rejected and
/// the prompt is repeated. With an advisor attached, the advisor's choice is
/// shown before every prompt.
#[derive(Debug)]
pub struct HumanAgent<R, W> {
    name: String,
    input: R,
    output: W,
    advisor: Option<SearchEngine>,
}

impl<R, W> HumanAgent<R, W>
where
    R: LineInput,
    W: Write,
{
    #[must_use]
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            advisor: None,
        }
    }

    /// Attaches an engine whose suggestion is printed before each prompt.
    #[must_use]
    pub fn with_advisor(mut self, advisor: SearchEngine) -> Self {
        self.advisor = Some(advisor);
        self
    }

    fn prompt(&mut self, state: &GridState) -> io::Result<Option<Column>> {
        if let Some(advisor) = &mut self.advisor
            && let Some(column) = advisor.select_target(state)
        {
            writeln!(self.output, "Best action determined by AI: {column}")?;
        }

        let mut line = String::new();
        loop {
            write!(self.output, "Enter the target column value: ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                warn!(agent = %self.name, "end of input");
                return Ok(None);
            }

            let column = match line.parse::<Column>() {
                Ok(column) => column,
                Err(e) => {
                    warn!(agent = %self.name, input = line.trim(), error = %e, "rejected input");
                    writeln!(self.output, "Invalid column: {e}")?;
                    continue;
                }
            };
            if let Err(e) = state.landing_row(column) {
                warn!(agent = %self.name, %column, error = %e, "rejected move");
                writeln!(self.output, "Illegal move: {e}")?;
                continue;
            }
            return Ok(Some(column));
        }
    }
}

impl<R, W> Agent for HumanAgent<R, W>
where
    R: LineInput,
    W: Write,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn select_target(&mut self, state: &GridState) -> Option<Column> {
        if state.legal_moves().is_empty() {
            return None;
        }
        match self.prompt(state) {
            Ok(column) => column,
            Err(e) => {
                warn!(agent = %self.name, error = %e, "failed to talk to the player");
                None
            }
        }
    }

    fn states_visited(&self) -> Option<u64> {
        self.advisor.as_ref().map(SearchEngine::states_visited)
    }
}

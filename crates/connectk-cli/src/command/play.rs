use std::{
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::Context;
use connectk_engine::{GameOutcome, GameSession, GameStats, Player, TurnRecord};
use connectk_evaluator::{
    agent::{Agent, EngineAgent, HumanAgent, RandomAgent, StdinInput},
    search_engine::{Algorithm, Role, SearchConfig, SearchEngine},
};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;
use tracing::{info, warn};

use crate::{
    schema::match_config::{MatchConfig, SeatConfig, SeatKind},
    util, view,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to a match configuration file (JSON format); replaces the other options
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of columns
    #[clap(long, default_value_t = MatchConfig::DEFAULT_WIDTH)]
    width: usize,
    /// Number of rows
    #[clap(long, default_value_t = MatchConfig::DEFAULT_HEIGHT)]
    height: usize,
    /// Pieces in a row needed to win
    #[clap(short, long, default_value_t = MatchConfig::DEFAULT_K)]
    k: usize,
    /// Stop the game after this many moves
    #[clap(long)]
    move_limit: Option<usize>,
    /// Seat of the first player (X)
    #[clap(long, value_enum, default_value_t = SeatKind::Human)]
    first: SeatKind,
    /// Seat of the second player (O)
    #[clap(long, value_enum, default_value_t = SeatKind::AlphaBeta)]
    second: SeatKind,
    #[clap(long, default_value = "Player 1")]
    first_name: String,
    #[clap(long, default_value = "Player 2")]
    second_name: String,
    /// Search depth of engine seats and advisors
    #[clap(long, default_value_t = SeatConfig::DEFAULT_MAX_DEPTH)]
    depth: u32,
    /// Seed of random seats
    #[clap(long)]
    seed: Option<u64>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: None,
            width: MatchConfig::DEFAULT_WIDTH,
            height: MatchConfig::DEFAULT_HEIGHT,
            k: MatchConfig::DEFAULT_K,
            move_limit: None,
            first: SeatKind::Human,
            second: SeatKind::AlphaBeta,
            first_name: "Player 1".to_owned(),
            second_name: "Player 2".to_owned(),
            depth: SeatConfig::DEFAULT_MAX_DEPTH,
            seed: None,
        }
    }
}

impl PlayArg {
    fn to_match_config(&self) -> MatchConfig {
        let seat = |kind, name: &str| SeatConfig {
            kind,
            name: name.to_owned(),
            max_depth: self.depth,
            seed: self.seed,
        };
        MatchConfig {
            width: self.width,
            height: self.height,
            k: self.k,
            move_limit: self.move_limit,
            seats: [
                seat(self.first, &self.first_name),
                seat(self.second, &self.second_name),
            ],
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = match &arg.config {
        Some(path) => util::read_match_config_file(path)?,
        None => arg.to_match_config(),
    };
    info!(
        width = config.width,
        height = config.height,
        k = config.k,
        first = ?config.seats[0].kind,
        second = ?config.seats[1].kind,
        "starting match"
    );

    let mut session = GameSession::new(config.width, config.height, config.k, config.move_limit)
        .context("Invalid board configuration")?;
    let [first, second] = &config.seats;
    let mut agents = [build_agent(first, Player::A)?, build_agent(second, Player::B)?];

    let mut stdout = io::stdout();
    let stats = play_match(&mut session, &mut agents, &mut stdout)?;
    report(&mut stdout, &session, &agents, &stats)?;
    Ok(())
}

fn build_agent(seat: &SeatConfig, player: Player) -> anyhow::Result<Box<dyn Agent>> {
    let engine = |algorithm| {
        let config = SearchConfig {
            max_depth: seat.max_depth,
            algorithm,
            role: Role::of(player),
        };
        SearchEngine::new(config)
            .with_context(|| format!("Invalid search configuration for {}", seat.name))
    };

    let agent: Box<dyn Agent> = match seat.kind {
        SeatKind::Human => Box::new(HumanAgent::new(
            seat.name.clone(),
            StdinInput,
            io::stdout(),
        )),
        SeatKind::Assisted => Box::new(
            HumanAgent::new(seat.name.clone(), StdinInput, io::stdout())
                .with_advisor(engine(Algorithm::AlphaBeta)?),
        ),
        SeatKind::Minimax => Box::new(EngineAgent::new(
            seat.name.clone(),
            engine(Algorithm::Minimax)?,
        )),
        SeatKind::AlphaBeta => Box::new(EngineAgent::new(
            seat.name.clone(),
            engine(Algorithm::AlphaBeta)?,
        )),
        SeatKind::Random => {
            let seed = seat.seed.unwrap_or_else(rand::random);
            Box::new(RandomAgent::new(
                seat.name.clone(),
                Pcg64Mcg::seed_from_u64(seed),
            ))
        }
    };
    Ok(agent)
}

/// Runs turns until the game ends or a seat fails to produce a move.
fn play_match<W>(
    session: &mut GameSession,
    agents: &mut [Box<dyn Agent>; 2],
    out: &mut W,
) -> anyhow::Result<[GameStats; 2]>
where
    W: Write,
{
    let mut stats = [GameStats::new(), GameStats::new()];
    view::render(out, session.state())?;

    while !session.is_over() {
        let player = session.side_to_move();
        let agent = &mut agents[player.index()];
        writeln!(out, "{} ({player}) to move", agent.name())?;
        out.flush()?;

        let start = Instant::now();
        let Some(column) = agent.select_target(session.state()) else {
            warn!(%player, name = agent.name(), "no move produced, abandoning the game");
            break;
        };
        let think_time = start.elapsed();

        session
            .play(column)
            .with_context(|| format!("{} chose an illegal move", agent.name()))?;
        let states_visited = agent.states_visited();
        stats[player.index()].record_turn(TurnRecord {
            player,
            column,
            states_visited,
            think_time,
        });
        info!(
            %player,
            name = agent.name(),
            %column,
            states_visited,
            ?think_time,
            "move played"
        );

        writeln!(out, "{} plays column {column}", agent.name())?;
        view::render(out, session.state())?;
    }
    Ok(stats)
}

fn report<W>(
    out: &mut W,
    session: &GameSession,
    agents: &[Box<dyn Agent>; 2],
    stats: &[GameStats; 2],
) -> anyhow::Result<()>
where
    W: Write,
{
    match session.outcome() {
        Some(GameOutcome::Win(winner)) => {
            writeln!(out, "{} ({winner}) wins!", agents[winner.index()].name())?;
        }
        Some(outcome) => writeln!(out, "Game over: {outcome}")?,
        None => writeln!(out, "Game abandoned")?,
    }

    for (agent, stats) in agents.iter().zip(stats) {
        write!(out, "{}: {} moves", agent.name(), stats.turns().len())?;
        if let Some(think_time) = stats.average_think_time() {
            write!(out, ", average think time {think_time:.2?}")?;
        }
        if let Some(states) = stats.average_states_visited() {
            write!(out, ", average states visited {states:.1}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

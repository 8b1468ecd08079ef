//! Headless Cookie Crunch runner (default binary).
//!
//! Plays any `--swap` requests first, then takes the hint swap each turn,
//! reshuffling whenever the board runs out of moves. Prints a summary or a
//! JSON message stream.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cookie_crunch::adapter::protocol::{
    ErrorMessage, HintMessage, ObservationMessage, ShuffleMessage, TurnMessage,
};
use cookie_crunch::adapter::{load_level_file, load_level_str};
use cookie_crunch::core::{GameState, LevelOutcome, Piece, RulesConfig, SwapError, TurnReport};
use cookie_crunch::types::{Position, COOKIE_KIND_COUNT};

const DEFAULT_LEVEL: &str = include_str!("../levels/Level_0.json");
const RESHUFFLE_FAILED: &str = "board has no moves left and cannot be reshuffled";

#[derive(Debug, Parser)]
#[command(name = "cookie-crunch", version, about = "Autoplay a Cookie Crunch level")]
struct Args {
    /// Level JSON file (the bundled level when omitted)
    #[arg(long)]
    level: Option<PathBuf>,

    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Stop after this many turns even if the level is undecided
    #[arg(long, default_value_t = 1000)]
    max_turns: u32,

    /// Emit line-delimited JSON messages instead of a summary
    #[arg(long)]
    json: bool,

    /// Number of cookie kinds in play (3-6)
    #[arg(long, default_value_t = COOKIE_KIND_COUNT)]
    kinds: u8,

    /// Swap to try before autoplay, as COL,ROW:COL,ROW (repeatable)
    #[arg(long = "swap", value_name = "SWAP", value_parser = parse_swap)]
    swaps: Vec<(Position, Position)>,
}

fn parse_position(text: &str) -> Result<Position, String> {
    let (column, row) = text
        .split_once(',')
        .ok_or_else(|| format!("expected COL,ROW, got `{text}`"))?;
    let column = column
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("bad column `{column}`: {e}"))?;
    let row = row
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("bad row `{row}`: {e}"))?;
    Ok(Position::new(column, row))
}

fn parse_swap(text: &str) -> Result<(Position, Position), String> {
    let (from, to) = text
        .split_once(':')
        .ok_or_else(|| format!("expected COL,ROW:COL,ROW, got `{text}`"))?;
    Ok((parse_position(from)?, parse_position(to)?))
}

struct Output<W: Write> {
    out: W,
    json: bool,
    seq: u64,
}

impl<W: Write> Output<W> {
    fn next_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    fn emit<T: Serialize>(&mut self, msg: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, msg)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn shuffle(&mut self, pieces: &[Piece], legal_swaps: usize) -> Result<()> {
        if self.json {
            let seq = self.next_seq();
            self.emit(&ShuffleMessage::new(seq, pieces, legal_swaps))?;
        }
        Ok(())
    }

    fn turn(&mut self, turns: u32, report: &TurnReport) -> Result<()> {
        if self.json {
            let seq = self.next_seq();
            self.emit(&TurnMessage::from_report(seq, report))?;
        } else {
            writeln!(
                self.out,
                "turn {:>3}: +{:<5} score {:<6} moves left {:<3} chains {}",
                turns,
                report.turn_score,
                report.score,
                report.moves_left,
                report.chain_count()
            )?;
        }
        Ok(())
    }

    fn refused(&mut self, err: SwapError) -> Result<()> {
        if self.json {
            let seq = self.next_seq();
            self.emit(&ErrorMessage::from_swap_error(seq, err))?;
        } else {
            writeln!(self.out, "refused ({}): {}", err.code(), err)?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = RulesConfig::classic().with_kind_count(args.kinds);
    config.validate()?;
    let level = match &args.level {
        Some(path) => {
            log::info!("loading level {}", path.display());
            load_level_file(path, &config)?
        }
        None => load_level_str(DEFAULT_LEVEL, &config).context("bundled level is invalid")?,
    };

    let mut game = GameState::with_seed(level, config, args.seed)?;
    let stdout = io::stdout();
    let mut output = Output {
        out: stdout.lock(),
        json: args.json,
        seq: 0,
    };

    let created = game.begin_game().context("could not shuffle the opening board")?;
    output.shuffle(&created, game.possible_swaps().len())?;
    let mut shuffles = 0u32;

    for &(from, to) in &args.swaps {
        if game.needs_shuffle() && !game.outcome().is_finished() {
            let created = game.shuffle().context(RESHUFFLE_FAILED)?;
            shuffles += 1;
            output.shuffle(&created, game.possible_swaps().len())?;
        }
        match game.try_swap(from, to) {
            Ok(report) => output.turn(game.turns(), &report)?,
            Err(err) => {
                log::warn!("swap {from:?} -> {to:?} refused: {err}");
                output.refused(err)?;
            }
        }
    }

    while game.outcome() == LevelOutcome::InProgress && game.turns() < args.max_turns {
        if game.needs_shuffle() {
            let created = game.shuffle().context(RESHUFFLE_FAILED)?;
            shuffles += 1;
            output.shuffle(&created, game.possible_swaps().len())?;
            continue;
        }
        let Some(swap) = game.hint() else {
            break;
        };
        if output.json {
            let seq = output.next_seq();
            output.emit(&HintMessage::new(seq, Some(swap)))?;
        }

        let report = game.try_swap(swap.first(), swap.second())?;
        output.turn(game.turns(), &report)?;
    }

    log::info!(
        "autoplay stopped: {} after {} turns",
        game.outcome().as_str(),
        game.turns()
    );
    if output.json {
        let seq = output.next_seq();
        output.emit(&ObservationMessage::from_snapshot(seq, &game.snapshot()))?;
    } else {
        writeln!(
            output.out,
            "{}: score {} / {} after {} turns ({} reshuffles)",
            game.outcome().as_str(),
            game.score(),
            game.target_score(),
            game.turns(),
            shuffles
        )?;
    }
    output.out.flush()?;
    Ok(())
}

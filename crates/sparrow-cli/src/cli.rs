use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use sparrow_core::game::history::ScoreDeltas;
use sparrow_core::game::session::SessionState;
use sparrow_core::model::player::{PlayerId, Roster, RosterError};
use thiserror::Error;
use tracing::info;

use crate::render;
use crate::store;

#[derive(Debug, Parser)]
#[command(
    name = "sparrowtally",
    version,
    about = "Mahjong session score ledger"
)]
pub struct Cli {
    /// Path to the session file.
    #[arg(short, long, value_name = "FILE", default_value = "sparrowtally.json")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a fresh session, optionally naming the four players in seat order.
    New { names: Vec<String> },
    /// Record a discard win: the loser pays the settled amount.
    Win {
        winner: String,
        loser: String,
        fan: u32,
    },
    /// Record a self-draw win: every opponent pays its own settled amount.
    Zimo { winner: String, fan: u32 },
    /// Flat collection: every opponent pays the player.
    Collect { player: String, amount: u32 },
    /// Flat payment: the player pays every opponent.
    Pay { player: String, amount: u32 },
    /// False-win payout, e.g. `zhahu Bob Alice=10 Cara=5`.
    Zhahu {
        player: String,
        payouts: Vec<String>,
    },
    /// Hand the dealer seat to a player out of sequence.
    Dealer { player: String },
    /// Buy out of a streak of three or more straight losses.
    Surrender { loser: String },
    /// Undo the most recent scoring action.
    Undo,
    /// Clear scores, streaks, and history; players keep their seats.
    Reset,
    /// Rename a player.
    Rename { player: String, name: String },
    /// Reseat the table: list the new order by name or id, or --shuffle.
    Seats {
        #[arg(long)]
        shuffle: bool,
        order: Vec<String>,
    },
    /// Current standings.
    Show,
    /// Action log with per-player score movements.
    History,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("{0} must be greater than zero")]
    AmountNotPositive(&'static str),
    #[error("winner and loser must differ")]
    SamePlayer,
    #[error("a false win cannot pay its own player")]
    SelfPayout,
    #[error("invalid payout '{0}', expected player=amount")]
    InvalidPayout(String),
    #[error("invalid seating: {0}")]
    Seating(RosterError),
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::New { names } = &cli.command {
        let roster = if names.is_empty() {
            Roster::standard()
        } else {
            Roster::with_names(names).map_err(CliError::Seating)?
        };
        let state = SessionState::new(roster);
        store::save(&cli.file, &state)?;
        info!(file = %cli.file.display(), "session created");
        println!("Started a session at {}", cli.file.display());
        print!("{}", render::totals_table(&state));
        return Ok(());
    }

    let mut state = store::load(&cli.file)?;
    match cli.command {
        Command::New { .. } => unreachable!("handled above"),
        Command::Show => {
            print!("{}", render::totals_table(&state));
            Ok(())
        }
        Command::History => {
            print!("{}", render::history_log(&state));
            Ok(())
        }
        Command::Win { winner, loser, fan } => {
            ensure_positive(fan, "fan")?;
            let winner = resolve(&state, &winner)?;
            let loser = resolve(&state, &loser)?;
            if winner == loser {
                return Err(CliError::SamePlayer.into());
            }
            let deltas = state.win_by_discard(winner, loser, fan);
            report(&cli.file, &state, &deltas)
        }
        Command::Zimo { winner, fan } => {
            ensure_positive(fan, "fan")?;
            let winner = resolve(&state, &winner)?;
            let deltas = state.win_by_self_draw(winner, fan);
            report(&cli.file, &state, &deltas)
        }
        Command::Collect { player, amount } => {
            ensure_positive(amount, "amount")?;
            let player = resolve(&state, &player)?;
            let deltas = state.special_collect(player, amount);
            report(&cli.file, &state, &deltas)
        }
        Command::Pay { player, amount } => {
            ensure_positive(amount, "amount")?;
            let player = resolve(&state, &player)?;
            let deltas = state.special_pay(player, amount);
            report(&cli.file, &state, &deltas)
        }
        Command::Zhahu { player, payouts } => {
            let player = resolve(&state, &player)?;
            let payouts = parse_payouts(&state, &payouts)?;
            if payouts.contains_key(&player) {
                return Err(CliError::SelfPayout.into());
            }
            let deltas = state.special_false_win(player, &payouts);
            report(&cli.file, &state, &deltas)
        }
        Command::Dealer { player } => {
            let player = resolve(&state, &player)?;
            state.set_dealer(player);
            store::save(&cli.file, &state)?;
            println!(
                "Dealer set to {}",
                state.roster().name_of(player).unwrap_or("?")
            );
            print!("{}", render::totals_table(&state));
            Ok(())
        }
        Command::Surrender { loser } => {
            let loser = resolve(&state, &loser)?;
            if state.surrender(loser) {
                store::save(&cli.file, &state)?;
                println!("Streak surrendered.");
                print!("{}", render::totals_table(&state));
            } else {
                println!("No surrender: the streak is below the threshold.");
            }
            Ok(())
        }
        Command::Undo => {
            let undone = state.history().last().map(|entry| entry.action.clone());
            if state.restore_last() {
                store::save(&cli.file, &state)?;
                println!("Undid: {}", undone.expect("entry was just popped"));
                print!("{}", render::totals_table(&state));
            } else {
                println!("Nothing to undo.");
            }
            Ok(())
        }
        Command::Reset => {
            state.reset();
            store::save(&cli.file, &state)?;
            println!("Session reset.");
            print!("{}", render::totals_table(&state));
            Ok(())
        }
        Command::Rename { player, name } => {
            let player = resolve(&state, &player)?;
            state
                .rename_player(player, &name)
                .map_err(CliError::Seating)?;
            store::save(&cli.file, &state)?;
            println!("Renamed player {player} to {name}");
            Ok(())
        }
        Command::Seats { shuffle, order } => {
            if shuffle {
                state.shuffle_seats(&mut rand::thread_rng());
            } else {
                let ids: Vec<PlayerId> = order
                    .iter()
                    .map(|arg| resolve(&state, arg))
                    .collect::<Result<_, _>>()?;
                state.reorder_seats(&ids).map_err(CliError::Seating)?;
            }
            store::save(&cli.file, &state)?;
            print!("{}", render::seating_line(state.roster()));
            Ok(())
        }
    }
}

fn report(file: &Path, state: &SessionState, deltas: &ScoreDeltas) -> anyhow::Result<()> {
    store::save(file, state)?;
    let action = state
        .history()
        .last()
        .map(|entry| entry.action.as_str())
        .unwrap_or("Action applied");
    info!(action, "action recorded");
    println!("{action}");
    print!("{}", render::deltas_line(state.roster(), deltas));
    print!("{}", render::totals_table(state));
    Ok(())
}

/// Accept either a player id or a (case-insensitive) name.
fn resolve(state: &SessionState, arg: &str) -> Result<PlayerId, CliError> {
    if let Ok(raw) = arg.parse::<u8>() {
        let id = PlayerId(raw);
        if state.roster().contains(id) {
            return Ok(id);
        }
    }
    state
        .roster()
        .id_by_name(arg)
        .ok_or_else(|| CliError::UnknownPlayer(arg.to_string()))
}

fn parse_payouts(
    state: &SessionState,
    entries: &[String],
) -> Result<BTreeMap<PlayerId, u32>, CliError> {
    let mut payouts = BTreeMap::new();
    for entry in entries {
        let (player, amount) = entry
            .split_once('=')
            .ok_or_else(|| CliError::InvalidPayout(entry.clone()))?;
        let amount: u32 = amount
            .trim()
            .parse()
            .map_err(|_| CliError::InvalidPayout(entry.clone()))?;
        payouts.insert(resolve(state, player.trim())?, amount);
    }
    Ok(payouts)
}

fn ensure_positive(value: u32, label: &'static str) -> Result<(), CliError> {
    if value == 0 {
        return Err(CliError::AmountNotPositive(label));
    }
    Ok(())
}

//! Command-line battle simulator.
//!
//! Runs a battle between two rosters, printing each turn's commentary.
//! `battle-sim describe move "Giga Drain"` prints reference text instead.

use clap::{Parser, Subcommand};
use pokemon_battle_core::battle::commands::PlayerTarget;
use pokemon_battle_core::{
    describe_move, describe_species, describe_type_matchup, find_move, find_species,
    start_battle_with_config, BattleConfig, BattleEngineError, BattleResult, BattleState,
    PokemonType, Species, Weather, ENEMY_TEAM, STARTER_TEAMS,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Simulate a single battle between two rosters", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Player roster, comma separated (defaults to Bulbasaur, Charmander, Squirtle)
    #[arg(long, value_delimiter = ',')]
    player: Vec<String>,

    /// Opponent roster, comma separated (defaults to Voltorb, Wooper, Snubbull)
    #[arg(long, value_delimiter = ',')]
    opponent: Vec<String>,

    /// RON file with level, seed and weather
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible battle
    #[arg(long)]
    seed: Option<u64>,

    /// Starting weather, e.g. rain or sun
    #[arg(long)]
    weather: Option<Weather>,

    #[arg(long)]
    level: Option<u8>,

    /// Move slots the player picks, in order; the last one repeats
    #[arg(long, value_delimiter = ',')]
    moves: Vec<usize>,

    /// Stop after this many turns even if the battle is still running
    #[arg(long, default_value_t = 100)]
    turns: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Print reference text for a move, type or species
    #[command(subcommand)]
    Describe(Describe),
}

#[derive(Subcommand)]
enum Describe {
    Move { name: String },
    Type { name: PokemonType },
    Species { name: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Some(Command::Describe(what)) => describe(what),
        None => simulate(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn describe(what: &Describe) -> BattleResult<()> {
    let text = match what {
        Describe::Move { name } => describe_move(find_move(name)?)?,
        Describe::Type { name } => describe_type_matchup(*name),
        Describe::Species { name } => describe_species(find_species(name)?)?,
    };
    println!("{}", text);
    Ok(())
}

fn roster(names: &[String], default: &[Species]) -> BattleResult<Vec<Species>> {
    if names.is_empty() {
        return Ok(default.to_vec());
    }
    names
        .iter()
        .map(|name| find_species(name.trim()).map_err(BattleEngineError::from))
        .collect()
}

fn battle_config(cli: &Cli) -> BattleResult<BattleConfig> {
    let mut config = match &cli.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(weather) = cli.weather {
        config.weather = weather;
    }
    if let Some(level) = cli.level {
        config.level = level;
    }
    Ok(config)
}

/// Scripted slot for this turn, otherwise the first move with PP left.
fn choose_move(state: &BattleState, script: &[usize], turn: usize) -> usize {
    if let Some(&slot) = script.get(turn).or(script.last()) {
        return slot;
    }
    state
        .active(PlayerTarget::Player)
        .and_then(|pokemon| pokemon.selectable_moves().first().copied())
        .unwrap_or(0)
}

fn simulate(cli: &Cli) -> BattleResult<()> {
    let config = battle_config(cli)?;
    let player_roster = roster(&cli.player, &STARTER_TEAMS[0])?;
    let opponent_roster = roster(&cli.opponent, &ENEMY_TEAM)?;
    let mut state = start_battle_with_config(&config, &player_roster, &opponent_roster)?;

    for turn in 0..cli.turns as usize {
        let slot = choose_move(&state, &cli.moves, turn);
        let result = pokemon_battle_core::resolve_turn(&mut state, slot)?;
        for line in &result.log {
            println!("{}", line);
        }
        println!(
            "  [Player {}% | Rival {}%]",
            result.player_hp_percent, result.opponent_hp_percent
        );
        if result.outcome.is_over() {
            println!("Result: {:?}", result.outcome);
            return Ok(());
        }
    }

    println!("Stopped after {} turns.", cli.turns);
    Ok(())
}

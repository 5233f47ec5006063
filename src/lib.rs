//! Pokemon Battle Core
//!
//! A turn-resolution engine for single battles between two rosters. The move
//! and species tables are compiled in from `data/*.ron`, every turn is built
//! from pure command batches, and all randomness flows through one seedable
//! [`TurnRng`] so a battle can be replayed exactly.

// --- MODULE DECLARATIONS ---
pub mod battle;
mod catalog;
pub mod config;
pub mod errors;
pub mod move_data;
pub mod player;
pub mod pokemon;
pub mod species;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    Ability, Accuracy, BaseStats, ChargeKind, Move, MoveCategory, MoveData, NonVolatileStatus,
    PokemonType, Species, SpeciesData, StatType, TeamCondition, Typing, VolatileStatus, Weather,
};

// --- From this crate's modules (`src/`) ---

// Turn resolution.
pub use battle::ai::{AiDecision, Behavior, TieredAI};
pub use battle::engine::{
    resolve_turn, resolve_turn_with, start_battle, start_battle_by_name, start_battle_with_config,
    FaintedSides, StatusChange, TurnResult,
};
pub use battle::state::{BattleEvent, BattleState, GameState, TurnRng};

// Runtime types.
pub use config::BattleConfig;
pub use player::BattlePlayer;
pub use pokemon::PokemonInst;

// Data access and descriptions.
pub use move_data::{describe_move, describe_type_matchup, find_move, get_move_data};
pub use species::{describe_species, find_species, get_species_data, ENEMY_TEAM, STARTER_TEAMS};

pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError, ExecutionError,
    MoveDataError, MoveDataResult, SpeciesDataError, SpeciesDataResult,
};

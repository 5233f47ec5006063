use schema::{Move, Species};

/// Main error type for the battle engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleEngineError {
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    #[error("Species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    #[error("Command execution error: {0}")]
    Execution(#[from] ExecutionError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to move data operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveDataError {
    /// No move answers to this name
    #[error("Unknown move: {0:?}")]
    UnknownMove(String),
    /// The compiled catalog has no record for a move variant
    #[error("No catalog entry for move {0:?}")]
    MissingMoveData(Move),
    #[error("Move catalog could not be decoded: {0}")]
    CatalogDecode(String),
}

/// Errors related to species data operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeciesDataError {
    #[error("Unknown species: {0:?}")]
    UnknownSpecies(String),
    #[error("No catalog entry for species {0:?}")]
    MissingSpeciesData(Species),
    #[error("Species catalog could not be decoded: {0}")]
    CatalogDecode(String),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleStateError {
    #[error("A roster needs between 1 and 6 members, got {0}")]
    InvalidRosterSize(usize),
    #[error("The battle is already over")]
    BattleOver,
}

/// Errors related to player actions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Move index {index} is out of range for {move_count} moves")]
    MoveIndexOutOfRange { index: usize, move_count: usize },
    #[error("Move {0} has no PP remaining")]
    NoPpRemaining(Move),
    #[error("No active Pokemon")]
    NoActivePokemon,
}

/// Errors raised while applying a battle command to the state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error("No active Pokemon for command target")]
    NoPokemon,
    #[error("Invalid move slot {0}")]
    InvalidMoveSlot(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(String),
    #[error("could not parse config: {0}")]
    Parse(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(err: ron::error::SpannedError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Type alias for Results that can fail with BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results that can fail with MoveDataError
pub type MoveDataResult<T> = Result<T, MoveDataError>;

/// Type alias for Results that can fail with SpeciesDataError
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;

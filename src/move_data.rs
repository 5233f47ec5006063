use crate::catalog::{COMPILED_MOVE_DATA, MOVE_NAMES};
use crate::errors::{MoveDataError, MoveDataResult};
use schema::{normalize_name, Move, MoveData};
use std::collections::HashMap;
use std::sync::LazyLock;

pub mod format_description;

pub use format_description::{describe_move, describe_type_matchup, MoveSummary};

// Global move data storage - decoded once on first access
static MOVE_DATA: LazyLock<Result<HashMap<Move, MoveData>, MoveDataError>> = LazyLock::new(|| {
    let records: Vec<MoveData> = postcard::from_bytes(COMPILED_MOVE_DATA)
        .map_err(|e| MoveDataError::CatalogDecode(e.to_string()))?;
    tracing::debug!(moves = records.len(), "decoded move catalog");
    Ok(records.into_iter().map(|data| (data.id, data)).collect())
});

/// Get move data for a specific move from the global store
pub fn get_move_data(move_: Move) -> MoveDataResult<&'static MoveData> {
    let catalog = MOVE_DATA.as_ref().map_err(Clone::clone)?;
    catalog
        .get(&move_)
        .ok_or(MoveDataError::MissingMoveData(move_))
}

/// Get max PP for a specific move
pub fn get_move_max_pp(move_: Move) -> MoveDataResult<u8> {
    get_move_data(move_).map(|data| data.max_pp)
}

/// Look a move up by display name. Case, spaces, hyphens and underscores are ignored.
pub fn find_move(name: &str) -> MoveDataResult<Move> {
    MOVE_NAMES
        .get(normalize_name(name).as_str())
        .copied()
        .ok_or_else(|| MoveDataError::UnknownMove(name.to_string()))
}

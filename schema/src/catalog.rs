//! Validation and binary encoding of the move and species tables.
//!
//! The build script runs every table through [`validate_moves`] and
//! [`validate_species`] before encoding it, so a malformed record fails the
//! build instead of a battle.

use crate::{Accuracy, Move, MoveCategory, MoveData, Species, SpeciesData};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashSet;
use strum::IntoEnumIterator;

pub const MIN_PP: u8 = 5;
pub const MAX_PP: u8 = 64;
pub const MAX_MOVES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no entry for move {0:?}")]
    MissingMove(Move),
    #[error("catalog has no entry for species {0:?}")]
    MissingSpecies(Species),
    #[error("duplicate catalog entry for {0:?}")]
    Duplicate(String),
    #[error("move {name}: {reason}")]
    InvalidMove { name: String, reason: String },
    #[error("species {name}: {reason}")]
    InvalidSpecies { name: String, reason: String },
    #[error("catalog encoding failed: {0}")]
    Encoding(String),
}

/// Canonical lookup key for a display name: "Will-O-Wisp" and "will o wisp" both become "WILLOWISP".
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase().replace([' ', '-', '_', '.', '\''], "")
}

fn invalid_move(data: &MoveData, reason: impl Into<String>) -> CatalogError {
    CatalogError::InvalidMove {
        name: data.name.clone(),
        reason: reason.into(),
    }
}

pub fn validate_moves(moves: &[MoveData]) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for data in moves {
        if !seen_ids.insert(data.id) || !seen_names.insert(normalize_name(&data.name)) {
            return Err(CatalogError::Duplicate(data.name.clone()));
        }
        if let Accuracy::Percent(value) = data.accuracy {
            if !(1..=100).contains(&value) {
                return Err(invalid_move(data, format!("accuracy {value} outside 1..=100")));
            }
        }
        if !(MIN_PP..=MAX_PP).contains(&data.max_pp) {
            return Err(invalid_move(data, format!("PP {} outside {MIN_PP}..={MAX_PP}", data.max_pp)));
        }
        if data.effect_chance > 100 {
            return Err(invalid_move(data, "effect chance above 100"));
        }
        match data.category {
            MoveCategory::Status => {
                if data.power != 0 {
                    return Err(invalid_move(data, "status moves carry no power"));
                }
                if data.charge.is_some() {
                    return Err(invalid_move(data, "status moves cannot charge"));
                }
            }
            MoveCategory::Physical | MoveCategory::Special => {
                if data.power == 0 {
                    return Err(invalid_move(data, "damaging moves need power"));
                }
                if data.special.is_some() {
                    return Err(invalid_move(data, "only status moves have special effects"));
                }
            }
        }
    }

    match Move::iter().find(|m| !seen_ids.contains(m)) {
        Some(missing) => Err(CatalogError::MissingMove(missing)),
        None => Ok(()),
    }
}

pub fn validate_species(species: &[SpeciesData]) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for data in species {
        if !seen_ids.insert(data.id) || !seen_names.insert(normalize_name(&data.name)) {
            return Err(CatalogError::Duplicate(data.name.clone()));
        }
        if data.moves.is_empty() || data.moves.len() > MAX_MOVES {
            return Err(CatalogError::InvalidSpecies {
                name: data.name.clone(),
                reason: format!("needs 1..={MAX_MOVES} moves, has {}", data.moves.len()),
            });
        }
        if data.base_stats.hp == 0 {
            return Err(CatalogError::InvalidSpecies {
                name: data.name.clone(),
                reason: "HP must be positive".to_string(),
            });
        }
    }

    match Species::iter().find(|s| !seen_ids.contains(s)) {
        Some(missing) => Err(CatalogError::MissingSpecies(missing)),
        None => Ok(()),
    }
}

pub fn encode<T: Serialize>(records: &[T]) -> Result<Vec<u8>, CatalogError> {
    postcard::to_allocvec(records).map_err(|e| CatalogError::Encoding(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, CatalogError> {
    postcard::from_bytes(bytes).map_err(|e| CatalogError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveCategory, PokemonType};
    use pretty_assertions::assert_eq;

    fn sample_move(id: Move, name: &str) -> MoveData {
        ron::from_str(&format!(
            r#"(id: {id:?}, name: "{name}", move_type: Normal, category: Physical,
                power: 40, accuracy: Percent(100), max_pp: 35)"#
        ))
        .expect("sample move should parse")
    }

    #[test]
    fn test_normalize_name_strips_punctuation_and_case() {
        assert_eq!(normalize_name("Will-O-Wisp"), "WILLOWISP");
        assert_eq!(normalize_name(" sunny_day "), "SUNNYDAY");
    }

    #[test]
    fn test_ron_defaults_fill_optional_fields() {
        let data = sample_move(Move::Slash, "Slash");
        assert_eq!(data.category, MoveCategory::Physical);
        assert_eq!(data.move_type, PokemonType::Normal);
        assert_eq!(data.effect_chance, 0);
        assert!(data.charge.is_none());
        assert!(!data.has_secondary_effects());
    }

    #[test]
    fn test_postcard_round_trip() {
        let moves = vec![sample_move(Move::Slash, "Slash"), sample_move(Move::Dig, "Dig")];
        let bytes = encode(&moves).expect("encode");
        let decoded: Vec<MoveData> = decode(&bytes).expect("decode");
        assert_eq!(decoded, moves);
    }

    #[test]
    fn test_validation_rejects_bad_pp_and_duplicates() {
        let mut bad_pp = sample_move(Move::Slash, "Slash");
        bad_pp.max_pp = 70;
        assert!(matches!(
            validate_moves(&[bad_pp]),
            Err(CatalogError::InvalidMove { .. })
        ));

        let duplicate = vec![sample_move(Move::Slash, "Slash"), sample_move(Move::Dig, "slash")];
        assert_eq!(
            validate_moves(&duplicate),
            Err(CatalogError::Duplicate("slash".to_string()))
        );
    }

    #[test]
    fn test_validation_reports_missing_moves() {
        let partial = vec![sample_move(Move::AquaTail, "Aqua Tail")];
        assert_eq!(validate_moves(&partial), Err(CatalogError::MissingMove(Move::Dig)));
    }
}

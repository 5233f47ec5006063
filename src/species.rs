use crate::catalog::{COMPILED_SPECIES_DATA, SPECIES_NAMES};
use crate::errors::{SpeciesDataError, SpeciesDataResult};
use schema::{normalize_name, Species, SpeciesData};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// The two starter trios offered to the player.
pub const STARTER_TEAMS: [[Species; 3]; 2] = [
    [Species::Bulbasaur, Species::Charmander, Species::Squirtle],
    [Species::Chikorita, Species::Cyndaquil, Species::Totodile],
];

/// The default opposing team.
pub const ENEMY_TEAM: [Species; 3] = [Species::Voltorb, Species::Wooper, Species::Snubbull];

static SPECIES_DATA: LazyLock<Result<HashMap<Species, SpeciesData>, SpeciesDataError>> =
    LazyLock::new(|| {
        let records: Vec<SpeciesData> = postcard::from_bytes(COMPILED_SPECIES_DATA)
            .map_err(|e| SpeciesDataError::CatalogDecode(e.to_string()))?;
        tracing::debug!(species = records.len(), "decoded species catalog");
        Ok(records.into_iter().map(|data| (data.id, data)).collect())
    });

pub fn get_species_data(species: Species) -> SpeciesDataResult<&'static SpeciesData> {
    let catalog = SPECIES_DATA.as_ref().map_err(Clone::clone)?;
    catalog
        .get(&species)
        .ok_or(SpeciesDataError::MissingSpeciesData(species))
}

/// Look a species up by name, ignoring case and punctuation.
pub fn find_species(name: &str) -> SpeciesDataResult<Species> {
    SPECIES_NAMES
        .get(normalize_name(name).as_str())
        .copied()
        .ok_or_else(|| SpeciesDataError::UnknownSpecies(name.to_string()))
}

/// Info-screen view of a species: typing, ability, stats and default moves.
pub struct SpeciesSummary<'a>(pub &'a SpeciesData);

impl fmt::Display for SpeciesSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 8;
        let data = self.0;
        let stats = &data.base_stats;

        writeln!(f, "{} [{}]", data.name, data.typing)?;
        writeln!(f, "Ability: {}", data.ability)?;
        for (label, value) in [
            ("HP", stats.hp),
            ("Attack", stats.atk),
            ("Defense", stats.def),
            ("Sp. Atk", stats.sp_atk),
            ("Sp. Def", stats.sp_def),
            ("Speed", stats.spe),
        ] {
            writeln!(f, "{:<LABEL_WIDTH$}: {}", label, value)?;
        }

        let moves: Vec<String> = data.moves.iter().map(ToString::to_string).collect();
        write!(f, "Moves: {}", moves.join(", "))
    }
}

pub fn describe_species(species: Species) -> SpeciesDataResult<String> {
    let data = get_species_data(species)?;
    Ok(SpeciesSummary(data).to_string())
}

use crate::{Move, Typing};
use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter, EnumCount,
    strum::Display,
)]
pub enum Species {
    Bulbasaur,
    Charmander,
    Squirtle,
    Voltorb,
    Chikorita,
    Cyndaquil,
    Totodile,
    Wooper,
    Snubbull,
    Pelipper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Ability {
    Overgrow,
    Blaze,
    Torrent,
    Static,
    #[strum(to_string = "Water Absorb")]
    WaterAbsorb,
    Intimidate,
    #[strum(to_string = "Keen Eye")]
    KeenEye,
    Comatose,
    #[strum(to_string = "Water Veil")]
    WaterVeil,
    #[strum(to_string = "Water Bubble")]
    WaterBubble,
    Immunity,
    #[strum(to_string = "Magma Armor")]
    MagmaArmor,
    Insomnia,
    #[strum(to_string = "Vital Spirit")]
    VitalSpirit,
    Limber,
    #[strum(to_string = "Sap Sipper")]
    SapSipper,
    #[strum(to_string = "Own Tempo")]
    OwnTempo,
}

/// Battle stats of a species at its default level. Accuracy and evasion sit at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub sp_atk: u16,
    pub sp_def: u16,
    pub spe: u16,
    #[serde(default = "BaseStats::default_hit_stat")]
    pub accuracy: u16,
    #[serde(default = "BaseStats::default_hit_stat")]
    pub evasion: u16,
}

impl BaseStats {
    fn default_hit_stat() -> u16 {
        100
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: Species,
    pub name: String,
    pub typing: Typing,
    pub ability: Ability,
    pub base_stats: BaseStats,
    pub moves: Vec<Move>,
    /// Weight in hectograms; feeds weight-scaled moves.
    #[serde(default)]
    pub weight: Option<u16>,
}

use crate::battle::state::TurnRng;
use crate::pokemon::{PokemonInst, STAGE_NEUTRAL};
use schema::{
    Accuracy, MoveCategory, MoveData, PokemonType, StatSource, StatType, VolatileStatus, Weather,
    WeatherAccuracy,
};

/// Multipliers for Atk through Spe, indexed by stored stage 0..=12.
pub const NORMAL_STAGE_MULTIPLIERS: [f64; 13] = [
    0.25, 0.286, 0.333, 0.4, 0.5, 0.66, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0,
];

/// Multipliers for accuracy and evasion, indexed by stored stage 0..=12.
pub const ACCURACY_STAGE_MULTIPLIERS: [f64; 13] = [
    0.333, 0.375, 0.429, 0.5, 0.6, 0.75, 1.0, 1.333, 1.666, 2.0, 2.333, 2.666, 3.0,
];

pub fn stage_multiplier(stage: u8) -> f64 {
    NORMAL_STAGE_MULTIPLIERS[stage.min(12) as usize]
}

pub fn accuracy_stage_multiplier(stage: u8) -> f64 {
    ACCURACY_STAGE_MULTIPLIERS[stage.min(12) as usize]
}

/// Speed used for turn order: `floor(spe × multiplier[stage])`.
pub fn effective_speed(pokemon: &PokemonInst) -> u32 {
    (pokemon.stat(StatType::Spe) as f64 * stage_multiplier(pokemon.stages.spe)).floor() as u32
}

/// The (offensive, defensive) stat pair a move reads.
pub fn stat_pair(move_data: &MoveData) -> (StatType, StatType) {
    match (move_data.stat_source, move_data.category) {
        (StatSource::PhysicalDefense, _) => (StatType::SpAtk, StatType::Def),
        (_, MoveCategory::Special) => (StatType::SpAtk, StatType::SpDef),
        _ => (StatType::Atk, StatType::Def),
    }
}

/// Stage-adjusted offensive stat. On a critical hit a lowered stage reads as neutral.
pub fn offensive_stat(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    critical: bool,
) -> f64 {
    let (stat, _) = stat_pair(move_data);
    let source = match move_data.stat_source {
        StatSource::TargetAttack => defender,
        _ => attacker,
    };
    let mut stage = source.stages.get(stat);
    if critical {
        stage = stage.max(STAGE_NEUTRAL);
    }
    source.stat(stat) as f64 * stage_multiplier(stage)
}

/// Stage-adjusted defensive stat. On a critical hit a raised stage reads as neutral.
pub fn defensive_stat(
    defender: &PokemonInst,
    move_data: &MoveData,
    critical: bool,
    weather: Weather,
) -> f64 {
    let (_, stat) = stat_pair(move_data);
    let mut stage = defender.stages.get(stat);
    if critical {
        stage = stage.min(STAGE_NEUTRAL);
    }
    let mut value = defender.stat(stat) as f64 * stage_multiplier(stage);
    if stat == StatType::SpDef
        && weather == Weather::Sandstorm
        && defender.typing.contains(PokemonType::Rock)
    {
        value *= 1.5;
    }
    value
}

/// Type-chart multiplier against the defender's current typing. A levitating
/// defender is immune to Ground moves.
pub fn get_type_effectiveness(move_type: PokemonType, defender: &PokemonInst) -> f64 {
    if move_type == PokemonType::Ground && defender.has_volatile(VolatileStatus::MagnetRisen) {
        return 0.0;
    }
    move_type.effectiveness_against(&defender.typing) as f64
}

/// Same-type attack bonus.
pub fn stab(move_type: PokemonType, attacker: &PokemonInst) -> f64 {
    if attacker.typing.contains(move_type) {
        1.5
    } else {
        1.0
    }
}

/// Effectiveness times STAB, as used by damage and by move selection.
pub fn matchup_multiplier(move_data: &MoveData, attacker: &PokemonInst, defender: &PokemonInst) -> f64 {
    get_type_effectiveness(move_data.move_type, defender) * stab(move_data.move_type, attacker)
}

/// Calculate if a move hits based on accuracy, evasion, weather and semi-invulnerability
/// Returns true if the move hits, false if it misses
pub fn move_hits(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    weather: Weather,
    rng: &mut TurnRng,
) -> bool {
    if let Some(state) = defender.invulnerability {
        if !move_data.can_hit_through(state) {
            return false;
        }
    }

    let base_accuracy = match move_data.accuracy {
        Accuracy::NeverMiss => return true,
        Accuracy::Percent(value) => value as f64,
    };

    if move_data.weather_accuracy == Some(WeatherAccuracy::SureHitInRain) && weather.is_rain() {
        return true;
    }

    let mut roll = rng.roll(100, "accuracy");
    if let Some(WeatherAccuracy::HailBonus(bonus)) = move_data.weather_accuracy {
        if weather == Weather::Hail {
            roll = roll.saturating_sub(bonus as u32);
        }
    }

    let threshold = base_accuracy * accuracy_stage_multiplier(attacker.stages.accuracy)
        / accuracy_stage_multiplier(defender.stages.evasion)
        * attacker.stat(StatType::Accuracy) as f64
        / defender.stat(StatType::Evasion).max(1) as f64;

    tracing::debug!(roll, threshold, "accuracy check");
    (roll + 1) as f64 <= threshold
}

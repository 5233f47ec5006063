//! Immunity and exclusivity rules for non-volatile and volatile statuses.

use crate::pokemon::PokemonInst;
use schema::{Ability, NonVolatileStatus, PokemonType, VolatileStatus};

/// Whether the combatant's typing or ability blocks a non-volatile status.
pub fn is_immune_to_status(pokemon: &PokemonInst, status: NonVolatileStatus) -> bool {
    if pokemon.ability == Ability::Comatose && status != NonVolatileStatus::Sleeping {
        return true;
    }
    let typing = &pokemon.typing;
    let ability = pokemon.ability;
    match status {
        NonVolatileStatus::Burned => {
            typing.contains(PokemonType::Fire)
                || matches!(ability, Ability::WaterVeil | Ability::WaterBubble)
        }
        NonVolatileStatus::Poisoned | NonVolatileStatus::BadlyPoisoned => {
            typing.contains(PokemonType::Poison)
                || typing.contains(PokemonType::Steel)
                || ability == Ability::Immunity
        }
        NonVolatileStatus::Frozen => {
            typing.contains(PokemonType::Ice) || ability == Ability::MagmaArmor
        }
        NonVolatileStatus::Sleeping | NonVolatileStatus::Resting => {
            matches!(ability, Ability::Insomnia | Ability::VitalSpirit)
        }
        NonVolatileStatus::Paralyzed => {
            typing.contains(PokemonType::Electric) || ability == Ability::Limber
        }
    }
}

/// Whether the combatant's typing, ability or current status blocks a volatile status.
pub fn is_immune_to_volatile(pokemon: &PokemonInst, status: VolatileStatus) -> bool {
    match status {
        VolatileStatus::Seeded => {
            pokemon.typing.contains(PokemonType::Grass) || pokemon.ability == Ability::SapSipper
        }
        VolatileStatus::Confused => pokemon.ability == Ability::OwnTempo,
        VolatileStatus::Yawning => {
            is_immune_to_status(pokemon, NonVolatileStatus::Sleeping)
                || pokemon.status.is_some()
                || pokemon.ability == Ability::Comatose
        }
        VolatileStatus::Substitute | VolatileStatus::MagnetRisen | VolatileStatus::MagicCoat => false,
    }
}

/// A status lands only on a conscious, non-immune combatant without one already.
/// Resting may replace Sleeping.
pub fn can_receive_status(pokemon: &PokemonInst, status: NonVolatileStatus) -> bool {
    if pokemon.is_fainted() || is_immune_to_status(pokemon, status) {
        return false;
    }
    match pokemon.status {
        None => true,
        Some(NonVolatileStatus::Sleeping) => status == NonVolatileStatus::Resting,
        Some(_) => false,
    }
}

/// A volatile status lands on a conscious, non-immune combatant that lacks it.
pub fn can_receive_volatile(pokemon: &PokemonInst, status: VolatileStatus) -> bool {
    !pokemon.is_fainted() && !pokemon.has_volatile(status) && !is_immune_to_volatile(pokemon, status)
}

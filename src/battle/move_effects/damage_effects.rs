// In: src/battle/move_effects/damage_effects.rs

use super::EffectContext;
use crate::battle::commands::BattleCommand;
use crate::battle::state::BattleState;

/// HP entry of a move. Damaging moves move a percentage of the damage dealt
/// (drain when positive, recoil when negative); status moves use a percentage
/// of the receiver's max HP.
pub(super) fn apply_hp_entry(
    context: &EffectContext,
    state: &BattleState,
    damage_dealt: u16,
) -> Vec<BattleCommand> {
    let percent = context.move_data.stat_changes.hp;
    if percent == 0 || (context.move_data.is_damaging() && damage_dealt == 0) {
        return Vec::new();
    }

    let target = context.effect_target();
    let Some(pokemon) = context.pokemon(state, target) else {
        return Vec::new();
    };
    if pokemon.is_fainted() {
        return Vec::new();
    }

    let basis = if context.move_data.is_damaging() {
        damage_dealt as u32
    } else {
        pokemon.max_hp as u32
    };
    let amount = (basis * percent.unsigned_abs() as u32 / 100) as u16;
    if amount == 0 {
        return Vec::new();
    }

    if percent > 0 {
        vec![BattleCommand::HealPokemon { target, amount }]
    } else {
        vec![BattleCommand::DealDamage { target, amount }]
    }
}

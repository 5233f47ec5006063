// In: src/battle/move_effects/status_effects.rs

use super::EffectContext;
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::conditions::{
    can_receive_status, can_receive_volatile, is_immune_to_status, is_immune_to_volatile,
};
use crate::battle::state::{ActionFailureReason, BattleEvent, BattleState, TurnRng};
use crate::battle::stats::get_type_effectiveness;
use crate::pokemon::StatusCounter;
use schema::{MoveData, NonVolatileStatus, VolatileStatus};

/// Turns a Yawn takes to put its target to sleep, counted down at end of turn.
pub const YAWN_TURNS: u8 = 2;

pub(super) fn move_failed(context: &EffectContext, state: &BattleState) -> Vec<BattleCommand> {
    match context.pokemon(state, context.attacker) {
        Some(user) => vec![BattleCommand::EmitEvent(BattleEvent::ActionFailed {
            pokemon: user.species,
            reason: ActionFailureReason::MoveFailed,
        })],
        None => Vec::new(),
    }
}

fn immune(context: &EffectContext, state: &BattleState, target: PlayerTarget) -> Vec<BattleCommand> {
    match context.pokemon(state, target) {
        Some(pokemon) => vec![BattleCommand::EmitEvent(BattleEvent::Immune {
            target: pokemon.species,
        })],
        None => Vec::new(),
    }
}

/// Commands that put `status` on `target`, with any counter the status needs.
pub fn inflict_status_commands(
    target: PlayerTarget,
    species: schema::Species,
    status: NonVolatileStatus,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let mut commands = vec![BattleCommand::SetPokemonStatus {
        target,
        status: Some(status),
    }];
    match status {
        NonVolatileStatus::Sleeping => commands.push(BattleCommand::SetStatusCounter {
            target,
            counter: StatusCounter::Sleep,
            value: rng.roll(3, "sleep duration") as u8 + 1,
        }),
        NonVolatileStatus::BadlyPoisoned => commands.push(BattleCommand::SetStatusCounter {
            target,
            counter: StatusCounter::Toxic,
            value: 0,
        }),
        _ => {}
    }
    commands.push(BattleCommand::EmitEvent(BattleEvent::StatusApplied {
        target: species,
        status,
    }));
    commands
}

pub(super) fn apply_status_infliction(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let Some(status) = context.move_data.status_effect else {
        return Vec::new();
    };
    let target = context.effect_target();
    let Some(pokemon) = context.pokemon(state, target) else {
        return Vec::new();
    };

    if can_receive_status(pokemon, status) {
        // A status move against a type-chart immunity (Thunder Wave on Ground) does nothing.
        let chart_immune = context.is_status_move()
            && get_type_effectiveness(context.move_data.move_type, pokemon) == 0.0;
        if !chart_immune {
            return inflict_status_commands(target, pokemon.species, status, rng);
        }
    }

    if !context.is_status_move() || pokemon.is_fainted() {
        return Vec::new();
    }
    if is_immune_to_status(pokemon, status)
        || get_type_effectiveness(context.move_data.move_type, pokemon) == 0.0
    {
        immune(context, state, target)
    } else {
        move_failed(context, state)
    }
}

pub(super) fn apply_volatile_infliction(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let target = context.effect_target();
    let Some(pokemon) = context.pokemon(state, target) else {
        return Vec::new();
    };

    let mut commands = Vec::new();
    for &status in &context.move_data.volatile_effects {
        if can_receive_volatile(pokemon, status) {
            commands.push(BattleCommand::AddVolatile { target, status });
            match status {
                VolatileStatus::Confused => commands.push(BattleCommand::SetStatusCounter {
                    target,
                    counter: StatusCounter::Confusion,
                    value: rng.roll(4, "confusion duration") as u8 + 2,
                }),
                VolatileStatus::Yawning => commands.push(BattleCommand::SetStatusCounter {
                    target,
                    counter: StatusCounter::Yawn,
                    value: YAWN_TURNS,
                }),
                _ => {}
            }
            commands.push(BattleCommand::EmitEvent(BattleEvent::VolatileApplied {
                target: pokemon.species,
                status,
            }));
        } else if context.is_status_move() && !pokemon.is_fainted() {
            if is_immune_to_volatile(pokemon, status) {
                commands.extend(immune(context, state, target));
            } else {
                commands.extend(move_failed(context, state));
            }
        }
    }
    commands
}

/// Moves that thaw a frozen target do so on any hit, independent of the effect chance.
pub fn apply_thaw_on_hit(
    move_data: &MoveData,
    defender: PlayerTarget,
    state: &BattleState,
) -> Vec<BattleCommand> {
    if !move_data.thaws_target {
        return Vec::new();
    }
    match state.active(defender) {
        Some(pokemon)
            if pokemon.status == Some(NonVolatileStatus::Frozen) && !pokemon.is_fainted() =>
        {
            vec![
                BattleCommand::SetPokemonStatus {
                    target: defender,
                    status: None,
                },
                BattleCommand::EmitEvent(BattleEvent::StatusRemoved {
                    target: pokemon.species,
                    status: NonVolatileStatus::Frozen,
                }),
            ]
        }
        _ => Vec::new(),
    }
}

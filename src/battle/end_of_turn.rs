//! Residual effects once both sides have acted: weather countdown, status and
//! Leech Seed damage, Yawn, and expiry of timed conditions.

use crate::battle::commands::{execute_command_batch, BattleCommand, PlayerTarget};
use crate::battle::conditions::can_receive_status;
use crate::battle::move_effects::inflict_status_commands;
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng};
use crate::errors::ExecutionError;
use crate::pokemon::{PokemonInst, StatusCounter};
use schema::{NonVolatileStatus, VolatileStatus, Weather};

const SIDES: [PlayerTarget; 2] = [PlayerTarget::Player, PlayerTarget::Opponent];

pub fn execute_end_turn_phase(
    state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> Result<(), ExecutionError> {
    execute_command_batch(weather_countdown(state), state, bus)?;

    for side in SIDES {
        execute_command_batch(status_damage(side, state), state, bus)?;
        execute_command_batch(leech_seed(side, state), state, bus)?;
    }

    for side in SIDES {
        let commands = yawn(side, state, rng);
        execute_command_batch(commands, state, bus)?;
        execute_command_batch(volatile_expiry(side, state), state, bus)?;

        for condition in state.player_mut(side).tick_team_conditions() {
            bus.push(BattleEvent::TeamConditionExpired {
                player_index: side.to_index(),
                condition,
            });
        }
    }
    Ok(())
}

fn weather_countdown(state: &BattleState) -> Vec<BattleCommand> {
    let Some(turns) = state.weather_turns else {
        return Vec::new();
    };
    let weather = state.weather;
    match turns.saturating_sub(1) {
        0 => vec![
            BattleCommand::SetWeather {
                weather: Weather::None,
                turns: None,
            },
            BattleCommand::EmitEvent(BattleEvent::WeatherEnded { weather }),
        ],
        remaining => vec![BattleCommand::SetWeather {
            weather,
            turns: Some(remaining),
        }],
    }
}

/// Burn takes 1/16, poison 1/8, and bad poison n/16 where n grows each turn.
pub fn status_damage(target: PlayerTarget, state: &BattleState) -> Vec<BattleCommand> {
    let Some(pokemon) = state.active(target) else {
        return Vec::new();
    };
    let Some(status) = pokemon.status else {
        return Vec::new();
    };
    if pokemon.is_fainted() {
        return Vec::new();
    }

    let max_hp = pokemon.max_hp as u32;
    let mut commands = Vec::new();
    let amount = match status {
        NonVolatileStatus::Burned => max_hp / 16,
        NonVolatileStatus::Poisoned => max_hp / 8,
        NonVolatileStatus::BadlyPoisoned => {
            let n = pokemon.counter(StatusCounter::Toxic).saturating_add(1);
            commands.push(BattleCommand::SetStatusCounter {
                target,
                counter: StatusCounter::Toxic,
                value: n,
            });
            max_hp * n as u32 / 16
        }
        _ => return Vec::new(),
    };

    commands.push(BattleCommand::DealStatusDamage {
        target,
        status,
        amount: amount.max(1) as u16,
    });
    commands
}

/// A seeded combatant loses 1/8 of its max HP to the other side's active combatant.
pub fn leech_seed(target: PlayerTarget, state: &BattleState) -> Vec<BattleCommand> {
    let Some(pokemon) = state.active(target) else {
        return Vec::new();
    };
    if pokemon.is_fainted() || !pokemon.has_volatile(VolatileStatus::Seeded) {
        return Vec::new();
    }

    let amount = (pokemon.max_hp / 8).max(1).min(pokemon.current_hp());
    let mut commands = vec![BattleCommand::DrainSeed { target, amount }];

    let receiver = target.other();
    if state
        .active(receiver)
        .is_some_and(|pokemon| !pokemon.is_fainted())
    {
        commands.push(BattleCommand::HealPokemon {
            target: receiver,
            amount,
        });
    }
    commands
}

fn yawn(target: PlayerTarget, state: &BattleState, rng: &mut TurnRng) -> Vec<BattleCommand> {
    let Some(pokemon) = state.active(target) else {
        return Vec::new();
    };
    if pokemon.is_fainted() || !pokemon.has_volatile(VolatileStatus::Yawning) {
        return Vec::new();
    }

    let remaining = pokemon.counter(StatusCounter::Yawn).saturating_sub(1);
    if remaining > 0 {
        return vec![BattleCommand::SetStatusCounter {
            target,
            counter: StatusCounter::Yawn,
            value: remaining,
        }];
    }

    let mut commands = vec![
        BattleCommand::RemoveVolatile {
            target,
            status: VolatileStatus::Yawning,
        },
        BattleCommand::SetStatusCounter {
            target,
            counter: StatusCounter::Yawn,
            value: 0,
        },
    ];
    if can_receive_status(pokemon, NonVolatileStatus::Sleeping) {
        commands.extend(inflict_status_commands(
            target,
            pokemon.species,
            NonVolatileStatus::Sleeping,
            rng,
        ));
    }
    commands
}

fn volatile_expiry(target: PlayerTarget, state: &BattleState) -> Vec<BattleCommand> {
    let Some(pokemon) = state.active(target) else {
        return Vec::new();
    };
    let mut commands = Vec::new();

    if pokemon.has_volatile(VolatileStatus::MagicCoat) {
        commands.extend(remove_volatile(target, pokemon, VolatileStatus::MagicCoat));
    }
    if pokemon.has_volatile(VolatileStatus::MagnetRisen) {
        match pokemon.counter(StatusCounter::MagnetRise).saturating_sub(1) {
            0 => commands.extend(remove_volatile(target, pokemon, VolatileStatus::MagnetRisen)),
            remaining => commands.push(BattleCommand::SetStatusCounter {
                target,
                counter: StatusCounter::MagnetRise,
                value: remaining,
            }),
        }
    }
    commands
}

fn remove_volatile(target: PlayerTarget, pokemon: &PokemonInst, status: VolatileStatus) -> [BattleCommand; 2] {
    [
        BattleCommand::RemoveVolatile { target, status },
        BattleCommand::EmitEvent(BattleEvent::VolatileRemoved {
            target: pokemon.species,
            status,
        }),
    ]
}

use crate::battle::state::{BattleEvent, BattleState, EventBus};
use crate::errors::ExecutionError;
use crate::pokemon::{PokemonInst, StatusCounter};
use schema::{Invulnerability, NonVolatileStatus, StatType, TeamCondition, VolatileStatus, Weather};
use serde::{Deserialize, Serialize};

/// Side of the battle a command applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerTarget {
    Player,
    Opponent,
}

impl PlayerTarget {
    pub fn to_index(self) -> usize {
        match self {
            PlayerTarget::Player => 0,
            PlayerTarget::Opponent => 1,
        }
    }

    pub fn other(self) -> PlayerTarget {
        match self {
            PlayerTarget::Player => PlayerTarget::Opponent,
            PlayerTarget::Opponent => PlayerTarget::Player,
        }
    }

    /// Index 0 is the player; anything else is the opponent.
    pub fn from_index(index: usize) -> PlayerTarget {
        if index == 0 {
            PlayerTarget::Player
        } else {
            PlayerTarget::Opponent
        }
    }
}

/// Atomic commands representing final state changes
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    EmitEvent(BattleEvent),

    // HP
    DealDamage {
        target: PlayerTarget,
        amount: u16,
    },
    DealStatusDamage {
        target: PlayerTarget,
        status: NonVolatileStatus,
        amount: u16,
    },
    DrainSeed {
        target: PlayerTarget,
        amount: u16,
    },
    DamageSubstitute {
        target: PlayerTarget,
        amount: u16,
    },
    HealPokemon {
        target: PlayerTarget,
        amount: u16,
    },

    // Statuses
    SetPokemonStatus {
        target: PlayerTarget,
        status: Option<NonVolatileStatus>,
    },
    SetStatusCounter {
        target: PlayerTarget,
        counter: StatusCounter,
        value: u8,
    },
    ChangeStatStage {
        target: PlayerTarget,
        stat: StatType,
        delta: i8,
    },
    AddVolatile {
        target: PlayerTarget,
        status: VolatileStatus,
    },
    RemoveVolatile {
        target: PlayerTarget,
        status: VolatileStatus,
    },
    SetSubstitute {
        target: PlayerTarget,
        hp: u16,
    },

    // Two-turn moves
    SetCharging {
        target: PlayerTarget,
        move_slot: usize,
        charging: bool,
    },
    SetInvulnerability {
        target: PlayerTarget,
        state: Option<Invulnerability>,
    },
    UsePp {
        target: PlayerTarget,
        move_slot: usize,
    },

    // Field
    SetWeather {
        weather: Weather,
        turns: Option<u8>,
    },
    AddTeamCondition {
        target: PlayerTarget,
        condition: TeamCondition,
        turns: u8,
    },
    RemoveTeamCondition {
        target: PlayerTarget,
        condition: TeamCondition,
    },
}

/// Execute a batch of commands in order, stopping at the first failure
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    for command in commands {
        execute_command(command, state, bus)?;
    }
    Ok(())
}

/// Helper function to execute commands that operate on the active Pokemon
fn execute_pokemon_command<F>(
    target: PlayerTarget,
    state: &mut BattleState,
    operation: F,
) -> Result<(), ExecutionError>
where
    F: FnOnce(&mut PokemonInst) -> Result<(), ExecutionError>,
{
    match state.active_mut(target) {
        Some(pokemon) => operation(pokemon),
        None => Err(ExecutionError::NoPokemon),
    }
}

/// Apply HP loss and report a faint. A fainting combatant drops any charge in progress.
fn apply_hp_loss(
    target: PlayerTarget,
    amount: u16,
    state: &mut BattleState,
    bus: &mut EventBus,
    event: impl FnOnce(&PokemonInst) -> BattleEvent,
) -> Result<(), ExecutionError> {
    let pokemon = state.active_mut(target).ok_or(ExecutionError::NoPokemon)?;
    let did_faint = pokemon.take_damage(amount);
    bus.push(event(pokemon));

    if did_faint {
        pokemon.clear_volatile_state();
        tracing::debug!(pokemon = %pokemon.species, "fainted");
        bus.push(BattleEvent::PokemonFainted {
            player_index: target.to_index(),
            pokemon: pokemon.species,
        });
    }
    Ok(())
}

pub fn execute_command(
    command: BattleCommand,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    match command {
        BattleCommand::EmitEvent(event) => {
            bus.push(event);
            Ok(())
        }
        BattleCommand::DealDamage { target, amount } => {
            apply_hp_loss(target, amount, state, bus, |pokemon| BattleEvent::DamageDealt {
                target: pokemon.species,
                damage: amount,
                remaining_hp: pokemon.current_hp(),
            })
        }
        BattleCommand::DealStatusDamage { target, status, amount } => {
            apply_hp_loss(target, amount, state, bus, |pokemon| BattleEvent::StatusDamage {
                target: pokemon.species,
                status,
                damage: amount,
                remaining_hp: pokemon.current_hp(),
            })
        }
        BattleCommand::DrainSeed { target, amount } => {
            apply_hp_loss(target, amount, state, bus, |pokemon| BattleEvent::SeedDrained {
                target: pokemon.species,
                damage: amount,
                remaining_hp: pokemon.current_hp(),
            })
        }
        BattleCommand::DamageSubstitute { target, amount } => {
            execute_pokemon_command(target, state, |pokemon| {
                let remaining = pokemon.counters.substitute_hp.saturating_sub(amount);
                pokemon.counters.substitute_hp = remaining;
                bus.push(BattleEvent::SubstituteDamaged {
                    target: pokemon.species,
                    damage: amount,
                });
                if remaining == 0 {
                    pokemon.remove_volatile(VolatileStatus::Substitute);
                    bus.push(BattleEvent::SubstituteBroke {
                        target: pokemon.species,
                    });
                }
                Ok(())
            })
        }
        BattleCommand::HealPokemon { target, amount } => {
            execute_pokemon_command(target, state, |pokemon| {
                let restored = pokemon.heal(amount);
                if restored > 0 {
                    bus.push(BattleEvent::PokemonHealed {
                        target: pokemon.species,
                        amount: restored,
                        new_hp: pokemon.current_hp(),
                    });
                }
                Ok(())
            })
        }
        BattleCommand::SetPokemonStatus { target, status } => {
            execute_pokemon_command(target, state, |pokemon| {
                pokemon.status = status;
                Ok(())
            })
        }
        BattleCommand::SetStatusCounter { target, counter, value } => {
            execute_pokemon_command(target, state, |pokemon| {
                pokemon.set_counter(counter, value);
                Ok(())
            })
        }
        BattleCommand::ChangeStatStage { target, stat, delta } => {
            execute_pokemon_command(target, state, |pokemon| {
                let (old_stage, new_stage) = pokemon.stages.apply_delta(stat, delta);
                if old_stage == new_stage {
                    bus.push(BattleEvent::StatChangeBlocked {
                        target: pokemon.species,
                        stat,
                        rising: delta > 0,
                    });
                } else {
                    bus.push(BattleEvent::StatStageChanged {
                        target: pokemon.species,
                        stat,
                        old_stage,
                        new_stage,
                    });
                }
                Ok(())
            })
        }
        BattleCommand::AddVolatile { target, status } => {
            execute_pokemon_command(target, state, |pokemon| {
                pokemon.add_volatile(status);
                Ok(())
            })
        }
        BattleCommand::RemoveVolatile { target, status } => {
            execute_pokemon_command(target, state, |pokemon| {
                pokemon.remove_volatile(status);
                Ok(())
            })
        }
        BattleCommand::SetSubstitute { target, hp } => {
            execute_pokemon_command(target, state, |pokemon| {
                pokemon.counters.substitute_hp = hp;
                Ok(())
            })
        }
        BattleCommand::SetCharging { target, move_slot, charging } => {
            execute_pokemon_command(target, state, |pokemon| {
                let slot = pokemon
                    .moves
                    .get_mut(move_slot)
                    .ok_or(ExecutionError::InvalidMoveSlot(move_slot))?;
                slot.charging = charging;
                Ok(())
            })
        }
        BattleCommand::SetInvulnerability { target, state: invulnerability } => {
            execute_pokemon_command(target, state, |pokemon| {
                pokemon.invulnerability = invulnerability;
                Ok(())
            })
        }
        BattleCommand::UsePp { target, move_slot } => {
            execute_pokemon_command(target, state, |pokemon| {
                let slot = pokemon
                    .moves
                    .get_mut(move_slot)
                    .ok_or(ExecutionError::InvalidMoveSlot(move_slot))?;
                slot.use_move();
                Ok(())
            })
        }
        BattleCommand::SetWeather { weather, turns } => {
            state.weather = weather;
            state.weather_turns = turns;
            Ok(())
        }
        BattleCommand::AddTeamCondition { target, condition, turns } => {
            state.player_mut(target).add_team_condition(condition, turns);
            Ok(())
        }
        BattleCommand::RemoveTeamCondition { target, condition } => {
            state.player_mut(target).remove_team_condition(condition);
            Ok(())
        }
    }
}

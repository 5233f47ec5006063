// In: src/battle/move_effects/special_effects.rs

use super::EffectContext;
use super::status_effects::move_failed;
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::conditions::is_immune_to_status;
use crate::battle::state::{BattleEvent, BattleState};
use crate::pokemon::{PokemonInst, StatusCounter};
use schema::{NonVolatileStatus, StatusMoveEffect, TeamCondition, VolatileStatus, Weather};

pub const WEATHER_TURNS: u8 = 5;
pub const SCREEN_TURNS: u8 = 5;
pub const MAGNET_RISE_TURNS: u8 = 5;
pub const REST_TURNS: u8 = 2;

/// Effects of status moves beyond stat and status changes.
pub fn apply_special_effect(
    effect: StatusMoveEffect,
    context: &EffectContext,
    state: &BattleState,
) -> Vec<BattleCommand> {
    let user_target = context.attacker;
    let Some(user) = state.active(user_target) else {
        return Vec::new();
    };

    let commands = match effect {
        StatusMoveEffect::SetWeather(weather) => apply_set_weather(weather, state),
        StatusMoveEffect::WeatherHeal => apply_weather_heal(user_target, user, state.weather),
        StatusMoveEffect::Rest => apply_rest(user_target, user),
        StatusMoveEffect::Substitute => apply_substitute(user_target, user),
        StatusMoveEffect::Screen(condition) => apply_screen(user_target, condition, state),
        StatusMoveEffect::MagnetRise => apply_magnet_rise(user_target, user),
        StatusMoveEffect::MagicCoat => vec![
            BattleCommand::AddVolatile {
                target: user_target,
                status: VolatileStatus::MagicCoat,
            },
            BattleCommand::EmitEvent(BattleEvent::VolatileApplied {
                target: user.species,
                status: VolatileStatus::MagicCoat,
            }),
        ],
        // Switching is not modelled, so forcing one always fails.
        StatusMoveEffect::ForceSwitch => Vec::new(),
    };

    if commands.is_empty() {
        move_failed(context, state)
    } else {
        commands
    }
}

fn apply_set_weather(weather: Weather, state: &BattleState) -> Vec<BattleCommand> {
    if state.weather == weather {
        return Vec::new();
    }
    vec![
        BattleCommand::SetWeather {
            weather,
            turns: Some(WEATHER_TURNS),
        },
        BattleCommand::EmitEvent(BattleEvent::WeatherChanged { weather }),
    ]
}

/// Half of max HP in clear skies, two thirds in sun, a quarter in any other weather.
pub fn weather_heal_amount(max_hp: u16, weather: Weather) -> u16 {
    let max_hp = max_hp as u32;
    let amount = match weather {
        Weather::None | Weather::StrongWinds => max_hp / 2,
        w if w.is_sun() => max_hp * 2 / 3,
        _ => max_hp / 4,
    };
    amount as u16
}

fn apply_weather_heal(target: PlayerTarget, user: &PokemonInst, weather: Weather) -> Vec<BattleCommand> {
    if user.current_hp() >= user.max_hp {
        return Vec::new();
    }
    vec![BattleCommand::HealPokemon {
        target,
        amount: weather_heal_amount(user.max_hp, weather),
    }]
}

fn apply_rest(target: PlayerTarget, user: &PokemonInst) -> Vec<BattleCommand> {
    if user.current_hp() >= user.max_hp
        || user.status == Some(NonVolatileStatus::Resting)
        || is_immune_to_status(user, NonVolatileStatus::Resting)
    {
        return Vec::new();
    }

    let mut commands = Vec::new();
    if let Some(previous) = user.status {
        commands.push(BattleCommand::EmitEvent(BattleEvent::StatusRemoved {
            target: user.species,
            status: previous,
        }));
    }
    commands.extend([
        BattleCommand::SetPokemonStatus {
            target,
            status: Some(NonVolatileStatus::Resting),
        },
        BattleCommand::SetStatusCounter {
            target,
            counter: StatusCounter::Sleep,
            value: REST_TURNS,
        },
        BattleCommand::EmitEvent(BattleEvent::StatusApplied {
            target: user.species,
            status: NonVolatileStatus::Resting,
        }),
        BattleCommand::HealPokemon {
            target,
            amount: user.max_hp - user.current_hp(),
        },
    ]);
    commands
}

fn apply_substitute(target: PlayerTarget, user: &PokemonInst) -> Vec<BattleCommand> {
    let cost = user.max_hp / 4;
    if user.has_volatile(VolatileStatus::Substitute) || user.current_hp() <= cost {
        return Vec::new();
    }
    vec![
        BattleCommand::DealDamage { target, amount: cost },
        BattleCommand::AddVolatile {
            target,
            status: VolatileStatus::Substitute,
        },
        BattleCommand::SetSubstitute { target, hp: cost },
        BattleCommand::EmitEvent(BattleEvent::VolatileApplied {
            target: user.species,
            status: VolatileStatus::Substitute,
        }),
    ]
}

fn apply_screen(target: PlayerTarget, condition: TeamCondition, state: &BattleState) -> Vec<BattleCommand> {
    if state.player(target).has_team_condition(condition) {
        return Vec::new();
    }
    vec![
        BattleCommand::AddTeamCondition {
            target,
            condition,
            turns: SCREEN_TURNS,
        },
        BattleCommand::EmitEvent(BattleEvent::TeamConditionApplied {
            player_index: target.to_index(),
            condition,
        }),
    ]
}

fn apply_magnet_rise(target: PlayerTarget, user: &PokemonInst) -> Vec<BattleCommand> {
    if user.has_volatile(VolatileStatus::MagnetRisen) {
        return Vec::new();
    }
    vec![
        BattleCommand::AddVolatile {
            target,
            status: VolatileStatus::MagnetRisen,
        },
        BattleCommand::SetStatusCounter {
            target,
            counter: StatusCounter::MagnetRise,
            value: MAGNET_RISE_TURNS,
        },
        BattleCommand::EmitEvent(BattleEvent::VolatileApplied {
            target: user.species,
            status: VolatileStatus::MagnetRisen,
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::ActionFailureReason;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use crate::move_data::get_move_data;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Move, Species};

    fn failed(species: Species) -> Vec<BattleCommand> {
        vec![BattleCommand::EmitEvent(BattleEvent::ActionFailed {
            pokemon: species,
            reason: ActionFailureReason::MoveFailed,
        })]
    }

    fn special_for(move_: Move) -> (StatusMoveEffect, &'static schema::MoveData) {
        let data = get_move_data(move_).unwrap();
        (data.special.unwrap(), data)
    }

    #[rstest]
    #[case(Weather::None, 52)]
    #[case(Weather::Sun, 70)]
    #[case(Weather::Rain, 26)]
    #[case(Weather::Sandstorm, 26)]
    fn test_synthesis_heal_by_weather(#[case] weather: Weather, #[case] expected: u16) {
        assert_eq!(weather_heal_amount(105, weather), expected);
    }

    #[test]
    fn test_rest_cures_and_fully_heals() {
        let state = create_test_battle(
            TestPokemonBuilder::new(Species::Wooper)
                .with_hp(40)
                .with_status(NonVolatileStatus::Burned)
                .build(),
            TestPokemonBuilder::new(Species::Snubbull).build(),
        );
        let (effect, data) = special_for(Move::Rest);
        let context = EffectContext::new(PlayerTarget::Player, PlayerTarget::Opponent, data);

        let commands = apply_special_effect(effect, &context, &state);
        assert!(commands.contains(&BattleCommand::SetPokemonStatus {
            target: PlayerTarget::Player,
            status: Some(NonVolatileStatus::Resting),
        }));
        assert!(commands.contains(&BattleCommand::HealPokemon {
            target: PlayerTarget::Player,
            amount: 75,
        }));
    }

    #[test]
    fn test_rest_fails_at_full_hp() {
        let state = create_test_battle(
            TestPokemonBuilder::new(Species::Wooper).build(),
            TestPokemonBuilder::new(Species::Snubbull).build(),
        );
        let (effect, data) = special_for(Move::Rest);
        let context = EffectContext::new(PlayerTarget::Player, PlayerTarget::Opponent, data);
        assert_eq!(apply_special_effect(effect, &context, &state), failed(Species::Wooper));
    }

    #[test]
    fn test_substitute_costs_a_quarter_and_needs_hp() {
        let state = create_test_battle(
            TestPokemonBuilder::new(Species::Squirtle).build(),
            TestPokemonBuilder::new(Species::Totodile).build(),
        );
        let (effect, data) = special_for(Move::Substitute);
        let context = EffectContext::new(PlayerTarget::Player, PlayerTarget::Opponent, data);
        let commands = apply_special_effect(effect, &context, &state);
        assert_eq!(
            commands[0],
            BattleCommand::DealDamage {
                target: PlayerTarget::Player,
                amount: 26,
            }
        );

        let weak = create_test_battle(
            TestPokemonBuilder::new(Species::Squirtle).with_hp(26).build(),
            TestPokemonBuilder::new(Species::Totodile).build(),
        );
        assert_eq!(apply_special_effect(effect, &context, &weak), failed(Species::Squirtle));
    }

    #[test]
    fn test_screens_and_weather_do_not_stack() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Chikorita).build(),
            TestPokemonBuilder::new(Species::Cyndaquil).build(),
        );
        let (reflect, reflect_data) = special_for(Move::Reflect);
        let context = EffectContext::new(PlayerTarget::Player, PlayerTarget::Opponent, reflect_data);
        assert_eq!(apply_special_effect(reflect, &context, &state).len(), 2);

        state.players[0].add_team_condition(TeamCondition::Reflect, 3);
        assert_eq!(apply_special_effect(reflect, &context, &state), failed(Species::Chikorita));

        let (sunny_day, sunny_data) = special_for(Move::SunnyDay);
        let context = EffectContext::new(PlayerTarget::Opponent, PlayerTarget::Player, sunny_data);
        assert_eq!(
            apply_special_effect(sunny_day, &context, &state)[0],
            BattleCommand::SetWeather {
                weather: Weather::Sun,
                turns: Some(WEATHER_TURNS),
            }
        );
        state.weather = Weather::Sun;
        assert_eq!(apply_special_effect(sunny_day, &context, &state), failed(Species::Cyndaquil));
    }

    #[test]
    fn test_roar_always_fails() {
        let state = create_test_battle(
            TestPokemonBuilder::new(Species::Snubbull).build(),
            TestPokemonBuilder::new(Species::Wooper).build(),
        );
        let (effect, data) = special_for(Move::Roar);
        let context = EffectContext::new(PlayerTarget::Player, PlayerTarget::Opponent, data);
        assert_eq!(apply_special_effect(effect, &context, &state), failed(Species::Snubbull));
    }
}

//! Charge and release of two-turn moves.
//!
//! A move with a `ChargeKind` spends its first action charging: the slot is
//! flagged and, for the hiding kinds, the user becomes semi-invulnerable. The
//! next action releases it and the move resolves normally.

use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::state::BattleEvent;
use crate::pokemon::PokemonInst;
use schema::{ChargeKind, MoveData, Weather};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStep {
    /// The move resolves this action.
    Ready,
    /// The action ends after the charge commands.
    Charging,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeResolution {
    pub step: ChargeStep,
    pub commands: Vec<BattleCommand>,
}

impl ChargeResolution {
    fn ready(commands: Vec<BattleCommand>) -> Self {
        Self {
            step: ChargeStep::Ready,
            commands,
        }
    }
}

/// Solar Beam needs no charge under a harsh sun.
pub fn charge_waived(kind: ChargeKind, weather: Weather) -> bool {
    kind == ChargeKind::SolarCharge && weather.is_sun()
}

pub fn resolve_charge(
    target: PlayerTarget,
    user: &PokemonInst,
    move_slot: usize,
    move_data: &MoveData,
    weather: Weather,
) -> ChargeResolution {
    let Some(kind) = move_data.charge else {
        return ChargeResolution::ready(Vec::new());
    };

    let releasing = user
        .moves
        .get(move_slot)
        .is_some_and(|slot| slot.charging);
    if releasing {
        return ChargeResolution::ready(release_commands(target, move_slot));
    }

    if charge_waived(kind, weather) {
        tracing::debug!(move_used = %move_data.id, "charge waived by weather");
        return ChargeResolution::ready(Vec::new());
    }

    let mut commands = vec![BattleCommand::SetCharging {
        target,
        move_slot,
        charging: true,
    }];
    if let Some(state) = kind.invulnerability() {
        commands.push(BattleCommand::SetInvulnerability {
            target,
            state: Some(state),
        });
    }
    commands.push(BattleCommand::EmitEvent(BattleEvent::ChargingStarted {
        pokemon: user.species,
        move_used: move_data.id,
        kind,
    }));

    ChargeResolution {
        step: ChargeStep::Charging,
        commands,
    }
}

fn release_commands(target: PlayerTarget, move_slot: usize) -> Vec<BattleCommand> {
    vec![
        BattleCommand::SetCharging {
            target,
            move_slot,
            charging: false,
        },
        BattleCommand::SetInvulnerability {
            target,
            state: None,
        },
    ]
}

/// Drop a charge in progress, e.g. when the action is prevented.
pub fn cancel_charge(target: PlayerTarget, user: &PokemonInst) -> Vec<BattleCommand> {
    match user.charging_move_index() {
        Some(move_slot) => release_commands(target, move_slot),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_data::get_move_data;
    use crate::pokemon::DEFAULT_LEVEL;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Invulnerability, Move, Species};

    fn pokemon(species: Species) -> PokemonInst {
        PokemonInst::new(species, DEFAULT_LEVEL).unwrap()
    }

    #[test]
    fn test_dig_charges_underground() {
        let charmander = pokemon(Species::Charmander);
        let dig = get_move_data(Move::Dig).unwrap();

        let resolution = resolve_charge(PlayerTarget::Player, &charmander, 1, dig, Weather::None);
        assert_eq!(resolution.step, ChargeStep::Charging);
        assert_eq!(
            resolution.commands,
            vec![
                BattleCommand::SetCharging {
                    target: PlayerTarget::Player,
                    move_slot: 1,
                    charging: true,
                },
                BattleCommand::SetInvulnerability {
                    target: PlayerTarget::Player,
                    state: Some(Invulnerability::Underground),
                },
                BattleCommand::EmitEvent(BattleEvent::ChargingStarted {
                    pokemon: Species::Charmander,
                    move_used: Move::Dig,
                    kind: ChargeKind::Dig,
                }),
            ]
        );
    }

    #[test]
    fn test_second_action_releases() {
        let mut charmander = pokemon(Species::Charmander);
        charmander.moves[1].charging = true;
        charmander.invulnerability = Some(Invulnerability::Underground);
        let dig = get_move_data(Move::Dig).unwrap();

        let resolution = resolve_charge(PlayerTarget::Player, &charmander, 1, dig, Weather::None);
        assert_eq!(resolution.step, ChargeStep::Ready);
        assert_eq!(resolution.commands, release_commands(PlayerTarget::Player, 1));
    }

    #[rstest]
    #[case(Weather::None, ChargeStep::Charging)]
    #[case(Weather::Rain, ChargeStep::Charging)]
    #[case(Weather::Sun, ChargeStep::Ready)]
    #[case(Weather::HarshSun, ChargeStep::Ready)]
    fn test_solar_beam_charge_by_weather(#[case] weather: Weather, #[case] expected: ChargeStep) {
        let cyndaquil = pokemon(Species::Cyndaquil);
        let solar_beam = get_move_data(Move::SolarBeam).unwrap();
        let resolution = resolve_charge(PlayerTarget::Opponent, &cyndaquil, 3, solar_beam, weather);
        assert_eq!(resolution.step, expected);
    }

    #[test]
    fn test_solar_charge_grants_no_invulnerability() {
        let cyndaquil = pokemon(Species::Cyndaquil);
        let solar_beam = get_move_data(Move::SolarBeam).unwrap();
        let resolution = resolve_charge(PlayerTarget::Player, &cyndaquil, 3, solar_beam, Weather::None);
        assert!(!resolution
            .commands
            .iter()
            .any(|c| matches!(c, BattleCommand::SetInvulnerability { .. })));
    }

    #[test]
    fn test_single_turn_moves_are_ready() {
        let charmander = pokemon(Species::Charmander);
        let flamethrower = get_move_data(Move::Flamethrower).unwrap();
        let resolution =
            resolve_charge(PlayerTarget::Player, &charmander, 0, flamethrower, Weather::None);
        assert_eq!(resolution, ChargeResolution::ready(Vec::new()));
        assert!(cancel_charge(PlayerTarget::Player, &charmander).is_empty());
    }
}

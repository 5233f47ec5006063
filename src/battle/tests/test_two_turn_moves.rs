#[cfg(test)]
mod tests {
    use crate::battle::ai::AiDecision;
    use crate::battle::commands::PlayerTarget;
    use crate::battle::engine::resolve_turn_with;
    use crate::battle::state::{BattleEvent, GameState};
    use crate::battle::tests::common::{
        assert_ok, create_test_battle, predictable_rng, FixedChoice, TestPokemonBuilder,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{ChargeKind, Invulnerability, Move, Species, StatType, Weather};

    fn dealt_damage_to(events: &[BattleEvent], species: Species) -> bool {
        events
            .iter()
            .any(|event| matches!(event, BattleEvent::DamageDealt { target, .. } if *target == species))
    }

    #[test]
    fn test_solar_beam_fires_immediately_in_sun() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Cyndaquil)
                .with_moves(&[Move::SolarBeam])
                .build(),
            TestPokemonBuilder::new(Species::Squirtle).build(),
        );
        state.weather = Weather::Sun;

        let result = assert_ok(resolve_turn_with(&mut state, 0, &FixedChoice(AiDecision::SwitchOut)));

        assert!(!result
            .events
            .iter()
            .any(|event| matches!(event, BattleEvent::ChargingStarted { .. })));
        assert!(dealt_damage_to(&result.events, Species::Squirtle));
        let cyndaquil = state.active(PlayerTarget::Player).unwrap();
        assert_eq!(cyndaquil.moves[0].pp, 9);
        assert!(!cyndaquil.moves[0].charging);
    }

    #[test]
    fn test_solar_beam_charges_then_releases() {
        // Arrange
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Cyndaquil)
                .with_moves(&[Move::SolarBeam, Move::Flamethrower])
                .build(),
            TestPokemonBuilder::new(Species::Squirtle).build(),
        );
        let hold_back = FixedChoice(AiDecision::SwitchOut);

        // Act: charge
        let first = assert_ok(resolve_turn_with(&mut state, 0, &hold_back));

        // Assert
        assert!(first.events.contains(&BattleEvent::ChargingStarted {
            pokemon: Species::Cyndaquil,
            move_used: Move::SolarBeam,
            kind: ChargeKind::SolarCharge,
        }));
        assert!(first.log.contains(&"Cyndaquil absorbed light!".to_string()));
        assert!(!dealt_damage_to(&first.events, Species::Squirtle));
        assert_eq!(first.opponent_hp_percent, 100);
        {
            let cyndaquil = state.active(PlayerTarget::Player).unwrap();
            assert_eq!(cyndaquil.moves[0].pp, 9);
            assert_eq!(cyndaquil.charging_move_index(), Some(0));
        }

        // Act: the charge overrides the Flamethrower choice
        let second = assert_ok(resolve_turn_with(&mut state, 1, &hold_back));

        // Assert
        assert!(second.events.contains(&BattleEvent::MoveUsed {
            player_index: 0,
            pokemon: Species::Cyndaquil,
            move_used: Move::SolarBeam,
        }));
        assert!(dealt_damage_to(&second.events, Species::Squirtle));
        let cyndaquil = state.active(PlayerTarget::Player).unwrap();
        assert_eq!(cyndaquil.moves[0].pp, 9, "releasing costs no PP");
        assert_eq!(cyndaquil.moves[1].pp, 15);
        assert_eq!(cyndaquil.charging_move_index(), None);
    }

    #[test]
    fn test_dig_dodges_then_strikes() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Charmander)
                .with_moves(&[Move::Dig])
                .build(),
            TestPokemonBuilder::new(Species::Snubbull)
                .with_moves(&[Move::PlayRough])
                .build(),
        );
        let play_rough = FixedChoice(AiDecision::UseMove(0));

        let first = assert_ok(resolve_turn_with(&mut state, 0, &play_rough));

        assert!(first.events.contains(&BattleEvent::MoveMissed {
            attacker: Species::Snubbull,
            defender: Species::Charmander,
            move_used: Move::PlayRough,
        }));
        assert_eq!(first.player_hp_percent, 100);
        assert_eq!(
            state.active(PlayerTarget::Player).unwrap().invulnerability,
            Some(Invulnerability::Underground)
        );

        let second = assert_ok(resolve_turn_with(&mut state, 0, &play_rough));

        assert!(dealt_damage_to(&second.events, Species::Snubbull));
        let charmander = state.active(PlayerTarget::Player).unwrap();
        assert_eq!(charmander.invulnerability, None);
        assert_eq!(charmander.moves[0].pp, 9);
    }

    // +6 evasion cuts Dig's threshold to 33, so only rolls below 33 connect.
    #[rstest]
    #[case(99, false)]
    #[case(32, true)]
    #[case(33, false)]
    fn test_charge_turn_rolls_accuracy(#[case] roll: u8, #[case] charges: bool) {
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Charmander)
                .with_moves(&[Move::Dig])
                .build(),
            TestPokemonBuilder::new(Species::Squirtle)
                .with_stage(StatType::Evasion, 6)
                .build(),
        );
        state.rng = predictable_rng(vec![roll]);

        let result = assert_ok(resolve_turn_with(&mut state, 0, &FixedChoice(AiDecision::SwitchOut)));

        let missed = BattleEvent::MoveMissed {
            attacker: Species::Charmander,
            defender: Species::Squirtle,
            move_used: Move::Dig,
        };
        assert_eq!(result.events.contains(&missed), !charges);
        assert_eq!(
            result
                .log
                .contains(&"Charmander burrowed its way under the ground!".to_string()),
            charges
        );
        let charmander = state.active(PlayerTarget::Player).unwrap();
        assert_eq!(charmander.moves[0].pp, 9);
        assert_eq!(charmander.moves[0].charging, charges);
        let expected = if charges { Some(Invulnerability::Underground) } else { None };
        assert_eq!(charmander.invulnerability, expected);
    }

    #[test]
    fn test_earthquake_reaches_underground_target() {
        // Charmander digs first; the slower Wooper's Earthquake still connects at double power.
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Charmander)
                .with_moves(&[Move::Dig])
                .build(),
            TestPokemonBuilder::new(Species::Wooper)
                .with_moves(&[Move::Earthquake])
                .build(),
        );

        let result = assert_ok(resolve_turn_with(&mut state, 0, &FixedChoice(AiDecision::UseMove(0))));

        assert!(result.events.contains(&BattleEvent::DamageDealt {
            target: Species::Charmander,
            damage: 99,
            remaining_hp: 0,
        }));
        assert!(result.fainted.player);
        assert_eq!(result.outcome, GameState::OpponentWin);
    }
}

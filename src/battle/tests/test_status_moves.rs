#[cfg(test)]
mod tests {
    use crate::battle::ai::AiDecision;
    use crate::battle::commands::PlayerTarget;
    use crate::battle::engine::{resolve_turn_with, StatusChange};
    use crate::battle::state::{ActionFailureReason, BattleEvent};
    use crate::battle::tests::common::{assert_ok, create_test_battle, FixedChoice, TestPokemonBuilder};
    use crate::pokemon::StatusCounter;
    use pretty_assertions::assert_eq;
    use schema::{Move, NonVolatileStatus, Species, VolatileStatus};

    #[test]
    fn test_magic_coat_bounces_toxic() {
        // Arrange: Voltorb outspeeds Squirtle and raises Magic Coat first.
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Voltorb)
                .with_moves(&[Move::MagicCoat])
                .build(),
            TestPokemonBuilder::new(Species::Squirtle)
                .with_moves(&[Move::Toxic])
                .build(),
        );

        // Act
        let result = assert_ok(resolve_turn_with(&mut state, 0, &FixedChoice(AiDecision::UseMove(0))));

        // Assert
        assert!(result.events.contains(&BattleEvent::MoveReflected {
            reflector: Species::Voltorb,
            move_used: Move::Toxic,
        }));
        assert!(result.log.contains(&"Voltorb bounced the Toxic back!".to_string()));
        assert_eq!(
            result.status_changes,
            vec![StatusChange {
                pokemon: Species::Squirtle,
                status: NonVolatileStatus::BadlyPoisoned,
                applied: true,
            }]
        );

        let voltorb = state.active(PlayerTarget::Player).unwrap();
        assert_eq!(voltorb.status, None);
        assert!(!voltorb.has_volatile(VolatileStatus::MagicCoat), "Magic Coat lasts one turn");

        let squirtle = state.active(PlayerTarget::Opponent).unwrap();
        assert_eq!(squirtle.status, Some(NonVolatileStatus::BadlyPoisoned));
        assert_eq!(squirtle.current_hp(), 98, "first toxic tick is 1/16");
        assert_eq!(squirtle.counter(StatusCounter::Toxic), 1);
    }

    #[test]
    fn test_substitute_blocks_yawn() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Voltorb)
                .with_moves(&[Move::Substitute])
                .build(),
            TestPokemonBuilder::new(Species::Wooper)
                .with_moves(&[Move::Yawn])
                .build(),
        );

        let result = assert_ok(resolve_turn_with(&mut state, 0, &FixedChoice(AiDecision::UseMove(0))));

        assert!(result.events.contains(&BattleEvent::ActionFailed {
            pokemon: Species::Wooper,
            reason: ActionFailureReason::MoveFailed,
        }));
        let voltorb = state.active(PlayerTarget::Player).unwrap();
        assert_eq!(voltorb.current_hp(), 75);
        assert_eq!(voltorb.counters.substitute_hp, 25);
        assert!(voltorb.has_volatile(VolatileStatus::Substitute));
        assert!(!voltorb.has_volatile(VolatileStatus::Yawning));
    }

    #[test]
    fn test_status_move_can_miss() {
        // An exhausted script rolls the top of the accuracy range.
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Squirtle)
                .with_moves(&[Move::Toxic])
                .build(),
            TestPokemonBuilder::new(Species::Voltorb).build(),
        );

        let result = assert_ok(resolve_turn_with(&mut state, 0, &FixedChoice(AiDecision::SwitchOut)));

        assert!(result.events.contains(&BattleEvent::MoveMissed {
            attacker: Species::Squirtle,
            defender: Species::Voltorb,
            move_used: Move::Toxic,
        }));
        assert!(result.status_changes.is_empty());
        assert_eq!(state.active(PlayerTarget::Opponent).unwrap().status, None);
        assert_eq!(state.active(PlayerTarget::Player).unwrap().moves[0].pp, 9);
    }

    #[test]
    fn test_rest_heals_and_sleeps() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Wooper)
                .with_moves(&[Move::Rest])
                .with_hp(50)
                .build(),
            TestPokemonBuilder::new(Species::Voltorb).build(),
        );

        let result = assert_ok(resolve_turn_with(&mut state, 0, &FixedChoice(AiDecision::SwitchOut)));

        assert!(result.status_changes.contains(&StatusChange {
            pokemon: Species::Wooper,
            status: NonVolatileStatus::Resting,
            applied: true,
        }));
        assert_eq!(result.player_hp_percent, 100);
        let wooper = state.active(PlayerTarget::Player).unwrap();
        assert_eq!(wooper.status, Some(NonVolatileStatus::Resting));
        assert_eq!(wooper.counter(StatusCounter::Sleep), 2);
    }
}

#[cfg(test)]
mod tests {
    use crate::battle::ai::AiDecision;
    use crate::battle::commands::PlayerTarget;
    use crate::battle::engine::{resolve_turn_with, StatusChange};
    use crate::battle::state::{ActionFailureReason, BattleEvent, BattleState};
    use crate::battle::tests::common::{
        assert_ok, create_test_battle, predictable_rng, FixedChoice, TestPokemonBuilder,
    };
    use crate::pokemon::{PokemonInst, StatusCounter};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Move, NonVolatileStatus, Species, VolatileStatus};

    const HOLD_BACK: FixedChoice = FixedChoice(AiDecision::SwitchOut);

    fn totodile_against_snubbull(totodile: PokemonInst, script: Vec<u8>) -> BattleState {
        let mut state = create_test_battle(
            totodile,
            TestPokemonBuilder::new(Species::Snubbull).build(),
        );
        state.rng = predictable_rng(script);
        state
    }

    fn player_moved(events: &[BattleEvent]) -> bool {
        events
            .iter()
            .any(|event| matches!(event, BattleEvent::MoveUsed { player_index: 0, .. }))
    }

    #[test]
    fn test_sleeper_wakes_when_counter_runs_out() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new(Species::Wooper)
                .with_moves(&[Move::Earthquake])
                .with_status(NonVolatileStatus::Sleeping)
                .with_counter(StatusCounter::Sleep, 1)
                .build(),
            TestPokemonBuilder::new(Species::Voltorb).build(),
        );

        let first = assert_ok(resolve_turn_with(&mut state, 0, &HOLD_BACK));
        assert!(first.events.contains(&BattleEvent::ActionFailed {
            pokemon: Species::Wooper,
            reason: ActionFailureReason::IsAsleep,
        }));
        assert!(!player_moved(&first.events));
        assert_eq!(state.active(PlayerTarget::Player).unwrap().moves[0].pp, 10);

        let second = assert_ok(resolve_turn_with(&mut state, 0, &HOLD_BACK));
        assert_eq!(
            second.status_changes[0],
            StatusChange {
                pokemon: Species::Wooper,
                status: NonVolatileStatus::Sleeping,
                applied: false,
            }
        );
        assert!(second.log.contains(&"Wooper woke up!".to_string()));
        assert!(player_moved(&second.events), "a waking combatant acts the same turn");
    }

    #[rstest]
    #[case(19, true)]
    #[case(20, false)]
    fn test_freeze_thaw_chance(#[case] roll: u8, #[case] thaws: bool) {
        let totodile = TestPokemonBuilder::new(Species::Totodile)
            .with_moves(&[Move::Screech])
            .with_status(NonVolatileStatus::Frozen)
            .build();
        let mut state = totodile_against_snubbull(totodile, vec![roll]);

        let result = assert_ok(resolve_turn_with(&mut state, 0, &HOLD_BACK));

        assert_eq!(player_moved(&result.events), thaws);
        let expected = if thaws { None } else { Some(NonVolatileStatus::Frozen) };
        assert_eq!(state.active(PlayerTarget::Player).unwrap().status, expected);
    }

    #[rstest]
    #[case(24, false)]
    #[case(25, true)]
    fn test_full_paralysis_chance(#[case] roll: u8, #[case] acts: bool) {
        let totodile = TestPokemonBuilder::new(Species::Totodile)
            .with_moves(&[Move::Screech])
            .with_status(NonVolatileStatus::Paralyzed)
            .build();
        let mut state = totodile_against_snubbull(totodile, vec![roll]);

        let result = assert_ok(resolve_turn_with(&mut state, 0, &HOLD_BACK));

        assert_eq!(player_moved(&result.events), acts);
        assert_eq!(
            result.events.contains(&BattleEvent::ActionFailed {
                pokemon: Species::Totodile,
                reason: ActionFailureReason::IsParalyzed,
            }),
            !acts
        );
        assert_eq!(
            state.active(PlayerTarget::Player).unwrap().status,
            Some(NonVolatileStatus::Paralyzed)
        );
    }

    #[test]
    fn test_confusion_self_hit() {
        // Arrange: self-hit roll, then the top damage roll.
        let totodile = TestPokemonBuilder::new(Species::Totodile)
            .with_moves(&[Move::AquaTail])
            .with_volatile(VolatileStatus::Confused)
            .with_counter(StatusCounter::Confusion, 2)
            .build();
        let mut state = totodile_against_snubbull(totodile, vec![0, 15]);

        // Act
        let result = assert_ok(resolve_turn_with(&mut state, 0, &HOLD_BACK));

        // Assert
        assert!(result.events.contains(&BattleEvent::ActionFailed {
            pokemon: Species::Totodile,
            reason: ActionFailureReason::HurtInConfusion,
        }));
        assert!(result.events.contains(&BattleEvent::DamageDealt {
            target: Species::Totodile,
            damage: 19,
            remaining_hp: 91,
        }));
        assert!(!player_moved(&result.events));
        let totodile = state.active(PlayerTarget::Player).unwrap();
        assert_eq!(totodile.counter(StatusCounter::Confusion), 1);
        assert!(totodile.has_volatile(VolatileStatus::Confused));
        assert_eq!(state.active(PlayerTarget::Opponent).unwrap().current_hp(), 120);
    }

    #[test]
    fn test_confusion_ends_when_counter_runs_out() {
        let totodile = TestPokemonBuilder::new(Species::Totodile)
            .with_moves(&[Move::Screech])
            .with_volatile(VolatileStatus::Confused)
            .with_counter(StatusCounter::Confusion, 0)
            .build();
        let mut state = totodile_against_snubbull(totodile, vec![]);

        let result = assert_ok(resolve_turn_with(&mut state, 0, &HOLD_BACK));

        assert!(result.events.contains(&BattleEvent::VolatileRemoved {
            target: Species::Totodile,
            status: VolatileStatus::Confused,
        }));
        assert!(result.log.contains(&"Totodile snapped out of its confusion!".to_string()));
        assert!(player_moved(&result.events));
        assert!(!state
            .active(PlayerTarget::Player)
            .unwrap()
            .has_volatile(VolatileStatus::Confused));
    }
}

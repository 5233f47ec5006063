// In: src/battle/move_effects/stat_effects.rs

use super::EffectContext;
use crate::battle::commands::BattleCommand;
use crate::battle::state::BattleState;

/// One `ChangeStatStage` per nonzero delta, Attack through Evasion. Clamping and
/// the "won't go any higher" message happen when the command executes.
pub(super) fn apply_stage_changes(context: &EffectContext, state: &BattleState) -> Vec<BattleCommand> {
    let target = context.effect_target();
    let conscious = context
        .pokemon(state, target)
        .is_some_and(|pokemon| !pokemon.is_fainted());
    if !conscious {
        return Vec::new();
    }

    context
        .move_data
        .stat_changes
        .stage_deltas()
        .map(|(stat, delta)| BattleCommand::ChangeStatStage { target, stat, delta })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::commands::PlayerTarget;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use crate::move_data::get_move_data;
    use pretty_assertions::assert_eq;
    use schema::{Move, Species, StatType};

    #[test]
    fn test_screech_targets_opponent_defense() {
        let state = create_test_battle(
            TestPokemonBuilder::new(Species::Totodile).build(),
            TestPokemonBuilder::new(Species::Wooper).build(),
        );
        let screech = get_move_data(Move::Screech).unwrap();
        let context = EffectContext::new(PlayerTarget::Player, PlayerTarget::Opponent, screech);

        assert_eq!(
            apply_stage_changes(&context, &state),
            vec![BattleCommand::ChangeStatStage {
                target: PlayerTarget::Opponent,
                stat: StatType::Def,
                delta: -2,
            }]
        );
    }

    #[test]
    fn test_fainted_target_gets_no_stage_changes() {
        let state = create_test_battle(
            TestPokemonBuilder::new(Species::Chikorita).build(),
            TestPokemonBuilder::new(Species::Snubbull).with_hp(0).build(),
        );
        let play_rough = get_move_data(Move::PlayRough).unwrap();
        let context = EffectContext::new(PlayerTarget::Player, PlayerTarget::Opponent, play_rough);
        assert_eq!(apply_stage_changes(&context, &state), vec![]);
    }
}

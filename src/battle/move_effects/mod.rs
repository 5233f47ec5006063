// In: src/battle/move_effects/mod.rs

// --- HELPER MODULES ---
mod damage_effects;
mod special_effects;
mod stat_effects;
mod status_effects;

// --- IMPORTS ---
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::state::{BattleState, TurnRng};
use crate::pokemon::PokemonInst;
use schema::{MoveCategory, MoveData, StatusMoveEffect, VolatileStatus};

pub use self::special_effects::apply_special_effect;
pub use self::status_effects::{apply_thaw_on_hit, inflict_status_commands};
use self::{damage_effects::*, stat_effects::*, status_effects::*};

/// Who used the move, who it was aimed at, and what it was.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub attacker: PlayerTarget,
    pub defender: PlayerTarget,
    pub move_data: &'a MoveData,
}

impl<'a> EffectContext<'a> {
    pub fn new(attacker: PlayerTarget, defender: PlayerTarget, move_data: &'a MoveData) -> Self {
        Self {
            attacker,
            defender,
            move_data,
        }
    }

    /// Receiver of the move's stat, status and HP entries.
    pub fn effect_target(&self) -> PlayerTarget {
        if self.move_data.changes_user_stats {
            self.attacker
        } else {
            self.defender
        }
    }

    pub fn is_status_move(&self) -> bool {
        self.move_data.category == MoveCategory::Status
    }

    /// The same move bounced back at its user.
    pub fn reflected(&self) -> Self {
        Self {
            attacker: self.defender,
            defender: self.attacker,
            move_data: self.move_data,
        }
    }

    fn pokemon<'s>(&self, state: &'s BattleState, target: PlayerTarget) -> Option<&'s PokemonInst> {
        state.active(target)
    }
}

/// Status moves aimed at the opponent. These roll accuracy, can be bounced by
/// Magic Coat and are stopped by a substitute.
pub fn targets_opponent(move_data: &MoveData) -> bool {
    move_data.category == MoveCategory::Status
        && !move_data.changes_user_stats
        && matches!(move_data.special, None | Some(StatusMoveEffect::ForceSwitch))
}

/// Whether the secondary effect bundle fires this time. Chance 0 never fires,
/// 100 always does, anything between rolls 1..=100.
pub fn roll_effect_chance(chance: u8, rng: &mut TurnRng) -> bool {
    match chance {
        0 => false,
        c if c >= 100 => true,
        c => rng.percent("secondary effect chance") <= c as u32,
    }
}

/// Secondary effects of a landed move, in order: HP entry, stage deltas,
/// non-volatile status, volatile statuses. `damage_dealt` is 0 for status moves.
pub fn resolve_secondary_effects(
    context: &EffectContext,
    state: &BattleState,
    damage_dealt: u16,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let move_data = context.move_data;
    if !move_data.has_secondary_effects() || !roll_effect_chance(move_data.effect_chance, rng) {
        return Vec::new();
    }

    let mut commands = apply_hp_entry(context, state, damage_dealt);

    let target = context.effect_target();
    let blocked_by_substitute = target != context.attacker
        && context
            .pokemon(state, target)
            .is_some_and(|pokemon| pokemon.has_volatile(VolatileStatus::Substitute));
    if blocked_by_substitute {
        if context.is_status_move() {
            commands.extend(move_failed(context, state));
        }
        return commands;
    }

    commands.extend(apply_stage_changes(context, state));
    commands.extend(apply_status_infliction(context, state, rng));
    commands.extend(apply_volatile_infliction(context, state, rng));
    commands
}

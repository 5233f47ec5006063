//! A module for defining AI behaviors for battle opponents.

use crate::battle::calculators::{resolve_base_power, AttackContext};
use crate::battle::commands::PlayerTarget;
use crate::battle::state::{BattleState, TurnRng};
use crate::battle::stats::{effective_speed, matchup_multiplier};
use crate::move_data::get_move_data;
use crate::pokemon::PokemonInst;
use schema::MoveData;

/// What an AI-controlled side does this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiDecision {
    UseMove(usize),
    /// No legal or worthwhile move is left.
    SwitchOut,
}

/// A trait for any system that can decide on a battle action.
pub trait Behavior {
    /// Inspects the battle state and decides on the next action for the given player.
    fn decide_action(&self, player_index: usize, battle_state: &BattleState, rng: &mut TurnRng) -> AiDecision;
}

/// A move the AI may pick, with the multiplier it was judged by.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    slot: usize,
    move_data: &'static MoveData,
    multiplier: f64,
}

/// Prefers effective damage, then status moves, then resisted damage.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredAI;

impl TieredAI {
    pub fn new() -> Self {
        Self
    }

    fn candidates(attacker: &PokemonInst, defender: &PokemonInst) -> Vec<Candidate> {
        attacker
            .moves
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.pp > 0)
            .filter_map(|(slot, instance)| {
                let move_data = get_move_data(instance.move_).ok()?;
                Some(Candidate {
                    slot,
                    move_data,
                    multiplier: matchup_multiplier(move_data, attacker, defender),
                })
            })
            .collect()
    }

    /// Highest `floor(power × multiplier)`; ties are broken at random.
    fn compare_power(
        candidates: &[Candidate],
        attacker: &PokemonInst,
        defender: &PokemonInst,
        ctx: &AttackContext,
        rng: &mut TurnRng,
    ) -> Option<usize> {
        let scored: Vec<(usize, u32)> = candidates
            .iter()
            .map(|c| {
                let power = resolve_base_power(c.move_data, attacker, defender, ctx);
                (c.slot, (power as f64 * c.multiplier).floor() as u32)
            })
            .collect();
        let best = scored.iter().map(|&(_, score)| score).max()?;
        let tied: Vec<usize> = scored
            .into_iter()
            .filter(|&(_, score)| score == best)
            .map(|(slot, _)| slot)
            .collect();
        let pick = rng.roll(tied.len() as u32, "ai power tie-break") as usize;
        tied.get(pick).copied()
    }

    fn pick(
        &self,
        attacker: &PokemonInst,
        defender: &PokemonInst,
        ctx: &AttackContext,
        rng: &mut TurnRng,
    ) -> AiDecision {
        let candidates = Self::candidates(attacker, defender);
        let damaging = |min: f64| -> Vec<Candidate> {
            candidates
                .iter()
                .filter(|c| c.move_data.is_damaging() && c.multiplier >= min)
                .copied()
                .collect()
        };

        let effective = damaging(1.0);
        let choice = match effective.len() {
            0 => {
                let status: Vec<Candidate> = candidates
                    .iter()
                    .filter(|c| !c.move_data.is_damaging())
                    .copied()
                    .collect();
                if !status.is_empty() {
                    let pick = rng.roll(status.len() as u32, "ai status move") as usize;
                    status.get(pick).map(|c| c.slot)
                } else {
                    let resisted = damaging(0.5);
                    match resisted.len() {
                        0 => None,
                        1 => Some(resisted[0].slot),
                        _ => Self::compare_power(&resisted, attacker, defender, ctx, rng),
                    }
                }
            }
            1 => Some(effective[0].slot),
            _ => {
                let strong: Vec<Candidate> = effective
                    .iter()
                    .filter(|c| c.multiplier >= 1.5)
                    .copied()
                    .collect();
                match strong.len() {
                    0 => Self::compare_power(&effective, attacker, defender, ctx, rng),
                    1 => Some(strong[0].slot),
                    _ => Self::compare_power(&strong, attacker, defender, ctx, rng),
                }
            }
        };

        match choice {
            Some(slot) => AiDecision::UseMove(slot),
            None => AiDecision::SwitchOut,
        }
    }
}

impl Behavior for TieredAI {
    fn decide_action(&self, player_index: usize, battle_state: &BattleState, rng: &mut TurnRng) -> AiDecision {
        let side = PlayerTarget::from_index(player_index);
        let (Some(attacker), Some(defender)) = (battle_state.active(side), battle_state.active(side.other()))
        else {
            return AiDecision::SwitchOut;
        };

        if let Some(slot) = attacker.charging_move_index() {
            return AiDecision::UseMove(slot);
        }

        let ctx = AttackContext {
            level: battle_state.level,
            weather: battle_state.weather,
            moving_last: effective_speed(attacker) < effective_speed(defender),
            ..AttackContext::default()
        };
        let decision = self.pick(attacker, defender, &ctx, rng);
        tracing::debug!(player_index, ?decision, "ai decided");
        decision
    }
}

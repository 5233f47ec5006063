use crate::pokemon::PokemonInst;
use schema::TeamCondition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_ROSTER: usize = 6;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattlePlayer {
    pub player_id: String,
    pub player_name: String,

    // Up to six combatants; the first is sent out at battle start.
    pub team: Vec<PokemonInst>,

    pub active_pokemon_index: usize,

    // Value is turns remaining
    pub team_conditions: BTreeMap<TeamCondition, u8>,
}

impl BattlePlayer {
    pub fn new(player_id: String, player_name: String, team: Vec<PokemonInst>) -> Self {
        BattlePlayer {
            player_id,
            player_name,
            team: team.into_iter().take(MAX_ROSTER).collect(),
            active_pokemon_index: 0,
            team_conditions: BTreeMap::new(),
        }
    }

    /// Get the currently active Pokemon
    pub fn active_pokemon(&self) -> Option<&PokemonInst> {
        self.team.get(self.active_pokemon_index)
    }

    /// Get the currently active Pokemon mutably
    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonInst> {
        self.team.get_mut(self.active_pokemon_index)
    }

    /// First roster slot after the active one that can still battle.
    pub fn next_healthy_index(&self) -> Option<usize> {
        self.team
            .iter()
            .enumerate()
            .find(|(index, pokemon)| *index != self.active_pokemon_index && !pokemon.is_fainted())
            .map(|(index, _)| index)
    }

    pub fn has_non_fainted_pokemon(&self) -> bool {
        self.team.iter().any(|pokemon| !pokemon.is_fainted())
    }

    /// Make another roster member active. The outgoing one loses stages and volatile state.
    pub fn switch_pokemon(&mut self, new_index: usize) -> bool {
        if new_index >= self.team.len() || new_index == self.active_pokemon_index {
            return false;
        }
        if let Some(outgoing) = self.active_pokemon_mut() {
            outgoing.clear_volatile_state();
        }
        self.active_pokemon_index = new_index;
        true
    }

    pub fn has_team_condition(&self, condition: TeamCondition) -> bool {
        self.team_conditions.contains_key(&condition)
    }

    pub fn add_team_condition(&mut self, condition: TeamCondition, turns_remaining: u8) {
        self.team_conditions.insert(condition, turns_remaining);
    }

    pub fn remove_team_condition(&mut self, condition: TeamCondition) -> Option<u8> {
        self.team_conditions.remove(&condition)
    }

    pub fn get_team_condition_turns(&self, condition: TeamCondition) -> Option<u8> {
        self.team_conditions.get(&condition).copied()
    }

    /// Decrement all team condition turns and return the ones that expired
    pub fn tick_team_conditions(&mut self) -> Vec<TeamCondition> {
        let mut expired = Vec::new();
        self.team_conditions.retain(|condition, turns| {
            *turns = turns.saturating_sub(1);
            if *turns == 0 {
                expired.push(*condition);
            }
            *turns > 0
        });
        expired
    }
}

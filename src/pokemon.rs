use crate::errors::{ActionError, BattleResult, MoveDataResult};
use crate::move_data::get_move_max_pp;
use crate::species::get_species_data;
use schema::{
    Ability, BaseStats, Invulnerability, Move, NonVolatileStatus, Species, SpeciesData, StatType,
    Typing, VolatileStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_LEVEL: u8 = 50;

pub const STAGE_MIN: u8 = 0;
pub const STAGE_NEUTRAL: u8 = 6;
pub const STAGE_MAX: u8 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub move_: Move,
    pub pp: u8,
    /// Set between the charge turn and the release turn of a two-turn move.
    pub charging: bool,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(move_: Move) -> MoveDataResult<Self> {
        Ok(MoveInstance {
            move_,
            pp: get_move_max_pp(move_)?,
            charging: false,
        })
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }
}

/// Stat stages stored as 0..=12, where 6 is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    pub atk: u8,
    pub def: u8,
    pub sp_atk: u8,
    pub sp_def: u8,
    pub spe: u8,
    pub accuracy: u8,
    pub evasion: u8,
}

impl Default for StatStages {
    fn default() -> Self {
        Self {
            atk: STAGE_NEUTRAL,
            def: STAGE_NEUTRAL,
            sp_atk: STAGE_NEUTRAL,
            sp_def: STAGE_NEUTRAL,
            spe: STAGE_NEUTRAL,
            accuracy: STAGE_NEUTRAL,
            evasion: STAGE_NEUTRAL,
        }
    }
}

impl StatStages {
    /// HP has no stage and always reads neutral.
    pub fn get(&self, stat: StatType) -> u8 {
        match stat {
            StatType::Hp => STAGE_NEUTRAL,
            StatType::Atk => self.atk,
            StatType::Def => self.def,
            StatType::SpAtk => self.sp_atk,
            StatType::SpDef => self.sp_def,
            StatType::Spe => self.spe,
            StatType::Accuracy => self.accuracy,
            StatType::Evasion => self.evasion,
        }
    }

    fn slot_mut(&mut self, stat: StatType) -> Option<&mut u8> {
        match stat {
            StatType::Hp => None,
            StatType::Atk => Some(&mut self.atk),
            StatType::Def => Some(&mut self.def),
            StatType::SpAtk => Some(&mut self.sp_atk),
            StatType::SpDef => Some(&mut self.sp_def),
            StatType::Spe => Some(&mut self.spe),
            StatType::Accuracy => Some(&mut self.accuracy),
            StatType::Evasion => Some(&mut self.evasion),
        }
    }

    /// Shift a stage by `delta`, clamped to 0..=12. Returns (old, new).
    pub fn apply_delta(&mut self, stat: StatType, delta: i8) -> (u8, u8) {
        match self.slot_mut(stat) {
            Some(stage) => {
                let old = *stage;
                let new = (old as i16 + delta as i16).clamp(STAGE_MIN as i16, STAGE_MAX as i16) as u8;
                *stage = new;
                (old, new)
            }
            None => (STAGE_NEUTRAL, STAGE_NEUTRAL),
        }
    }
}

/// Turn counters that back the statuses needing a duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounters {
    pub sleep_turns: u8,
    pub toxic_turns: u8,
    pub confusion_turns: u8,
    pub yawn_turns: u8,
    pub magnet_rise_turns: u8,
    pub substitute_hp: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCounter {
    Sleep,
    Toxic,
    Confusion,
    Yawn,
    MagnetRise,
}

/// One combatant's mutable battle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub name: String,
    pub species: Species,
    pub level: u8,
    pub typing: Typing,
    pub ability: Ability,
    pub base_stats: BaseStats,
    pub weight: Option<u16>,
    pub max_hp: u16,
    curr_hp: u16,
    pub stages: StatStages,
    pub status: Option<NonVolatileStatus>,
    pub volatile: BTreeSet<VolatileStatus>,
    pub invulnerability: Option<Invulnerability>,
    pub crit_stage: u8,
    pub moves: Vec<MoveInstance>,
    pub counters: StatusCounters,
}

impl PokemonInst {
    /// Create a combatant from its species' catalog entry with the default moveset
    pub fn new(species: Species, level: u8) -> BattleResult<Self> {
        let data = get_species_data(species)?;
        Ok(Self::from_species_data(data, level, &data.moves)?)
    }

    /// Create a combatant with an explicit moveset (at most four are kept)
    pub fn with_moves(species: Species, level: u8, moves: &[Move]) -> BattleResult<Self> {
        let data = get_species_data(species)?;
        Ok(Self::from_species_data(data, level, moves)?)
    }

    pub fn from_species_data(data: &SpeciesData, level: u8, moves: &[Move]) -> MoveDataResult<Self> {
        let moves = moves
            .iter()
            .take(4)
            .map(|&move_| MoveInstance::new(move_))
            .collect::<MoveDataResult<Vec<_>>>()?;

        Ok(PokemonInst {
            name: data.name.clone(),
            species: data.id,
            level,
            typing: data.typing,
            ability: data.ability,
            base_stats: data.base_stats,
            weight: data.weight,
            max_hp: data.base_stats.hp,
            curr_hp: data.base_stats.hp,
            stages: StatStages::default(),
            status: None,
            volatile: BTreeSet::new(),
            invulnerability: None,
            crit_stage: 0,
            moves,
            counters: StatusCounters::default(),
        })
    }

    pub fn current_hp(&self) -> u16 {
        self.curr_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.curr_hp == 0
    }

    /// Set HP directly, clamped to 0..=max_hp.
    pub fn set_hp(&mut self, hp: u16) {
        self.curr_hp = hp.min(self.max_hp);
    }

    /// Deal damage, returns true if the Pokemon fainted from this damage
    pub fn take_damage(&mut self, damage: u16) -> bool {
        let was_standing = self.curr_hp > 0;
        self.curr_hp = self.curr_hp.saturating_sub(damage);
        was_standing && self.curr_hp == 0
    }

    /// Restore HP up to the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let before = self.curr_hp;
        self.curr_hp = self.curr_hp.saturating_add(amount).min(self.max_hp);
        self.curr_hp - before
    }

    /// Remaining HP as a rounded percentage of max HP.
    pub fn hp_percent(&self) -> u8 {
        if self.max_hp == 0 {
            return 0;
        }
        ((self.curr_hp as f64 / self.max_hp as f64) * 100.0).round() as u8
    }

    /// Unstaged battle value of a stat.
    pub fn stat(&self, stat: StatType) -> u16 {
        let stats = &self.base_stats;
        match stat {
            StatType::Hp => self.max_hp,
            StatType::Atk => stats.atk,
            StatType::Def => stats.def,
            StatType::SpAtk => stats.sp_atk,
            StatType::SpDef => stats.sp_def,
            StatType::Spe => stats.spe,
            StatType::Accuracy => stats.accuracy,
            StatType::Evasion => stats.evasion,
        }
    }

    pub fn has_volatile(&self, status: VolatileStatus) -> bool {
        self.volatile.contains(&status)
    }

    /// Returns false when the status was already present.
    pub fn add_volatile(&mut self, status: VolatileStatus) -> bool {
        self.volatile.insert(status)
    }

    pub fn remove_volatile(&mut self, status: VolatileStatus) -> bool {
        self.volatile.remove(&status)
    }

    pub fn counter(&self, counter: StatusCounter) -> u8 {
        match counter {
            StatusCounter::Sleep => self.counters.sleep_turns,
            StatusCounter::Toxic => self.counters.toxic_turns,
            StatusCounter::Confusion => self.counters.confusion_turns,
            StatusCounter::Yawn => self.counters.yawn_turns,
            StatusCounter::MagnetRise => self.counters.magnet_rise_turns,
        }
    }

    pub fn set_counter(&mut self, counter: StatusCounter, value: u8) {
        match counter {
            StatusCounter::Sleep => self.counters.sleep_turns = value,
            StatusCounter::Toxic => self.counters.toxic_turns = value,
            StatusCounter::Confusion => self.counters.confusion_turns = value,
            StatusCounter::Yawn => self.counters.yawn_turns = value,
            StatusCounter::MagnetRise => self.counters.magnet_rise_turns = value,
        }
    }

    /// Index of the move slot locked in by a two-turn charge.
    pub fn charging_move_index(&self) -> Option<usize> {
        self.moves.iter().position(|slot| slot.charging)
    }

    /// Slots a caller may offer for selection this turn. A charging combatant is locked in.
    pub fn selectable_moves(&self) -> Vec<usize> {
        match self.charging_move_index() {
            Some(index) => vec![index],
            None => (0..self.moves.len())
                .filter(|&i| self.moves[i].pp > 0)
                .collect(),
        }
    }

    pub fn validate_move_index(&self, index: usize) -> Result<&MoveInstance, ActionError> {
        self.moves.get(index).ok_or(ActionError::MoveIndexOutOfRange {
            index,
            move_count: self.moves.len(),
        })
    }

    /// Drop everything a switch-out or faint clears: stages, volatiles and charge state.
    pub fn clear_volatile_state(&mut self) {
        self.stages = StatStages::default();
        self.volatile.clear();
        self.invulnerability = None;
        self.crit_stage = 0;
        for slot in &mut self.moves {
            slot.charging = false;
        }
        self.counters = StatusCounters {
            sleep_turns: self.counters.sleep_turns,
            toxic_turns: 0,
            ..StatusCounters::default()
        };
    }
}

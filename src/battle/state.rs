use crate::battle::commands::PlayerTarget;
use crate::player::BattlePlayer;
use crate::pokemon::PokemonInst;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{
    ChargeKind, Move, NonVolatileStatus, Species, StatType, TeamCondition, VolatileStatus, Weather,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Copy)]
pub enum GameState {
    WaitingForAction,
    TurnInProgress,
    PlayerWin,
    OpponentWin,
    Draw,
}

impl GameState {
    pub fn is_over(self) -> bool {
        matches!(self, GameState::PlayerWin | GameState::OpponentWin | GameState::Draw)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Pokemon Actions
    PokemonSwitched {
        player_index: usize,
        old_pokemon: Species,
        new_pokemon: Species,
    },
    MoveUsed {
        player_index: usize,
        pokemon: Species,
        move_used: Move,
    },
    ChargingStarted {
        pokemon: Species,
        move_used: Move,
        kind: ChargeKind,
    },
    MoveMissed {
        attacker: Species,
        defender: Species,
        move_used: Move,
    },
    MoveReflected {
        reflector: Species,
        move_used: Move,
    },
    CriticalHit {
        attacker: Species,
        defender: Species,
        move_used: Move,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    Immune {
        target: Species,
    },
    DamageDealt {
        target: Species,
        damage: u16,
        remaining_hp: u16,
    },
    SubstituteDamaged {
        target: Species,
        damage: u16,
    },
    SubstituteBroke {
        target: Species,
    },
    PokemonHealed {
        target: Species,
        amount: u16,
        new_hp: u16,
    },
    PokemonFainted {
        player_index: usize,
        pokemon: Species,
    },

    // Status Effects
    StatusApplied {
        target: Species,
        status: NonVolatileStatus,
    },
    StatusRemoved {
        target: Species,
        status: NonVolatileStatus,
    },
    StatusDamage {
        target: Species,
        status: NonVolatileStatus,
        damage: u16,
        remaining_hp: u16,
    },
    VolatileApplied {
        target: Species,
        status: VolatileStatus,
    },
    VolatileRemoved {
        target: Species,
        status: VolatileStatus,
    },
    SeedDrained {
        target: Species,
        damage: u16,
        remaining_hp: u16,
    },

    // Stat Changes
    StatStageChanged {
        target: Species,
        stat: StatType,
        old_stage: u8,
        new_stage: u8,
    },
    StatChangeBlocked {
        target: Species,
        stat: StatType,
        rising: bool,
    },

    // Field
    WeatherChanged {
        weather: Weather,
    },
    WeatherEnded {
        weather: Weather,
    },
    TeamConditionApplied {
        player_index: usize,
        condition: TeamCondition,
    },
    TeamConditionExpired {
        player_index: usize,
        condition: TeamCondition,
    },

    // Action Failures
    ActionFailed {
        pokemon: Species,
        reason: ActionFailureReason,
    },
    NoUsableMoves {
        player_index: usize,
        pokemon: Species,
    },

    // Battle End
    PlayerDefeated {
        player_index: usize,
    },
    BattleEnded {
        winner: Option<usize>,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        match self {
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,

            BattleEvent::PokemonSwitched { player_index, new_pokemon, .. } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("{} sent out {}!", player_name, new_pokemon))
            }
            BattleEvent::MoveUsed { player_index, pokemon, move_used } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("{}'s {} used {}!", player_name, pokemon, move_used))
            }
            BattleEvent::ChargingStarted { pokemon, kind, .. } => {
                Some(Self::format_charge(*pokemon, *kind))
            }
            BattleEvent::MoveMissed { attacker, .. } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::MoveReflected { reflector, move_used } => {
                Some(format!("{} bounced the {} back!", reflector, move_used))
            }
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                0.0 => Some("It had no effect!".to_string()),
                _ => None,
            },
            BattleEvent::Immune { target } => Some(format!("It doesn't affect {}...", target)),

            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::SubstituteDamaged { target, .. } => {
                Some(format!("The substitute took damage for {}!", target))
            }
            BattleEvent::SubstituteBroke { target } => {
                Some(format!("{}'s substitute faded!", target))
            }
            BattleEvent::PokemonHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::PokemonFainted { pokemon, .. } => Some(format!("{} fainted!", pokemon)),

            BattleEvent::StatusApplied { target, status } => {
                Some(format!("{} {}", target, Self::format_status_applied(*status)))
            }
            BattleEvent::StatusRemoved { target, status } => {
                Some(format!("{} {}", target, Self::format_status_removed(*status)))
            }
            BattleEvent::StatusDamage { target, status, damage, .. } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                target,
                Self::format_status_noun(*status),
                damage
            )),
            BattleEvent::VolatileApplied { target, status } => {
                Some(Self::format_volatile_applied(*target, *status))
            }
            BattleEvent::VolatileRemoved { target, status } => match status {
                VolatileStatus::Confused => Some(format!("{} snapped out of its confusion!", target)),
                VolatileStatus::Substitute => None,
                VolatileStatus::MagicCoat => None,
                VolatileStatus::MagnetRisen => {
                    Some(format!("{}'s electromagnetism wore off!", target))
                }
                _ => Some(format!("{} is no longer {}.", target, status)),
            },
            BattleEvent::SeedDrained { target, damage, .. } => Some(format!(
                "{}'s health is sapped by Leech Seed! ({} damage)",
                target, damage
            )),

            BattleEvent::StatStageChanged { target, stat, old_stage, new_stage } => {
                let steps = (*new_stage as i16 - *old_stage as i16).abs();
                let verb = match (new_stage > old_stage, steps) {
                    (true, 1) => "rose!",
                    (true, 2) => "rose sharply!",
                    (true, _) => "rose drastically!",
                    (false, 1) => "fell!",
                    (false, 2) => "harshly fell!",
                    (false, _) => "severely fell!",
                };
                Some(format!("{}'s {} {}", target, stat, verb))
            }
            BattleEvent::StatChangeBlocked { target, stat, rising } => {
                let bound = if *rising { "higher" } else { "lower" };
                Some(format!("{}'s {} won't go any {}!", target, stat, bound))
            }

            BattleEvent::WeatherChanged { weather } => Some(Self::format_weather_start(*weather)),
            BattleEvent::WeatherEnded { weather } => Some(format!("The {} subsided.", weather)),
            BattleEvent::TeamConditionApplied { player_index, condition } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("{}'s {} is now in effect!", player_name, condition))
            }
            BattleEvent::TeamConditionExpired { player_index, condition } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("{}'s {} wore off.", player_name, condition))
            }

            BattleEvent::ActionFailed { pokemon, reason } => {
                Some(Self::format_action_failure_reason(*pokemon, reason))
            }
            BattleEvent::NoUsableMoves { pokemon, .. } => {
                Some(format!("{} has no worthwhile move and holds back!", pokemon))
            }

            BattleEvent::PlayerDefeated { player_index } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("{} is out of usable Pokemon!", player_name))
            }
            BattleEvent::BattleEnded { winner } => match winner {
                Some(index) => Some(format!(
                    "{} has won the battle!",
                    battle_state.players[*index].player_name
                )),
                None => Some("The battle ended in a draw!".to_string()),
            },
        }
    }

    // --- Private Helper Functions ---

    fn format_charge(pokemon: Species, kind: ChargeKind) -> String {
        match kind {
            ChargeKind::SolarCharge => format!("{} absorbed light!", pokemon),
            ChargeKind::Fly => format!("{} flew up high!", pokemon),
            ChargeKind::Bounce => format!("{} sprang up!", pokemon),
            ChargeKind::SkyDrop => format!("{} took its target into the sky!", pokemon),
            ChargeKind::Dig => format!("{} burrowed its way under the ground!", pokemon),
            ChargeKind::PhantomForce => format!("{} vanished instantly!", pokemon),
            ChargeKind::ChargeUp => format!("{} began charging!", pokemon),
        }
    }

    fn format_status_noun(status: NonVolatileStatus) -> &'static str {
        match status {
            NonVolatileStatus::Burned => "burn",
            NonVolatileStatus::Poisoned | NonVolatileStatus::BadlyPoisoned => "poison",
            NonVolatileStatus::Paralyzed => "paralysis",
            NonVolatileStatus::Frozen => "freeze",
            NonVolatileStatus::Sleeping | NonVolatileStatus::Resting => "sleep",
        }
    }

    fn format_status_applied(status: NonVolatileStatus) -> &'static str {
        match status {
            NonVolatileStatus::Burned => "was burned!",
            NonVolatileStatus::Poisoned => "was poisoned!",
            NonVolatileStatus::BadlyPoisoned => "was badly poisoned!",
            NonVolatileStatus::Paralyzed => "is paralyzed! It may be unable to move!",
            NonVolatileStatus::Frozen => "was frozen solid!",
            NonVolatileStatus::Sleeping => "fell asleep!",
            NonVolatileStatus::Resting => "slept and became healthy!",
        }
    }

    fn format_status_removed(status: NonVolatileStatus) -> String {
        match status {
            NonVolatileStatus::Sleeping | NonVolatileStatus::Resting => "woke up!".to_string(),
            NonVolatileStatus::Frozen => "thawed out!".to_string(),
            _ => format!("was cured of its {}!", Self::format_status_noun(status)),
        }
    }

    fn format_volatile_applied(target: Species, status: VolatileStatus) -> String {
        match status {
            VolatileStatus::Confused => format!("{} became confused!", target),
            VolatileStatus::Seeded => format!("{} was seeded!", target),
            VolatileStatus::Yawning => format!("{} grew drowsy!", target),
            VolatileStatus::Substitute => format!("{} put in a substitute!", target),
            VolatileStatus::MagnetRisen => format!("{} levitated with electromagnetism!", target),
            VolatileStatus::MagicCoat => format!("{} shrouded itself with Magic Coat!", target),
        }
    }

    fn format_weather_start(weather: Weather) -> String {
        match weather {
            Weather::None => "The weather cleared up.".to_string(),
            Weather::Rain => "It started to rain!".to_string(),
            Weather::Sun => "The sunlight turned harsh!".to_string(),
            Weather::Sandstorm => "A sandstorm kicked up!".to_string(),
            Weather::Hail => "It started to hail!".to_string(),
            Weather::HeavyRain => "A heavy rain began to fall!".to_string(),
            Weather::HarshSun => "The sunlight turned extremely harsh!".to_string(),
            Weather::StrongWinds => "Mysterious strong winds are protecting Flying-type Pokemon!".to_string(),
        }
    }

    fn format_action_failure_reason(pokemon: Species, reason: &ActionFailureReason) -> String {
        match reason {
            ActionFailureReason::IsAsleep => format!("{} is fast asleep.", pokemon),
            ActionFailureReason::IsFrozen => format!("{} is frozen solid!", pokemon),
            ActionFailureReason::IsParalyzed => format!("{} is fully paralyzed!", pokemon),
            ActionFailureReason::HurtInConfusion => {
                format!("{} is confused! It hurt itself in its confusion!", pokemon)
            }
            ActionFailureReason::MoveFailed | ActionFailureReason::NoEnemyPresent => {
                "But it failed!".to_string()
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
    HurtInConfusion,
    MoveFailed,
    NoEnemyPresent, // The target fainted earlier in the turn
}

/// Event bus for collecting and managing battle events.
///
/// ```rust,ignore
/// event_bus.print_debug();
/// event_bus.print_formatted(&battle_state);
/// println!("{}", event_bus);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events using their formatted text, falling back to debug format for silent events.
    pub fn print_formatted(&self, battle_state: &BattleState) {
        for event in &self.events {
            match event.format(battle_state) {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }

    /// Formatted text of every non-silent event, in order.
    pub fn formatted_lines(&self, battle_state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(battle_state))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<u8>, index: usize },
    Seeded(StdRng),
}

/// Randomness owned by a battle. Every draw names what it is for, which keeps
/// scripted test sequences readable.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl Default for TurnRng {
    fn default() -> Self {
        Self::new_random()
    }
}

impl TurnRng {
    /// Scripted draws. Each value is clamped below the requested bound; once the
    /// script runs out every draw returns `bound - 1`.
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    /// Uniform integer in `0..bound`.
    pub fn roll(&mut self, bound: u32, reason: &str) -> u32 {
        if bound <= 1 {
            return 0;
        }
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => match outcomes.get(*index) {
                Some(&value) => {
                    *index += 1;
                    (value as u32).min(bound - 1)
                }
                None => {
                    tracing::warn!(reason, "scripted rng exhausted");
                    bound - 1
                }
            },
            RngSource::Seeded(rng) => rng.random_range(0..bound),
        };

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        tracing::trace!(outcome, bound, reason, "rng draw");
        outcome
    }

    /// Uniform integer in `1..=100`.
    pub fn percent(&mut self, reason: &str) -> u32 {
        self.roll(100, reason) + 1
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub players: [BattlePlayer; 2],
    pub turn_number: u32,
    pub game_state: GameState,
    pub weather: Weather,
    /// Turns left on move-set weather; `None` while weather is permanent.
    pub weather_turns: Option<u8>,
    /// The side that acted first in the current or most recent turn.
    pub first_actor: Option<PlayerTarget>,
    pub level: u8,
    #[serde(skip, default)]
    pub rng: TurnRng,
}

impl BattleState {
    pub fn new(player: BattlePlayer, opponent: BattlePlayer, rng: TurnRng) -> Self {
        let level = player
            .active_pokemon()
            .map(|pokemon| pokemon.level)
            .unwrap_or(crate::pokemon::DEFAULT_LEVEL);
        Self {
            players: [player, opponent],
            turn_number: 1,
            game_state: GameState::WaitingForAction,
            weather: Weather::None,
            weather_turns: None,
            first_actor: None,
            level,
            rng,
        }
    }

    pub fn player(&self, target: PlayerTarget) -> &BattlePlayer {
        &self.players[target.to_index()]
    }

    pub fn player_mut(&mut self, target: PlayerTarget) -> &mut BattlePlayer {
        &mut self.players[target.to_index()]
    }

    pub fn active(&self, target: PlayerTarget) -> Option<&PokemonInst> {
        self.player(target).active_pokemon()
    }

    pub fn active_mut(&mut self, target: PlayerTarget) -> Option<&mut PokemonInst> {
        self.player_mut(target).active_pokemon_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::DEFAULT_LEVEL;
    use pretty_assertions::assert_eq;

    fn create_test_battle_state() -> BattleState {
        let bulbasaur = PokemonInst::new(Species::Bulbasaur, DEFAULT_LEVEL).unwrap();
        let voltorb = PokemonInst::new(Species::Voltorb, DEFAULT_LEVEL).unwrap();
        let player = BattlePlayer::new("p1".to_string(), "Player".to_string(), vec![bulbasaur]);
        let opponent = BattlePlayer::new("p2".to_string(), "Rival".to_string(), vec![voltorb]);
        BattleState::new(player, opponent, TurnRng::new_for_test(vec![]))
    }

    #[test]
    fn test_silent_events_return_none() {
        let battle_state = create_test_battle_state();
        let silent_events = vec![
            BattleEvent::TurnEnded,
            BattleEvent::AttackTypeEffectiveness { multiplier: 1.0 },
            BattleEvent::VolatileRemoved {
                target: Species::Bulbasaur,
                status: VolatileStatus::MagicCoat,
            },
        ];

        for event in silent_events {
            assert!(
                event.format(&battle_state).is_none(),
                "Event {:?} should be silent but returned text",
                event
            );
        }
    }

    #[test]
    fn test_event_text_samples() {
        let battle_state = create_test_battle_state();

        let used = BattleEvent::MoveUsed {
            player_index: 1,
            pokemon: Species::Voltorb,
            move_used: Move::ThunderWave,
        };
        assert_eq!(
            used.format(&battle_state),
            Some("Rival's Voltorb used Thunder Wave!".to_string())
        );

        let stage = BattleEvent::StatStageChanged {
            target: Species::Bulbasaur,
            stat: StatType::SpDef,
            old_stage: 6,
            new_stage: 8,
        };
        assert_eq!(
            stage.format(&battle_state),
            Some("Bulbasaur's Sp. Def rose sharply!".to_string())
        );

        let charge = BattleEvent::ChargingStarted {
            pokemon: Species::Charmander,
            move_used: Move::Dig,
            kind: ChargeKind::Dig,
        };
        assert_eq!(
            charge.format(&battle_state),
            Some("Charmander burrowed its way under the ground!".to_string())
        );

        let no_effect = BattleEvent::AttackTypeEffectiveness { multiplier: 0.0 };
        assert_eq!(no_effect.format(&battle_state), Some("It had no effect!".to_string()));
    }

    #[test]
    fn test_status_removal_text() {
        let battle_state = create_test_battle_state();
        let woke = BattleEvent::StatusRemoved {
            target: Species::Wooper,
            status: NonVolatileStatus::Resting,
        };
        assert_eq!(woke.format(&battle_state), Some("Wooper woke up!".to_string()));

        let cured = BattleEvent::StatusRemoved {
            target: Species::Wooper,
            status: NonVolatileStatus::BadlyPoisoned,
        };
        assert_eq!(
            cured.format(&battle_state),
            Some("Wooper was cured of its poison!".to_string())
        );
    }

    #[test]
    fn test_event_bus_collects_in_order() {
        let mut event_bus = EventBus::new();
        let battle_state = create_test_battle_state();

        event_bus.push(BattleEvent::TurnStarted { turn_number: 1 });
        event_bus.push(BattleEvent::TurnEnded);
        event_bus.push(BattleEvent::CriticalHit {
            attacker: Species::Bulbasaur,
            defender: Species::Voltorb,
            move_used: Move::GigaDrain,
        });

        assert!(!event_bus.is_empty());
        assert_eq!(event_bus.len(), 3);
        assert_eq!(
            event_bus.formatted_lines(&battle_state),
            vec!["=== Turn 1 ===".to_string(), "A critical hit!".to_string()]
        );

        let display_output = format!("{}", event_bus);
        assert!(display_output.contains("TurnStarted"));
        assert!(display_output.contains("CriticalHit"));
    }

    #[test]
    fn test_scripted_rng_clamps_and_saturates() {
        let mut rng = TurnRng::new_for_test(vec![50, 3]);
        assert_eq!(rng.roll(16, "clamped"), 15);
        assert_eq!(rng.roll(16, "in range"), 3);
        assert_eq!(rng.roll(100, "exhausted"), 99);
        assert_eq!(rng.percent("exhausted"), 100);
        assert_eq!(rng.roll(1, "trivial"), 0);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = TurnRng::from_seed(7);
        let mut b = TurnRng::from_seed(7);
        let draws_a: Vec<u32> = (0..10).map(|_| a.roll(100, "a")).collect();
        let draws_b: Vec<u32> = (0..10).map(|_| b.roll(100, "b")).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|&d| d < 100));
    }
}

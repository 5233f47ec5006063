use crate::battle::ai::{AiDecision, Behavior};
use crate::battle::state::{BattleState, TurnRng};
use crate::errors::BattleResult;
use crate::player::BattlePlayer;
use crate::pokemon::{PokemonInst, StatusCounter, DEFAULT_LEVEL};
use schema::{Move, NonVolatileStatus, Species, StatType, VolatileStatus};

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new(Species::Voltorb)
///     .with_moves(&[Move::Discharge])
///     .with_status(NonVolatileStatus::Paralyzed)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: Species,
    level: u8,
    moves: Option<Vec<Move>>,
    status: Option<NonVolatileStatus>,
    volatiles: Vec<VolatileStatus>,
    counters: Vec<(StatusCounter, u8)>,
    stages: Vec<(StatType, i8)>,
    current_hp: Option<u16>,
    substitute_hp: Option<u16>,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given species at the default level.
    pub fn new(species: Species) -> Self {
        Self {
            species,
            level: DEFAULT_LEVEL,
            moves: None,
            status: None,
            volatiles: Vec::new(),
            counters: Vec::new(),
            stages: Vec::new(),
            current_hp: None,
            substitute_hp: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Replaces the species' default moveset.
    pub fn with_moves(mut self, moves: &[Move]) -> Self {
        self.moves = Some(moves.to_vec());
        self
    }

    pub fn with_status(mut self, status: NonVolatileStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_volatile(mut self, status: VolatileStatus) -> Self {
        self.volatiles.push(status);
        self
    }

    pub fn with_counter(mut self, counter: StatusCounter, value: u8) -> Self {
        self.counters.push((counter, value));
        self
    }

    /// Applies a stage delta from neutral.
    pub fn with_stage(mut self, stat: StatType, delta: i8) -> Self {
        self.stages.push((stat, delta));
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Puts a substitute with the given HP in front of the Pokemon.
    pub fn with_substitute(mut self, hp: u16) -> Self {
        self.substitute_hp = Some(hp);
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        let result = match &self.moves {
            Some(moves) => PokemonInst::with_moves(self.species, self.level, moves),
            None => PokemonInst::new(self.species, self.level),
        };
        let mut pokemon = match result {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to build test Pokemon {:?}: {}", self.species, err),
        };

        pokemon.status = self.status;
        for status in self.volatiles {
            pokemon.add_volatile(status);
        }
        for (counter, value) in self.counters {
            pokemon.set_counter(counter, value);
        }
        for (stat, delta) in self.stages {
            pokemon.stages.apply_delta(stat, delta);
        }
        if let Some(hp) = self.substitute_hp {
            pokemon.add_volatile(VolatileStatus::Substitute);
            pokemon.counters.substitute_hp = hp;
        }
        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }

        pokemon
    }
}

/// Creates a default test player with a given ID, name, and team.
pub fn create_test_player(id: &str, name: &str, team: Vec<PokemonInst>) -> BattlePlayer {
    BattlePlayer::new(id.to_string(), name.to_string(), team)
}

/// Creates a standard 1v1 battle state for testing, with an empty RNG script.
pub fn create_test_battle(player_pokemon: PokemonInst, opponent_pokemon: PokemonInst) -> BattleState {
    create_team_battle(vec![player_pokemon], vec![opponent_pokemon], TurnRng::new_for_test(vec![]))
}

/// Creates a battle with full rosters and a given RNG.
pub fn create_team_battle(
    player_team: Vec<PokemonInst>,
    opponent_team: Vec<PokemonInst>,
    rng: TurnRng,
) -> BattleState {
    let player = create_test_player("p1", "Player", player_team);
    let opponent = create_test_player("p2", "Rival", opponent_team);
    BattleState::new(player, opponent, rng)
}

/// A scripted RNG. An exhausted script keeps returning the top of each range,
/// which means no crits, no secondary effects, no paralysis and no thaw.
pub fn predictable_rng(outcomes: Vec<u8>) -> TurnRng {
    TurnRng::new_for_test(outcomes)
}

/// An opponent that always makes the same decision and draws no randomness.
pub struct FixedChoice(pub AiDecision);

impl Behavior for FixedChoice {
    fn decide_action(&self, _player_index: usize, _battle_state: &BattleState, _rng: &mut TurnRng) -> AiDecision {
        self.0
    }
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

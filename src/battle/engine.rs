use crate::battle::ai::{AiDecision, Behavior, TieredAI};
use crate::battle::calculators::{calculate_attack_outcome, confusion_damage, AttackContext};
use crate::battle::commands::{execute_command_batch, BattleCommand, PlayerTarget};
use crate::battle::end_of_turn::execute_end_turn_phase;
use crate::battle::move_effects::{
    apply_special_effect, apply_thaw_on_hit, resolve_secondary_effects, targets_opponent,
    EffectContext,
};
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleState, EventBus, GameState, TurnRng,
};
use crate::battle::stats::{effective_speed, move_hits};
use crate::battle::two_turn::{cancel_charge, resolve_charge, ChargeStep};
use crate::config::BattleConfig;
use crate::errors::{ActionError, BattleResult, BattleStateError, ExecutionError};
use crate::move_data::get_move_data;
use crate::player::{BattlePlayer, MAX_ROSTER};
use crate::pokemon::{PokemonInst, StatusCounter};
use crate::species::find_species;
use schema::{NonVolatileStatus, Species, TeamCondition, VolatileStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const SIDES: [PlayerTarget; 2] = [PlayerTarget::Player, PlayerTarget::Opponent];

/// Which sides had a combatant faint during the turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaintedSides {
    pub player: bool,
    pub opponent: bool,
}

/// A non-volatile status gained or lost during the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub pokemon: Species,
    pub status: NonVolatileStatus,
    /// False when the status was cured or wore off.
    pub applied: bool,
}

/// Everything a caller needs to present one resolved turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Commentary lines, in the order things happened.
    pub log: Vec<String>,
    pub events: Vec<BattleEvent>,
    pub player_hp_percent: u8,
    pub opponent_hp_percent: u8,
    pub fainted: FaintedSides,
    pub status_changes: Vec<StatusChange>,
    pub outcome: GameState,
}

/// Start a battle at the default level with no weather.
pub fn start_battle(player_roster: &[Species], opponent_roster: &[Species]) -> BattleResult<BattleState> {
    start_battle_with_config(&BattleConfig::default(), player_roster, opponent_roster)
}

pub fn start_battle_with_config(
    config: &BattleConfig,
    player_roster: &[Species],
    opponent_roster: &[Species],
) -> BattleResult<BattleState> {
    let player = build_player("p1", "Player", player_roster, config.level)?;
    let opponent = build_player("p2", "Rival", opponent_roster, config.level)?;

    let mut state = BattleState::new(player, opponent, config.rng());
    state.level = config.level;
    state.weather = config.weather;
    state.weather_turns = None;

    tracing::info!(
        level = config.level,
        weather = %config.weather,
        seeded = config.seed.is_some(),
        "battle started"
    );
    Ok(state)
}

/// Start a battle from species names, e.g. `["Bulbasaur", "mr. mime"]`.
pub fn start_battle_by_name(player_names: &[&str], opponent_names: &[&str]) -> BattleResult<BattleState> {
    let player_roster = species_from_names(player_names)?;
    let opponent_roster = species_from_names(opponent_names)?;
    start_battle(&player_roster, &opponent_roster)
}

fn species_from_names(names: &[&str]) -> BattleResult<Vec<Species>> {
    names
        .iter()
        .map(|name| find_species(name).map_err(Into::into))
        .collect()
}

fn build_player(id: &str, name: &str, roster: &[Species], level: u8) -> BattleResult<BattlePlayer> {
    if roster.is_empty() || roster.len() > MAX_ROSTER {
        return Err(BattleStateError::InvalidRosterSize(roster.len()).into());
    }
    let team = roster
        .iter()
        .map(|&species| PokemonInst::new(species, level))
        .collect::<BattleResult<Vec<_>>>()?;
    Ok(BattlePlayer::new(id.to_string(), name.to_string(), team))
}

/// Resolve one turn with the player's chosen move slot against the default AI.
pub fn resolve_turn(state: &mut BattleState, chosen_move_index: usize) -> BattleResult<TurnResult> {
    resolve_turn_with(state, chosen_move_index, &TieredAI::new())
}

/// Resolve one turn, letting `ai` choose for the opponent.
pub fn resolve_turn_with(
    state: &mut BattleState,
    chosen_move_index: usize,
    ai: &dyn Behavior,
) -> BattleResult<TurnResult> {
    let player_slot = validate_player_move(state, chosen_move_index)?;

    let mut rng = std::mem::take(&mut state.rng);
    let result = run_turn(state, player_slot, ai, &mut rng);
    state.rng = rng;
    result
}

/// The slot the player will actually use. A charging combatant is locked into its charge.
pub fn validate_player_move(state: &BattleState, chosen_move_index: usize) -> BattleResult<usize> {
    if state.game_state.is_over() {
        return Err(BattleStateError::BattleOver.into());
    }
    let pokemon = state
        .active(PlayerTarget::Player)
        .ok_or(ActionError::NoActivePokemon)?;
    let instance = pokemon.validate_move_index(chosen_move_index)?;

    if let Some(slot) = pokemon.charging_move_index() {
        return Ok(slot);
    }
    if instance.pp == 0 {
        return Err(ActionError::NoPpRemaining(instance.move_).into());
    }
    Ok(chosen_move_index)
}

fn run_turn(
    state: &mut BattleState,
    player_slot: usize,
    ai: &dyn Behavior,
    rng: &mut TurnRng,
) -> BattleResult<TurnResult> {
    let mut bus = EventBus::new();
    state.game_state = GameState::TurnInProgress;
    tracing::info!(turn = state.turn_number, "turn started");
    bus.push(BattleEvent::TurnStarted {
        turn_number: state.turn_number,
    });

    let opponent_slot = match ai.decide_action(PlayerTarget::Opponent.to_index(), state, rng) {
        AiDecision::UseMove(slot) => Some(slot),
        AiDecision::SwitchOut => None,
    };
    let choices = [Some(player_slot), opponent_slot];

    let order = determine_action_order(state, rng);
    state.first_actor = Some(order[0]);

    for side in order {
        match choices[side.to_index()] {
            Some(slot) => execute_move_action(side, slot, state, &mut bus, rng)?,
            None => hold_back(side, state, &mut bus),
        }
    }

    execute_end_turn_phase(state, &mut bus, rng)?;
    finalize_turn(state, &mut bus);

    Ok(build_turn_result(state, bus))
}

/// Faster side first; a speed tie is a coin flip where 0 favours the player.
pub fn determine_action_order(state: &BattleState, rng: &mut TurnRng) -> [PlayerTarget; 2] {
    let speed = |side| state.active(side).map_or(0, effective_speed);
    let player_speed = speed(PlayerTarget::Player);
    let opponent_speed = speed(PlayerTarget::Opponent);

    let player_first = match player_speed.cmp(&opponent_speed) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => rng.roll(2, "speed tie") == 0,
    };
    tracing::debug!(player_speed, opponent_speed, player_first, "action order");

    if player_first {
        [PlayerTarget::Player, PlayerTarget::Opponent]
    } else {
        [PlayerTarget::Opponent, PlayerTarget::Player]
    }
}

fn hold_back(side: PlayerTarget, state: &BattleState, bus: &mut EventBus) {
    if let Some(pokemon) = state.active(side).filter(|pokemon| !pokemon.is_fainted()) {
        bus.push(BattleEvent::NoUsableMoves {
            player_index: side.to_index(),
            pokemon: pokemon.species,
        });
    }
}

/// Commands from the checks run before a combatant may act.
struct ActionGate {
    commands: Vec<BattleCommand>,
    can_act: bool,
}

impl ActionGate {
    fn prevented(mut commands: Vec<BattleCommand>, pokemon: Species, reason: ActionFailureReason) -> Self {
        commands.insert(
            0,
            BattleCommand::EmitEvent(BattleEvent::ActionFailed { pokemon, reason }),
        );
        Self {
            commands,
            can_act: false,
        }
    }
}

/// Freeze, sleep, paralysis, then confusion.
fn check_action_gate(
    target: PlayerTarget,
    pokemon: &PokemonInst,
    level: u8,
    rng: &mut TurnRng,
) -> ActionGate {
    let species = pokemon.species;
    let mut commands = Vec::new();

    match pokemon.status {
        Some(NonVolatileStatus::Frozen) => {
            if rng.percent("thaw") > 20 {
                return ActionGate::prevented(commands, species, ActionFailureReason::IsFrozen);
            }
            commands.push(BattleCommand::SetPokemonStatus { target, status: None });
            commands.push(BattleCommand::EmitEvent(BattleEvent::StatusRemoved {
                target: species,
                status: NonVolatileStatus::Frozen,
            }));
        }
        Some(status) if status.is_asleep() => match pokemon.counter(StatusCounter::Sleep) {
            0 => {
                commands.push(BattleCommand::SetPokemonStatus { target, status: None });
                commands.push(BattleCommand::EmitEvent(BattleEvent::StatusRemoved {
                    target: species,
                    status,
                }));
            }
            turns => {
                commands.push(BattleCommand::SetStatusCounter {
                    target,
                    counter: StatusCounter::Sleep,
                    value: turns - 1,
                });
                return ActionGate::prevented(commands, species, ActionFailureReason::IsAsleep);
            }
        },
        Some(NonVolatileStatus::Paralyzed) => {
            if rng.percent("full paralysis") <= 25 {
                return ActionGate::prevented(commands, species, ActionFailureReason::IsParalyzed);
            }
        }
        _ => {}
    }

    if pokemon.has_volatile(VolatileStatus::Confused) {
        match pokemon.counter(StatusCounter::Confusion) {
            0 => {
                commands.push(BattleCommand::RemoveVolatile {
                    target,
                    status: VolatileStatus::Confused,
                });
                commands.push(BattleCommand::EmitEvent(BattleEvent::VolatileRemoved {
                    target: species,
                    status: VolatileStatus::Confused,
                }));
            }
            turns => {
                commands.push(BattleCommand::SetStatusCounter {
                    target,
                    counter: StatusCounter::Confusion,
                    value: turns - 1,
                });
                if rng.roll(3, "confusion self-hit") == 0 {
                    let amount = confusion_damage(pokemon, level, rng);
                    let mut gate =
                        ActionGate::prevented(commands, species, ActionFailureReason::HurtInConfusion);
                    gate.commands.push(BattleCommand::DealDamage { target, amount });
                    return gate;
                }
            }
        }
    }

    ActionGate {
        commands,
        can_act: true,
    }
}

fn attack_context(state: &BattleState, attacker: PlayerTarget) -> AttackContext {
    let defending_player = state.player(attacker.other());
    AttackContext {
        level: state.level,
        weather: state.weather,
        moving_last: state.first_actor != Some(attacker),
        reflect: defending_player.has_team_condition(TeamCondition::Reflect),
        light_screen: defending_player.has_team_condition(TeamCondition::LightScreen),
    }
}

fn execute_move_action(
    side: PlayerTarget,
    move_slot: usize,
    state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> BattleResult<()> {
    let Some(attacker) = state.active(side).filter(|pokemon| !pokemon.is_fainted()) else {
        return Ok(());
    };
    let instance = attacker
        .moves
        .get(move_slot)
        .ok_or(ExecutionError::InvalidMoveSlot(move_slot))?;
    let move_data = get_move_data(instance.move_)?;
    let releasing = instance.charging;
    let species = attacker.species;

    let gate = check_action_gate(side, attacker, state.level, rng);
    execute_command_batch(gate.commands, state, bus)?;
    if !gate.can_act {
        if let Some(attacker) = state.active(side) {
            execute_command_batch(cancel_charge(side, attacker), state, bus)?;
        }
        return Ok(());
    }

    let mut commands = Vec::new();
    if !releasing {
        commands.push(BattleCommand::UsePp { target: side, move_slot });
    }
    commands.push(BattleCommand::EmitEvent(BattleEvent::MoveUsed {
        player_index: side.to_index(),
        pokemon: species,
        move_used: move_data.id,
    }));
    execute_command_batch(commands, state, bus)?;
    tracing::debug!(?side, move_used = %move_data.id, "move used");

    let Some(attacker) = state.active(side) else {
        return Ok(());
    };
    let charge = resolve_charge(side, attacker, move_slot, move_data, state.weather);
    if charge.step == ChargeStep::Charging {
        // A charge only starts if the move would have connected.
        if let Some(defender) = state.active(side.other()).filter(|pokemon| !pokemon.is_fainted()) {
            if !move_hits(attacker, defender, move_data, state.weather, rng) {
                bus.push(BattleEvent::MoveMissed {
                    attacker: species,
                    defender: defender.species,
                    move_used: move_data.id,
                });
                return Ok(());
            }
        }
        execute_command_batch(charge.commands, state, bus)?;
        return Ok(());
    }
    execute_command_batch(charge.commands, state, bus)?;

    let defender_side = side.other();
    let target_present = state
        .active(defender_side)
        .is_some_and(|pokemon| !pokemon.is_fainted());
    if !target_present && (move_data.is_damaging() || targets_opponent(move_data)) {
        bus.push(BattleEvent::ActionFailed {
            pokemon: species,
            reason: ActionFailureReason::NoEnemyPresent,
        });
        return Ok(());
    }

    if move_data.is_damaging() {
        execute_damaging_move(side, move_data, state, bus, rng)
    } else {
        execute_status_move(side, move_data, state, bus, rng)
    }
}

fn execute_damaging_move(
    side: PlayerTarget,
    move_data: &schema::MoveData,
    state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> BattleResult<()> {
    let defender_side = side.other();
    let (Some(attacker), Some(defender)) = (state.active(side), state.active(defender_side)) else {
        return Ok(());
    };
    let ctx = attack_context(state, side);
    let resolution = calculate_attack_outcome(defender_side, attacker, defender, move_data, &ctx, rng);
    let outcome = resolution.outcome;
    execute_command_batch(resolution.commands, state, bus)?;

    if !outcome.landed() {
        return Ok(());
    }

    let thaw = apply_thaw_on_hit(move_data, defender_side, state);
    execute_command_batch(thaw, state, bus)?;

    let context = EffectContext::new(side, defender_side, move_data);
    let effects = resolve_secondary_effects(&context, state, outcome.damage(), rng);
    execute_command_batch(effects, state, bus)?;
    Ok(())
}

fn execute_status_move(
    side: PlayerTarget,
    move_data: &schema::MoveData,
    state: &mut BattleState,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> BattleResult<()> {
    let mut context = EffectContext::new(side, side.other(), move_data);

    if targets_opponent(move_data) {
        let (Some(attacker), Some(defender)) = (state.active(side), state.active(side.other())) else {
            return Ok(());
        };
        if defender.has_volatile(VolatileStatus::MagicCoat) {
            bus.push(BattleEvent::MoveReflected {
                reflector: defender.species,
                move_used: move_data.id,
            });
            context = context.reflected();
        } else if !move_hits(attacker, defender, move_data, state.weather, rng) {
            bus.push(BattleEvent::MoveMissed {
                attacker: attacker.species,
                defender: defender.species,
                move_used: move_data.id,
            });
            return Ok(());
        }
    }

    if let Some(effect) = move_data.special {
        let commands = apply_special_effect(effect, &context, state);
        execute_command_batch(commands, state, bus)?;
    }
    let effects = resolve_secondary_effects(&context, state, 0, rng);
    execute_command_batch(effects, state, bus)?;
    Ok(())
}

fn finalize_turn(state: &mut BattleState, bus: &mut EventBus) {
    replace_fainted(state, bus);
    check_win_conditions(state, bus);
    if !state.game_state.is_over() {
        state.game_state = GameState::WaitingForAction;
        state.turn_number += 1;
    }
    bus.push(BattleEvent::TurnEnded);
}

/// A fainted active combatant is replaced by the next healthy roster member.
fn replace_fainted(state: &mut BattleState, bus: &mut EventBus) {
    for side in SIDES {
        let player = state.player(side);
        let Some(active) = player.active_pokemon().filter(|pokemon| pokemon.is_fainted()) else {
            continue;
        };
        let Some(next) = player.next_healthy_index() else {
            continue;
        };
        let old_pokemon = active.species;

        let player = state.player_mut(side);
        if player.switch_pokemon(next) {
            if let Some(new_pokemon) = player.active_pokemon() {
                tracing::debug!(?side, %old_pokemon, new_pokemon = %new_pokemon.species, "replacement sent out");
                bus.push(BattleEvent::PokemonSwitched {
                    player_index: side.to_index(),
                    old_pokemon,
                    new_pokemon: new_pokemon.species,
                });
            }
        }
    }
}

fn check_win_conditions(state: &mut BattleState, bus: &mut EventBus) {
    let player_alive = state.players[0].has_non_fainted_pokemon();
    let opponent_alive = state.players[1].has_non_fainted_pokemon();

    let (outcome, defeated, winner) = match (player_alive, opponent_alive) {
        (true, true) => return,
        (false, false) => (GameState::Draw, vec![0, 1], None),
        (false, true) => (GameState::OpponentWin, vec![0], Some(1)),
        (true, false) => (GameState::PlayerWin, vec![1], Some(0)),
    };

    for player_index in defeated {
        bus.push(BattleEvent::PlayerDefeated { player_index });
    }
    bus.push(BattleEvent::BattleEnded { winner });
    state.game_state = outcome;
    tracing::info!(?outcome, turn = state.turn_number, "battle ended");
}

fn build_turn_result(state: &BattleState, bus: EventBus) -> TurnResult {
    let log = bus.formatted_lines(state);
    let events = bus.into_events();

    let mut fainted = FaintedSides::default();
    let mut status_changes = Vec::new();
    for event in &events {
        match *event {
            BattleEvent::PokemonFainted { player_index: 0, .. } => fainted.player = true,
            BattleEvent::PokemonFainted { .. } => fainted.opponent = true,
            BattleEvent::StatusApplied { target, status } => status_changes.push(StatusChange {
                pokemon: target,
                status,
                applied: true,
            }),
            BattleEvent::StatusRemoved { target, status } => status_changes.push(StatusChange {
                pokemon: target,
                status,
                applied: false,
            }),
            _ => {}
        }
    }

    let hp_percent = |side| state.active(side).map_or(0, PokemonInst::hp_percent);
    TurnResult {
        log,
        events,
        player_hp_percent: hp_percent(PlayerTarget::Player),
        opponent_hp_percent: hp_percent(PlayerTarget::Opponent),
        fainted,
        status_changes,
        outcome: state.game_state,
    }
}

use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::state::{BattleEvent, TurnRng};
use crate::battle::stats::{
    defensive_stat, get_type_effectiveness, move_hits, offensive_stat, stab, stage_multiplier,
};
use crate::pokemon::PokemonInst;
use schema::{
    Invulnerability, MoveCategory, MoveData, NonVolatileStatus, PokemonType, PowerFormula,
    StatType, VolatileStatus, Weather,
};

/// Battle-wide inputs to a single attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackContext {
    pub level: u8,
    pub weather: Weather,
    /// The attacker acts after its target this turn.
    pub moving_last: bool,
    pub reflect: bool,
    pub light_screen: bool,
}

impl Default for AttackContext {
    fn default() -> Self {
        Self {
            level: crate::pokemon::DEFAULT_LEVEL,
            weather: Weather::None,
            moving_last: false,
            reflect: false,
            light_screen: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    Hit {
        damage: u16,
        critical: bool,
        effectiveness: f64,
    },
    Miss,
    NoEffect,
}

impl AttackOutcome {
    pub fn damage(&self) -> u16 {
        match self {
            AttackOutcome::Hit { damage, .. } => *damage,
            _ => 0,
        }
    }

    pub fn landed(&self) -> bool {
        matches!(self, AttackOutcome::Hit { .. })
    }
}

/// Base power for moves that scale with the target's weight.
pub trait WeightPower {
    fn power(&self, fixed_power: u16, target_weight: Option<u16>) -> u16;
}

/// Weight brackets in hectograms. Targets without a recorded weight take the listed power.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardWeightPower;

impl WeightPower for StandardWeightPower {
    fn power(&self, fixed_power: u16, target_weight: Option<u16>) -> u16 {
        match target_weight {
            None => fixed_power,
            Some(w) if w < 100 => 20,
            Some(w) if w < 250 => 40,
            Some(w) if w < 500 => 60,
            Some(w) if w < 1000 => 80,
            Some(w) if w < 2000 => 100,
            Some(_) => 120,
        }
    }
}

pub fn resolve_base_power(
    move_data: &MoveData,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    ctx: &AttackContext,
) -> u16 {
    resolve_base_power_with(move_data, attacker, defender, ctx, &StandardWeightPower)
}

/// Apply the move's situational power formula.
pub fn resolve_base_power_with(
    move_data: &MoveData,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    ctx: &AttackContext,
    weight_power: &dyn WeightPower,
) -> u16 {
    let fixed = move_data.power;
    match move_data.power_formula {
        PowerFormula::Fixed => fixed,
        PowerFormula::HpScaled => {
            (fixed as u32 * attacker.current_hp() as u32 / attacker.max_hp.max(1) as u32) as u16
        }
        PowerFormula::DoubleVsUnderground => {
            if defender.invulnerability == Some(Invulnerability::Underground) {
                fixed * 2
            } else {
                fixed
            }
        }
        PowerFormula::DoubleWhenMovingLast => {
            if ctx.moving_last {
                fixed * 2
            } else {
                fixed
            }
        }
        PowerFormula::HalvedInBadWeather => match ctx.weather {
            Weather::None | Weather::Sun | Weather::HarshSun | Weather::StrongWinds => fixed,
            _ => fixed / 2,
        },
        PowerFormula::WeightScaled => weight_power.power(fixed, defender.weight),
    }
}

/// Crit chance by stage: 1/16, 1/8, 1/2, then guaranteed.
pub fn roll_critical(attacker: &PokemonInst, move_data: &MoveData, rng: &mut TurnRng) -> bool {
    let stage = attacker.crit_stage.saturating_add(move_data.high_crit as u8);
    let rate = match stage {
        0 => 16,
        1 => 8,
        2 => 2,
        _ => return true,
    };
    rng.roll(rate, "critical hit") == 0
}

/// Only plain rain and sun scale damage; heavy rain and harsh sun do not.
fn weather_multiplier(move_type: PokemonType, weather: Weather) -> f64 {
    match (move_type, weather) {
        (PokemonType::Water, Weather::Rain) | (PokemonType::Fire, Weather::Sun) => 1.5,
        (PokemonType::Fire, Weather::Rain) | (PokemonType::Water, Weather::Sun) => 0.5,
        _ => 1.0,
    }
}

/// Damage pipeline for a move that has already passed its accuracy check.
pub fn calculate_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    ctx: &AttackContext,
    rng: &mut TurnRng,
) -> AttackOutcome {
    let effectiveness = get_type_effectiveness(move_data.move_type, defender);
    if effectiveness == 0.0 {
        return AttackOutcome::NoEffect;
    }

    let base_power = resolve_base_power(move_data, attacker, defender, ctx);
    let critical = roll_critical(attacker, move_data, rng);

    let raw = (2.0 * ctx.level as f64 + 10.0) * base_power as f64 / 250.0;
    let mut damage = raw * offensive_stat(attacker, defender, move_data, critical)
        / defensive_stat(defender, move_data, critical, ctx.weather).max(1.0)
        + 2.0;

    damage *= effectiveness * stab(move_data.move_type, attacker);
    if critical {
        damage *= 1.5;
    }
    if move_data.category == MoveCategory::Physical
        && attacker.status == Some(NonVolatileStatus::Burned)
    {
        damage *= 0.5;
    }
    damage *= weather_multiplier(move_data.move_type, ctx.weather);

    let screened = match move_data.category {
        MoveCategory::Physical => ctx.reflect,
        MoveCategory::Special => ctx.light_screen,
        MoveCategory::Status => false,
    };
    if screened && !critical {
        damage *= 0.5;
    }

    let random = rng.roll(16, "damage variance") + 85;
    damage *= random as f64 / 100.0;

    let cap = if defender.has_volatile(VolatileStatus::Substitute) {
        defender.counters.substitute_hp
    } else {
        defender.current_hp()
    };
    let damage = (damage.trunc().max(0.0) as u32).min(cap as u32) as u16;

    tracing::debug!(
        move_used = %move_data.id,
        base_power,
        critical,
        effectiveness,
        damage,
        "damage calculated"
    );

    AttackOutcome::Hit {
        damage,
        critical,
        effectiveness,
    }
}

/// Self-inflicted confusion damage: a 40-power typeless physical hit on the user.
pub fn confusion_damage(pokemon: &PokemonInst, level: u8, rng: &mut TurnRng) -> u16 {
    let atk = pokemon.stat(StatType::Atk) as f64 * stage_multiplier(pokemon.stages.atk);
    let def = pokemon.stat(StatType::Def) as f64 * stage_multiplier(pokemon.stages.def);
    let raw = (2.0 * level as f64 + 10.0) * 40.0 / 250.0;
    let random = rng.roll(16, "confusion variance") + 85;
    let damage = (raw * atk / def.max(1.0) + 2.0) * random as f64 / 100.0;
    (damage.trunc() as u16).min(pokemon.current_hp())
}

/// Result of an attack attempt: the outcome plus the commands that apply it.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackResolution {
    pub outcome: AttackOutcome,
    pub commands: Vec<BattleCommand>,
}

/// Accuracy check followed by the damage pipeline, expressed as commands against `defender_target`.
pub fn calculate_attack_outcome(
    defender_target: PlayerTarget,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    ctx: &AttackContext,
    rng: &mut TurnRng,
) -> AttackResolution {
    let mut commands = Vec::new();

    if !move_hits(attacker, defender, move_data, ctx.weather, rng) {
        commands.push(BattleCommand::EmitEvent(BattleEvent::MoveMissed {
            attacker: attacker.species,
            defender: defender.species,
            move_used: move_data.id,
        }));
        return AttackResolution {
            outcome: AttackOutcome::Miss,
            commands,
        };
    }

    let outcome = calculate_damage(attacker, defender, move_data, ctx, rng);
    match outcome {
        AttackOutcome::Hit {
            damage,
            critical,
            effectiveness,
        } => {
            if critical {
                commands.push(BattleCommand::EmitEvent(BattleEvent::CriticalHit {
                    attacker: attacker.species,
                    defender: defender.species,
                    move_used: move_data.id,
                }));
            }
            if effectiveness != 1.0 {
                commands.push(BattleCommand::EmitEvent(BattleEvent::AttackTypeEffectiveness {
                    multiplier: effectiveness,
                }));
            }
            if defender.has_volatile(VolatileStatus::Substitute) {
                commands.push(BattleCommand::DamageSubstitute {
                    target: defender_target,
                    amount: damage,
                });
            } else {
                commands.push(BattleCommand::DealDamage {
                    target: defender_target,
                    amount: damage,
                });
            }
        }
        AttackOutcome::NoEffect => {
            commands.push(BattleCommand::EmitEvent(BattleEvent::AttackTypeEffectiveness {
                multiplier: 0.0,
            }));
        }
        AttackOutcome::Miss => {}
    }

    AttackResolution { outcome, commands }
}

use super::get_move_data;
use crate::errors::MoveDataResult;
use schema::{Accuracy, ChargeKind, Move, MoveData, PokemonType, StatusMoveEffect};
use std::fmt;

/// Info-screen view of a move.
pub struct MoveSummary<'a>(pub &'a MoveData);

impl fmt::Display for MoveSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;

        // Name and header
        writeln!(f, "{}", data.name)?;
        writeln!(f, "--------------------")?;

        writeln!(f, "Type: {}", data.move_type)?;
        writeln!(f, "Category: {}", data.category)?;

        let power_str = match data.power {
            0 => "—".to_string(),
            p => p.to_string(),
        };
        let accuracy_str = match data.accuracy {
            Accuracy::Percent(a) => format!("{}%", a),
            Accuracy::NeverMiss => "—".to_string(),
        };
        writeln!(f, "Power: {} | Accuracy: {} | PP: {}", power_str, accuracy_str, data.max_pp)?;
        if data.contact {
            writeln!(f, "Makes contact.")?;
        }

        let effects = effect_lines(data);
        if !effects.is_empty() {
            writeln!(f, "--------------------")?;
            writeln!(f, "Effects:")?;
            for effect in &effects {
                writeln!(f, "- {}", effect)?;
            }
        }

        if !data.description.is_empty() {
            writeln!(f, "--------------------")?;
            write!(f, "{}", data.description)?;
        }
        Ok(())
    }
}

fn chance_prefix(chance: u8) -> String {
    if chance >= 100 {
        String::new()
    } else {
        format!("{}% chance: ", chance)
    }
}

fn effect_lines(data: &MoveData) -> Vec<String> {
    let mut lines = Vec::new();
    let whose = if data.changes_user_stats { "user's" } else { "target's" };
    let chance = chance_prefix(data.effect_chance);

    if let Some(kind) = data.charge {
        lines.push(match kind {
            ChargeKind::SolarCharge => "Charges on the first turn unless the sun is harsh.".to_string(),
            kind => match kind.invulnerability() {
                Some(state) => format!("Charges on the first turn while {:?}.", state),
                None => "Charges on the first turn.".to_string(),
            },
        });
    }
    if data.high_crit {
        lines.push("High critical-hit ratio.".to_string());
    }

    match data.stat_changes.hp {
        0 => {}
        hp if data.is_damaging() && hp > 0 => {
            lines.push(format!("{}Restores {}% of the damage dealt.", chance, hp))
        }
        hp if data.is_damaging() => {
            lines.push(format!("{}Recoil of {}% of the damage dealt.", chance, -hp))
        }
        hp => lines.push(format!("{}Changes the {} HP by {}%.", chance, whose, hp)),
    }
    for (stat, delta) in data.stat_changes.stage_deltas() {
        let direction = if delta > 0 { "Raises" } else { "Lowers" };
        lines.push(format!(
            "{}{} the {} {} by {}.",
            chance,
            direction,
            whose,
            stat,
            delta.unsigned_abs()
        ));
    }
    if let Some(status) = data.status_effect {
        lines.push(format!("{}Leaves the target {}.", chance, status));
    }
    for status in &data.volatile_effects {
        lines.push(format!("{}Inflicts {} on the target.", chance, status));
    }
    if let Some(special) = data.special {
        lines.push(match special {
            StatusMoveEffect::SetWeather(weather) => format!("Sets {} for five turns.", weather),
            StatusMoveEffect::WeatherHeal => "Heals the user; the amount depends on the weather.".to_string(),
            StatusMoveEffect::Rest => "The user sleeps for two turns and fully heals.".to_string(),
            StatusMoveEffect::Substitute => "Spends a quarter of max HP on a substitute.".to_string(),
            StatusMoveEffect::Screen(condition) => format!("Raises {} for five turns.", condition),
            StatusMoveEffect::MagnetRise => "Levitates the user for five turns.".to_string(),
            StatusMoveEffect::MagicCoat => "Bounces status moves back this turn.".to_string(),
            StatusMoveEffect::ForceSwitch => "Forces the target out.".to_string(),
        });
    }
    if data.thaws_target {
        lines.push("Thaws a frozen target.".to_string());
    }
    lines
}

/// Type, category, power, accuracy, PP, contact and effects of a move.
pub fn describe_move(move_: Move) -> MoveDataResult<String> {
    get_move_data(move_).map(|data| MoveSummary(data).to_string())
}

fn type_list(types: &[PokemonType]) -> String {
    if types.is_empty() {
        "—".to_string()
    } else {
        types.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}

/// Offensive and defensive matchups of a single type.
pub fn describe_type_matchup(pokemon_type: PokemonType) -> String {
    let mut strong = Vec::new();
    let mut weak = Vec::new();
    let mut no_effect = Vec::new();
    let mut weak_to = Vec::new();
    let mut resists = Vec::new();
    let mut immune_to = Vec::new();

    for other in PokemonType::all() {
        match PokemonType::type_effectiveness(pokemon_type, other) {
            m if m == 0.0 => no_effect.push(other),
            m if m > 1.0 => strong.push(other),
            m if m < 1.0 => weak.push(other),
            _ => {}
        }
        match PokemonType::type_effectiveness(other, pokemon_type) {
            m if m == 0.0 => immune_to.push(other),
            m if m > 1.0 => weak_to.push(other),
            m if m < 1.0 => resists.push(other),
            _ => {}
        }
    }

    format!(
        "{t}\n\
         Attacking:\n  Super effective against: {}\n  Not very effective against: {}\n  No effect on: {}\n\
         Defending:\n  Weak to: {}\n  Resists: {}\n  Immune to: {}",
        type_list(&strong),
        type_list(&weak),
        type_list(&no_effect),
        type_list(&weak_to),
        type_list(&resists),
        type_list(&immune_to),
        t = pokemon_type,
    )
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("unknown type: {0:?}")]
    UnknownType(String),
    #[error("a typing holds at most two types, got {0:?}")]
    TooManyTypes(String),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
    /// Used for damage that ignores the type chart, such as hitting itself in confusion.
    Typeless,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for PokemonType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        PokemonType::iter()
            .find(|t| {
                let variant: &'static str = t.into();
                variant.eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| TypeError::UnknownType(name.to_string()))
    }
}

impl PokemonType {
    /// Every type that can appear in a typing or on a move, in chart order.
    pub fn all() -> impl Iterator<Item = PokemonType> {
        PokemonType::iter().filter(|t| *t != PokemonType::Typeless)
    }

    /// Calculate type effectiveness multiplier for attacking type vs a single defending type
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: PokemonType, defending: PokemonType) -> f32 {
        use PokemonType::*;

        match (attacking, defending) {
            (Typeless, _) | (_, Typeless) => 1.0,

            // Normal
            (Normal, Rock) | (Normal, Steel) => 0.5,
            (Normal, Ghost) => 0.0,
            (Normal, _) => 1.0,

            // Fighting
            (Fighting, Poison)
            | (Fighting, Flying)
            | (Fighting, Psychic)
            | (Fighting, Bug)
            | (Fighting, Fairy) => 0.5,
            (Fighting, Ghost) => 0.0,
            (Fighting, Normal)
            | (Fighting, Ice)
            | (Fighting, Rock)
            | (Fighting, Dark)
            | (Fighting, Steel) => 2.0,
            (Fighting, _) => 1.0,

            // Flying
            (Flying, Electric) | (Flying, Rock) | (Flying, Steel) => 0.5,
            (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => 2.0,
            (Flying, _) => 1.0,

            // Poison
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
            (Poison, Steel) => 0.0,
            (Poison, Grass) | (Poison, Fairy) => 2.0,
            (Poison, _) => 1.0,

            // Ground
            (Ground, Grass) | (Ground, Bug) => 0.5,
            (Ground, Flying) => 0.0,
            (Ground, Fire)
            | (Ground, Electric)
            | (Ground, Poison)
            | (Ground, Rock)
            | (Ground, Steel) => 2.0,
            (Ground, _) => 1.0,

            // Rock
            (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,
            (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,
            (Rock, _) => 1.0,

            // Bug
            (Bug, Fire)
            | (Bug, Fighting)
            | (Bug, Poison)
            | (Bug, Flying)
            | (Bug, Ghost)
            | (Bug, Steel)
            | (Bug, Fairy) => 0.5,
            (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,
            (Bug, _) => 1.0,

            // Ghost
            (Ghost, Normal) => 0.0,
            (Ghost, Dark) => 0.5,
            (Ghost, Ghost) | (Ghost, Psychic) => 2.0,
            (Ghost, _) => 1.0,

            // Steel
            (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => 0.5,
            (Steel, Ice) | (Steel, Rock) | (Steel, Fairy) => 2.0,
            (Steel, _) => 1.0,

            // Fire
            (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => 0.5,
            (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => 2.0,
            (Fire, _) => 1.0,

            // Water
            (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
            (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
            (Water, _) => 1.0,

            // Grass
            (Grass, Fire)
            | (Grass, Grass)
            | (Grass, Poison)
            | (Grass, Flying)
            | (Grass, Bug)
            | (Grass, Dragon)
            | (Grass, Steel) => 0.5,
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
            (Grass, _) => 1.0,

            // Electric
            (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
            (Electric, Ground) => 0.0,
            (Electric, Water) | (Electric, Flying) => 2.0,
            (Electric, _) => 1.0,

            // Psychic
            (Psychic, Psychic) | (Psychic, Steel) => 0.5,
            (Psychic, Dark) => 0.0,
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,
            (Psychic, _) => 1.0,

            // Ice
            (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => 0.5,
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,
            (Ice, _) => 1.0,

            // Dragon
            (Dragon, Steel) => 0.5,
            (Dragon, Fairy) => 0.0,
            (Dragon, Dragon) => 2.0,
            (Dragon, _) => 1.0,

            // Dark
            (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => 0.5,
            (Dark, Ghost) | (Dark, Psychic) => 2.0,
            (Dark, _) => 1.0,

            // Fairy
            (Fairy, Fire) | (Fairy, Poison) | (Fairy, Steel) => 0.5,
            (Fairy, Fighting) | (Fairy, Dragon) | (Fairy, Dark) => 2.0,
            (Fairy, _) => 1.0,
        }
    }

    pub fn is_immune(attacking: PokemonType, defending: PokemonType) -> bool {
        Self::type_effectiveness(attacking, defending) == 0.0
    }

    /// Multiplier of this attacking type against every type in `defending`.
    pub fn effectiveness_against(self, defending: &Typing) -> f32 {
        defending
            .types()
            .map(|t| Self::type_effectiveness(self, t))
            .product()
    }
}

/// One or two types. Written as `"Water"` or `"Water/Ground"` in data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Typing {
    primary: PokemonType,
    secondary: Option<PokemonType>,
}

impl Typing {
    pub fn new(primary: PokemonType, secondary: Option<PokemonType>) -> Self {
        let secondary = secondary.filter(|t| *t != primary);
        Self { primary, secondary }
    }

    pub fn single(primary: PokemonType) -> Self {
        Self::new(primary, None)
    }

    pub fn dual(primary: PokemonType, secondary: PokemonType) -> Self {
        Self::new(primary, Some(secondary))
    }

    pub fn primary(&self) -> PokemonType {
        self.primary
    }

    pub fn secondary(&self) -> Option<PokemonType> {
        self.secondary
    }

    pub fn types(&self) -> impl Iterator<Item = PokemonType> {
        std::iter::once(self.primary).chain(self.secondary)
    }

    pub fn contains(&self, pokemon_type: PokemonType) -> bool {
        self.primary == pokemon_type || self.secondary == Some(pokemon_type)
    }
}

impl fmt::Display for Typing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            Some(secondary) => write!(f, "{}/{}", self.primary, secondary),
            None => write!(f, "{}", self.primary),
        }
    }
}

impl FromStr for Typing {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [primary] => Ok(Typing::single(primary.parse()?)),
            [primary, secondary] => Ok(Typing::dual(primary.parse()?, secondary.parse()?)),
            _ => Err(TypeError::TooManyTypes(s.to_string())),
        }
    }
}

impl TryFrom<String> for Typing {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Typing> for String {
    fn from(typing: Typing) -> Self {
        typing.to_string()
    }
}

/// Effectiveness for names as they appear at the data boundary, e.g. `("Electric", "Water/Flying")`.
pub fn effectiveness_str(attacking: &str, defending: &str) -> Result<f32, TypeError> {
    let attacking: PokemonType = attacking.parse()?;
    let defending: Typing = defending.parse()?;
    Ok(attacking.effectiveness_against(&defending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Electric", "Water/Flying", 4.0)]
    #[case("Electric", "Ground", 0.0)]
    #[case("Electric", "Water/Ground", 0.0)]
    #[case("Electric", "Ground/Flying", 0.0)]
    #[case("Grass", "Fire/Flying", 0.25)]
    #[case("Fire", "Grass", 2.0)]
    #[case("Fairy", "Dragon", 2.0)]
    #[case("Dragon", "Fairy", 0.0)]
    #[case("Normal", "Water", 1.0)]
    fn test_effectiveness_from_strings(
        #[case] attacking: &str,
        #[case] defending: &str,
        #[case] expected: f32,
    ) {
        assert_eq!(effectiveness_str(attacking, defending), Ok(expected));
    }

    #[test]
    fn test_dual_typing_is_product_of_single_types() {
        for attacking in PokemonType::all() {
            for first in PokemonType::all() {
                for second in PokemonType::all() {
                    let dual = attacking.effectiveness_against(&Typing::dual(first, second));
                    let product = if first == second {
                        PokemonType::type_effectiveness(attacking, first)
                    } else {
                        PokemonType::type_effectiveness(attacking, first)
                            * PokemonType::type_effectiveness(attacking, second)
                    };
                    assert_eq!(dual, product, "{attacking} vs {first}/{second}");
                }
            }
        }
    }

    #[test]
    fn test_every_multiplier_is_from_the_fixed_set() {
        let allowed = [0.0, 0.25, 0.5, 1.0, 2.0, 4.0];
        for attacking in PokemonType::all() {
            for first in PokemonType::all() {
                for second in PokemonType::all() {
                    let value = attacking.effectiveness_against(&Typing::dual(first, second));
                    assert!(allowed.contains(&value), "{attacking} vs {first}/{second} = {value}");
                }
            }
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert_eq!(
            "Sound".parse::<PokemonType>(),
            Err(TypeError::UnknownType("Sound".to_string()))
        );
        assert_eq!(
            effectiveness_str("Water", "Fire/Cosmic"),
            Err(TypeError::UnknownType("Cosmic".to_string()))
        );
        assert!(matches!(
            "Fire/Water/Grass".parse::<Typing>(),
            Err(TypeError::TooManyTypes(_))
        ));
    }

    #[test]
    fn test_typing_display_round_trips_through_parse() {
        let typing = Typing::dual(PokemonType::Grass, PokemonType::Poison);
        assert_eq!(typing.to_string(), "Grass/Poison");
        assert_eq!("grass / poison".parse::<Typing>(), Ok(typing));
        assert!(typing.contains(PokemonType::Poison));
        assert!(!typing.contains(PokemonType::Water));
    }
}

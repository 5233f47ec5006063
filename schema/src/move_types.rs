use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter, EnumCount,
    strum::Display,
)]
pub enum Move {
    // Physical
    #[strum(to_string = "Aqua Tail")]
    AquaTail,
    #[strum(to_string = "Dig")]
    Dig,
    #[strum(to_string = "Dragon Claw")]
    DragonClaw,
    #[strum(to_string = "Earthquake")]
    Earthquake,
    #[strum(to_string = "Ice Punch")]
    IcePunch,
    #[strum(to_string = "Payback")]
    Payback,
    #[strum(to_string = "Play Rough")]
    PlayRough,
    #[strum(to_string = "Superpower")]
    Superpower,
    #[strum(to_string = "Foul Play")]
    FoulPlay,
    #[strum(to_string = "Slash")]
    Slash,
    #[strum(to_string = "Fly")]
    Fly,
    #[strum(to_string = "Low Kick")]
    LowKick,

    // Special
    #[strum(to_string = "Discharge")]
    Discharge,
    #[strum(to_string = "Energy Ball")]
    EnergyBall,
    #[strum(to_string = "Eruption")]
    Eruption,
    #[strum(to_string = "Flamethrower")]
    Flamethrower,
    #[strum(to_string = "Giga Drain")]
    GigaDrain,
    #[strum(to_string = "Ice Beam")]
    IceBeam,
    #[strum(to_string = "Lava Plume")]
    LavaPlume,
    #[strum(to_string = "Scald")]
    Scald,
    #[strum(to_string = "Sludge Bomb")]
    SludgeBomb,
    #[strum(to_string = "Solar Beam")]
    SolarBeam,
    #[strum(to_string = "Volt Switch")]
    VoltSwitch,
    #[strum(to_string = "Thunder")]
    Thunder,
    #[strum(to_string = "Hurricane")]
    Hurricane,
    #[strum(to_string = "Blizzard")]
    Blizzard,
    #[strum(to_string = "Psyshock")]
    Psyshock,

    // Status
    #[strum(to_string = "Amnesia")]
    Amnesia,
    #[strum(to_string = "Leech Seed")]
    LeechSeed,
    #[strum(to_string = "Light Screen")]
    LightScreen,
    #[strum(to_string = "Magic Coat")]
    MagicCoat,
    #[strum(to_string = "Magnet Rise")]
    MagnetRise,
    #[strum(to_string = "Reflect")]
    Reflect,
    #[strum(to_string = "Rest")]
    Rest,
    #[strum(to_string = "Roar")]
    Roar,
    #[strum(to_string = "Screech")]
    Screech,
    #[strum(to_string = "Substitute")]
    Substitute,
    #[strum(to_string = "Sunny Day")]
    SunnyDay,
    #[strum(to_string = "Synthesis")]
    Synthesis,
    #[strum(to_string = "Thunder Wave")]
    ThunderWave,
    #[strum(to_string = "Toxic")]
    Toxic,
    #[strum(to_string = "Will-O-Wisp")]
    WillOWisp,
    #[strum(to_string = "Yawn")]
    Yawn,
    #[strum(to_string = "Confuse Ray")]
    ConfuseRay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn is_damaging(self) -> bool {
        !matches!(self, MoveCategory::Status)
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Hit chance of a move. `NeverMiss` skips the accuracy roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accuracy {
    Percent(u8),
    NeverMiss,
}

impl Accuracy {
    /// Legacy numeric code; 1000 stands for a move that never misses.
    pub fn code(self) -> u16 {
        match self {
            Accuracy::Percent(value) => value as u16,
            Accuracy::NeverMiss => 1000,
        }
    }
}

/// Semi-invulnerable states a charging combatant can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Invulnerability {
    InAir,
    SkyDropped,
    Bouncing,
    Underground,
    Vanished,
}

impl Invulnerability {
    pub fn code(self) -> u8 {
        match self {
            Invulnerability::InAir => 3,
            Invulnerability::SkyDropped => 4,
            Invulnerability::Bouncing => 5,
            Invulnerability::Underground => 6,
            Invulnerability::Vanished => 7,
        }
    }
}

/// Charge variants of two-turn moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeKind {
    ChargeUp,
    SolarCharge,
    Fly,
    SkyDrop,
    Bounce,
    Dig,
    PhantomForce,
}

impl ChargeKind {
    pub fn code(self) -> u8 {
        match self {
            ChargeKind::ChargeUp => 1,
            ChargeKind::SolarCharge => 2,
            ChargeKind::Fly => 3,
            ChargeKind::SkyDrop => 4,
            ChargeKind::Bounce => 5,
            ChargeKind::Dig => 6,
            ChargeKind::PhantomForce => 7,
        }
    }

    /// The state the user hides in while charging; only kinds above code 2 have one.
    pub fn invulnerability(self) -> Option<Invulnerability> {
        match self {
            ChargeKind::ChargeUp | ChargeKind::SolarCharge => None,
            ChargeKind::Fly => Some(Invulnerability::InAir),
            ChargeKind::SkyDrop => Some(Invulnerability::SkyDropped),
            ChargeKind::Bounce => Some(Invulnerability::Bouncing),
            ChargeKind::Dig => Some(Invulnerability::Underground),
            ChargeKind::PhantomForce => Some(Invulnerability::Vanished),
        }
    }
}

/// Situational base power formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerFormula {
    #[default]
    Fixed,
    /// Scales with the user's remaining HP fraction.
    HpScaled,
    DoubleVsUnderground,
    DoubleWhenMovingLast,
    /// Halved in rain, sandstorm, hail and heavy rain.
    HalvedInBadWeather,
    /// Scales with the target's weight.
    WeightScaled,
}

impl PowerFormula {
    pub fn code(self) -> u8 {
        match self {
            PowerFormula::Fixed => 0,
            PowerFormula::HpScaled => 1,
            PowerFormula::DoubleVsUnderground => 2,
            PowerFormula::DoubleWhenMovingLast => 3,
            PowerFormula::HalvedInBadWeather => 4,
            PowerFormula::WeightScaled => 5,
        }
    }
}

/// Which stats feed the damage formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatSource {
    /// Atk/Def for physical moves, SpAtk/SpDef for special moves.
    #[default]
    Standard,
    /// The target's own Attack against its Defense.
    TargetAttack,
    /// Special attack against the target's Defense.
    PhysicalDefense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherAccuracy {
    SureHitInRain,
    HailBonus(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamCondition {
    Reflect,
    LightScreen,
}

impl fmt::Display for TeamCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            TeamCondition::Reflect => "Reflect",
            TeamCondition::LightScreen => "Light Screen",
        };
        write!(f, "{}", display_name)
    }
}

/// Effects of status moves that go beyond stat and status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusMoveEffect {
    SetWeather(Weather),
    WeatherHeal,
    Rest,
    Substitute,
    Screen(TeamCondition),
    MagnetRise,
    MagicCoat,
    ForceSwitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum StatType {
    Hp,
    Atk,
    Def,
    SpAtk,
    SpDef,
    Spe,
    Accuracy,
    Evasion,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatType::Hp => "HP",
            StatType::Atk => "Attack",
            StatType::Def => "Defense",
            StatType::SpAtk => "Sp. Atk",
            StatType::SpDef => "Sp. Def",
            StatType::Spe => "Speed",
            StatType::Accuracy => "accuracy",
            StatType::Evasion => "evasiveness",
        };
        write!(f, "{}", name)
    }
}

/// Per-stat deltas carried by a move. `hp` is a percentage, the rest are stage steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatChanges {
    #[serde(default)]
    pub hp: i8,
    #[serde(default)]
    pub atk: i8,
    #[serde(default)]
    pub def: i8,
    #[serde(default)]
    pub sp_atk: i8,
    #[serde(default)]
    pub sp_def: i8,
    #[serde(default)]
    pub spe: i8,
    #[serde(default)]
    pub accuracy: i8,
    #[serde(default)]
    pub evasion: i8,
}

impl StatChanges {
    pub fn is_empty(&self) -> bool {
        self.hp == 0 && self.stage_deltas().next().is_none()
    }

    /// Nonzero stage deltas, Attack through Evasion.
    pub fn stage_deltas(&self) -> impl Iterator<Item = (StatType, i8)> {
        [
            (StatType::Atk, self.atk),
            (StatType::Def, self.def),
            (StatType::SpAtk, self.sp_atk),
            (StatType::SpDef, self.sp_def),
            (StatType::Spe, self.spe),
            (StatType::Accuracy, self.accuracy),
            (StatType::Evasion, self.evasion),
        ]
        .into_iter()
        .filter(|(_, delta)| *delta != 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NonVolatileStatus {
    Burned,
    Poisoned,
    BadlyPoisoned,
    Paralyzed,
    Frozen,
    Sleeping,
    Resting,
}

impl NonVolatileStatus {
    pub fn is_asleep(self) -> bool {
        matches!(self, NonVolatileStatus::Sleeping | NonVolatileStatus::Resting)
    }
}

impl fmt::Display for NonVolatileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NonVolatileStatus::Burned => "burned",
            NonVolatileStatus::Poisoned => "poisoned",
            NonVolatileStatus::BadlyPoisoned => "badly poisoned",
            NonVolatileStatus::Paralyzed => "paralyzed",
            NonVolatileStatus::Frozen => "frozen",
            NonVolatileStatus::Sleeping => "asleep",
            NonVolatileStatus::Resting => "resting",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VolatileStatus {
    Confused,
    Seeded,
    Yawning,
    Substitute,
    MagnetRisen,
    MagicCoat,
}

impl fmt::Display for VolatileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VolatileStatus::Confused => "confused",
            VolatileStatus::Seeded => "seeded",
            VolatileStatus::Yawning => "drowsy",
            VolatileStatus::Substitute => "behind a substitute",
            VolatileStatus::MagnetRisen => "levitating",
            VolatileStatus::MagicCoat => "shrouded in Magic Coat",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
pub enum Weather {
    #[default]
    None,
    Rain,
    Sun,
    Sandstorm,
    Hail,
    HeavyRain,
    HarshSun,
    StrongWinds,
}

impl Weather {
    pub fn code(self) -> u8 {
        match self {
            Weather::None => 0,
            Weather::Rain => 1,
            Weather::Sun => 2,
            Weather::Sandstorm => 3,
            Weather::Hail => 4,
            Weather::HeavyRain => 5,
            Weather::HarshSun => 6,
            Weather::StrongWinds => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Weather> {
        use strum::IntoEnumIterator;
        Weather::iter().find(|w| w.code() == code)
    }

    pub fn is_rain(self) -> bool {
        matches!(self, Weather::Rain | Weather::HeavyRain)
    }

    pub fn is_sun(self) -> bool {
        matches!(self, Weather::Sun | Weather::HarshSun)
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weather::None => "clear skies",
            Weather::Rain => "rain",
            Weather::Sun => "harsh sunlight",
            Weather::Sandstorm => "sandstorm",
            Weather::Hail => "hail",
            Weather::HeavyRain => "heavy rain",
            Weather::HarshSun => "extremely harsh sunlight",
            Weather::StrongWinds => "strong winds",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Weather {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = crate::normalize_name(s);
        match normalized.as_str() {
            "NONE" | "CLEAR" => Ok(Weather::None),
            "RAIN" => Ok(Weather::Rain),
            "SUN" | "SUNNY" => Ok(Weather::Sun),
            "SAND" | "SANDSTORM" => Ok(Weather::Sandstorm),
            "HAIL" => Ok(Weather::Hail),
            "HEAVYRAIN" => Ok(Weather::HeavyRain),
            "HARSHSUN" => Ok(Weather::HarshSun),
            "STRONGWINDS" | "WIND" => Ok(Weather::StrongWinds),
            _ => match s.trim().parse::<u8>().ok().and_then(Weather::from_code) {
                Some(weather) => Ok(weather),
                None => Err(format!("unknown weather: {s:?}")),
            },
        }
    }
}

/// Immutable definition of a move, as stored in `data/moves.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: Move,
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: u16,
    pub accuracy: Accuracy,
    pub max_pp: u8,
    #[serde(default)]
    pub charge: Option<ChargeKind>,
    #[serde(default)]
    pub power_formula: PowerFormula,
    #[serde(default)]
    pub contact: bool,
    #[serde(default)]
    pub high_crit: bool,
    #[serde(default)]
    pub stat_changes: StatChanges,
    #[serde(default)]
    pub changes_user_stats: bool,
    #[serde(default)]
    pub status_effect: Option<NonVolatileStatus>,
    #[serde(default)]
    pub volatile_effects: Vec<VolatileStatus>,
    #[serde(default)]
    pub bypasses: Vec<Invulnerability>,
    #[serde(default)]
    pub effect_chance: u8,
    #[serde(default)]
    pub stat_source: StatSource,
    #[serde(default)]
    pub weather_accuracy: Option<WeatherAccuracy>,
    #[serde(default)]
    pub special: Option<StatusMoveEffect>,
    #[serde(default)]
    pub thaws_target: bool,
    #[serde(default)]
    pub description: String,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.category.is_damaging()
    }

    /// Whether any secondary effect would be rolled for after the move lands.
    pub fn has_secondary_effects(&self) -> bool {
        !self.stat_changes.is_empty()
            || self.status_effect.is_some()
            || !self.volatile_effects.is_empty()
    }

    pub fn can_hit_through(&self, state: Invulnerability) -> bool {
        self.bypasses.contains(&state)
    }
}

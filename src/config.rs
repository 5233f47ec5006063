use crate::battle::state::TurnRng;
use crate::errors::ConfigError;
use crate::pokemon::DEFAULT_LEVEL;
use schema::Weather;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Battle-wide settings, loadable from a RON file.
///
/// ```ron
/// (level: 50, seed: Some(7), weather: Rain)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub level: u8,
    /// Fixed seed for a reproducible battle. Without one the battle draws from OS entropy.
    pub seed: Option<u64>,
    /// Starting weather. It lasts until a move replaces it.
    pub weather: Weather,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            seed: None,
            weather: Weather::None,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig = ron::from_str(text)?;
        if config.level == 0 || config.level > 100 {
            return Err(ConfigError::Parse(format!(
                "level must be between 1 and 100, got {}",
                config.level
            )));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading battle config");
        Self::from_ron_str(&text)
    }

    pub fn rng(&self) -> TurnRng {
        match self.seed {
            Some(seed) => TurnRng::from_seed(seed),
            None => TurnRng::new_random(),
        }
    }
}

//! Engine configuration.
//!
//! Hosts usually keep these settings in their own storage and hand them to
//! the engine as JSON.
//!
//! ```
//! use brawl_core::config::BrawlConfig;
//!
//! let config = BrawlConfig::from_json_str(r#"{ "event_cadence": 2, "hazards": ["spilled_ale"] }"#)?;
//! assert_eq!(config.event_cadence, 2);
//! assert_eq!(config.default_move_slots, 3);
//! # Ok::<(), brawl_core::error::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::events::{hazard, HAZARD_EVENTS};
use crate::catalog::EnvironmentalEvent;
use crate::error::ConfigError;

/// Tunables for one brawl engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrawlConfig {
    /// Narrative event every this many turns; 0 disables.
    pub event_cadence: u32,
    /// Move-slot budget for sheets that do not set one.
    pub default_move_slots: u8,
    /// Difficulty of grabbing a prop.
    pub prop_grab_dc: i32,
    /// Hazard keys the encounter may draw from; empty means all.
    pub hazards: Vec<String>,
    /// Seed for [`SeededDice`](crate::dice::SeededDice), used by hosts.
    pub seed: Option<u64>,
}

impl Default for BrawlConfig {
    fn default() -> Self {
        Self {
            event_cadence: 3,
            default_move_slots: 3,
            prop_grab_dc: 10,
            hazards: Vec::new(),
            seed: None,
        }
    }
}

impl BrawlConfig {
    /// Parses and validates a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON,
    /// [`ConfigError::UnknownHazard`] for a hazard key not in the catalog.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every configured hazard key against the catalog.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownHazard`] naming the first unknown key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hazard_set().map(|_| ())
    }

    /// Resolves the configured hazard set.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownHazard`] naming the first unknown key.
    pub fn hazard_set(&self) -> Result<Vec<&'static EnvironmentalEvent>, ConfigError> {
        if self.hazards.is_empty() {
            return Ok(HAZARD_EVENTS.iter().collect());
        }
        self.hazards
            .iter()
            .map(|key| hazard(key).ok_or_else(|| ConfigError::UnknownHazard(key.clone())))
            .collect()
    }
}

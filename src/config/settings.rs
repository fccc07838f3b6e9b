//! Application settings loaded from config.toml
//!
//! The settings file holds the default roster used to start a new bill and
//! how much split history to keep. Every section is optional; a missing file
//! falls back to defaults.

use crate::{
    core::bill::{BillState, Person},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default number of saved splits kept by history pruning
pub const DEFAULT_MAX_SAVED: u64 = 20;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Split history options
    #[serde(default)]
    pub history: HistorySettings,
    /// People placed on every new bill, in order; the first one pays
    #[serde(default)]
    pub people: Vec<PersonConfig>,
}

/// `[history]` section
#[derive(Debug, Deserialize, Clone)]
pub struct HistorySettings {
    /// How many saved splits to keep
    #[serde(default = "default_max_saved")]
    pub max_saved: u64,
}

const fn default_max_saved() -> u64 {
    DEFAULT_MAX_SAVED
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_saved: DEFAULT_MAX_SAVED,
        }
    }
}

/// A person in the default roster
#[derive(Debug, Deserialize, Clone)]
pub struct PersonConfig {
    /// Stable id used in bill files
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether this person only pays and never consumes
    #[serde(default)]
    pub is_external: bool,
}

impl From<&PersonConfig> for Person {
    fn from(config: &PersonConfig) -> Self {
        Self {
            is_external: config.is_external,
            ..Self::new(config.id.clone(), config.name.clone())
        }
    }
}

impl Settings {
    /// Starts a new bill from the default roster, or `None` if the roster is empty.
    ///
    /// # Errors
    /// Returns `Error::DuplicateId` if two roster entries share an id.
    pub fn seed_bill(&self) -> Result<Option<BillState>> {
        let Some((payer, rest)) = self.people.split_first() else {
            return Ok(None);
        };
        let mut bill = BillState::new(payer.into());
        for person in rest {
            bill.add_person(person.into())?;
        }
        Ok(Some(bill))
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads settings from `path`, using defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        info!("No settings file at {}, using defaults", path_ref.display());
        return Ok(Settings::default());
    }
    load_settings(path_ref)
}

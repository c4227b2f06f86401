//! # Configuration
//!
//! Project settings are managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `PLANATTR__TIME_FORMAT`, `PLANATTR__SCHEDULE_GRANULARITY`, etc.
//! 2. **Search paths**: every `planattr.toml` found in the given directories, later ones
//!    overriding earlier ones.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `time_format` | `%Y-%m-%d-%H:%M` | strftime format for dates in display forms |
//! | `schedule_granularity` | `3600` | Length of a scheduling slot in seconds |
//! | `daily_working_hours` | `8.0` | Working hours that make up one working day |
//! | `currency` | `EUR` | Currency label for charges |
//!
//! Source forms never use `time_format`; they always use [`DSL_TIME_FORMAT`] so
//! that the text parses back into the same date.
//!
//! Attributes that need project settings (limits, shift assignments) do not own
//! them. [`ProjectContext`] owns the loaded config and hands out weak handles.

use std::path::PathBuf;
use std::rc::{Rc, Weak};

use clapfig::{Clapfig, SearchMode, SearchPath};
use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::{AttrError, Result};

/// Date format of the project description language.
pub const DSL_TIME_FORMAT: &str = "%Y-%m-%d-%H:%M";

/// Project-wide settings, stored in `planattr.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    /// strftime format used when dates are shown to people
    #[config(default = "%Y-%m-%d-%H:%M")]
    pub time_format: String,

    /// Length of one scheduling slot in seconds
    #[config(default = 3600)]
    pub schedule_granularity: u32,

    /// Working hours per working day
    #[config(default = 8.0)]
    pub daily_working_hours: f64,

    #[config(default = "EUR")]
    pub currency: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            time_format: DSL_TIME_FORMAT.to_string(),
            schedule_granularity: 3600,
            daily_working_hours: 8.0,
            currency: "EUR".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Load the config, merging `planattr.toml` from each search path in order.
    pub fn load(search_paths: Vec<PathBuf>) -> Result<Self> {
        Clapfig::builder()
            .app_name("planattr")
            .file_name("planattr.toml")
            .search_paths(search_paths.into_iter().map(SearchPath::Path).collect())
            .search_mode(SearchMode::Merge)
            .load()
            .map_err(|e| AttrError::Config(e.to_string()))
    }

    /// Slot length in seconds, never zero.
    pub fn granularity(&self) -> u32 {
        self.schedule_granularity.max(1)
    }

    /// Number of scheduling slots needed to cover `hours`, rounded to the nearest slot.
    pub fn hours_to_slots(&self, hours: f64) -> u32 {
        let slots = (hours * 3600.0 / f64::from(self.granularity())).round();
        if slots <= 0.0 {
            0
        } else {
            slots as u32
        }
    }
}

/// Owner of the shared project settings.
///
/// Attribute values that need the project only keep a [`Weak`] handle obtained
/// from [`ProjectContext::handle`], so dropping the context invalidates them.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    config: Rc<ProjectConfig>,
}

impl ProjectContext {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// A non-owning handle to the settings.
    pub fn handle(&self) -> Weak<ProjectConfig> {
        Rc::downgrade(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert_eq!(config.time_format, "%Y-%m-%d-%H:%M");
        assert_eq!(config.schedule_granularity, 3600);
        assert_eq!(config.daily_working_hours, 8.0);
        assert_eq!(config.currency, "EUR");
    }

    #[test]
    fn test_hours_to_slots_hourly() {
        let config = ProjectConfig::default();
        assert_eq!(config.hours_to_slots(8.0), 8);
        assert_eq!(config.hours_to_slots(0.0), 0);
    }

    #[test]
    fn test_hours_to_slots_quarter_hours() {
        let config = ProjectConfig {
            schedule_granularity: 900,
            ..Default::default()
        };
        assert_eq!(config.hours_to_slots(2.5), 10);
    }

    #[test]
    fn test_zero_granularity_is_clamped() {
        let config = ProjectConfig {
            schedule_granularity: 0,
            ..Default::default()
        };
        assert_eq!(config.granularity(), 1);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ProjectConfig {
            time_format: "%d.%m.%Y".to_string(),
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: ProjectConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_context_handle_dies_with_context() {
        let context = ProjectContext::new(ProjectConfig::default());
        let handle = context.handle();
        assert!(handle.upgrade().is_some());
        drop(context);
        assert!(handle.upgrade().is_none());
    }
}

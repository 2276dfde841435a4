//! Runtime configuration for the core.
//!
//! # Responsibility
//! - Resolve database location, logging and geofence settings from the
//!   process environment.
//!
//! # Invariants
//! - Resolution never fails; unusable values fall back to defaults.

use crate::geofence::GEOFENCE_RADIUS_IN_METERS;
use crate::logging::default_log_level;
use log::warn;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "GEOREMIND_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "GEOREMIND_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "GEOREMIND_LOG_DIR";
pub const GEOFENCE_RADIUS_ENV: &str = "GEOREMIND_GEOFENCE_RADIUS_M";

const DEFAULT_DB_FILE_NAME: &str = "georemind.sqlite3";

#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Rolling file logs are written only when set.
    pub log_dir: Option<PathBuf>,
    pub geofence_radius_meters: f32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            geofence_radius_meters: GEOFENCE_RADIUS_IN_METERS,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, one key at a time.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = value(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = value(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config.log_dir = value(LOG_DIR_ENV).map(PathBuf::from);

        if let Some(raw) = value(GEOFENCE_RADIUS_ENV) {
            match raw.parse::<f32>() {
                Ok(radius) if radius.is_finite() && radius > 0.0 => {
                    config.geofence_radius_meters = radius;
                }
                _ => warn!(
                    "event=config_resolve module=config status=fallback key={GEOFENCE_RADIUS_ENV} value={raw}"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, GEOFENCE_RADIUS_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn resolve(pairs: &[(&str, &str)]) -> CoreConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(resolve(&[]), CoreConfig::default());
    }

    #[test]
    fn values_are_trimmed_and_applied() {
        let config = resolve(&[
            (DB_PATH_ENV, " /data/reminders.db "),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/data/logs"),
            (GEOFENCE_RADIUS_ENV, "250"),
        ]);

        assert_eq!(config.db_path, PathBuf::from("/data/reminders.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/data/logs")));
        assert_eq!(config.geofence_radius_meters, 250.0);
    }

    #[test]
    fn invalid_radius_falls_back_to_default() {
        for raw in ["-5", "abc", "0", "NaN"] {
            let config = resolve(&[(GEOFENCE_RADIUS_ENV, raw)]);
            assert_eq!(config.geofence_radius_meters, 100.0, "value {raw}");
        }
    }
}

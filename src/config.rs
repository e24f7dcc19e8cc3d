//! Runner configuration from `BLOCKFALL_*` environment variables.
//!
//! Unset or blank variables fall back to defaults; a value that is set but
//! cannot be parsed is an error, reported before the terminal is taken over.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::input::KeyMap;
use crate::types::{Rules, FRAME_MS};

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_FRAME_MS: &str = "BLOCKFALL_FRAME_MS";
pub const ENV_LOCK_DELAY_MS: &str = "BLOCKFALL_LOCK_DELAY_MS";
pub const ENV_CLEAR_MS: &str = "BLOCKFALL_CLEAR_MS";
pub const ENV_LOCK_RESET_LIMIT: &str = "BLOCKFALL_LOCK_RESET_LIMIT";
pub const ENV_KEYS: &str = "BLOCKFALL_KEYS";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Piece randomizer seed
    pub seed: u32,
    /// Target repaint interval
    pub frame_ms: u32,
    pub rules: Rules,
    /// Key-map overrides, `action=key` pairs
    pub keys: Option<String>,
    /// JSON-lines event log destination
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            frame_ms: FRAME_MS,
            rules: Rules::default(),
            keys: None,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source (the process environment in production).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Rules::default();

        let seed = match parse_var(&get, ENV_SEED)? {
            Some(seed) => seed,
            None => clock_seed(),
        };

        let frame_ms = parse_var(&get, ENV_FRAME_MS)?.unwrap_or(FRAME_MS);
        if frame_ms == 0 {
            return Err(anyhow!("config: {} must be positive", ENV_FRAME_MS));
        }

        let lock_reset_limit = match text_var(&get, ENV_LOCK_RESET_LIMIT) {
            None => defaults.lock_reset_limit,
            Some(v) if v.eq_ignore_ascii_case("none") => None,
            Some(v) => Some(parse_value(ENV_LOCK_RESET_LIMIT, &v)?),
        };

        let rules = Rules {
            lock_delay_ms: parse_var(&get, ENV_LOCK_DELAY_MS)?.unwrap_or(defaults.lock_delay_ms),
            clear_delay_ms: parse_var(&get, ENV_CLEAR_MS)?.unwrap_or(defaults.clear_delay_ms),
            lock_reset_limit,
        };

        Ok(Self {
            seed,
            frame_ms,
            rules,
            keys: text_var(&get, ENV_KEYS),
            log_path: text_var(&get, ENV_LOG_PATH),
        })
    }

    /// Default bindings with the configured overrides applied.
    pub fn key_map(&self) -> Result<KeyMap> {
        match &self.keys {
            Some(overrides) => KeyMap::with_overrides(overrides),
            None => Ok(KeyMap::default()),
        }
    }
}

fn text_var(get: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    get(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    text_var(get, name)
        .map(|raw| parse_value(name, &raw))
        .transpose()
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| anyhow!("config: {}={:?}: {}", name, raw, e))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_SEED, "7")])).unwrap();
        assert_eq!(
            config,
            AppConfig {
                seed: 7,
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_SEED, "42"),
            (ENV_FRAME_MS, "33"),
            (ENV_LOCK_DELAY_MS, "250"),
            (ENV_CLEAR_MS, "0"),
            (ENV_LOCK_RESET_LIMIT, "15"),
            (ENV_KEYS, " hold=v "),
            (ENV_LOG_PATH, "/tmp/blockfall.jsonl"),
        ]))
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.frame_ms, 33);
        assert_eq!(
            config.rules,
            Rules {
                lock_delay_ms: 250,
                clear_delay_ms: 0,
                lock_reset_limit: Some(15),
            }
        );
        assert_eq!(config.keys.as_deref(), Some("hold=v"));
        assert_eq!(config.log_path.as_deref(), Some("/tmp/blockfall.jsonl"));
    }

    #[test]
    fn reset_limit_none_and_blank() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_LOCK_RESET_LIMIT, "None")])).unwrap();
        assert_eq!(config.rules.lock_reset_limit, None);
        let config = AppConfig::from_lookup(lookup(&[(ENV_LOG_PATH, "   ")])).unwrap();
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(AppConfig::from_lookup(lookup(&[(ENV_SEED, "abc")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(ENV_FRAME_MS, "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(ENV_LOCK_RESET_LIMIT, "-1")])).is_err());

        let err = AppConfig::from_lookup(lookup(&[(ENV_CLEAR_MS, "soon")])).unwrap_err();
        assert!(err.to_string().contains(ENV_CLEAR_MS));
    }

    #[test]
    fn key_map_applies_overrides() {
        let config = AppConfig {
            keys: Some("hold=v".to_string()),
            ..AppConfig::default()
        };
        assert!(config.key_map().is_ok());

        let config = AppConfig {
            keys: Some("hold".to_string()),
            ..AppConfig::default()
        };
        assert!(config.key_map().is_err());
    }
}

//! Configuration management for the CGT engine.
//!
//! Embedded defaults with optional override files, following the same
//! pattern as the rest of the ambient stack: `./config.toml` then
//! `~/.config/cgt-tool/config.toml`, later files taking precedence.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// Embedded default configuration.
static EMBEDDED_CONFIG: &str = include_str!("../data/config.toml");

/// Raw configuration as parsed from TOML; every field optional so an
/// override file only needs to mention what it changes.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawConfig {
    epsilon: Option<Decimal>,
    allow_short_selling: Option<bool>,
    truncate_quantities: Option<bool>,
}

/// Engine-wide tunables. See `SPEC_FULL.md` §B.4.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Tolerance for lot-accounting and sell-quantity equality checks
    /// (`ε` in §4.2/§4.4).
    pub epsilon: Decimal,
    /// Whether a symbol-year with insufficient BUY coverage is adjusted via
    /// the short-sell path (`true`) or fails the FY with
    /// [`crate::error::CgtError::ShortSellDetected`] (`false`, the default).
    pub allow_short_selling: bool,
    /// Whether the presentation boundary truncates `qty_sold` to an integer
    /// (legacy behaviour, §9) or preserves the real value (default).
    pub truncate_quantities: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::embedded()
    }
}

impl Config {
    /// Load the embedded default configuration.
    pub fn embedded() -> Self {
        Self::from_toml(EMBEDDED_CONFIG).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse embedded config: {e}");
            Self::fallback()
        })
    }

    /// Hardcoded values used only if the embedded TOML itself fails to
    /// parse, which would indicate a packaging bug rather than a user error.
    fn fallback() -> Self {
        Self {
            epsilon: Decimal::new(1, 9),
            allow_short_selling: false,
            truncate_quantities: false,
        }
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::fallback();
        Ok(Self {
            epsilon: raw.epsilon.unwrap_or(defaults.epsilon),
            allow_short_selling: raw.allow_short_selling.unwrap_or(defaults.allow_short_selling),
            truncate_quantities: raw
                .truncate_quantities
                .unwrap_or(defaults.truncate_quantities),
        })
    }

    /// Load configuration with override support.
    ///
    /// Checks `./config.toml` then `~/.config/cgt-tool/config.toml`; values
    /// present in an override file replace the embedded default.
    pub fn load_with_overrides() -> Self {
        let mut config = Self::embedded();

        for path in Self::override_paths() {
            if path.exists()
                && let Ok(content) = std::fs::read_to_string(&path)
                && let Ok(raw) = toml::from_str::<RawConfig>(&content)
            {
                if let Some(epsilon) = raw.epsilon {
                    config.epsilon = epsilon;
                }
                if let Some(allow) = raw.allow_short_selling {
                    config.allow_short_selling = allow;
                }
                if let Some(truncate) = raw.truncate_quantities {
                    config.truncate_quantities = truncate;
                }
            }
        }

        config
    }

    fn override_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            paths.push(home.join(".config").join("cgt-tool").join("config.toml"));
        }
        paths
    }
}

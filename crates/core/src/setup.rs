//! Verbosity configuration via `hepmc.toml`
//!
//! A `Setup` value is carried by every event and consulted by the few
//! operations that report diagnostics. Nothing here is global: two events
//! may run with different settings in the same process.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "hepmc.toml";

/// Debug level at which tree insertion reports its statistics
pub const DEBUG_TREE_STATS: u32 = 6;

/// Debug level at which removal cascades are traced
pub const DEBUG_REMOVAL: u32 = 30;

/// Diagnostic settings loaded from `hepmc.toml`.
///
/// # Example
///
/// ```toml
/// print_errors = true
/// print_warnings = true
/// debug_level = 5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    /// Report recoverable errors
    #[serde(default = "default_true")]
    pub print_errors: bool,
    /// Report warnings such as dropped attributes
    #[serde(default = "default_true")]
    pub print_warnings: bool,
    /// Verbosity of debug output
    #[serde(default = "default_debug_level")]
    pub debug_level: u32,
}

fn default_true() -> bool {
    true
}

fn default_debug_level() -> u32 {
    5
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            print_errors: true,
            print_warnings: true,
            debug_level: default_debug_level(),
        }
    }
}

impl Setup {
    /// Settings with every diagnostic turned off
    pub fn quiet() -> Self {
        Self {
            print_errors: false,
            print_warnings: false,
            debug_level: 0,
        }
    }

    /// True when debug output of `level` should be emitted
    pub fn debug_enabled(&self, level: u32) -> bool {
        self.debug_level >= level
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# HepMC event record diagnostics
#
# Report recoverable errors (default: true)
print_errors = true

# Report warnings, e.g. attributes dropped while flattening (default: true)
print_warnings = true

# Debug verbosity (default: 5)
#   >= 6  tree insertion statistics
#   >= 30 removal cascades
debug_level = 5
"#
    }

    /// Parse settings from TOML text; missing fields take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse setup: {}", e)))
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize setup: {}", e)))
    }

    /// Read and parse settings from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize these settings and write them to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

//! # Config — Generator Settings
//!
//! Settings are threaded into the solver, assembler and batch generator when
//! they are built, so independent generators (one per test, say) never share
//! state. Layering, lowest precedence first: [`GeneratorConfig::default`],
//! an optional TOML file, then command-line flags applied by the binary.
//!
//! ```toml
//! [generator]
//! strict = true
//! parallel = false
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for batch generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Re-check every assembled date with the validator and fail loudly on
    /// anything the generator should never have produced.
    pub strict: bool,
    /// Solve the partitions of one batch on the rayon pool.
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            strict: false,
            parallel: true,
        }
    }
}

impl GeneratorConfig {
    /// Default settings with strict validation switched on.
    pub fn strict() -> Self {
        GeneratorConfig {
            strict: true,
            ..Self::default()
        }
    }

    /// Default settings without the rayon pool.
    pub fn sequential() -> Self {
        GeneratorConfig {
            parallel: false,
            ..Self::default()
        }
    }
}

/// Top-level layout of a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub generator: GeneratorConfig,
}

// ── TOML Parsing ────────────────────────────────────────────────

/// Parse generator settings from a TOML string.
pub fn parse_toml(content: &str) -> Result<GeneratorConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file.generator)
}

/// Parse generator settings from a TOML file path.
pub fn parse_toml_file(path: &Path) -> Result<GeneratorConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
    parse_toml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient_and_parallel() {
        let config = GeneratorConfig::default();
        assert!(!config.strict);
        assert!(config.parallel);
    }

    #[test]
    fn presets_flip_one_flag() {
        assert_eq!(
            GeneratorConfig::strict(),
            GeneratorConfig {
                strict: true,
                parallel: true
            }
        );
        assert_eq!(
            GeneratorConfig::sequential(),
            GeneratorConfig {
                strict: false,
                parallel: false
            }
        );
    }

    #[test]
    fn parse_full_section() {
        let config = parse_toml("[generator]\nstrict = true\nparallel = false\n").unwrap();
        assert!(config.strict);
        assert!(!config.parallel);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = parse_toml("[generator]\nstrict = true\n").unwrap();
        assert!(config.strict);
        assert!(config.parallel);

        let empty = parse_toml("").unwrap();
        assert_eq!(empty, GeneratorConfig::default());
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(parse_toml("[database]\nurl = \"x\"\n").is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(parse_toml("[generator]\nstrict = \"yes\"\n").is_err());
    }

    #[test]
    fn parse_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("almanac.toml");
        std::fs::write(&path, "[generator]\nparallel = false\n").unwrap();
        let config = parse_toml_file(&path).unwrap();
        assert_eq!(config, GeneratorConfig::sequential());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = parse_toml_file(Path::new("/nonexistent/almanac.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/almanac.toml"));
    }
}

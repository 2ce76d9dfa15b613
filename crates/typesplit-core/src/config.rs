use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, TypesplitError};
use crate::output::OutputLayout;
use crate::pipeline::RunOptions;
use crate::stats::StatsMode;

const CONFIG_DIR: &str = "typesplit";
const CONFIG_FILE: &str = "config.toml";
pub const CONFIG_ENV: &str = "TYPESPLIT_CONFIG";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# typesplit configuration file
# Command-line flags always take precedence over these values.

[output]
# Directory for integers.txt, floats.txt and strings.txt
# Default: current directory
# dir = "out"

# Prefix prepended to every output file name
# Default: ""
prefix = ""

# Append to existing output files instead of overwriting them
# Default: false
append = false

[stats]
# Print the element count per type
short = false

# Print count, sum, mean, min and max (shortest/longest for strings)
full = false
"#;

/// Global configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub stats: StatsConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Output directory
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Filename prefix
    #[serde(default)]
    pub prefix: String,

    /// Append mode
    #[serde(default)]
    pub append: bool,
}

/// Statistics-related configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct StatsConfig {
    #[serde(default)]
    pub short: bool,

    #[serde(default)]
    pub full: bool,
}

/// Command-line values layered over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub prefix: Option<String>,
    pub append: bool,
    pub short_stats: bool,
    pub full_stats: bool,
}

impl Config {
    /// Load config from an explicit file path
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TypesplitError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| TypesplitError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve and load config.
    ///
    /// An explicit path or `TYPESPLIT_CONFIG` must exist; the per-user default
    /// location is optional.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Per-user default config location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Initialize config with default template (rich comments).
    ///
    /// An existing file is left as is.
    pub fn init(path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !path.exists() {
            fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path.to_path_buf())
    }

    /// Build run options, with command-line values taking precedence.
    ///
    /// `cwd` is the fallback output directory.
    pub fn to_run_options(&self, overrides: Overrides, cwd: PathBuf) -> RunOptions {
        let dir = overrides
            .output_dir
            .or_else(|| self.output.dir.clone())
            .unwrap_or(cwd);
        let prefix = overrides
            .prefix
            .unwrap_or_else(|| self.output.prefix.clone());

        let mut stats = Vec::new();
        if overrides.short_stats || self.stats.short {
            stats.push(StatsMode::Short);
        }
        if overrides.full_stats || self.stats.full {
            stats.push(StatsMode::Full);
        }

        RunOptions {
            layout: OutputLayout::new(dir, prefix),
            append: overrides.append || self.output.append,
            stats,
        }
    }
}

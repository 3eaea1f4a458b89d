//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the monitor log.
    pub input_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("monitor.csv"),
        }
    }
}

impl Config {
    /// Loads configuration from the default location, an optional explicit
    /// file and `MONSUM_*` environment variables, later sources winning.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(path) = default_config_file() {
            figment = figment.merge(Toml::file(path));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (MONSUM_*)
        figment = figment.merge(Env::prefixed("MONSUM_"));

        figment.extract()
    }

    /// Config files that exist and take part in [`Config::load_from`], in
    /// merge order.
    pub fn files(config_path: Option<&Path>) -> Vec<PathBuf> {
        default_config_file()
            .into_iter()
            .chain(config_path.map(Path::to_path_buf))
            .filter(|path| path.is_file())
            .collect()
    }
}

/// Returns the platform-specific config directory for monsum.
///
/// On Linux: `~/.config/monsum`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("monsum"))
}

fn default_config_file() -> Option<PathBuf> {
    dirs_config_path().map(|dir| dir.join("config.toml"))
}

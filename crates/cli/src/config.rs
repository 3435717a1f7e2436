//! Environment-driven settings for the CLI.
use std::env;
use std::path::PathBuf;

use wheel_content::ContentFactory;

/// CLI configuration.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Data directory; the bundled content when unset.
    pub data_dir: Option<PathBuf>,
    /// Directory for a `wheel.log` file next to stderr output.
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `WHEEL_DATA_DIR` - Directory holding `assets.ron`, `item_sets.ron`, ...
    /// - `WHEEL_LOG_DIR` - Also write logs to `$WHEEL_LOG_DIR/wheel.log`
    pub fn from_env() -> Self {
        Self {
            data_dir: read_env::<PathBuf>("WHEEL_DATA_DIR"),
            log_dir: read_env::<PathBuf>("WHEEL_LOG_DIR"),
        }
    }

    /// Content factory for `override_dir`, else the configured or bundled data.
    pub fn factory(&self, override_dir: Option<PathBuf>) -> ContentFactory {
        match override_dir.or_else(|| self.data_dir.clone()) {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

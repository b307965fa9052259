//! Command implementations. Each returns the process exit code or the error
//! that aborted the command.

mod audit;
mod bind;
mod config;

use std::path::{Path, PathBuf};

use pomguard_core::config::{CliOverrides, PomguardConfig};
use pomguard_core::errors::ConfigError;

pub use audit::run_audit;
pub use bind::run_bind;
pub use config::run_config;

/// Resolve configuration rooted at the working directory.
fn load_config(
    config_path: Option<&Path>,
    mut overrides: CliOverrides,
) -> Result<(PathBuf, PomguardConfig), ConfigError> {
    let root = std::env::current_dir().map_err(|e| ConfigError::InvalidValue {
        field: "working directory".to_string(),
        message: e.to_string(),
    })?;
    overrides.config_path = config_path.map(Path::to_path_buf);
    let config = PomguardConfig::load(&root, Some(&overrides))?;
    Ok((root, config))
}

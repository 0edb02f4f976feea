//! Config loader: assembles sources in precedence order and deserializes.

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::AuxgenConfig;
use config::{Config, ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Entry point for loading `AuxgenConfig`.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (highest last): defaults, global file, `<workspace>/auxgen.toml`,
    /// `AUXGEN_*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<AuxgenConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder)?;

        debug!(workspace = %workspace_root.display(), "Loading configuration");
        builder.build()?.try_deserialize()
    }

    /// Load configuration from an explicit file, skipping global and workspace files.
    pub fn load_from_file(path: &Path) -> Result<AuxgenConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let builder = builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml));
        let builder = environment::add_to_builder(builder)?;

        debug!(config_path = %path.display(), "Loading configuration file");
        builder.build()?.try_deserialize()
    }

    /// Defaults only, no files or environment.
    pub fn defaults() -> Result<AuxgenConfig, ConfigError> {
        let config: Config = builder_with_defaults()?.build()?;
        config.try_deserialize()
    }

    /// Path of the global config file, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}

//! Merge rules: defaults, override order, conflict handling.
//!
//! Sources are added lowest precedence first; later sources win key by key.
//! `[[tasks]]` is an array, so a later file replaces the whole table.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("generate.workdir", "go-util")?
        .set_default("generate.create_dirs", false)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")
}

//! Environment source: AUXGEN_<SECTION>__<KEY>, e.g. AUXGEN_GENERATE__JOBS=2

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "AUXGEN";

/// Add environment overrides. List keys are space separated.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(" ")
            .with_list_parse_key("generate.launcher")
            .with_list_parse_key("generate.enable"),
    ))
}

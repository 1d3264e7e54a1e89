use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Settings are layered: the YAML file in `configuration/` first, then any
/// `FLU_`-prefixed environment variables on top.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    let path = configuration_dir()?.join(file);
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix("FLU")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}

fn configuration_dir() -> anyhow::Result<PathBuf> {
    let current_dir =
        std::env::current_dir().context("Failed to determine the current directory")?;
    Ok(current_dir.join("configuration"))
}

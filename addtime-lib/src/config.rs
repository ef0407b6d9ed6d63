use crate::quantum::Qps;
use config::{Config as ConfigLoader, Environment, File};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Looked up in the working directory (`addtime.toml`, `addtime.json`...) when
/// no explicit path is given.
const DEFAULT_CONFIG_NAME: &str = "addtime";
const ENV_PREFIX: &str = "ADDTIME";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    pub calculator: CalculatorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CalculatorConfig {
    /// Default base answers are expressed in.
    pub quantum_per_second: Qps,
}

impl Config {
    /// Defaults, then the config file, then `ADDTIME_*` environment variables
    /// (`ADDTIME_CALCULATOR__QUANTUM_PER_SECOND=30`).
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let file = match path {
            Some(path) => File::with_name(&shellexpand::tilde(path)).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };
        let builder = ConfigLoader::builder()
            .set_default(
                "calculator.quantum_per_second",
                i64::from(Qps::MILLISECONDS.get()),
            )?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, Box<dyn Error>> {
        Ok(toml::to_string(self)?)
    }
}

use crate::commands::{load_config, Command};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::{ArgMatches, Command as ClapCommand};

pub struct ConfigCommand;

#[async_trait]
impl Command for ConfigCommand {
    fn name(&self) -> &'static str {
        "config"
    }

    async fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let config = load_config(matches)?;
        let rendered = config
            .to_toml()
            .map_err(|e| anyhow!("failed to render configuration: {}", e))?;
        print!("{}", rendered);
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name()).about("Show the effective configuration")
    }
}

use crate::commands::{print_output, quantum_args, resolve_qps, Command};
use addtime_lib::calc;
use anyhow::Result;
use async_trait::async_trait;
use clap::{ArgMatches, Command as ClapCommand};
use log::info;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

/// Re-evaluates every line read from stdin, like the form updating as you type.
pub struct ReplCommand;

#[async_trait]
impl Command for ReplCommand {
    fn name(&self) -> &'static str {
        "repl"
    }

    async fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let qps = resolve_qps(matches)?;
        info!("reading expressions from stdin at {} quanta per second", qps);

        let mut lines = BufReader::new(stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            print_output(&calc(&line, qps));
        }
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        quantum_args(ClapCommand::new(self.name()).about("Evaluate each line read from stdin"))
    }
}

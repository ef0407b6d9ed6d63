pub mod calc;
pub mod config;
pub mod repl;
pub mod sheet;

use addtime_lib::config::Config;
use addtime_lib::{CalcOutput, Qps};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use colored::Colorize;
use itertools::Itertools;
use log::debug;
use std::collections::HashMap;

pub fn build_app(registry: &CommandRegistry) -> ClapCommand {
    let mut app = ClapCommand::new("addtime")
        .about("Add and subtract durations like 1h30m - 45s")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Configuration file (defaults to ./addtime.toml)")
                .global(true),
        );

    // sorted so that --help lists subcommands in a stable order
    for (_, command) in registry.commands.iter().sorted_by_key(|(name, _)| **name) {
        app = app.subcommand(command.clap_command());
    }

    app
}

#[async_trait]
pub trait Command {
    fn name(&self) -> &'static str;
    async fn execute(&self, matches: &ArgMatches) -> Result<()>;
    fn clap_command(&self) -> ClapCommand;
}

pub struct CommandRegistry {
    pub commands: HashMap<&'static str, Box<dyn Command + Send + Sync>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register<C: Command + Send + Sync + 'static>(&mut self, command: C) {
        self.commands.insert(command.name(), Box::new(command));
    }

    pub async fn execute(&self, name: &str, matches: &ArgMatches) -> Result<()> {
        match self.commands.get(name) {
            Some(command) => command.execute(matches).await,
            None => Err(anyhow!("{} not found", name)),
        }
    }
}

/// `--qps` and `--fps`, shared by the commands that evaluate expressions.
pub fn quantum_args(command: ClapCommand) -> ClapCommand {
    command
        .arg(
            Arg::new("qps")
                .long("qps")
                .value_name("N")
                .help("Quanta per second answers are rounded to (1 to 1000)")
                .value_parser(|s: &str| s.parse::<Qps>()),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .help("Round answers to video frames")
                .value_parser(["30", "60"])
                .conflicts_with("qps"),
        )
}

/// Command-line choice first, then the configured default.
pub fn resolve_qps(matches: &ArgMatches) -> Result<Qps> {
    if let Some(qps) = matches.get_one::<Qps>("qps") {
        return Ok(*qps);
    }
    match matches.get_one::<String>("fps").map(String::as_str) {
        Some("30") => return Ok(Qps::FPS_30),
        Some("60") => return Ok(Qps::FPS_60),
        _ => {}
    }
    let config = load_config(matches)?;
    debug!(
        "using configured quantum per second: {}",
        config.calculator.quantum_per_second
    );
    Ok(config.calculator.quantum_per_second)
}

pub fn load_config(matches: &ArgMatches) -> Result<Config> {
    let path = matches.get_one::<String>("config").map(String::as_str);
    Config::load(path).map_err(|e| anyhow!("failed to load configuration: {}", e))
}

/// Answers on stdout and diagnostics on stderr, each joined like the form's text areas.
pub fn print_output(output: &CalcOutput) {
    if !output.answers.is_empty() {
        println!("{}", output.answers.iter().join(",\n"));
    }
    if output.has_errors() {
        eprintln!("{}", output.errors.iter().join(",\n").red());
    }
}

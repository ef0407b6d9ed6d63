use crate::commands::calc::CalcCommand;
use crate::commands::config::ConfigCommand;
use crate::commands::repl::ReplCommand;
use crate::commands::sheet::{AddCommand, DivCommand, SubCommand};
use crate::commands::CommandRegistry;
use colored::Colorize;
use log::error;

mod commands;
mod logger;

#[tokio::main]
async fn main() {
    let mut registry = CommandRegistry::new();
    registry.register(CalcCommand);
    registry.register(AddCommand);
    registry.register(SubCommand);
    registry.register(DivCommand);
    registry.register(ReplCommand);
    registry.register(ConfigCommand);

    let app = commands::build_app(&registry);
    let matches = app.get_matches();
    logger::init(matches.get_flag("debug"));

    if let Some((name, sub_matches)) = matches.subcommand() {
        if let Err(e) = registry.execute(name, sub_matches).await {
            error!("{} failed: {:?}", name, e);
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    } else {
        error!("No command found");
    }
}

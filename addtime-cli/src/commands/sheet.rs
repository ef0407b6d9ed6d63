use crate::commands::Command;
use addtime_lib::{add_time, div_time, sub_time};
use anyhow::Result;
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command as ClapCommand};

fn duration_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .allow_hyphen_values(true)
}

fn get_str<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

pub struct AddCommand;

#[async_trait]
impl Command for AddCommand {
    fn name(&self) -> &'static str {
        "add"
    }

    async fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let cells: Vec<&str> = matches
            .get_many::<String>("durations")
            .map(|values| values.map(String::as_str).collect())
            .unwrap_or_default();
        println!("{}", add_time(&[cells])?);
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Sum durations (ADDTIME)")
            .arg(
                Arg::new("durations")
                    .help("one duration per argument, e.g. 1m20s 2m40s")
                    .required(true)
                    .num_args(1..)
                    .allow_hyphen_values(true),
            )
    }
}

pub struct SubCommand;

#[async_trait]
impl Command for SubCommand {
    fn name(&self) -> &'static str {
        "sub"
    }

    async fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let difference = sub_time(get_str(matches, "minuend"), get_str(matches, "subtrahend"))?;
        println!("{}", difference);
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Subtract one duration from another (SUBTIME)")
            .arg(duration_arg("minuend", "duration to subtract from"))
            .arg(duration_arg("subtrahend", "duration to subtract"))
    }
}

pub struct DivCommand;

#[async_trait]
impl Command for DivCommand {
    fn name(&self) -> &'static str {
        "div"
    }

    async fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let ratio = div_time(get_str(matches, "dividend"), get_str(matches, "divisor"))?;
        println!("{} ({:.2}%)", ratio, ratio * 100.0);
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Ratio of two durations (DIVTIME)")
            .alias("ratio")
            .arg(duration_arg("dividend", "duration to divide"))
            .arg(duration_arg("divisor", "duration to divide by"))
    }
}

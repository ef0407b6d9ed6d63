use crate::commands::{print_output, quantum_args, resolve_qps, Command};
use addtime_lib::{evaluate, CalcOutput, ParseError, TimeValue};
use anyhow::Result;
use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use log::debug;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Color, Modify, Style};
use tabled::{Table, Tabled};

pub struct CalcCommand;

#[async_trait]
impl Command for CalcCommand {
    fn name(&self) -> &'static str {
        "calc"
    }

    async fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let input = matches
            .get_many::<String>("expression")
            .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        let qps = resolve_qps(matches)?;
        debug!("evaluating {:?} at {} quanta per second", input, qps);

        let values = evaluate(&input, qps);
        let output = CalcOutput::from_values(&values);

        if matches.get_flag("json") {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if matches.get_flag("table") {
            print_table(&values);
        } else {
            print_output(&output);
        }

        if output.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        let command = ClapCommand::new(self.name())
            .about("Evaluate comma-separated duration expressions")
            .alias("c")
            .arg(
                Arg::new("json")
                    .long("json")
                    .help("print answers and errors as JSON")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("table")
                    .short('t')
                    .long("table")
                    .help("print one row per expression")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("json"),
            )
            .arg(
                Arg::new("expression")
                    .help("expressions such as \"1h30m - 45s, 2s300\"")
                    .required(true)
                    .num_args(1..)
                    .allow_hyphen_values(true)
                    .trailing_var_arg(true),
            );
        quantum_args(command)
    }
}

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "#")]
    index: usize,
    answer: String,
    quanta: String,
    error: String,
}

impl SlotRow {
    fn new(index: usize, value: &Result<TimeValue, ParseError>) -> Self {
        match value {
            Ok(value) => SlotRow {
                index,
                answer: value.to_string(),
                quanta: format!("{} @ {}/s", value.val, value.qps),
                error: String::new(),
            },
            Err(e) => SlotRow {
                index,
                answer: addtime_lib::ERROR_SENTINEL.to_string(),
                quanta: "-".to_string(),
                error: e.to_string(),
            },
        }
    }
}

fn print_table(values: &[Result<TimeValue, ParseError>]) {
    let rows: Vec<SlotRow> = values
        .iter()
        .enumerate()
        .map(|(index, value)| SlotRow::new(index + 1, value))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern().remove_horizontal());
    table.with(Modify::new(Columns::new(..3)).with(Alignment::center()));
    table.with(
        Modify::new(Columns::first())
            .with(Color::BOLD | Color::FG_WHITE)
            .with(Alignment::center()),
    );
    println!("{table}");
}

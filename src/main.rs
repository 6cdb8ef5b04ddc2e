mod cli;
mod cmd;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigAction};
use std::process;

use habitlog::core::tracker::SubmitError;
use habitlog::core::validate::ValidationErrors;
use habitlog::models::DateKey;
use habitlog::output;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("HABITLOG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let command = cli.command.name();
    let date = cli.date.map(DateKey::from);
    let human = cli.human;

    let result = match cli.command {
        Commands::Init { demo } => cmd::init::run(demo, date),
        Commands::Log {
            habit,
            fields,
            notes,
        } => cmd::log::run(&habit, fields, notes, date, human),
        Commands::Update {
            habit,
            fields,
            notes,
        } => cmd::log::run_update(&habit, fields, notes, date, human),
        Commands::Delete { habit } => cmd::log::run_delete(&habit, date, human),
        Commands::Show {
            habit,
            last,
            from,
            to,
        } => cmd::show::run(
            &habit,
            last,
            from.map(DateKey::from),
            to.map(DateKey::from),
            date,
            human,
        ),
        Commands::Today => cmd::show::run_today(date, human),
        Commands::Progress { habit } => cmd::progress::run(&habit, date, human),
        Commands::Weekly { habit } => cmd::progress::run_weekly(&habit, date, human),
        Commands::Stats { habit, days } => cmd::progress::run_stats(&habit, days, date, human),
        Commands::Habit { action } => cmd::habit::run(action, human),
        Commands::Quick { action } => cmd::quick::run(action, date, human),
        Commands::Demo { days, seed } => cmd::demo::run(days, seed, date, human),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitlog", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        let invalid = match e.downcast_ref::<SubmitError>() {
            Some(SubmitError::Invalid(v)) => Some(v),
            _ => e.downcast_ref::<ValidationErrors>(),
        };
        let err = match invalid {
            Some(v) => output::validation_error(command, &v.to_string(), &v.errors),
            None => output::error(command, "general_error", &format!("{:#}", e)),
        };
        eprintln!(
            "{}",
            serde_json::to_string(&err).unwrap_or_else(|_| e.to_string())
        );
        process::exit(1);
    }
}

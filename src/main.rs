use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use doc_cli::cli::commands::{config, merge, translate};
use doc_cli::cli::{Args, Command, ConfigCommand, ConfigError, exit_code};
use doc_cli::config::ConfigManager;
use doc_cli::translation::{print_languages, print_models};
use doc_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code(&err));
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Some(Command::Merge(merge_args)) => merge::run_merge(&merge_args)?,
        Some(Command::Languages) => print_languages(),
        Some(Command::Models { provider }) => print_models(provider),
        Some(Command::Config { command }) => run_config(&command).map_err(ConfigError)?,
        None => {
            let Some(lang) = args.lang else {
                Args::command().print_help()?;
                std::process::exit(exitcode::USAGE);
            };
            let options = translate::TranslateOptions {
                lang,
                instruction: args.instruction,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}

fn run_config(command: &ConfigCommand) -> anyhow::Result<()> {
    let manager = ConfigManager::new()?;
    match command {
        ConfigCommand::Show => config::show(&manager),
        ConfigCommand::Init { force } => config::init(&manager, *force),
        ConfigCommand::Set { pairs } => config::set(&manager, pairs),
    }
}

/// `RUST_LOG` wins; otherwise `-v` enables debug output for this crate.
fn init_tracing(verbose: bool) {
    let default = if verbose { "doc_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

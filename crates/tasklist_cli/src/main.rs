use std::io::{self, IsTerminal};
use tasklist_cli::cli::collect_config_overrides;
use tasklist_cli::logging;
use tasklist_cli::session::{self, Output, Parsed};
use tasklist_core::config::{load_config_with_fallback, merge_overrides};
use tasklist_core::error::AppError;
use tasklist_core::storage::FileStorage;

fn run() -> Result<(), AppError> {
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        tracing::warn!(error = %err, "ignoring unusable config");
    }

    let args = loaded.config.expand_alias(std::env::args().skip(1).collect());
    let cli = match session::parse_args(args)? {
        Parsed::Run(cli) => cli,
        Parsed::Display(text) => {
            print!("{text}");
            return Ok(());
        }
    };

    let overrides = collect_config_overrides(&cli.config_override)?;
    let output = Output {
        json: cli.json,
        config: merge_overrides(&loaded.config, &overrides),
    };
    let storage = FileStorage::from_env()?;
    tracing::debug!(dir = %storage.dir().display(), "using storage directory");

    if cli.command.is_none() {
        let stdin = io::stdin();
        let prompt = stdin.is_terminal();
        return session::run_interactive(
            storage,
            cli.filter,
            output,
            stdin.lock(),
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
            prompt,
        );
    }

    session::run_once(storage, cli, &output, &mut io::stdout().lock())?;
    Ok(())
}

fn main() {
    logging::init();

    if let Err(err) = run() {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

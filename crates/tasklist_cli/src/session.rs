use crate::cli::{Cli, Command, collect_config_overrides};
use crate::render::{render_json, render_text};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io::{BufRead, Write};
use tasklist_core::config::{Config, merge_overrides};
use tasklist_core::error::AppError;
use tasklist_core::storage::Storage;
use tasklist_core::{Controller, Event, Filter, Outcome, Store, View};

/// Result of parsing one command line.
#[derive(Debug)]
pub enum Parsed {
    Run(Cli),
    /// Help or version text clap asked us to show instead of running anything.
    Display(String),
}

pub fn parse_args(args: Vec<String>) -> Result<Parsed, AppError> {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push("tasklist".to_string());
    argv.extend(args);

    match Cli::try_parse_from(argv) {
        Ok(cli) => Ok(Parsed::Run(cli)),
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            Ok(Parsed::Display(err.to_string()))
        }
        Err(err) => Err(normalize_parse_error(err)),
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

/// Splits a line into arguments, honoring double quotes and `\"` / `\\`
/// escapes inside them.
pub fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            quoted = true;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() || quoted {
                args.push(std::mem::take(&mut current));
                quoted = false;
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() || quoted {
        args.push(current);
    }

    Ok(args)
}

/// How views are written out.
#[derive(Debug, Clone)]
pub struct Output {
    pub json: bool,
    pub config: Config,
}

impl Output {
    pub fn write_view<W: Write>(&self, out: &mut W, view: &View) -> Result<(), AppError> {
        let rendered = if self.json {
            render_json(view)?
        } else {
            render_text(view, &self.config.palette())
        };
        writeln!(out, "{rendered}").map_err(|err| AppError::io(err.to_string()))
    }
}

/// Applies an optional filter selection followed by the command's event.
pub fn dispatch<S: Storage>(
    controller: &mut Controller<S>,
    filter: Option<Filter>,
    command: Option<Command>,
) -> Result<Outcome, AppError> {
    if let Some(filter) = filter {
        controller.handle(Event::SelectFilter(filter))?;
    }
    let event = command.map_or(Event::Refresh, Command::into_event);
    controller.handle(event)
}

/// Handles a single command against freshly loaded state and prints the view.
pub fn run_once<S: Storage, W: Write>(
    storage: S,
    cli: Cli,
    output: &Output,
    out: &mut W,
) -> Result<Outcome, AppError> {
    let mut controller = Controller::new(Store::load(storage), Filter::default());
    let outcome = dispatch(&mut controller, cli.filter, cli.command)?;
    output.write_view(out, controller.view())?;
    Ok(outcome)
}

/// Reads commands line by line until EOF or `exit`, re-rendering after each.
///
/// Bad input is reported on `err` and the session continues; storage write
/// failures end the session with an error.
pub fn run_interactive<S, R, W, E>(
    storage: S,
    initial_filter: Option<Filter>,
    mut output: Output,
    input: R,
    out: &mut W,
    err: &mut E,
    prompt: bool,
) -> Result<(), AppError>
where
    S: Storage,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut controller = Controller::new(Store::load(storage), Filter::default());
    dispatch(&mut controller, initial_filter, None)?;
    output.write_view(out, controller.view())?;

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ").map_err(|err| AppError::io(err.to_string()))?;
            out.flush().map_err(|err| AppError::io(err.to_string()))?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|err| AppError::io(err.to_string()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line.eq_ignore_ascii_case("help") || line == "?" {
            let mut cmd = Cli::command();
            let help = cmd.render_help();
            writeln!(out, "{help}").map_err(|err| AppError::io(err.to_string()))?;
            continue;
        }

        match run_line(&mut controller, &mut output, line, out) {
            Ok(()) => {}
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                writeln!(err, "ERROR: {error}").map_err(|err| AppError::io(err.to_string()))?;
            }
        }
    }

    Ok(())
}

fn run_line<S: Storage, W: Write>(
    controller: &mut Controller<S>,
    output: &mut Output,
    line: &str,
    out: &mut W,
) -> Result<(), AppError> {
    let args = split_command_line(line)?;
    let args = output.config.expand_alias(args);

    let cli = match parse_args(args)? {
        Parsed::Run(cli) => cli,
        Parsed::Display(text) => {
            return write!(out, "{text}").map_err(|err| AppError::io(err.to_string()));
        }
    };

    if !cli.config_override.is_empty() {
        let overrides = collect_config_overrides(&cli.config_override)?;
        output.config = merge_overrides(&output.config, &overrides);
    }

    let outcome = dispatch(controller, cli.filter, cli.command)?;
    tracing::debug!(?outcome, "handled command");

    let line_output = Output {
        json: output.json || cli.json,
        config: output.config.clone(),
    };
    line_output.write_view(out, controller.view())
}

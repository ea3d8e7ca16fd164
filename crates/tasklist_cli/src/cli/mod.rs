use clap::{Parser, Subcommand};
use tasklist_core::config::{ConfigOverrides, canonicalize_name};
use tasklist_core::error::AppError;
use tasklist_core::{Event, Filter};

#[derive(Parser, Debug)]
#[command(name = "tasklist", author, version, about, long_about = None)]
pub struct Cli {
    /// Run a single command; omit to start an interactive session
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output the view as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Select a filter before running the command (all, active, completed)
    #[arg(long, value_name = "FILTER", global = true)]
    pub filter: Option<Filter>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new task at the top of the list
    ///
    /// Words after `add` are joined with single spaces, so quoting is
    /// optional and text may start with `-`. Put global flags before `add`.
    ///
    /// Example: tasklist add Buy milk
    Add {
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Mark the task on a row as completed, or back to active
    ///
    /// Example: tasklist toggle 2
    Toggle { row: usize },
    /// Delete the task on a row
    ///
    /// Example: tasklist delete 1
    #[command(alias = "rm")]
    Delete { row: usize },
    /// Show all, active or completed tasks
    ///
    /// Example: tasklist filter active
    Filter {
        #[arg(value_name = "FILTER")]
        selection: Filter,
    },
    /// Delete every completed task
    ///
    /// Example: tasklist clear-completed
    #[command(alias = "clear")]
    ClearCompleted,
    /// Show the current view
    ///
    /// Example: tasklist list --filter completed
    #[command(alias = "ls")]
    List,
}

impl Command {
    pub fn into_event(self) -> Event {
        match self {
            Self::Add { text } => Event::Submit(text.join(" ")),
            Self::Toggle { row } => Event::Toggle(row),
            Self::Delete { row } => Event::Delete(row),
            Self::Filter { selection } => Event::SelectFilter(selection),
            Self::ClearCompleted => Event::ClearCompleted,
            Self::List => Event::Refresh,
        }
    }
}

/// Flag name used to identify config override arguments by the runtime.
pub const CONFIG_OVERRIDE_FLAG: &str = "--config-override";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    Alias(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let canonical_field = canonicalize_name(field);
    if canonical_field.is_empty() {
        return Err("override key cannot be empty".to_string());
    }

    match canonical_field.as_str() {
        "theme" => {
            if remainder.is_some() {
                Err("theme override cannot have subfields".to_string())
            } else {
                Ok(ParsedConfigOverride {
                    target: ConfigOverrideTarget::Theme,
                    value,
                })
            }
        }
        "aliases" | "alias" => {
            let alias_name = remainder
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| "aliases override requires an alias name".to_string())?;
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Alias(alias_name.to_string()),
                value,
            })
        }
        other => Err(format!("unknown config field '{other}'")),
    }
}

/// Folds every `--config-override` value into one set of overrides; later
/// values win.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry).map_err(|message| {
            AppError::invalid_input(format!("{CONFIG_OVERRIDE_FLAG}: {message}"))
        })?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
        }
    }
    Ok(overrides)
}

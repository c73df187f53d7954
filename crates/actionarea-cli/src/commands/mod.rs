//! CLI command definitions and handlers.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use tui::TuiArgs;

/// Load configuration with graceful fallback to defaults.
///
/// If the config file doesn't exist or can't be parsed, it falls back to defaults.
pub fn load_config() -> actionarea_core::config::Config {
    actionarea_core::config::Config::load().unwrap_or_default()
}

pub mod completions;
pub mod config;
pub mod run;
pub mod tui;

/// Action Area - adaptive master/detail presentation in the terminal
#[derive(Parser)]
#[command(name = "actionarea")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard
    Tui(TuiArgs),

    /// Replay a scenario file against the controller
    Run(RunArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the run command
#[derive(Parser)]
pub struct RunArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Print every host notification as it happens
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for the config command
#[derive(Parser)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Value to set
        value: String,
    },

    /// Show all configuration
    Show,

    /// Show the configuration file path
    Path,

    /// Reset to defaults
    Reset,
}

/// Arguments for the completions command
#[derive(Parser)]
pub struct CompletionsArgs {
    /// Completions subcommand
    #[command(subcommand)]
    pub action: CompletionsAction,
}

/// Completions subcommands
#[derive(Subcommand, Clone, Copy)]
pub enum CompletionsAction {
    /// Generate completions and print to stdout
    Generate {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: ShellType,
    },
}

/// Supported shell types for completions
#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_json() {
        let cli = Cli::try_parse_from(["actionarea", "run", "survey.toml", "--json"])
            .expect("parse run");
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.scenario, PathBuf::from("survey.toml"));
        assert!(args.json);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from(["actionarea", "config", "set", "ui.theme", "light"])
            .expect("parse config set");
        let Command::Config(ConfigArgs {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        else {
            panic!("expected config set");
        };
        assert_eq!(key, "ui.theme");
        assert_eq!(value, "light");
    }

    #[test]
    fn test_parse_tui_size() {
        let cli = Cli::try_parse_from(["actionarea", "tui", "--size", "160x40"]).expect("parse tui");
        let Command::Tui(args) = cli.command else {
            panic!("expected tui command");
        };
        assert_eq!(args.size.as_deref(), Some("160x40"));
        assert!(args.theme.is_none());
    }
}

//! Shell completions generation.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use super::{Cli, CompletionsAction, ShellType};

impl From<ShellType> for Shell {
    fn from(shell: ShellType) -> Self {
        match shell {
            ShellType::Bash => Self::Bash,
            ShellType::Zsh => Self::Zsh,
            ShellType::Fish => Self::Fish,
            ShellType::PowerShell => Self::PowerShell,
            ShellType::Elvish => Self::Elvish,
        }
    }
}

/// Run the completions command.
pub fn run(action: CompletionsAction) -> Result<()> {
    match action {
        CompletionsAction::Generate { shell } => {
            generate_completions(shell, &mut io::stdout());
            Ok(())
        }
    }
}

/// Write completions for `shell` to `out`.
fn generate_completions(shell: ShellType, out: &mut dyn io::Write) {
    let mut cmd = Cli::command();
    generate(Shell::from(shell), &mut cmd, "actionarea", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_mentions_subcommands() {
        for shell in [ShellType::Bash, ShellType::Zsh, ShellType::Fish] {
            let mut buf = Vec::new();
            generate_completions(shell, &mut buf);
            let script = String::from_utf8(buf).expect("utf-8 completions");
            assert!(script.contains("actionarea"));
            assert!(script.contains("run"));
        }
    }
}

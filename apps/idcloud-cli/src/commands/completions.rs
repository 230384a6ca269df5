//! Shell completion scripts
//!
//! ```bash
//! eval "$(idcloud completions bash)"
//! idcloud completions zsh > ~/.zsh/completions/_idcloud
//! idcloud completions fish | source
//! ```

use crate::cli::Cli;
use crate::error::CliResult;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Print the completion script for the requested shell
pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    write_completions(args.shell, &mut io::stdout())
}

fn write_completions(shell: Shell, out: &mut dyn Write) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    fn script(shell: Shell) -> String {
        let mut out = Vec::new();
        write_completions(shell, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_shell_names() {
        assert!(matches!(Shell::from_str("bash", true), Ok(Shell::Bash)));
        assert!(matches!(Shell::from_str("PowerShell", true), Ok(Shell::PowerShell)));
        assert!(Shell::from_str("tcsh", true).is_err());
    }

    #[test]
    fn test_bash_script_lists_subcommands() {
        let script = script(Shell::Bash);
        assert!(script.contains("idcloud"));
        assert!(script.contains("saml"));
        assert!(script.contains("esv"));
    }

    #[test]
    fn test_zsh_script_header() {
        assert!(script(Shell::Zsh).starts_with("#compdef idcloud"));
    }
}

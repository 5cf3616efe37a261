//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::SalutisError;

/// Binary name completions are registered for.
const BIN_NAME: &str = "salutis";

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, SalutisError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf).map_err(|e| SalutisError::InvalidInput(format!("UTF-8 error: {e}")))
}

/// Where to put the script for `shell`.
#[must_use]
pub fn install_hint(shell: Shell) -> String {
    match shell {
        Shell::Bash => format!("# Add to ~/.bashrc:\nsource <({BIN_NAME} completions bash)"),
        Shell::Zsh => format!(
            "# Save to your fpath, then run compinit:\n{BIN_NAME} completions zsh > ~/.zsh/completions/_{BIN_NAME}"
        ),
        Shell::Fish => format!(
            "# Save to the fish completions directory:\n{BIN_NAME} completions fish > ~/.config/fish/completions/{BIN_NAME}.fish"
        ),
        Shell::PowerShell => format!(
            "# Add to your PowerShell profile ($PROFILE):\n{BIN_NAME} completions powershell | Out-String | Invoke-Expression"
        ),
        Shell::Elvish => format!(
            "# Save to ~/.elvish/lib and `use {BIN_NAME}` in rc.elv:\n{BIN_NAME} completions elvish > ~/.elvish/lib/{BIN_NAME}.elv"
        ),
        _ => format!("# Run `{BIN_NAME} completions <SHELL>` and source the output"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("salutis"));
        assert!(script.contains("breathe"));
        assert!(script.contains("complete"));
    }

    #[test]
    fn test_generate_fish_completions() {
        let script = generate_completions(Shell::Fish).unwrap();
        assert!(script.contains("course"));
    }

    #[test]
    fn test_install_hint_mentions_shell() {
        assert!(install_hint(Shell::Bash).contains("completions bash"));
        assert!(install_hint(Shell::Zsh).contains("_salutis"));
    }
}

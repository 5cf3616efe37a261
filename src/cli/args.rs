use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "salutis")]
#[command(about = "Guided breathing, mental health courses, and a support chat in your terminal")]
#[command(long_about = "salutis - mental health support in the terminal

Guided breathing exercises, short self-help courses with progress
tracking, and a supportive chat assistant.

QUICK START:
  salutis breathe run                 Start the default breathing exercise
  salutis breathe run -p box -c 5     Five cycles of box breathing
  salutis course list                 Browse courses and your progress
  salutis chat                        Talk to the support assistant
  salutis tui                         Interactive breathing screen

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  salutis <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output. Defaults to `general.default_output` from
    /// the configuration file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Guided breathing exercises
    ///
    /// # Examples
    ///
    ///   salutis breathe list
    ///   salutis breathe run
    ///   salutis breathe run --pattern "box" --cycles 4
    #[command(alias = "b")]
    Breathe(BreatheArgs),

    /// Mental health courses and your progress
    ///
    /// A course is chosen by numeric id or by the start of its title.
    ///
    /// # Examples
    ///
    ///   salutis course list
    ///   salutis course show depression
    ///   salutis course start panic
    ///   salutis course complete panic 1
    Course(CourseArgs),

    /// Talk to the support assistant
    ///
    /// With a message, prints one reply and exits. Without one, starts an
    /// interactive conversation; type 'exit' or press Ctrl+D to leave.
    ///
    /// The assistant offers support and information. It is not a substitute
    /// for professional care.
    Chat {
        /// Message to send
        message: Option<String>,
    },

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   salutis completions bash > ~/.local/share/bash-completion/completions/salutis
    ///   salutis completions zsh > ~/.zsh/completions/_salutis
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Launch the interactive breathing screen
    ///
    /// Keys: j/k or arrows select a pattern, space starts or pauses,
    /// r resets, ? shows help, q quits.
    Tui,
}

#[derive(Args)]
pub struct BreatheArgs {
    #[command(subcommand)]
    pub command: BreatheCommands,
}

/// Breathing subcommands.
#[derive(Subcommand)]
pub enum BreatheCommands {
    /// List available breathing patterns
    #[command(alias = "ls")]
    List,

    /// Run a guided exercise in the terminal
    ///
    /// Prints each phase as it begins and stops after the requested number
    /// of completed cycles. Press Ctrl+C to stop early.
    Run {
        /// Pattern name, 1-based number, or unique name prefix
        #[arg(long, short = 'p')]
        pattern: Option<String>,

        /// Number of cycles to complete (defaults to `breathing.default_cycles`)
        #[arg(long, short = 'c')]
        cycles: Option<u32>,
    },
}

#[derive(Args)]
pub struct CourseArgs {
    #[command(subcommand)]
    pub command: CourseCommands,
}

/// Course subcommands.
#[derive(Subcommand)]
pub enum CourseCommands {
    /// List courses with your progress
    #[command(alias = "ls")]
    List,

    /// Show a course's modules and which ones you completed
    Show {
        /// Course id or title prefix
        course: String,
    },

    /// Enroll in a course
    Start {
        /// Course id or title prefix
        course: String,
    },

    /// Mark a module as completed
    Complete {
        /// Course id or title prefix
        course: String,

        /// Module name or 1-based module number
        module: String,
    },
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_output_defaults_to_none() {
        let cli = Cli::try_parse_from(["salutis", "tui"]).unwrap();
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_output_json() {
        let cli = Cli::try_parse_from(["salutis", "--output", "json", "breathe", "list"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_output_is_global() {
        let cli = Cli::try_parse_from(["salutis", "course", "list", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_breathe_run() {
        let cli =
            Cli::try_parse_from(["salutis", "breathe", "run", "-p", "box", "-c", "2"]).unwrap();
        if let Commands::Breathe(args) = cli.command {
            if let BreatheCommands::Run { pattern, cycles } = args.command {
                assert_eq!(pattern.as_deref(), Some("box"));
                assert_eq!(cycles, Some(2));
            } else {
                panic!("Expected Run command");
            }
        } else {
            panic!("Expected Breathe command");
        }
    }

    #[test]
    fn test_cli_breathe_alias() {
        let cli = Cli::try_parse_from(["salutis", "b", "ls"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Breathe(BreatheArgs {
                command: BreatheCommands::List
            })
        ));
    }

    #[test]
    fn test_cli_course_complete() {
        let cli = Cli::try_parse_from(["salutis", "course", "complete", "panic", "2"]).unwrap();
        if let Commands::Course(args) = cli.command {
            if let CourseCommands::Complete { course, module } = args.command {
                assert_eq!(course, "panic");
                assert_eq!(module, "2");
            } else {
                panic!("Expected Complete command");
            }
        } else {
            panic!("Expected Course command");
        }
    }

    #[test]
    fn test_cli_course_complete_requires_module() {
        assert!(Cli::try_parse_from(["salutis", "course", "complete", "panic"]).is_err());
    }

    #[test]
    fn test_cli_chat_optional_message() {
        let cli = Cli::try_parse_from(["salutis", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { message: None }));

        let cli = Cli::try_parse_from(["salutis", "chat", "I can't sleep"]).unwrap();
        if let Commands::Chat { message } = cli.command {
            assert_eq!(message.as_deref(), Some("I can't sleep"));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_config_init_force() {
        let cli = Cli::try_parse_from(["salutis", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs {
                command: ConfigCommands::Init { force: true }
            })
        ));
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["salutis", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
    }

    #[test]
    fn test_cli_tui_command() {
        let cli = Cli::try_parse_from(["salutis", "tui"]).unwrap();
        assert!(matches!(cli.command, Commands::Tui));
    }

    #[test]
    fn test_cli_unknown_command_fails() {
        assert!(Cli::try_parse_from(["salutis", "inbox"]).is_err());
    }
}

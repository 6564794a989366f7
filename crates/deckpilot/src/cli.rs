use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::deck::Deck;

#[derive(Parser)]
#[command(name = "deckpilot")]
#[command(author, version, about)]
#[command(long_about = "A keyboard-driven slideshow viewer for fixed decks.\n\n\
    Point it at a YAML deck file and present; with no file it shows the\n\
    built-in demo deck.\n\n\
    Examples:\n  \
    deckpilot talk.yaml              Present a deck (fullscreen)\n  \
    deckpilot talk.yaml --windowed   Present in a window\n  \
    deckpilot --autoplay             Demo deck on a timer\n  \
    deckpilot config show            Show configuration")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to present (YAML)
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Start with auto-play running
    #[arg(long, global = false)]
    pub autoplay: bool,

    /// Auto-play advance interval in seconds
    #[arg(long, global = false)]
    pub interval: Option<u32>,

    /// Increase output verbosity
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.interval)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                if let Some(interval) = self.interval {
                    if interval == 0 {
                        anyhow::bail!("Auto-play interval must be at least 1 second");
                    }
                }

                let deck = match &self.file {
                    Some(file) => {
                        if !file.exists() {
                            anyhow::bail!("File not found: {}", file.display());
                        }
                        Deck::load(file)?
                    }
                    None => Deck::builtin(),
                };

                if !self.quiet {
                    println!(
                        "{} {} \u{2014} {} panels",
                        "Presenting".bold(),
                        deck.display_title().cyan(),
                        deck.len()
                    );
                }
                if self.verbose > 0 {
                    if let Ok(path) = crate::config::Config::path() {
                        eprintln!("{} {}", "config:".dimmed(), path.display());
                    }
                }

                crate::app::run(deck, self.windowed, self.slide, self.autoplay, self.interval)
            }
        }
    }
}

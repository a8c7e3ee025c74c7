//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// File-system command interpreter driven by a watched text file
#[derive(Parser, Debug)]
#[command(
    name = "cmdwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Execute file-system commands written to a watched text file",
    long_about = "Watch a command file and execute each command written to it \
                  against a sandboxed directory tree.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the command file and execute what is written to it
    #[command(
        about = "Watch the command file and execute each command written to it",
        after_help = "Examples:\n  cmdwatch watch\n  cmdwatch watch --file inbox/command.txt --root ./workspace\n\nThen write a command into the file, e.g.:\n  echo 'create a file notes/todo.txt' > command.txt"
    )]
    Watch {
        /// Command file to watch (overrides config)
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Sandbox root directory (overrides config, defaults to the current directory)
        #[arg(short, long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Quiet period in milliseconds before acting on a change (overrides config)
        #[arg(long, value_name = "MS")]
        settle_ms: Option<u64>,
    },

    /// Execute a single command without watching
    #[command(
        about = "Parse and execute one command",
        after_help = "Examples:\n  cmdwatch run create a file notes/todo.txt\n  cmdwatch run 'add to the file notes/todo.txt this content: buy milk'"
    )]
    Run {
        /// Command text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1.., value_name = "COMMAND")]
        text: Vec<String>,

        /// Sandbox root directory (overrides config, defaults to the current directory)
        #[arg(short, long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// List the recognized commands
    #[command(about = "List the command phrases the interpreter understands")]
    Verbs,

    /// Create a default configuration file
    #[command(about = "Set up .cmdwatch directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,
}

//! Command-line arguments
//!
//! Global logging, color and config options apply to every subcommand.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "utilkit")]
#[command(about = "Priority message queue, JSON config and batch runner utilities")]
#[command(version, long_version = crate::core::version::long_version())]
pub struct Args {
    /// Configuration file path (default: <config dir>/utilkit/config.json)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", conflicts_with = "no_color", global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", global = true, value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Resolve `--color` / `--no-color`, falling back to TTY detection
    pub fn use_color(&self) -> bool {
        if self.no_color {
            false
        } else {
            self.color || std::io::IsTerminal::is_terminal(&std::io::stdout())
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run producers and consumers against a priority queue and report
    QueueDemo(QueueDemoArgs),

    /// Inspect or change the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run shell-free commands on a bounded worker pool
    Run(RunArgs),

    /// Text utilities
    Text {
        #[command(subcommand)]
        action: TextAction,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct QueueDemoArgs {
    /// Number of producer threads
    #[arg(short = 'p', long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..))]
    pub producers: u16,

    /// Number of consumer threads
    #[arg(short = 'k', long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..))]
    pub consumers: u16,

    /// Messages published by each producer
    #[arg(short = 'm', long, default_value_t = 10)]
    pub messages: usize,

    /// Queue capacity (overrides queue.capacity from the config file)
    #[arg(long, value_name = "COUNT")]
    pub capacity: Option<usize>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the whole configuration
    Show,

    /// Print one value by dotted key
    Get { key: String },

    /// Store key=value assignments (dotted keys create nested objects)
    Set {
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Worker count (overrides runner.workers from the config file)
    #[arg(short = 'w', long, value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Print the full output of every command
    #[arg(long)]
    pub output: bool,

    /// Commands to run, each given as one quoted argument
    #[arg(required = true, value_name = "COMMAND")]
    pub commands: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NormalizeMode {
    /// Collapse blanks, dropping those next to CJK characters
    Collapse,
    /// Replace every whitespace run and drop line breaks
    Strip,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TextAction {
    /// Extract dates
    Dates { text: Vec<String> },

    /// Normalize whitespace
    Normalize {
        #[arg(long, value_enum, default_value_t = NormalizeMode::Collapse)]
        mode: NormalizeMode,

        /// Replacement for whitespace runs in strip mode
        #[arg(long, default_value = "")]
        replace: String,

        text: Vec<String>,
    },

    /// Similarity ratio between two strings
    Similarity { first: String, second: String },

    /// Classify every character
    Classify { text: Vec<String> },

    /// Escape every character as a code point
    Escape { text: Vec<String> },
}

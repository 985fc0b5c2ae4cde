use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "shared-pack")]
#[command(about = "Move newly generated project files into a shared package")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors and prompts only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project root (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move changed files into the shared package
    Pack {
        /// Only pack files of this category (model, job, service, ... or unknown)
        #[arg(long = "type", value_name = "CATEGORY")]
        category: Option<String>,

        /// Pack this file (relative to the project root) instead of changed files
        #[arg(long, value_name = "PATH")]
        file: Option<String>,

        /// Show the plan without moving anything
        #[arg(short, long)]
        dry_run: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List categories and the directories they match
    Categories,

    /// Manage project configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a commented .shared-pack.toml to the project root
    Init,

    /// Show config file path
    Path,

    /// Show effective configuration
    List,
}

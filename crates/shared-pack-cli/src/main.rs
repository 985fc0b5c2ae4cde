use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use shared_pack_core::config::Config;
use shared_pack_core::conflict::ConflictRecord;
use shared_pack_core::packer::{
    MoveStatus, PackOptions, PackOutcome, PackPlan, PackReporter, Packer, PlanEntry, RunResult,
};
use shared_pack_core::vcs::GitStatus;
use shared_pack_core::{CategoryClassifier, RealFs, Result, SharedPackError, UNKNOWN_CATEGORY};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = resolve_project_root(cli.project).and_then(|project_root| match cli.command {
        Some(Commands::Pack {
            category,
            file,
            dry_run,
            yes,
        }) => handle_pack(
            &project_root,
            PackOptions {
                file,
                category,
                dry_run,
            },
            yes,
            cli.quiet,
        ),
        Some(Commands::Categories) => handle_categories(&project_root),
        Some(Commands::Config { action }) => handle_config(action, &project_root),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn resolve_project_root(cli_project: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match cli_project {
        Some(path) => cwd.join(path),
        None => cwd,
    })
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "shared-pack", &mut io::stdout());
}

fn handle_pack(
    project_root: &Path,
    options: PackOptions,
    assume_yes: bool,
    quiet: bool,
) -> Result<()> {
    let config = Config::load(project_root)?;
    let changes = GitStatus::new(project_root);
    let packer = Packer::new(project_root, &config, &RealFs, &changes);

    let mut reporter = TerminalReporter { quiet, assume_yes };
    let outcome = packer.run(&options, &mut reporter)?;

    match outcome {
        PackOutcome::NothingToPack => reporter.info("No files to pack."),
        PackOutcome::DryRun { .. } => {
            reporter.info(&"Dry run completed. No files were moved.".yellow().to_string())
        }
        PackOutcome::Cancelled => reporter.info("Operation cancelled."),
        PackOutcome::Completed(result) => print_summary(&result),
    }

    Ok(())
}

fn print_summary(result: &RunResult) {
    println!();
    let failed = if result.failed > 0 {
        format!("{} failed", result.failed).red().to_string()
    } else {
        format!("{} failed", result.failed)
    };
    println!(
        "{} {} moved, {} skipped, {}.",
        "Summary:".green(),
        result.moved,
        result.skipped,
        failed
    );
}

struct TerminalReporter {
    quiet: bool,
    assume_yes: bool,
}

impl TerminalReporter {
    fn info(&self, line: &str) {
        if !self.quiet {
            println!("{}", line);
        }
    }
}

impl PackReporter for TerminalReporter {
    fn preview(&mut self, plan: &PackPlan) {
        if self.quiet {
            return;
        }

        println!("{}", "Found files to pack:".green());
        println!();

        for (category, entries) in plan.groups() {
            let count = entries.len();
            let noun = if count > 1 { "files" } else { "file" };
            println!(
                "{}",
                format!("{} ({} {}):", title_case(category), count, noun)
                    .cyan()
                    .bold()
            );
            for entry in entries {
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    entry.file.relative_path,
                    entry.target.display
                );
            }
            println!();
        }
    }

    fn conflicts(&mut self, conflicts: &[ConflictRecord]) {
        if self.quiet {
            return;
        }

        println!("{}", "Warnings:".yellow().bold());
        for conflict in conflicts {
            println!(
                "  {} {}: {} (will be skipped)",
                "⚠".yellow(),
                conflict.source,
                conflict.reason
            );
        }
        println!();
    }

    fn confirm(&mut self, _plan: &PackPlan) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        print!("Do you want to pack these files? [y/N]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!();
            return Ok(false);
        }

        let answer = input.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn file(&mut self, entry: &PlanEntry, status: MoveStatus, error: Option<&SharedPackError>) {
        let label = format!("[{}]", status.label());
        match status {
            MoveStatus::Moved => {
                self.info(&format!("  {} {}", label.green(), entry.file.relative_path))
            }
            MoveStatus::Skipped => self.info(&format!(
                "  {} {} (already exists)",
                label.yellow(),
                entry.file.relative_path
            )),
            MoveStatus::Failed => {
                let reason = error.map(|e| e.to_string()).unwrap_or_default();
                eprintln!("  {} {}", label.red().bold(), reason);
            }
        }
    }
}

fn handle_categories(project_root: &Path) -> Result<()> {
    let config = Config::load(project_root)?;
    let classifier = CategoryClassifier::new(config.category_store());

    println!();
    for cat in classifier.categories() {
        let generator = cat
            .make_command
            .as_deref()
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        println!(
            "{} {}{}",
            format!("{:<14}", cat.name).cyan(),
            cat.prefixes.join(", "),
            generator.dimmed()
        );
    }
    println!(
        "{} {}",
        format!("{:<14}", UNKNOWN_CATEGORY).dimmed(),
        "anything else under the discovery roots".dimmed()
    );
    println!();
    println!(
        "Discovery: {} (*.{})",
        config.discovery.roots.join(", "),
        config.discovery.extension
    );

    Ok(())
}

fn handle_config(action: ConfigAction, project_root: &Path) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = Config::init(project_root)?;
            println!("{} {}", "Config:".green(), path.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::path(project_root).display());
        }
        ConfigAction::List => {
            let config = Config::load(project_root)?;
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
        }
    }

    Ok(())
}

fn title_case(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

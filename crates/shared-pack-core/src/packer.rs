//! Pack pipeline
//!
//! One run walks these stages in order:
//!
//! ```text
//! Discover -> Preview -> ConflictReview -> DryRunExit | ConfirmationGate -> Move -> Summary
//! ```
//!
//! Each stage is a plain function over the previous stage's output so it can
//! be exercised on its own; [`Packer::run`] chains them.

use std::path::{Path, PathBuf};

use crate::category::CategoryClassifier;
use crate::config::Config;
use crate::conflict::{detect_conflicts, is_blocked, ConflictRecord};
use crate::error::{Result, SharedPackError};
use crate::fs::FileSystem;
use crate::locator::DestinationLocator;
use crate::selection::{Candidates, Selector, TrackedFile};
use crate::target::{resolve_target, ResolvedTarget};
use crate::vcs::{self, ChangeSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackStage {
    Discover,
    Preview,
    ConflictReview,
    DryRunExit,
    ConfirmationGate,
    Move,
    Summary,
}

/// Options of the `pack` command.
#[derive(Debug, Clone, Default)]
pub struct PackOptions {
    /// Pack exactly this project-relative file.
    pub file: Option<String>,
    /// Only discovered files of this category.
    pub category: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub file: TrackedFile,
    pub target: ResolvedTarget,
}

/// Candidates paired with their resolved targets.
#[derive(Debug, Clone)]
pub struct PackPlan {
    project_root: PathBuf,
    destination_root: PathBuf,
    entries: Vec<PlanEntry>,
}

impl PackPlan {
    pub fn new(candidates: Candidates, project_root: &Path, destination_root: &Path) -> Self {
        let entries = candidates
            .into_files()
            .into_iter()
            .map(|file| {
                let target = resolve_target(&file.relative_path, project_root, destination_root);
                PlanEntry { file, target }
            })
            .collect();

        Self {
            project_root: project_root.to_path_buf(),
            destination_root: destination_root.to_path_buf(),
            entries,
        }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by category, groups ordered by first appearance.
    pub fn groups(&self) -> Vec<(&str, Vec<&PlanEntry>)> {
        let mut groups: Vec<(&str, Vec<&PlanEntry>)> = Vec::new();
        for entry in &self.entries {
            let category = entry.file.category.as_str();
            match groups.iter_mut().find(|(cat, _)| *cat == category) {
                Some((_, entries)) => entries.push(entry),
                None => groups.push((category, vec![entry])),
            }
        }
        groups
    }

    /// Entries whose target is already occupied right now.
    pub fn conflicts(&self, fs: &dyn FileSystem) -> Vec<ConflictRecord> {
        detect_conflicts(
            self.entries.iter().map(|e| &e.file),
            &self.project_root,
            &self.destination_root,
            fs,
        )
    }
}

/// Result of the dry-run / confirmation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    DryRun,
    Cancelled,
    Proceed,
}

/// Dry run short-circuits before `confirm` is ever asked.
pub fn gate(dry_run: bool, confirm: impl FnOnce() -> Result<bool>) -> Result<Gate> {
    if dry_run {
        return Ok(Gate::DryRun);
    }
    if confirm()? {
        Ok(Gate::Proceed)
    } else {
        Ok(Gate::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Moved,
    Skipped,
    Failed,
}

impl MoveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Moved => "MOVED",
            Self::Skipped => "SKIP",
            Self::Failed => "FAILED",
        }
    }
}

/// Move one entry unless its target exists.
///
/// Missing parent directories of the target are created first.
pub fn move_entry(fs: &dyn FileSystem, entry: &PlanEntry) -> Result<MoveStatus> {
    if is_blocked(fs, &entry.target) {
        return Ok(MoveStatus::Skipped);
    }

    let move_failed = |source: std::io::Error| SharedPackError::MoveFailed {
        path: entry.file.relative_path.clone(),
        source,
    };

    if let Some(parent) = entry.target.absolute.parent() {
        if !fs.is_dir(parent) {
            fs.create_dir_all(parent).map_err(move_failed)?;
        }
    }

    fs.rename(&entry.file.source, &entry.target.absolute)
        .map_err(move_failed)?;
    Ok(MoveStatus::Moved)
}

/// Move every entry in plan order. A failed entry never stops the rest.
pub fn execute(
    plan: &PackPlan,
    fs: &dyn FileSystem,
    mut on_file: impl FnMut(&PlanEntry, MoveStatus, Option<&SharedPackError>),
) -> RunResult {
    let mut result = RunResult::default();

    for entry in plan.entries() {
        match move_entry(fs, entry) {
            Ok(MoveStatus::Moved) => {
                result.moved += 1;
                on_file(entry, MoveStatus::Moved, None);
            }
            Ok(status) => {
                tracing::debug!(path = %entry.file.relative_path, "target exists, skipping");
                result.skipped += 1;
                on_file(entry, status, None);
            }
            Err(e) => {
                tracing::debug!(path = %entry.file.relative_path, error = %e, "move failed");
                result.failed += 1;
                on_file(entry, MoveStatus::Failed, Some(&e));
            }
        }
    }

    result
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackOutcome {
    NothingToPack,
    DryRun { planned: usize },
    Cancelled,
    Completed(RunResult),
}

/// Receives the plan and per-file progress of a run.
pub trait PackReporter {
    fn preview(&mut self, _plan: &PackPlan) {}

    fn conflicts(&mut self, _conflicts: &[ConflictRecord]) {}

    /// Ask whether the plan should be carried out.
    fn confirm(&mut self, plan: &PackPlan) -> Result<bool>;

    fn file(
        &mut self,
        _entry: &PlanEntry,
        _status: MoveStatus,
        _error: Option<&SharedPackError>,
    ) {
    }
}

/// Drives a full run against one project.
pub struct Packer<'a> {
    project_root: &'a Path,
    config: &'a Config,
    fs: &'a dyn FileSystem,
    changes: &'a dyn ChangeSource,
    locator: DestinationLocator,
}

impl<'a> Packer<'a> {
    pub fn new(
        project_root: &'a Path,
        config: &'a Config,
        fs: &'a dyn FileSystem,
        changes: &'a dyn ChangeSource,
    ) -> Self {
        Self {
            project_root,
            config,
            fs,
            changes,
            locator: DestinationLocator::from_config(project_root, &config.destination),
        }
    }

    pub fn with_locator(mut self, locator: DestinationLocator) -> Self {
        self.locator = locator;
        self
    }

    pub fn run(
        &self,
        options: &PackOptions,
        reporter: &mut dyn PackReporter,
    ) -> Result<PackOutcome> {
        if !vcs::is_repository(self.project_root) {
            return Err(SharedPackError::NotARepository {
                path: self.project_root.to_path_buf(),
            });
        }

        let destination = self.locator.resolve(self.fs)?;

        enter(PackStage::Discover);
        let classifier = CategoryClassifier::new(self.config.category_store());
        let selector = Selector::new(self.project_root, &classifier, &self.config.discovery);
        let candidates = selector.select(
            self.changes,
            self.fs,
            options.file.as_deref(),
            options.category.as_deref(),
        )?;
        if candidates.is_empty() {
            return Ok(PackOutcome::NothingToPack);
        }

        enter(PackStage::Preview);
        let plan = PackPlan::new(candidates, self.project_root, &destination);
        reporter.preview(&plan);

        enter(PackStage::ConflictReview);
        let conflicts = plan.conflicts(self.fs);
        if !conflicts.is_empty() {
            reporter.conflicts(&conflicts);
        }

        match gate(options.dry_run, || {
            enter(PackStage::ConfirmationGate);
            reporter.confirm(&plan)
        })? {
            Gate::DryRun => {
                enter(PackStage::DryRunExit);
                return Ok(PackOutcome::DryRun {
                    planned: plan.len(),
                });
            }
            Gate::Cancelled => return Ok(PackOutcome::Cancelled),
            Gate::Proceed => {}
        }

        enter(PackStage::Move);
        let result = execute(&plan, self.fs, |entry, status, error| {
            reporter.file(entry, status, error)
        });

        enter(PackStage::Summary);
        Ok(PackOutcome::Completed(result))
    }
}

fn enter(stage: PackStage) {
    tracing::debug!(?stage, "pack stage");
}

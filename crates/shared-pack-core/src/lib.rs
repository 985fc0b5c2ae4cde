pub mod category;
pub mod config;
pub mod conflict;
pub mod error;
pub mod fs;
pub mod locator;
pub mod packer;
pub mod selection;
pub mod target;
pub mod vcs;

pub use category::{
    BuiltinCategory, CategoryClassifier, CategoryDef, CategoryStore, BUILTIN_CATEGORIES,
    UNKNOWN_CATEGORY,
};
pub use config::{Config, DestinationConfig, DiscoveryConfig, CONFIG_FILE, DESTINATION_ENV};
pub use conflict::{detect_conflicts, is_blocked, ConflictRecord};
pub use error::{Result, SharedPackError};
pub use fs::{FileSystem, RealFs};
pub use locator::DestinationLocator;
pub use packer::{
    execute, gate, move_entry, Gate, MoveStatus, PackOptions, PackOutcome, PackPlan, PackReporter,
    PackStage, Packer, PlanEntry, RunResult,
};
pub use selection::{Candidates, Selector, TrackedFile};
pub use target::{resolve_target, ResolvedTarget};
pub use vcs::{is_repository, parse_porcelain, ChangeSource, GitStatus};

//! tvcs: a git-like version control engine for translation data
//!
//! A [`Repository`] tracks a `locale -> key -> value` table the way git tracks files:
//! edits are staged, sealed into commits, organized on branches and combined with a
//! three-way merge. Stashes, tags, simulated remotes and garbage collection round out
//! the workflow. Everything lives in memory; the only asynchronous operations are the
//! remote round trips, which go through a host-supplied [`RemoteTransport`].
//!
//! ```no_run
//! use tvcs::{CommitOptions, Config, Repository};
//!
//! let mut repository = Repository::new(Config::default())?;
//! repository.set_translation("en", "hello", "Hello");
//! repository.commit("Add greeting", CommitOptions::default())?;
//! # Ok::<(), tvcs::VcsError>(())
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;

pub use areas::refs::{Branch, Head, Tag};
pub use areas::remotes::Remote;
pub use areas::repository::Repository;
pub use areas::stash::Stash;
pub use artifacts::gc::GcReport;
pub use artifacts::merge::conflict::{Conflict, Resolution};
pub use artifacts::merge::three_way::MergeStrategy;
pub use artifacts::objects::change::{Change, ChangeType};
pub use artifacts::objects::commit::{Author, Commit};
pub use artifacts::objects::object_id::ObjectId;
pub use artifacts::remote::transport::{RemoteTransport, SimulatedTransport};
pub use artifacts::status::status_info::StatusInfo;
pub use commands::porcelain::branch::BranchOptions;
pub use commands::porcelain::checkout::CheckoutOptions;
pub use commands::porcelain::commit::CommitOptions;
pub use commands::porcelain::log::{BlameEntry, LogOptions};
pub use commands::porcelain::merge::{MergeOptions, MergeOutcome};
pub use commands::porcelain::rebase::{RebaseOptions, RebaseOutcome};
pub use commands::porcelain::tag::TagOptions;
pub use commands::porcelain::transfer::RepositorySnapshot;
pub use config::{Config, ConflictStrategy};
pub use error::{Result, VcsError};
pub use events::{Event, EventBus, EventKind, SubscriptionId};

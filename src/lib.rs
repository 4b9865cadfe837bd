#![forbid(unsafe_code)]
#![deny(warnings, clippy::all, clippy::pedantic)]

pub mod config;
mod error;
pub mod feed;
mod git;
pub mod output;
pub mod reconcile;
mod report;
mod system;
mod types;

#[cfg(all(test, unix))]
mod testing;

pub use error::GitLsError;
pub use git::{DefaultGitRunner, GitRunner};
pub use report::collect_listing;
pub use system::{DefaultFsOps, FsOps};
pub use types::{
    AGGREGATE, BLANK, ChangeRecord, Decision, Kind, LiveEntry, Listing, ObjectType, Options,
    SubmoduleMap, TreeEntry, UNTRACKED,
};

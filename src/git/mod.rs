mod feeds;
mod probe;
mod runner;

pub use runner::{DefaultGitRunner, GitRunner};

pub(crate) use feeds::{status_feed, submodule_table, tree_feed};
pub(crate) use probe::{inside_work_tree, show_prefix};

mod change;
mod quote;
mod submodule;
mod tree;

pub use change::parse_change_feed;
pub use submodule::parse_submodule_table;
pub use tree::parse_tree_feed;

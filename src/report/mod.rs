mod collector;

pub use collector::collect_listing;

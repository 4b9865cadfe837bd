use clap::ValueEnum;
use serde::Deserialize;

pub mod json;
pub mod lines;
pub mod tab;

pub use json::to_json;
pub use lines::{LineStyle, format_line, format_lines};
pub use tab::{TabStyle, format_tab};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Lines,
    Tab,
    Json,
}

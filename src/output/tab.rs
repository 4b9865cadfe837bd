use clap::ValueEnum;
use serde::Deserialize;
use tabled::{
    Table,
    builder::Builder,
    settings::{Style, object::Rows, style::LineText},
};

use crate::reconcile::compare_decisions;
use crate::types::Decision;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabStyle {
    #[default]
    Rounded,
    Modern,
    ModernRounded,
    Ascii,
    AsciiRounded,
    Psql,
    Markdown,
    Extended,
    Sharp,
    Dots,
    ReStructuredText,
    Blank,
    Empty,
}

impl TabStyle {
    fn apply_to(self, table: &mut Table) {
        match self {
            Self::Rounded => table.with(Style::rounded()),
            Self::Modern => table.with(Style::modern()),
            Self::ModernRounded => table.with(Style::modern_rounded()),
            Self::Ascii => table.with(Style::ascii()),
            Self::AsciiRounded => table.with(Style::ascii_rounded()),
            Self::Psql => table.with(Style::psql()),
            Self::Markdown => table.with(Style::markdown()),
            Self::Extended => table.with(Style::extended()),
            Self::Sharp => table.with(Style::sharp()),
            Self::Dots => table.with(Style::dots()),
            Self::ReStructuredText => table.with(Style::re_structured_text()),
            Self::Blank => table.with(Style::blank()),
            Self::Empty => table.with(Style::empty()),
        };
    }
}

/// Render the decisions as a table titled with the listed directory.
#[must_use]
pub fn format_tab(decisions: &[Decision], style: TabStyle, show_mode: bool, title: &str) -> String {
    let mut sorted: Vec<&Decision> = decisions.iter().collect();
    sorted.sort_by(|a, b| compare_decisions(a, b));

    let mut builder = Builder::default();
    let mut header = Vec::with_capacity(4);
    if show_mode {
        header.push("Mode".to_string());
    }
    header.extend(["Status", "Name", "Submodule"].map(str::to_string));
    builder.push_record(header);

    for d in sorted {
        let mut name = d.display_name.clone();
        if d.has_untracked_descendant {
            name.push('*');
        }
        let mut record = Vec::with_capacity(4);
        if show_mode {
            record.push(d.mode_delta.to_string());
        }
        record.push(format!("{}{}", d.index_state, d.worktree_state));
        record.push(name);
        record.push(d.submodule_url.clone().unwrap_or_default());
        builder.push_record(record);
    }

    let mut table = builder.build();
    style.apply_to(&mut table);
    table.with(LineText::new(format!(" {title} "), Rows::first()).offset(1));
    table.to_string()
}

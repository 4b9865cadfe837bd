use colored::{Color, Colorize};

use crate::reconcile::{ModeFlags, compare_decisions};
use crate::types::{BLANK, Decision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    /// Prefix each line with `ls -l` style permissions.
    pub show_mode: bool,
    /// Emit ANSI SGR sequences.
    pub colorize: bool,
}

/// Render one line per decision, in listing order regardless of input order.
#[must_use]
pub fn format_lines(decisions: &[Decision], style: LineStyle) -> Vec<String> {
    let mut sorted: Vec<&Decision> = decisions.iter().collect();
    sorted.sort_by(|a, b| compare_decisions(a, b));
    sorted.into_iter().map(|d| format_line(d, style)).collect()
}

#[must_use]
pub fn format_line(decision: &Decision, style: LineStyle) -> String {
    let mut line = String::new();
    if style.show_mode {
        line.push_str(&mode_column(&decision.mode_delta, style.colorize));
        line.push(' ');
    }
    line.push(decision.index_state);
    line.push(decision.worktree_state);
    line.push('\t');
    line.push_str(&paint(
        &decision.display_name,
        status_color(decision),
        decision.is_dir(),
        style.colorize,
    ));
    if decision.has_untracked_descendant {
        line.push_str(&paint("*", None, true, style.colorize));
    }
    if let Some(url) = &decision.submodule_url {
        line.push_str(" @ ");
        line.push_str(&paint(url, Some(Color::Green), false, style.colorize));
    }
    line
}

fn status_color(decision: &Decision) -> Option<Color> {
    if decision.is_untracked() {
        return Some(Color::Red);
    }
    match (
        decision.index_state != BLANK,
        decision.worktree_state != BLANK,
    ) {
        (true, true) => Some(Color::Magenta),
        (true, false) => Some(Color::Green),
        (false, true) => Some(Color::Red),
        (false, false) => None,
    }
}

fn mode_column(flags: &ModeFlags, colorize: bool) -> String {
    let mut out = String::with_capacity(10);
    let file_type = flags.file_type.to_string();
    if flags.type_mismatch {
        out.push_str(&paint(&file_type, Some(Color::Red), true, colorize));
    } else {
        out.push_str(&file_type);
    }
    for bit in flags.bits {
        let symbol = bit.as_char().to_string();
        if bit.mismatch {
            out.push_str(&paint(&symbol, Some(Color::Red), true, colorize));
        } else {
            out.push_str(&symbol);
        }
    }
    out
}

fn paint(text: &str, color: Option<Color>, bold: bool, colorize: bool) -> String {
    if !colorize {
        return text.to_string();
    }
    let mut styled = text.normal();
    if let Some(color) = color {
        styled = styled.color(color);
    }
    if bold {
        styled = styled.bold();
    }
    styled.to_string()
}

use serde::Serialize;

use crate::types::GITLINK_MODE;

const S_IFMT: u32 = 0o170_000;
const S_IFSOCK: u32 = 0o140_000;
const S_IFLNK: u32 = 0o120_000;
const S_IFBLK: u32 = 0o060_000;
const S_IFDIR: u32 = 0o040_000;
const S_IFREG: u32 = 0o100_000;
const S_IFCHR: u32 = 0o020_000;
const S_IFIFO: u32 = 0o010_000;

/// Owner, group, other; each read, write, execute.
const PERMISSIONS: [(u32, char); 9] = [
    (0o400, 'r'),
    (0o200, 'w'),
    (0o100, 'x'),
    (0o040, 'r'),
    (0o020, 'w'),
    (0o010, 'x'),
    (0o004, 'r'),
    (0o002, 'w'),
    (0o001, 'x'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeBit {
    pub symbol: char,
    /// Set in the live filesystem mode.
    pub set: bool,
    /// Recorded and live mode disagree on this bit.
    pub mismatch: bool,
}

impl ModeBit {
    #[must_use]
    pub fn as_char(self) -> char {
        if self.set { self.symbol } else { '-' }
    }
}

/// `ls -l` style permissions with per-bit differences against the recorded mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeFlags {
    pub file_type: char,
    /// The recorded entry was committed as a different kind of file.
    pub type_mismatch: bool,
    pub bits: [ModeBit; 9],
}

impl ModeFlags {
    #[must_use]
    pub fn compute(recorded: Option<u32>, live: Option<u32>) -> Self {
        let live = live.filter(|&m| m != 0);
        let file_type = file_type_char(recorded, live);
        let both = recorded.zip(live);
        let type_mismatch = both.is_some_and(|(r, l)| !same_type(r, l));
        // Permission bits are only meaningful between two regular files.
        let compare = both.filter(|&(r, l)| r & S_IFMT == S_IFREG && l & S_IFMT == S_IFREG);
        let bits = PERMISSIONS.map(|(flag, symbol)| ModeBit {
            symbol,
            set: live.is_some_and(|m| m & flag != 0),
            mismatch: compare.is_some_and(|(r, l)| (r & flag != 0) != (l & flag != 0)),
        });
        Self {
            file_type,
            type_mismatch,
            bits,
        }
    }

    #[must_use]
    pub fn has_mismatch(&self) -> bool {
        self.type_mismatch || self.bits.iter().any(|b| b.mismatch)
    }
}

/// A gitlink is checked out as a directory, so the two count as the same type.
fn same_type(recorded: u32, live: u32) -> bool {
    let recorded = if recorded == GITLINK_MODE {
        S_IFDIR
    } else {
        recorded & S_IFMT
    };
    recorded == live & S_IFMT
}

impl std::fmt::Display for ModeFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_type)?;
        for bit in self.bits {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

fn file_type_char(recorded: Option<u32>, live: Option<u32>) -> char {
    if recorded == Some(GITLINK_MODE) {
        return 'g';
    }
    match live.map(|m| m & S_IFMT) {
        Some(S_IFSOCK) => 's',
        Some(S_IFLNK) => 'l',
        Some(S_IFBLK) => 'b',
        Some(S_IFCHR) => 'c',
        Some(S_IFIFO) => 'p',
        Some(S_IFDIR) => 'd',
        _ => '-',
    }
}

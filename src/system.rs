use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::types::LiveEntry;

pub trait FsOps: Sync {
    /// List the direct children of `dir`, sorted by name.
    ///
    /// # Errors
    /// Returns an error if `dir` does not exist or cannot be read.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<LiveEntry>>;

    /// Read a text file, yielding `Ok(None)` when it does not exist.
    ///
    /// # Errors
    /// Returns an error for any failure other than the file being absent.
    fn read_optional(&self, path: &Path) -> io::Result<Option<String>>;

    fn expand_tilde(&self, p: &Path) -> PathBuf;
}

pub struct DefaultFsOps;

impl FsOps for DefaultFsOps {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<LiveEntry>> {
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                "not a directory",
            ));
        }
        let mut entries = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            let name = entry.file_name().to_string_lossy().to_string();
            // Symlinks to directories count as directories, like `ls` does.
            let is_dir = entry.file_type().is_dir() || entry.path().is_dir();
            let mode = entry.metadata().ok().and_then(|m| lstat_mode(&m));
            entries.push(LiveEntry { name, is_dir, mode });
        }
        Ok(entries)
    }

    fn read_optional(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn expand_tilde(&self, p: &Path) -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            if p.starts_with("~")
                && let Ok(rest) = p.strip_prefix("~")
            {
                return home.join(rest);
            }
        }
        p.to_path_buf()
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn lstat_mode(meta: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::MetadataExt;
    Some(meta.mode())
}

#[cfg(not(unix))]
fn lstat_mode(_meta: &std::fs::Metadata) -> Option<u32> {
    None
}

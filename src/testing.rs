use std::collections::BTreeMap;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use crate::git::GitRunner;
use crate::system::FsOps;
use crate::types::LiveEntry;

/// Canned `git` responses keyed by the space-joined argument list.
/// Commands without a script exit with status 1 and no output.
#[derive(Default)]
pub(crate) struct ScriptedGit {
    responses: BTreeMap<String, (i32, String, String)>,
}

impl ScriptedGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ok(mut self, args: &str, stdout: &str) -> Self {
        self.responses
            .insert(args.to_string(), (0, stdout.to_string(), String::new()));
        self
    }

    pub(crate) fn fail(mut self, args: &str, stderr: &str) -> Self {
        self.responses
            .insert(args.to_string(), (128, String::new(), stderr.to_string()));
        self
    }
}

impl GitRunner for ScriptedGit {
    fn run_git(&self, _dir: &Path, args: &[&str]) -> io::Result<Output> {
        let (code, stdout, stderr) = self
            .responses
            .get(&args.join(" "))
            .cloned()
            .unwrap_or((1, String::new(), String::new()));
        Ok(Output {
            status: ExitStatus::from_raw(code << 8),
            stdout: stdout.into_bytes(),
            stderr: stderr.into_bytes(),
        })
    }
}

/// In-memory directories and files.
#[derive(Default)]
pub(crate) struct MemFs {
    dirs: BTreeMap<PathBuf, Vec<LiveEntry>>,
    files: BTreeMap<PathBuf, String>,
}

impl MemFs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn dir(mut self, path: &str, entries: Vec<LiveEntry>) -> Self {
        self.dirs.insert(PathBuf::from(path), entries);
        self
    }

    pub(crate) fn file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(PathBuf::from(path), contents.to_string());
        self
    }
}

impl FsOps for MemFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<LiveEntry>> {
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
    }

    fn read_optional(&self, path: &Path) -> io::Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }

    fn expand_tilde(&self, p: &Path) -> PathBuf {
        match p.strip_prefix("~") {
            Ok(rest) => Path::new("/home/tester").join(rest),
            Err(_) => p.to_path_buf(),
        }
    }
}

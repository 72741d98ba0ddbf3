//! A facility that answers from a hosts table instead of the system resolver.

use super::{HostRecord, Resolve, ResolutionFailed, HOST_NOT_FOUND, NETDB_INTERNAL};

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve names from a hosts table, such as `/etc/hosts`.
///
/// The table is read again on every lookup. Like `gethostbyname`, only IPv4 entries are
/// considered, and the first entry that carries the name wins.
#[derive(Debug, Clone)]
pub struct HostsFile {
    source: Source,
}

/// Where the table text comes from.
#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Contents(String),
}

impl HostsFile {
    /// Use the system's hosts table.
    pub fn system() -> Self {
        Self::open(host_table::hosts_path())
    }

    /// Use the hosts table at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Path(path.into()),
        }
    }

    /// Use a hosts table held in memory.
    pub fn from_contents(contents: impl Into<String>) -> Self {
        Self {
            source: Source::Contents(contents.into()),
        }
    }

    /// The file this table is read from, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Path(path) => Some(path),
            Source::Contents(_) => None,
        }
    }

    fn contents(&self) -> io::Result<Cow<'_, str>> {
        match &self.source {
            // Stray bytes in comments must not make the whole table unreadable.
            Source::Path(path) => {
                let bytes = fs::read(path)?;
                Ok(Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()))
            }
            Source::Contents(contents) => Ok(Cow::Borrowed(contents)),
        }
    }
}

impl Resolve for HostsFile {
    fn lookup(&self, name: &str) -> Result<HostRecord, ResolutionFailed> {
        let contents = self.contents().map_err(|err| {
            tracing::warn!(path = ?self.path(), %err, "failed to read hosts table");
            ResolutionFailed::from_code(NETDB_INTERNAL)
        })?;

        let entry = host_table::entries(&contents)
            .filter(|entry| entry.address().is_ipv4())
            .find(|entry| entry.matches(name));

        match entry {
            Some(entry) => {
                tracing::debug!(host = name, canonical = entry.name(), "found host in table");
                Ok(HostRecord::new(
                    entry.name(),
                    entry.aliases().map(String::from).collect(),
                    vec![entry.address()],
                ))
            }
            None => {
                tracing::debug!(host = name, "host not in table");
                Err(ResolutionFailed::from_code(HOST_NOT_FOUND))
            }
        }
    }
}

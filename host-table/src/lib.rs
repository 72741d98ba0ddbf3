//! A parser for the hosts table format, [sans I/O].
//!
//! [sans I/O]: https://sans-io.readthedocs.io/
//!
//! The hosts table (`/etc/hosts` on Unix systems) maps IP addresses to a canonical host name
//! and any number of aliases. Each line has the form:
//!
//! ```text
//! address canonical_name [alias ...]   # optional comment
//! ```
//!
//! This crate does not read files. The caller provides the text of the table, and this crate
//! hands back [`Entry`] values that borrow from it. No allocation takes place while parsing.
//!
//! This crate is `#![forbid(unsafe_code)]`.
//!
//! # Example
//!
//! ```
//! let table = "\
//! 127.0.0.1   localhost
//! 10.0.0.7    build.example.com build ci   # the build box
//! ";
//!
//! let entry = host_table::find(table, "CI").unwrap();
//! assert_eq!(entry.name(), "build.example.com");
//! assert_eq!(entry.aliases().collect::<Vec<_>>(), ["build", "ci"]);
//! ```

#![forbid(
    unsafe_code,
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    future_incompatible
)]

use std::iter::{self, FusedIterator};
use std::net::IpAddr;
use std::path::Path;
use std::str::{Lines, SplitAsciiWhitespace};

/// Iterate over the entries of a hosts table.
///
/// Blank lines, comments and lines that do not start with a valid address followed by a name
/// are skipped.
pub fn entries(text: &str) -> Entries<'_> {
    Entries {
        lines: text.lines(),
    }
}

/// Find the first entry whose canonical name or alias matches `name`.
///
/// See [`Entry::matches`] for how names are compared.
pub fn find<'a>(text: &'a str, name: &str) -> Option<Entry<'a>> {
    entries(text).find(|entry| entry.matches(name))
}

/// The location of the hosts table on this platform.
pub fn hosts_path() -> &'static Path {
    if cfg!(windows) {
        Path::new(r"C:\Windows\System32\drivers\etc\hosts")
    } else {
        Path::new("/etc/hosts")
    }
}

/// An iterator over the entries in a hosts table.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    lines: Lines<'a>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(entry) = Entry::parse(line) {
                return Some(entry);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every line may be skipped.
        (0, self.lines.size_hint().1)
    }
}

impl FusedIterator for Entries<'_> {}

/// A single line of the hosts table.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    /// The address the names point to.
    address: IpAddr,

    /// The canonical name of the host.
    name: &'a str,

    /// The remaining fields of the line, which are the aliases.
    aliases: SplitAsciiWhitespace<'a>,
}

impl<'a> Entry<'a> {
    /// Parse a single line of the hosts table.
    ///
    /// Returns `None` if the line is blank, is a comment, has an address that does not parse,
    /// or has no canonical name.
    pub fn parse(line: &'a str) -> Option<Self> {
        // If the line has a comment, remove it.
        let line = match memchr::memchr(b'#', line.as_bytes()) {
            Some(n) => &line[..n],
            None => line,
        };

        let mut fields = line.split_ascii_whitespace();
        let address = fields.next()?.parse().ok()?;
        let name = fields.next()?;

        Some(Entry {
            address,
            name,
            aliases: fields,
        })
    }

    /// The address of this entry.
    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// The canonical name of this entry.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The aliases of this entry, in the order they appear on the line.
    pub fn aliases(&self) -> Aliases<'a> {
        Aliases(self.aliases.clone())
    }

    /// The canonical name followed by the aliases.
    pub fn names(&self) -> iter::Chain<iter::Once<&'a str>, Aliases<'a>> {
        iter::once(self.name).chain(self.aliases())
    }

    /// Tell whether `name` is the canonical name or one of the aliases of this entry.
    ///
    /// Host names are compared ASCII case-insensitively.
    pub fn matches(&self, name: &str) -> bool {
        self.names().any(|candidate| candidate.eq_ignore_ascii_case(name))
    }
}

/// The aliases of an [`Entry`].
#[derive(Debug, Clone)]
pub struct Aliases<'a>(SplitAsciiWhitespace<'a>);

impl<'a> Iterator for Aliases<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl<'a> DoubleEndedIterator for Aliases<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl FusedIterator for Aliases<'_> {}

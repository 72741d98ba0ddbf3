//! Print the aliases a hostname is known by.
//!
//! This crate resolves a name through a name-resolution facility and renders the aliases of the
//! resulting host record as a single line: the aliases in the order the facility returned them,
//! separated by single spaces, followed by a newline.
//!
//! The facility is abstracted by the [`Resolve`] trait. Two are provided:
//!
//! - [`SystemResolver`] uses the C library's `gethostbyname` family, which consults whatever
//!   sources the system is configured for (hosts file, DNS, NIS and so on). On Linux, Android
//!   and FreeBSD the reentrant `gethostbyname_r` is used. On Apple platforms the classic
//!   `gethostbyname` is called under a process-wide lock.
//! - [`HostsFile`] answers from a hosts table only, parsed with [`host-table`].
//!
//! Every result is an owned [`HostRecord`], and every failure is a [`ResolutionFailed`] value
//! carrying the facility's error code and its human-readable text. The only function that
//! terminates the process is [`hostname_alias`], which is meant to sit at the very edge of a
//! program.
//!
//! [`host-table`]: https://crates.io/crates/host-table
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let aliases = hostname_alias::resolve_aliases("localhost")?;
//!
//! let mut line = Vec::new();
//! hostname_alias::write_aliases(&mut line, aliases)?;
//! print!("{}", String::from_utf8_lossy(&line));
//! # Ok(())
//! # }
//! ```

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod unix;
        use unix as sys;

        pub mod host;
    } else {
        compile_error! {
            "hostname-alias does not support this platform"
        }
    }
}

mod hosts;
mod unblock;

pub use hosts::HostsFile;
pub use unblock::{lookup_async, resolve_aliases_async};

use std::io::{self, Write};
use std::iter::FusedIterator;
use std::net::IpAddr;
use std::process;
use std::vec;

/// The host is unknown.
pub const HOST_NOT_FOUND: i32 = 1;

/// A temporary failure; the server may answer later.
pub const TRY_AGAIN: i32 = 2;

/// A non-recoverable server failure.
pub const NO_RECOVERY: i32 = 3;

/// The name is valid but has no address of the requested family.
pub const NO_DATA: i32 = 4;

/// An internal error of the resolver, such as an unreadable source.
pub const NETDB_INTERNAL: i32 = -1;

/// The result of a successful lookup.
///
/// All data is copied out of the facility before the lookup returns, so a record stays valid
/// no matter how many lookups follow it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostRecord {
    /// The canonical name of the host.
    name: String,

    /// The alternate names of the host, in facility order.
    aliases: Vec<String>,

    /// The addresses of the host, in facility order.
    addresses: Vec<IpAddr>,
}

impl HostRecord {
    /// Create a new host record.
    pub fn new(name: impl Into<String>, aliases: Vec<String>, addresses: Vec<IpAddr>) -> Self {
        Self {
            name: name.into(),
            aliases,
            addresses,
        }
    }

    /// The canonical name of the host.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The aliases of the host.
    ///
    /// These are neither sorted nor deduplicated.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The addresses of the host.
    pub fn addresses(&self) -> &[IpAddr] {
        &self.addresses
    }

    /// Consume the record, keeping only its aliases.
    pub fn into_aliases(self) -> Aliases {
        Aliases(self.aliases.into_iter())
    }
}

/// Name resolution failed.
///
/// This is the only error a lookup reports. The facility's numeric code is kept, but no
/// meaning is attached to it beyond the text the facility itself produces for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ResolutionFailed {
    code: i32,
    message: String,
}

impl ResolutionFailed {
    /// Create an error for the given facility code.
    ///
    /// The message is the C library's `hstrerror` text for `code`.
    pub fn from_code(code: i32) -> Self {
        Self {
            code,
            message: sys::describe(code),
        }
    }

    /// The facility's error code, in `h_errno` terms.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// The human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A name-resolution facility.
pub trait Resolve {
    /// Look up `name`, returning its host record.
    fn lookup(&self, name: &str) -> Result<HostRecord, ResolutionFailed>;
}

impl<R: Resolve + ?Sized> Resolve for &R {
    fn lookup(&self, name: &str) -> Result<HostRecord, ResolutionFailed> {
        (**self).lookup(name)
    }
}

impl<R: Resolve + ?Sized> Resolve for Box<R> {
    fn lookup(&self, name: &str) -> Result<HostRecord, ResolutionFailed> {
        (**self).lookup(name)
    }
}

/// The system's own resolver, as configured for the C library.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn lookup(&self, name: &str) -> Result<HostRecord, ResolutionFailed> {
        sys::lookup(name)
    }
}

/// Create a facility out of a closure.
///
/// ```
/// use hostname_alias::{HostRecord, Resolve};
///
/// let resolver = hostname_alias::from_fn(|name: &str| {
///     Ok(HostRecord::new(name, vec!["alias.test".to_string()], vec![]))
/// });
///
/// let record = resolver.lookup("example.test").unwrap();
/// assert_eq!(record.aliases(), ["alias.test"]);
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&str) -> Result<HostRecord, ResolutionFailed>,
{
    FromFn(f)
}

/// A facility backed by a closure. See [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

impl<F> Resolve for FromFn<F>
where
    F: Fn(&str) -> Result<HostRecord, ResolutionFailed>,
{
    fn lookup(&self, name: &str) -> Result<HostRecord, ResolutionFailed> {
        (self.0)(name)
    }
}

/// The aliases of a host, in the order the facility returned them.
#[derive(Debug, Clone)]
pub struct Aliases(vec::IntoIter<String>);

impl Iterator for Aliases {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }

    fn fold<B, F>(self, init: B, f: F) -> B
    where
        Self: Sized,
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, f)
    }
}

impl FusedIterator for Aliases {}

impl ExactSizeIterator for Aliases {}

impl DoubleEndedIterator for Aliases {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

/// Look up `name` with the system resolver.
pub fn lookup(name: &str) -> Result<HostRecord, ResolutionFailed> {
    SystemResolver.lookup(name)
}

/// Resolve the aliases of `name` with the system resolver.
pub fn resolve_aliases(name: &str) -> Result<Aliases, ResolutionFailed> {
    resolve_aliases_with(&SystemResolver, name)
}

/// Resolve the aliases of `name` with the given facility.
pub fn resolve_aliases_with<R: Resolve + ?Sized>(
    resolver: &R,
    name: &str,
) -> Result<Aliases, ResolutionFailed> {
    resolver.lookup(name).map(HostRecord::into_aliases)
}

/// Write `aliases` as one line: separated by single spaces, terminated by a newline.
///
/// An empty sequence produces a lone newline.
pub fn write_aliases<W, I>(out: &mut W, aliases: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for (i, alias) in aliases.into_iter().enumerate() {
        if i > 0 {
            out.write_all(b" ")?;
        }
        out.write_all(alias.as_ref().as_bytes())?;
    }

    out.write_all(b"\n")
}

/// Resolve `name` and report the outcome on the given streams.
///
/// On success the alias line goes to `stdout` and the returned status is `0`. On failure the
/// facility's error text goes to `stderr` as a single line, nothing is written to `stdout`,
/// and the returned status is `1`.
pub fn run<R, O, E>(resolver: &R, name: &str, stdout: &mut O, stderr: &mut E) -> io::Result<i32>
where
    R: Resolve + ?Sized,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    match resolver.lookup(name) {
        Ok(record) => {
            write_aliases(stdout, record.aliases())?;
            stdout.flush()?;
            Ok(0)
        }
        Err(err) => {
            writeln!(stderr, "{}", err)?;
            stderr.flush()?;
            Ok(1)
        }
    }
}

/// Print the aliases of `name` to standard output, using the system resolver.
///
/// If resolution fails, the resolver's error text is written to standard error and the
/// process exits with status 1. This function does not return in that case.
pub fn hostname_alias(name: &str) {
    hostname_alias_with(&SystemResolver, name)
}

/// Print the aliases of `name` to standard output, using the given facility.
///
/// See [`hostname_alias`].
pub fn hostname_alias_with<R: Resolve + ?Sized>(resolver: &R, name: &str) {
    let stdout = io::stdout();
    let stderr = io::stderr();

    let status = match run(resolver, name, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(status) => status,
        Err(err) => {
            tracing::warn!(%err, "failed to report aliases");
            1
        }
    };

    if status != 0 {
        process::exit(status);
    }
}

fn _assert_threadsafe() {
    fn _assertion<F: Send + Sync>(_: F) {}
    _assertion(HostRecord::new("", vec![], vec![]));
    _assertion(HostRecord::new("", vec![], vec![]).into_aliases());
    _assertion(ResolutionFailed::from_code(HOST_NOT_FOUND));
}

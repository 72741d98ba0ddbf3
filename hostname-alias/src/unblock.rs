//! "The coward's way out": await the blocking lookup by running it on a thread pool.

use super::{Aliases, HostRecord, ResolutionFailed};

/// Look up `name` with the system resolver without blocking the current task.
pub async fn lookup_async(name: &str) -> Result<HostRecord, ResolutionFailed> {
    let name = name.to_string();

    // The record is owned, so it can travel back from the pool thread.
    blocking::unblock(move || super::lookup(&name)).await
}

/// Resolve the aliases of `name` with the system resolver without blocking the current task.
pub async fn resolve_aliases_async(name: &str) -> Result<Aliases, ResolutionFailed> {
    lookup_async(name).await.map(HostRecord::into_aliases)
}

fn _assert_threadsafe() {
    fn _assertion<F: Send>(_: F) {}
    _assertion(lookup_async("foobar"));
    _assertion(resolve_aliases_async("foobar"));
}

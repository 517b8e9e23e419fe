//! Runtime selection: which tokio flavor drives a batch.
//!
//! # Design
//! A batch needs a runtime for exactly as long as the call lasts, and the
//! flavor is purely a performance knob — ordering, failure policy, and
//! result content are identical either way. The multi-thread flavor is
//! behind the `multi-thread` cargo feature; when the feature is not
//! compiled in, asking for it falls back silently to the always-available
//! current-thread flavor rather than erroring.

use std::io;

use tokio::runtime::{Builder, Runtime};

/// Which tokio runtime flavor to drive a batch with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuntimeFlavor {
    /// Single-threaded cooperative scheduling; all request futures
    /// interleave on the calling thread. Always available.
    #[default]
    CurrentThread,

    /// Multi-threaded scheduler, available with the `multi-thread`
    /// feature. Without the feature this is a silent alias for
    /// `CurrentThread`.
    MultiThread,
}

/// Build a runtime of the requested flavor.
pub(crate) fn build(flavor: RuntimeFlavor) -> io::Result<Runtime> {
    match flavor {
        RuntimeFlavor::CurrentThread => current_thread(),
        #[cfg(feature = "multi-thread")]
        RuntimeFlavor::MultiThread => {
            tracing::debug!("using multi-thread runtime");
            Builder::new_multi_thread().enable_all().build()
        }
        #[cfg(not(feature = "multi-thread"))]
        RuntimeFlavor::MultiThread => {
            tracing::debug!("multi-thread runtime not compiled in, using current-thread");
            current_thread()
        }
    }
}

fn current_thread() -> io::Result<Runtime> {
    Builder::new_current_thread().enable_all().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flavor_is_current_thread() {
        assert_eq!(RuntimeFlavor::default(), RuntimeFlavor::CurrentThread);
    }

    #[test]
    fn builds_current_thread_runtime() {
        let rt = build(RuntimeFlavor::CurrentThread).unwrap();
        assert_eq!(rt.block_on(async { 1 + 1 }), 2);
    }

    #[test]
    fn multi_thread_flavor_always_yields_a_usable_runtime() {
        // With the feature off this exercises the silent fallback.
        let rt = build(RuntimeFlavor::MultiThread).unwrap();
        assert_eq!(rt.block_on(async { 1 + 1 }), 2);
    }
}

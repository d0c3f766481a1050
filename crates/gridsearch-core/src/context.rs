//! Cooperative cancellation shared between the UI thread and a search worker.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cancellation flag that outlives any one thread.
///
/// Clones observe the same flag: the UI keeps one to call [`cancel`] on,
/// and a search polls another between expansions. Once set the flag stays
/// set; start a new run with a new `Context`.
///
/// [`cancel`]: Context::cancel
#[derive(Clone, Debug, Default)]
pub struct Context(Arc<AtomicBool>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Ask every holder to stop. Calling it again has no further effect.
    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let ctx = Context::new();
        let worker = ctx.clone();
        assert!(!worker.is_done());
        ctx.cancel();
        assert!(worker.is_done());
        ctx.cancel();
        assert!(ctx.is_done());
    }

    #[test]
    fn cancel_is_visible_across_threads() {
        let ctx = Context::new();
        let worker = ctx.clone();
        let handle = std::thread::spawn(move || {
            while !worker.is_done() {
                std::thread::yield_now();
            }
            true
        });
        ctx.cancel();
        assert!(handle.join().unwrap());
    }
}

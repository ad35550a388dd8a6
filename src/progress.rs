// src/progress.rs
/// Lightweight progress reporting used by long-running operations (the
/// all-meets crawl). Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (e.g. a date page was fetched).
    fn item_done(&mut self, _label: &str) {}

    /// Called when one logical unit fails; the operation continues without it.
    fn item_failed(&mut self, _label: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

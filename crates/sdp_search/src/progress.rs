// Progress hooks for the search loop.
//
// Callers install a global `SearchProgress` implementation via
// [`set_search_progress`]; `find_matches` then reports each completed
// permutation scan. This keeps reporting out of the hot pair loop and
// decoupled from any particular frontend.
use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;

/// Observer for search progress.
pub trait SearchProgress: Send + Sync {
    /// Called after one permutation scan completes.
    ///
    /// `index` is the permutation's position within the family, `total`
    /// the family size, and `matches` the number of canonical matches that
    /// scan contributed before merging. Scans run in parallel, so calls
    /// may arrive out of `index` order.
    fn permutation_scanned(&self, index: usize, total: usize, matches: usize);
}

fn progress_lock() -> &'static RwLock<Option<Arc<dyn SearchProgress>>> {
    static PROGRESS: OnceCell<RwLock<Option<Arc<dyn SearchProgress>>>> = OnceCell::new();
    PROGRESS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn progress_observer() -> Option<Arc<dyn SearchProgress>> {
    let guard = progress_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global search progress observer.
///
/// Typically called once at startup so every search in the process reports
/// to the same frontend.
pub fn set_search_progress(observer: Option<Arc<dyn SearchProgress>>) {
    let lock = progress_lock();
    let mut guard = lock.write().expect("search progress lock poisoned");
    *guard = observer;
}

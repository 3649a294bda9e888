//! Report-scoped resolution memo.
//!
//! One memo lives exactly as long as one report generation; a fresh
//! report starts with an empty memo (no cross-report caching). Safe for
//! concurrent use: lookups for the same address are collapsed so the
//! underlying source is hit at most once per address, including when the
//! answer is "no interface registered".

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

use votelens_core::{Interface, SourceError};

/// The memoized outcome of one resolution: the interface, or `None` for
/// a registered-nowhere address.
pub type Resolved = Option<Arc<Interface>>;

type Cell = Arc<OnceCell<Resolved>>;

/// Address → resolution memo with single-flight initialisation.
#[derive(Default)]
pub struct ResolutionMemo {
    cells: Mutex<HashMap<String, Cell>>,
}

impl ResolutionMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the memoized resolution for `address`, running `resolve` at
    /// most once across all concurrent callers. Errors are not cached:
    /// a failed resolution leaves the cell empty so a later caller may
    /// try again.
    pub async fn get_or_resolve<F, Fut>(
        &self,
        address: &str,
        resolve: F,
    ) -> Result<Resolved, SourceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Resolved, SourceError>>,
    {
        let cell = {
            let mut cells = self.cells.lock().await;
            cells
                .entry(address.to_ascii_lowercase())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        cell.get_or_try_init(resolve).await.map(Clone::clone)
    }

    /// Number of addresses resolved so far (test/diagnostic aid).
    pub async fn len(&self) -> usize {
        self.cells.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cells.lock().await.is_empty()
    }
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the external clock value (block height, logical tick, ...)
/// recorded into a schedule on every write.
pub trait HeightSource: Send + Sync {
    fn current_height(&self) -> u64;
}

/// A height that never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHeight(pub u64);

impl HeightSource for FixedHeight {
    fn current_height(&self) -> u64 {
        self.0
    }
}

/// A height driven by the caller, e.g. a ledger pushing each new block.
#[derive(Debug, Default)]
pub struct ManualHeight {
    height: AtomicU64,
}

impl ManualHeight {
    pub fn new(start: u64) -> Self {
        Self {
            height: AtomicU64::new(start),
        }
    }

    pub fn set(&self, height: u64) {
        self.height.store(height, Ordering::SeqCst);
    }

    /// Advance by `by` and return the new height.
    pub fn advance(&self, by: u64) -> u64 {
        let mut current = self.height.load(Ordering::SeqCst);
        loop {
            let next = current.saturating_add(by);
            match self.height.compare_exchange_weak(
                current,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }
}

impl HeightSource for ManualHeight {
    fn current_height(&self) -> u64 {
        self.height.load(Ordering::SeqCst)
    }
}

/// Seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHeight;

impl HeightSource for SystemHeight {
    fn current_height(&self) -> u64 {
        // A clock set before 1970 reads as height 0.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

//! Storage key generation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

/// Prefix shared by every uploaded image key
pub const KEY_PREFIX: &str = "images/";

/// Source of wall-clock time in Unix milliseconds
pub trait Clock: Send + Sync {
    /// Current Unix time in milliseconds
    fn now_millis(&self) -> u64;
}

/// Clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
    }
}

/// Issues `images/<millis>_<name>` keys
///
/// The millisecond component never repeats within a process: when the clock
/// has not moved past the last issued value, the last value plus one is used.
pub struct KeyGenerator {
    clock: Arc<dyn Clock>,
    last_issued: AtomicU64,
}

impl KeyGenerator {
    /// Creates a key generator reading time from `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last_issued: AtomicU64::new(0),
        }
    }

    /// Storage key for a file called `original_name`
    pub fn next_key(&self, original_name: &str) -> String {
        format!("{KEY_PREFIX}{}_{original_name}", self.next_millis())
    }

    fn next_millis(&self) -> u64 {
        let now = self.clock.now_millis();
        let mut last = self.last_issued.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self.last_issued.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => last = observed,
            }
        }
    }
}

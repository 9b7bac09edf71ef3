//! Bounded output capture shared between stdout and stderr.

use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

const CHUNK_SIZE: usize = 8192;

/// Byte budget shared by every output stream of one child.
#[derive(Debug)]
pub(crate) struct OutputBudget {
    limit: usize,
    used: AtomicUsize,
    exceeded: AtomicBool,
}

impl OutputBudget {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            used: AtomicUsize::new(0),
            exceeded: AtomicBool::new(false),
        }
    }

    /// Claims up to `wanted` bytes and returns how many may be kept.
    pub(crate) fn claim(&self, wanted: usize) -> usize {
        let mut current = self.used.load(Ordering::Relaxed);
        loop {
            let granted = wanted.min(self.limit.saturating_sub(current));
            match self.used.compare_exchange_weak(
                current,
                current + granted,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    if granted < wanted {
                        self.exceeded.store(true, Ordering::Release);
                    }
                    return granted;
                }
                Err(actual) => current = actual,
            }
        }
    }

    pub(crate) fn exceeded(&self) -> bool {
        self.exceeded.load(Ordering::Acquire)
    }

    pub(crate) fn limit(&self) -> usize {
        self.limit
    }
}

/// Reads `reader` to EOF, keeping only what the budget grants.
///
/// Stops reading once the budget is exhausted so that a runaway writer sees a
/// closed pipe instead of filling memory.
pub(crate) fn read_limited<R: Read>(mut reader: R, budget: &OutputBudget) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let keep = budget.claim(n);
        buf.extend_from_slice(&chunk[..keep]);
        if keep < n {
            break;
        }
    }

    Ok(buf)
}

// src/pagination/gate.rs
//! Non-blocking "one fetch in flight" guard.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Admits at most one fetch cycle at a time.
///
/// Entry never waits: a caller that finds the gate held is turned away and
/// is expected to drop its request. Release is tied to [`FetchPermit`]'s
/// `Drop`, so every exit path of a cycle (including a cancelled future)
/// opens the gate again.
#[derive(Debug, Default)]
pub struct FetchGate {
    held: AtomicBool,
    cycles: AtomicU64,
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim the gate.
    ///
    /// Returns `None` when another cycle holds it.
    pub fn try_enter(&self) -> Option<FetchPermit<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        Some(FetchPermit { gate: self, cycle })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

    /// Number of cycles admitted so far.
    pub fn cycles_started(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    fn release(&self) {
        self.held.store(false, Ordering::Release);
    }
}

/// Proof that the holder owns the gate; releases it when dropped.
#[derive(Debug)]
#[must_use = "the gate is released as soon as the permit is dropped"]
pub struct FetchPermit<'a> {
    gate: &'a FetchGate,
    cycle: u64,
}

impl FetchPermit<'_> {
    /// 1-based sequence number of the cycle this permit admitted.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}

impl Drop for FetchPermit<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}

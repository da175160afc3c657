//! In-flight guard for checkout attempts.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Allows at most one checkout attempt at a time.
#[derive(Debug, Clone, Default)]
pub struct CheckoutGate {
    in_flight: Arc<AtomicBool>,
}

impl CheckoutGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Returns `None` if an attempt is already running.
    pub fn try_begin(&self) -> Option<CheckoutTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CheckoutTicket {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    /// Returns true while a ticket is held.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof of a running attempt; releases the gate on drop.
#[derive(Debug)]
pub struct CheckoutTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for CheckoutTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

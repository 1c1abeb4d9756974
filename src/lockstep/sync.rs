//! Generation barrier: the two-phase rendezvous separating generations.
//!
//! Every worker calls [`GenerationBarrier::lockstep`] exactly once per
//! generation. The first wait parks workers until all have arrived and
//! elects one of them; the elected worker runs the serial bookkeeping
//! (buffer swap, counter updates) while the rest sit in the second wait
//! executing nothing, and the second wait then releases everyone into the
//! next generation together.

use std::sync::Barrier;

pub(crate) struct GenerationBarrier {
    inner: Barrier,
}

impl GenerationBarrier {
    pub(crate) fn new(parties: usize) -> Self {
        Self {
            inner: Barrier::new(parties),
        }
    }

    /// Two-phase rendezvous ending one generation.
    ///
    /// Blocks until all parties have arrived. Exactly one caller observes
    /// `is_leader` and runs `serial`; no other caller executes anything
    /// between the two waits, so `serial` has exclusive access to the
    /// shared run state. Returns whether this caller was elected.
    ///
    /// `std::sync::Barrier` is reusable, so calling this in a loop yields
    /// one rendezvous per generation with a fresh election each time.
    pub(crate) fn lockstep<F: FnOnce()>(&self, serial: F) -> bool {
        let elected = self.inner.wait().is_leader();
        if elected {
            serial();
        }
        self.inner.wait();
        elected
    }
}

//! Seeded shuffling for the candidate draws.
//!
//! A roster is reproducible only if every candidate pool is permuted
//! the same way for the same seed. Two things pin that down:
//!   - each draw phase shuffles from its own PCG stream, keyed by the
//!     run seed and the phase's `DrawSlot`, so a phase that draws more
//!     or fewer times never shifts another phase's permutations;
//!   - the permutation is Fisher–Yates from the back of the pool,
//!     with unbiased index draws, so every order is equally likely.
//!
//! Pools are then consumed from the end (see queue.rs).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Odd multiplier spreading slot numbers across the seed space.
const SLOT_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// The random stream one draw phase shuffles its pools with.
pub struct DrawRng {
    slot:  DrawSlot,
    inner: Pcg64Mcg,
}

impl DrawRng {
    pub fn new(run_seed: u64, slot: DrawSlot) -> Self {
        let stream_seed = run_seed ^ (slot as u64).wrapping_mul(SLOT_SPREAD);
        Self { slot, inner: Pcg64Mcg::seed_from_u64(stream_seed) }
    }

    /// Name of the phase stream, for log lines.
    pub fn stream(&self) -> &'static str {
        self.slot.name()
    }

    /// Uniform index in [0, n).
    pub fn index_below(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Permute `items` in place, swapping each position from the last
    /// down to the second with a uniformly chosen earlier-or-same one.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index_below(i + 1);
            items.swap(i, j);
        }
    }
}

/// Hands out the per-phase streams of one run.
pub struct RngBank {
    run_seed: u64,
}

impl RngBank {
    pub fn new(run_seed: u64) -> Self {
        Self { run_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn for_phase(&self, slot: DrawSlot) -> DrawRng {
        DrawRng::new(self.run_seed, slot)
    }
}

/// One stream per randomized phase. Append only: a slot's number is
/// part of its stream seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum DrawSlot {
    FairnessDuty = 0,
    FallbackDuty = 1,
    Operations   = 2,
}

impl DrawSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FairnessDuty => "fairness_duty",
            Self::FallbackDuty => "fallback_duty",
            Self::Operations   => "operations",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_permutation() {
        let bank_a = RngBank::new(7);
        let bank_b = RngBank::new(7);
        let mut a: Vec<u32> = (0..20).collect();
        let mut b: Vec<u32> = (0..20).collect();
        bank_a.for_phase(DrawSlot::Operations).shuffle(&mut a);
        bank_b.for_phase(DrawSlot::Operations).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = RngBank::new(99).for_phase(DrawSlot::FairnessDuty);
        let mut items: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn phases_draw_independent_streams() {
        let bank = RngBank::new(1234);
        let mut a: Vec<u32> = (0..30).collect();
        let mut b: Vec<u32> = (0..30).collect();
        bank.for_phase(DrawSlot::FairnessDuty).shuffle(&mut a);
        bank.for_phase(DrawSlot::FallbackDuty).shuffle(&mut b);
        assert_ne!(a, b, "distinct phases should not share a stream");
    }

    #[test]
    fn streams_are_named_after_their_phase() {
        let bank = RngBank::new(5);
        assert_eq!(bank.for_phase(DrawSlot::FairnessDuty).stream(), "fairness_duty");
        assert_eq!(bank.for_phase(DrawSlot::Operations).stream(), "operations");
    }

    #[test]
    fn shuffle_handles_trivial_slices() {
        let mut rng = RngBank::new(0).for_phase(DrawSlot::Operations);
        let mut empty: Vec<u8> = Vec::new();
        rng.shuffle(&mut empty);
        let mut one = vec![42u8];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![42]);
    }
}

//! Small xorshift PRNG.
//!
//! All randomness in the game (critical rolls, lucky events, airdrop
//! spawns) flows through one of these, so tests can seed it and get
//! reproducible behaviour.

pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a PRNG from a seed. Zero is remapped; xorshift gets stuck on it.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9e3779b9 } else { seed },
        }
    }

    /// Seed from the wall clock. WASM only; tests use `new` with a fixed seed.
    #[cfg(target_arch = "wasm32")]
    pub fn from_clock() -> Self {
        Self::new(js_sys::Date::now() as u32)
    }

    /// Next raw 32-bit value (xorshift32).
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform sample in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_seed() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn f64_samples_in_unit_interval() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x), "sample out of range: {}", x);
        }
    }

    #[test]
    fn distinct_seeds_diverge() {
        let mut a = SimpleRng::new(1);
        let mut b = SimpleRng::new(2);
        let same = (0..32).filter(|_| a.next_u32() == b.next_u32()).count();
        assert_eq!(same, 0);
    }
}

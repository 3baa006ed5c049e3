//! RNG module - deterministic symbol generation
//!
//! Board generation and refills draw symbols through the [`SymbolSource`] trait.
//! The default source is [`SymbolRng`], a seeded LCG restricted to the first
//! `alphabet` symbols, so the same seed always produces the same game.

use crate::types::Symbol;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        let max = max.max(1);
        // Only the high 16 bits of an LCG step are well distributed
        if max <= 1 << 16 {
            return (self.next_u32() >> 16) % max;
        }
        let hi = self.next_u32() >> 16;
        let lo = self.next_u32() >> 16;
        ((hi << 16) | lo) % max
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Anything that can hand out fresh symbols for generation and refill
pub trait SymbolSource {
    fn next_symbol(&mut self) -> Symbol;
}

/// Uniform symbol draws from the first `alphabet` kinds
#[derive(Debug, Clone)]
pub struct SymbolRng {
    rng: SimpleRng,
    alphabet: u8,
}

impl SymbolRng {
    /// `alphabet` is clamped to 1..=6
    pub fn new(seed: u32, alphabet: u8) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            alphabet: alphabet.clamp(1, Symbol::COUNT),
        }
    }

    pub fn alphabet(&self) -> u8 {
        self.alphabet
    }
}

impl SymbolSource for SymbolRng {
    fn next_symbol(&mut self) -> Symbol {
        let idx = self.rng.next_range(self.alphabet as u32) as u8;
        // idx < alphabet <= COUNT, so the lookup always succeeds
        Symbol::from_index(idx).unwrap_or(Symbol::Candy)
    }
}

impl<S: SymbolSource + ?Sized> SymbolSource for &mut S {
    fn next_symbol(&mut self) -> Symbol {
        (**self).next_symbol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(6) < 6);
        }
        // Degenerate range never divides by zero
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_next_range_covers_wide_ranges() {
        let mut rng = SimpleRng::new(99);
        let max = 1 << 20;
        let draws: Vec<u32> = (0..256).map(|_| rng.next_range(max)).collect();
        assert!(draws.iter().all(|&n| n < max));
        assert!(draws.iter().any(|&n| n > u16::MAX as u32));
    }

    #[test]
    fn test_symbol_rng_respects_alphabet() {
        let mut source = SymbolRng::new(99, 3);
        for _ in 0..500 {
            assert!(source.next_symbol().index() < 3);
        }
    }

    #[test]
    fn test_symbol_rng_covers_full_alphabet() {
        let mut source = SymbolRng::new(42, 6);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[source.next_symbol().index() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "Missing symbol kinds: {:?}", seen);
    }

    #[test]
    fn test_symbol_rng_clamps_alphabet() {
        assert_eq!(SymbolRng::new(1, 0).alphabet(), 1);
        assert_eq!(SymbolRng::new(1, 200).alphabet(), 6);
    }
}

//! Java `Random` Linear Congruential Generator
//!
//! Bit-exact emulation of the 48-bit LCG behind `java.util.Random`, which is
//! what the world generator uses for structure placement and loot.
//! Every result here must match the JVM bit-for-bit, including the 31/32-bit
//! truncations and the sign of `next(32)`.

/// LCG multiplier (`0x5DEECE66D`).
pub const MULTIPLIER: u64 = 0x5_DEEC_E66D;

/// LCG addend (`0xB`).
pub const ADDEND: u64 = 0xB;

/// Mask keeping the low 48 bits of the state.
pub const MASK_48: u64 = (1 << 48) - 1;

/// Period of the generator (2^48).
const PERIOD: u64 = 1 << 48;

/// `2^-53`, the scale of `next_double`.
const DOUBLE_UNIT: f64 = 1.0 / (1_u64 << 53) as f64;

/// Emulated `java.util.Random`.
///
/// The state is a 48-bit value, masked after every mutation. A generator is
/// cheap to build (one XOR) and is never shared: every candidate evaluation
/// creates its own.
///
/// # Example
///
/// ```
/// use seedcracker::core::lcg::JavaRng;
///
/// let mut rng = JavaRng::new(4506419895);
/// assert_eq!(rng.next_int(100), 10);
/// assert_eq!(JavaRng::new(3485113479660343165).state(), 171779162663184);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JavaRng {
    state: u64,
}

impl Default for JavaRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl JavaRng {
    /// Create a generator the way `new Random(seed)` does (scrambled).
    #[inline]
    pub const fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK_48,
        }
    }

    /// Create a generator from a raw internal state (no scrambling).
    #[inline]
    pub const fn from_state(state: u64) -> Self {
        Self {
            state: state & MASK_48,
        }
    }

    /// Reseed in place, equivalent to `Random.setSeed`.
    #[inline]
    pub fn set_seed(&mut self, seed: i64) {
        self.state = (seed as u64 ^ MULTIPLIER) & MASK_48;
    }

    /// Current internal 48-bit state.
    #[inline]
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Advance once and return the top `bits` bits of the new state.
    ///
    /// For `bits == 32` the top bit lands in the sign bit, as in Java.
    #[inline]
    pub fn next_bits(&mut self, bits: u32) -> i32 {
        debug_assert!((1..=32).contains(&bits));
        self.state = LcgStep::SINGLE.apply(self.state);
        (self.state >> (48 - bits)) as i32
    }

    /// `Random.nextInt()`.
    #[inline]
    pub fn next_i32(&mut self) -> i32 {
        self.next_bits(32)
    }

    /// `Random.nextInt(bound)`.
    ///
    /// A non-positive bound returns `i32::MIN` without advancing the state.
    /// The JVM throws here instead; the sentinel keeps this total.
    #[inline]
    pub fn next_int(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            return i32::MIN;
        }

        if bound & bound.wrapping_neg() == bound {
            return ((bound as i64 * self.next_bits(31) as i64) >> 31) as i32;
        }

        let m = bound - 1;
        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            // Rejects the incomplete final bucket; overflow is the signal.
            if bits.wrapping_sub(value).wrapping_add(m) >= 0 {
                return value;
            }
        }
    }

    /// Uniform integer in `[min, max]`, or `min` without a draw when
    /// `min >= max`. This is the loot table's count helper.
    #[inline]
    pub fn next_int_between(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            min
        } else {
            self.next_int(max - min + 1) + min
        }
    }

    /// `Random.nextLong()`.
    #[inline]
    pub fn next_long(&mut self) -> i64 {
        let high = (self.next_bits(32) as i64) << 32;
        high.wrapping_add(self.next_bits(32) as i64)
    }

    /// `Random.nextFloat()`.
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        self.next_bits(24) as f32 / (1 << 24) as f32
    }

    /// `Random.nextDouble()`.
    #[inline]
    pub fn next_double(&mut self) -> f64 {
        let high = (self.next_bits(26) as i64) << 27;
        (high + self.next_bits(27) as i64) as f64 * DOUBLE_UNIT
    }

    /// `Random.nextBoolean()`.
    #[inline]
    pub fn next_bool(&mut self) -> bool {
        self.next_bits(1) != 0
    }

    /// Shuffle in place exactly like `Collections.shuffle(list, random)`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (2..=slice.len()).rev() {
            let j = self.next_int(i as i32) as usize;
            slice.swap(i - 1, j);
        }
    }

    /// Advance the state as if `next_bits` had been called `n` times.
    ///
    /// O(log n) via [`LcgStep::pow`].
    #[inline]
    pub fn skip(&mut self, n: u64) {
        self.state = LcgStep::SINGLE.pow(n).apply(self.state);
    }

    /// Rewind the state by `n` calls. Inverse of [`JavaRng::skip`].
    #[inline]
    pub fn skip_back(&mut self, n: u64) {
        let n = n & MASK_48;
        self.skip((PERIOD - n) & MASK_48);
    }
}

// =============================================================================
// AFFINE STEP
// =============================================================================

/// An affine map `x -> multiplier * x + addend (mod 2^48)`.
///
/// One LCG step is such a map, and so is any composition of steps, which is
/// what makes jump-ahead cheap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcgStep {
    /// Multiplier (masked to 48 bits).
    pub multiplier: u64,
    /// Addend (masked to 48 bits).
    pub addend: u64,
}

impl LcgStep {
    /// The identity map.
    pub const IDENTITY: LcgStep = LcgStep {
        multiplier: 1,
        addend: 0,
    };

    /// A single generator step.
    pub const SINGLE: LcgStep = LcgStep {
        multiplier: MULTIPLIER,
        addend: ADDEND,
    };

    /// Apply the map to a state.
    #[inline]
    pub const fn apply(&self, state: u64) -> u64 {
        state
            .wrapping_mul(self.multiplier)
            .wrapping_add(self.addend)
            & MASK_48
    }

    /// `then` applied after `self`.
    #[inline]
    pub const fn then(&self, then: LcgStep) -> LcgStep {
        LcgStep {
            multiplier: self.multiplier.wrapping_mul(then.multiplier) & MASK_48,
            addend: then
                .multiplier
                .wrapping_mul(self.addend)
                .wrapping_add(then.addend)
                & MASK_48,
        }
    }

    /// `self` composed with itself `n` times, by binary exponentiation.
    ///
    /// Arithmetic wraps at 2^64 and is masked at the end; 2^48 divides 2^64
    /// so the low 48 bits are exact.
    pub const fn pow(&self, mut n: u64) -> LcgStep {
        let mut multiplier: u64 = 1;
        let mut addend: u64 = 0;
        let mut step_multiplier = self.multiplier;
        let mut step_addend = self.addend;

        while n != 0 {
            if n & 1 != 0 {
                multiplier = multiplier.wrapping_mul(step_multiplier);
                addend = step_multiplier.wrapping_mul(addend).wrapping_add(step_addend);
            }
            step_addend = step_addend.wrapping_mul(step_multiplier.wrapping_add(1));
            step_multiplier = step_multiplier.wrapping_mul(step_multiplier);
            n >>= 1;
        }

        LcgStep {
            multiplier: multiplier & MASK_48,
            addend: addend & MASK_48,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

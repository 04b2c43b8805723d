// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Shared data generators for the benchmark suite.

/// Multiplier/increment pair from Knuth's MMIX generator.
pub fn lcg_next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

/// A noisy baseline with periodic plateaus and a sprinkle of NaN holes,
/// shaped like one bead's raw trace.
pub fn synthetic_bead(n: usize, seed: u64) -> Vec<f32> {
    let mut state = seed;
    (0..n)
        .map(|i| {
            let u = (lcg_next(&mut state) >> 11) as f32 / (1u64 << 53) as f32;
            if u < 2.0e-3 {
                return f32::NAN;
            }
            let open = (i % 200) >= 50 && (i % 200) < 140;
            0.1 + f32::from(u8::from(open)) + (u - 0.5) * 1.0e-2
        })
        .collect()
}

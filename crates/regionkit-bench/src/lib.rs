//! Benchmark workloads for regionkit.
//!
//! Provides deterministic allocation workloads shared by the benches:
//!
//! - [`frame_sizes`]: a per-frame sequence of allocation sizes
//! - [`frame_capacity`]: the region size that fits one such frame
//! - [`push_counts`]: how many elements each sequence in a frame receives

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Generate `n` deterministic allocation sizes in `1..=max`.
///
/// Uses a linear congruential step seeded by `seed`, so every run of a
/// benchmark sees the same workload.
pub fn frame_sizes(n: usize, max: usize, seed: u64) -> Vec<usize> {
    assert!(max > 0, "max size must be non-zero");
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as usize % max) + 1
        })
        .collect()
}

/// Bytes a region needs to serve every size in `sizes` on the handle path
/// without exhausting. Handle-path spans are packed back to back.
pub fn frame_capacity(sizes: &[usize]) -> usize {
    sizes.iter().sum()
}

/// Per-sequence push counts for a frame of `sequences` sequences, cycling
/// through small, medium and large fills.
pub fn push_counts(sequences: usize) -> Vec<usize> {
    const FILLS: [usize; 3] = [4, 64, 1024];
    (0..sequences).map(|i| FILLS[i % FILLS.len()]).collect()
}

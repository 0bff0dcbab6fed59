//! Launch geometry: fixed thread-block shape and block-parallel dispatch.
//!
//! A launch is divided into blocks of `THREADS_PER_BLOCK` logical threads,
//! each covering `ROWS_PER_THREAD` rows, so one block owns a contiguous
//! chunk of `ROWS_PER_BLOCK` rows. Blocks execute concurrently on the rayon
//! pool; block-local state plays the role of shared memory. Within a block,
//! rows are consumed in ascending order, which makes the per-row local
//! offsets deterministic.

use std::ops::Range;

use rayon::prelude::*;

/// Logical threads per block.
pub const THREADS_PER_BLOCK: usize = 256;

/// Rows covered by each logical thread.
pub const ROWS_PER_THREAD: usize = 8;

/// Rows owned by one block; also the staging buffer capacity of the scatter
/// kernel in cells.
pub const ROWS_PER_BLOCK: usize = THREADS_PER_BLOCK * ROWS_PER_THREAD;

/// Geometry of one kernel launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    num_blocks: usize,
    num_rows: usize,
}

impl LaunchConfig {
    /// Geometry covering `num_rows` rows (at least one block).
    pub fn for_rows(num_rows: usize) -> Self {
        Self {
            num_blocks: num_rows.div_ceil(ROWS_PER_BLOCK).max(1),
            num_rows,
        }
    }

    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// The contiguous row range owned by `block`.
    pub fn block_rows(&self, block: usize) -> Range<usize> {
        let start = block * ROWS_PER_BLOCK;
        start..(start + ROWS_PER_BLOCK).min(self.num_rows)
    }
}

/// Run `kernel` once per block, blocks in parallel.
///
/// Returns only after every block has completed, so a subsequent dispatch
/// observes all writes of this one.
pub fn dispatch_blocks<F>(config: &LaunchConfig, kernel: F)
where
    F: Fn(usize) + Sync + Send,
{
    (0..config.num_blocks).into_par_iter().for_each(kernel);
}

//! Partitioner functors: map a row hash to a partition index.

/// Maps a 32-bit row hash to a partition in `[0, N)`.
pub(crate) trait Partitioner: Copy + Send + Sync {
    fn partition_of(&self, hash: u32) -> u32;
}

/// Fast path for a power-of-two partition count.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BitmaskPartitioner {
    mask: u32,
}

impl BitmaskPartitioner {
    /// # Panics
    /// Panics if `num_partitions` is not a positive power of two.
    pub fn new(num_partitions: u32) -> Self {
        assert!(
            num_partitions.is_power_of_two(),
            "bitmask partitioner requires a power-of-two partition count"
        );
        Self {
            mask: num_partitions - 1,
        }
    }
}

impl Partitioner for BitmaskPartitioner {
    #[inline]
    fn partition_of(&self, hash: u32) -> u32 {
        hash & self.mask
    }
}

/// General path for any positive partition count.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ModuloPartitioner {
    divisor: u32,
}

impl ModuloPartitioner {
    /// # Panics
    /// Panics if `num_partitions` is zero.
    pub fn new(num_partitions: u32) -> Self {
        assert!(num_partitions > 0, "partition count must be positive");
        Self {
            divisor: num_partitions,
        }
    }
}

impl Partitioner for ModuloPartitioner {
    #[inline]
    fn partition_of(&self, hash: u32) -> u32 {
        hash % self.divisor
    }
}

//! Histogram kernel: per-row partition assignment plus the block and global
//! partition histograms the scatter kernel routes through.
//!
//! `block_histogram` is laid out partition-major (`[p * B + b]`): the
//! exclusive scan over the flattened sequence then yields, at `[p * B + b]`,
//! the absolute output address at which block `b` begins writing partition
//! `p`. Do not transpose it.

use crate::device::buffer::DeviceBuffer;
use crate::device::launch::{dispatch_blocks, LaunchConfig};
use crate::device::mem::MemoryResource;
use crate::error::PartitionError;
use crate::hash::RowHasher;
use crate::partition::partitioner::Partitioner;

/// Device-resident routing state for one partitioning invocation.
pub(crate) struct RoutingTables {
    /// Per row: destination partition.
    pub row_partition: DeviceBuffer<u32>,
    /// Per row: rank among rows of the same block bound for the same
    /// partition.
    pub row_local_offset: DeviceBuffer<u32>,
    /// Partition-major `[num_partitions * num_blocks]` block histogram.
    pub block_histogram: DeviceBuffer<u32>,
    /// Per partition row totals; replaced by its exclusive scan later.
    pub global_histogram: DeviceBuffer<u32>,
}

impl RoutingTables {
    pub fn allocate(
        rows: usize,
        num_partitions: usize,
        config: &LaunchConfig,
        mr: &dyn MemoryResource,
    ) -> Result<Self, PartitionError> {
        Ok(Self {
            row_partition: DeviceBuffer::zeroed(rows, mr)?,
            row_local_offset: DeviceBuffer::zeroed(rows, mr)?,
            block_histogram: DeviceBuffer::zeroed(num_partitions * config.num_blocks(), mr)?,
            global_histogram: DeviceBuffer::zeroed(num_partitions, mr)?,
        })
    }
}

/// Assign every row a partition and fill all histograms.
///
/// Per block: a zeroed block-local histogram accumulates counts while each
/// row records the prior count of its bucket as its local offset; the block
/// then flushes its buckets to `block_histogram` (one writer per slot) and
/// adds them to `global_histogram` (atomic).
pub(crate) fn compute_row_partitions<P: Partitioner>(
    hasher: &RowHasher<'_>,
    partitioner: P,
    config: &LaunchConfig,
    tables: &RoutingTables,
) {
    let num_blocks = config.num_blocks();
    let num_partitions = tables.global_histogram.len();
    let row_partition = tables.row_partition.ptr();
    let row_local_offset = tables.row_local_offset.ptr();
    let block_histogram = tables.block_histogram.ptr();
    let global_histogram = tables.global_histogram.ptr();

    dispatch_blocks(config, |block| {
        let mut local = vec![0u32; num_partitions];

        for row in config.block_rows(block) {
            let partition = partitioner.partition_of(hasher.hash_row(row)) as usize;
            // Safety: each block writes only the rows of its own chunk.
            unsafe {
                row_local_offset.write(row, local[partition]);
                row_partition.write(row, partition as u32);
            }
            local[partition] += 1;
        }

        for (partition, &count) in local.iter().enumerate() {
            // Safety: slot [partition * B + block] has this block as its
            // only writer; the global bucket is shared and accessed
            // atomically by every block.
            unsafe {
                block_histogram.write(partition * num_blocks + block, count);
                if count != 0 {
                    global_histogram.fetch_add_relaxed(partition, count);
                }
            }
        }
    });
}

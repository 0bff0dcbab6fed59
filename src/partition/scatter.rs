//! Scatter kernel: move one source column into its partitioned layout.
//!
//! Dispatched once per column, specialized by cell width; behavior is
//! identical across widths except cell size. Each block stages its rows in a
//! block-local buffer laid out partition-contiguously (capacity
//! `ROWS_PER_BLOCK` cells), then writes each partition's staged run to the
//! output as one contiguous burst at the address the block scan assigned to
//! this (partition, block) pair. Only the burst phase touches the output
//! buffer.
//!
//! Null bitmaps are never propagated: the kernel moves raw cell bits and the
//! output column carries no mask.

use crate::device::buffer::DeviceBuffer;
use crate::device::launch::{dispatch_blocks, LaunchConfig};
use crate::device::mem::MemoryResource;
use crate::error::PartitionError;
use crate::storage::{CellSlice, Column, DataType};

/// Read-only routing state shared by every per-column scatter dispatch.
pub(crate) struct ScatterContext<'a> {
    pub config: &'a LaunchConfig,
    pub num_partitions: usize,
    pub row_partition: &'a [u32],
    pub row_local_offset: &'a [u32],
    /// Partition-major `[p * B + b]` bucket sizes.
    pub block_histogram: &'a [u32],
    /// Exclusive scan of `block_histogram`: absolute output base per
    /// (partition, block).
    pub block_scan: &'a [u32],
}

/// Scatter one column into partition order. Fails on variable-width types.
pub(crate) fn scatter_column(
    column: &Column,
    index: usize,
    ctx: &ScatterContext<'_>,
    mr: &dyn MemoryResource,
) -> Result<Column, PartitionError> {
    let Some(cells) = column.cell_slice() else {
        return Err(PartitionError::UnsupportedType {
            index,
            dtype: column.dtype(),
        });
    };
    match cells {
        CellSlice::W1(src) => scatter_cells(src, column.dtype(), ctx, mr),
        CellSlice::W2(src) => scatter_cells(src, column.dtype(), ctx, mr),
        CellSlice::W4(src) => scatter_cells(src, column.dtype(), ctx, mr),
        CellSlice::W8(src) => scatter_cells(src, column.dtype(), ctx, mr),
    }
}

fn scatter_cells<T: Copy + Default + Send + Sync>(
    src: &[T],
    dtype: DataType,
    ctx: &ScatterContext<'_>,
    mr: &dyn MemoryResource,
) -> Result<Column, PartitionError> {
    let rows = src.len();
    let num_blocks = ctx.config.num_blocks();
    let num_partitions = ctx.num_partitions;
    let out = DeviceBuffer::<T>::zeroed(rows, mr)?;
    let out_ptr = out.ptr();

    dispatch_blocks(ctx.config, |block| {
        // Where each partition's staged cells begin within this block.
        let mut staging_offsets = vec![0u32; num_partitions + 1];
        let mut running = 0u32;
        for partition in 0..num_partitions {
            staging_offsets[partition] = running;
            running += ctx.block_histogram[partition * num_blocks + block];
        }
        staging_offsets[num_partitions] = running;

        let range = ctx.config.block_rows(block);
        debug_assert_eq!(running as usize, range.len());

        let mut staging = vec![T::default(); range.len()];
        for row in range {
            let partition = ctx.row_partition[row] as usize;
            let slot =
                staging_offsets[partition] as usize + ctx.row_local_offset[row] as usize;
            staging[slot] = src[row];
        }

        for partition in 0..num_partitions {
            let start = staging_offsets[partition] as usize;
            let end = staging_offsets[partition + 1] as usize;
            if start == end {
                continue;
            }
            let base = ctx.block_scan[partition * num_blocks + block] as usize;
            // Safety: the exclusive scan gives every (partition, block) pair
            // a disjoint output range of exactly end - start cells.
            unsafe { out_ptr.copy_from_slice(base, &staging[start..end]) };
        }
    });

    Ok(Column::from_device_buffer(dtype, rows, out.into_bytes()))
}

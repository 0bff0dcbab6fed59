//! Offset builder: exclusive prefix sums over the partition histograms.
//!
//! The scan over the partition-major block histogram produces, per
//! `[p * B + b]` slot, the absolute output address at which block `b` starts
//! writing partition `p`; the in-place scan of the global histogram produces
//! the partition start offsets returned to the caller.

use crate::device::buffer::DeviceBuffer;
use crate::device::mem::MemoryResource;
use crate::error::PartitionError;

/// Exclusive prefix sum of `src` into a fresh buffer.
pub(crate) fn exclusive_scan(
    src: &DeviceBuffer<u32>,
    mr: &dyn MemoryResource,
) -> Result<DeviceBuffer<u32>, PartitionError> {
    let mut out = DeviceBuffer::zeroed(src.len(), mr)?;
    let dst = out.as_mut_slice();
    let mut running = 0u32;
    for (slot, &value) in dst.iter_mut().zip(src.as_slice()) {
        *slot = running;
        running += value;
    }
    Ok(out)
}

/// Replace `buf` with its exclusive prefix sum.
pub(crate) fn exclusive_scan_in_place(buf: &mut DeviceBuffer<u32>) {
    let mut running = 0u32;
    for slot in buf.as_mut_slice() {
        let value = *slot;
        *slot = running;
        running += value;
    }
}

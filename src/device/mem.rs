//! Memory resources: fallible allocators for device buffer storage.
//!
//! Output column buffers are allocated from the caller-provided resource;
//! transient routing tables come from the shared system resource. All
//! allocations are handed out as zeroed 8-byte words so that every cell
//! width up to 64 bits is naturally aligned.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::PartitionError;

/// Allocator handle for device buffer storage.
///
/// Implementations hand out zeroed `u64` words. Allocation failure is
/// reported as [`PartitionError::OutOfMemory`] and propagates unchanged
/// through the partitioning pipeline.
pub trait MemoryResource: Sync {
    /// Allocate `words` zeroed 8-byte words.
    fn alloc_zeroed(&self, words: usize) -> Result<Vec<u64>, PartitionError>;
}

/// Process-heap memory resource.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMemoryResource;

impl MemoryResource for SystemMemoryResource {
    fn alloc_zeroed(&self, words: usize) -> Result<Vec<u64>, PartitionError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(words)
            .map_err(|_| PartitionError::OutOfMemory { bytes: words * 8 })?;
        buf.resize(words, 0);
        Ok(buf)
    }
}

/// The shared system resource used for transient routing tables.
pub fn system_resource() -> &'static SystemMemoryResource {
    static SYSTEM: SystemMemoryResource = SystemMemoryResource;
    &SYSTEM
}

/// A resource wrapper that counts allocations and bytes handed out.
///
/// Lets callers observe the allocation behavior of an operation, e.g. that a
/// precondition failure performed no allocation at all.
pub struct TrackingResource<'a> {
    inner: &'a dyn MemoryResource,
    allocations: AtomicUsize,
    allocated_bytes: AtomicUsize,
}

impl<'a> TrackingResource<'a> {
    /// Wrap `inner`, starting both counters at zero.
    pub fn new(inner: &'a dyn MemoryResource) -> Self {
        Self {
            inner,
            allocations: AtomicUsize::new(0),
            allocated_bytes: AtomicUsize::new(0),
        }
    }

    /// Number of allocations served so far.
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Relaxed)
    }

    /// Total bytes handed out so far.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes.load(Ordering::Relaxed)
    }
}

impl MemoryResource for TrackingResource<'_> {
    fn alloc_zeroed(&self, words: usize) -> Result<Vec<u64>, PartitionError> {
        let buf = self.inner.alloc_zeroed(words)?;
        self.allocations.fetch_add(1, Ordering::Relaxed);
        self.allocated_bytes.fetch_add(words * 8, Ordering::Relaxed);
        Ok(buf)
    }
}

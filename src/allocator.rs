//! Single-element allocator adaptor.
//!
//! Exposes a pool through the `allocate`/`deallocate` shape of
//! `core::alloc::Allocator`, for container plumbing that wants to place its
//! nodes in a pool.  The pool services exactly one `T` per request: it cannot
//! hand out contiguous runs of slots, so any other layout is refused as
//! [`Exhausted`].

use std::alloc::Layout;
use std::mem;
use std::ptr::NonNull;

use crate::index::SlotIndex;
use crate::pool::{Exhausted, SlotPool};

/// Allocator view of a [`SlotPool`].
///
/// Memory obtained here is raw: no `T` is constructed and `deallocate` runs
/// no destructor.  The pool still counts such slots as live, so each one must
/// be deallocated (or hold an initialised `T`) before the pool is cleared
/// or dropped.
pub struct PoolAllocator<'p, T, I: SlotIndex, const S: usize> {
    pool: &'p SlotPool<T, I, S>,
}

impl<T, I: SlotIndex, const S: usize> Clone for PoolAllocator<'_, T, I, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, I: SlotIndex, const S: usize> Copy for PoolAllocator<'_, T, I, S> {}

impl<'p, T, I: SlotIndex, const S: usize> PoolAllocator<'p, T, I, S> {
    /// Reserve one slot and return its storage, uninitialised.
    ///
    /// # Errors
    ///
    /// Returns [`Exhausted`] if the pool is full, or if `layout` asks for
    /// anything other than a single `T`.
    ///
    /// # Safety
    ///
    /// The returned block must be deallocated, or left holding an
    /// initialised `T`, before the pool's `clear` or `Drop` runs (the
    /// destructor sweep treats every reserved slot as a live `T`).
    pub unsafe fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, Exhausted> {
        if layout.size() != mem::size_of::<T>() || layout.align() > mem::align_of::<T>() {
            // A pool slot holds exactly one element.
            return Err(Exhausted);
        }
        // Safety: forwarded contract; the caller initialises or returns the
        // slot before any destructor sweep.
        let index = unsafe { self.pool.push_index() }.ok_or(Exhausted)?;
        let ptr = self.pool.get(index).cast::<u8>();
        Ok(NonNull::slice_from_raw_parts(ptr, mem::size_of::<T>()))
    }

    /// Return a block obtained from [`allocate`](Self::allocate).
    ///
    /// # Panics
    ///
    /// Panics if `ptr` is outside the pool or not on a slot boundary.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this pool, must not have been
    /// deallocated already, and any `T` constructed in the block must have
    /// been dropped by the caller.
    pub unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        debug_assert_eq!(layout.size(), mem::size_of::<T>());
        let index = self.pool.index(ptr.cast::<T>());
        // Safety: the block was allocated and not yet returned, so its slot
        // is currently reserved.
        unsafe { self.pool.pop_index(index) };
    }
}

impl<T, I: SlotIndex, const S: usize> SlotPool<T, I, S> {
    /// Allocator view of this pool.
    #[must_use]
    pub fn allocator(&self) -> PoolAllocator<'_, T, I, S> {
        PoolAllocator { pool: self }
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_then_deallocate() {
        let pool: SlotPool<u64, u16, 8000> = SlotPool::new();
        let alloc = pool.allocator();
        let layout = Layout::new::<u64>();

        // Safety: block is written as a u64 and returned below.
        let block = unsafe { alloc.allocate(layout) }.unwrap();
        assert_eq!(block.len(), 8);
        assert_eq!(pool.len(), 1);

        let p = block.cast::<u64>();
        unsafe {
            p.as_ptr().write(0xFEED);
            assert_eq!(*p.as_ptr(), 0xFEED);
            alloc.deallocate(block.cast::<u8>(), layout);
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn test_allocate_rejects_multi_element_layouts() {
        let pool: SlotPool<u64, u16, 8000> = SlotPool::new();
        let alloc = pool.allocator();

        let two = Layout::array::<u64>(2).unwrap();
        // Safety: refused layouts reserve nothing.
        assert_eq!(unsafe { alloc.allocate(two) }, Err(Exhausted));

        let overaligned = Layout::from_size_align(8, 64).unwrap();
        assert_eq!(unsafe { alloc.allocate(overaligned) }, Err(Exhausted));

        assert!(pool.is_empty());
    }

    #[test]
    fn test_allocate_exhaustion() {
        let pool: SlotPool<u64, u8, 240> = SlotPool::new();
        let alloc = pool.allocator();
        let layout = Layout::new::<u64>();

        let mut blocks = Vec::new();
        // Safety: every block is returned below.
        while let Ok(b) = unsafe { alloc.allocate(layout) } {
            blocks.push(b);
        }
        assert_eq!(blocks.len(), pool.capacity());
        assert_eq!(unsafe { alloc.allocate(layout) }, Err(Exhausted));

        for b in blocks {
            unsafe { alloc.deallocate(b.cast::<u8>(), layout) };
        }
        assert!(pool.is_empty());
    }
}

//! Owning handles over pool slots.
//!
//! [`PoolBox`] is the pool-backed analogue of `Box`: dropping it destroys the
//! element and returns the slot.  [`PoolShared`] adds external reference
//! counting; the count lives in an `Arc` control block outside the pool, the
//! element stays in its slot.  Both are conveniences over
//! [`SlotPool::alloc`]/[`SlotPool::free`].

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::index::SlotIndex;
use crate::pool::{Exhausted, SlotPool};
use crate::sync::Arc;

/// Copyable releaser bound to one pool.
pub struct Deleter<'p, T, I: SlotIndex, const S: usize> {
    pool: &'p SlotPool<T, I, S>,
}

impl<T, I: SlotIndex, const S: usize> Clone for Deleter<'_, T, I, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, I: SlotIndex, const S: usize> Copy for Deleter<'_, T, I, S> {}

impl<'p, T, I: SlotIndex, const S: usize> Deleter<'p, T, I, S> {
    /// Destroy the element behind `ptr` and return its slot.
    ///
    /// # Safety
    ///
    /// Same contract as [`SlotPool::free`]: `ptr` must point at a live
    /// element of the pool this deleter came from.
    pub unsafe fn delete(&self, ptr: NonNull<T>) {
        // Safety: forwarded contract.
        unsafe { self.pool.free(ptr) };
    }
}

impl<T, I: SlotIndex, const S: usize> fmt::Debug for Deleter<'_, T, I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deleter")
    }
}

/// Uniquely owned pool element; frees its slot on drop.
pub struct PoolBox<'p, T, I: SlotIndex, const S: usize> {
    ptr: NonNull<T>,
    deleter: Deleter<'p, T, I, S>,
}

// Safety: a PoolBox owns its element (`T: Send`) and releases it through a
// shared pool reference, so the pool must be usable from the destination
// thread (`T: Send + Sync`, see the pool's Sync impl).
unsafe impl<T: Send + Sync, I: SlotIndex, const S: usize> Send for PoolBox<'_, T, I, S> {}

// Safety: `&PoolBox` only hands out `&T`.
unsafe impl<T: Send + Sync, I: SlotIndex, const S: usize> Sync for PoolBox<'_, T, I, S> {}

impl<'p, T, I: SlotIndex, const S: usize> PoolBox<'p, T, I, S> {
    /// Release ownership without freeing the slot.
    ///
    /// The element stays live; pass the pointer to [`SlotPool::free`] (or a
    /// [`Deleter`]) to reclaim it.
    #[must_use]
    pub fn into_raw(self) -> NonNull<T> {
        let ptr = self.ptr;
        std::mem::forget(self);
        ptr
    }

    #[must_use]
    pub fn as_ptr(&self) -> NonNull<T> {
        self.ptr
    }
}

impl<T, I: SlotIndex, const S: usize> Deref for PoolBox<'_, T, I, S> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: the element is live for as long as the handle exists.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T, I: SlotIndex, const S: usize> DerefMut for PoolBox<'_, T, I, S> {
    fn deref_mut(&mut self) -> &mut T {
        // Safety: unique ownership, element live.
        unsafe { self.ptr.as_mut() }
    }
}

impl<T, I: SlotIndex, const S: usize> Drop for PoolBox<'_, T, I, S> {
    fn drop(&mut self) {
        // Safety: the handle uniquely owns a live element.
        unsafe { self.deleter.delete(self.ptr) };
    }
}

impl<T: fmt::Debug, I: SlotIndex, const S: usize> fmt::Debug for PoolBox<'_, T, I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

/// Shared pool element; the slot is freed when the last clone drops.
///
/// The reference count is heap-allocated (an `Arc` control block); only the
/// element itself lives in the pool.
pub struct PoolShared<'p, T, I: SlotIndex, const S: usize> {
    inner: Arc<PoolBox<'p, T, I, S>>,
}

impl<T, I: SlotIndex, const S: usize> Clone for PoolShared<'_, T, I, S> {
    fn clone(&self) -> Self {
        PoolShared {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, I: SlotIndex, const S: usize> Deref for PoolShared<'_, T, I, S> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug, I: SlotIndex, const S: usize> fmt::Debug for PoolShared<'_, T, I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

impl<T, I: SlotIndex, const S: usize> SlotPool<T, I, S> {
    /// Releaser bound to this pool, for code that tracks raw pointers.
    #[must_use]
    pub fn deleter(&self) -> Deleter<'_, T, I, S> {
        Deleter { pool: self }
    }

    /// Allocate a slot and wrap it in a uniquely owning handle.
    ///
    /// # Errors
    ///
    /// Returns [`Exhausted`] when no slot is free.
    pub fn alloc_box(&self, value: T) -> Result<PoolBox<'_, T, I, S>, Exhausted> {
        Ok(PoolBox {
            ptr: self.alloc(value)?,
            deleter: self.deleter(),
        })
    }

    /// Allocate a slot and wrap it in a clonable shared handle.
    ///
    /// # Errors
    ///
    /// Returns [`Exhausted`] when no slot is free.
    pub fn alloc_shared(&self, value: T) -> Result<PoolShared<'_, T, I, S>, Exhausted> {
        Ok(PoolShared {
            inner: Arc::new(self.alloc_box(value)?),
        })
    }
}

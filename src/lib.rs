//! Fixed-capacity, intrusive, lock-free object pool.
//!
//! A [`SlotPool<T, I, S>`] occupies exactly `S` bytes and serves allocation
//! and deallocation of `T` values out of those bytes, with no interaction
//! with the system allocator after construction.  All mutable pool state is
//! one packed atomic control word; reserve and release are single
//! compare-and-swap operations carrying an ABA tag, so any number of threads
//! may allocate and free concurrently.
//!
//! ```
//! use slotpool::SlotPool;
//!
//! // 8000 bytes of storage: 999 slots of f64 plus the control word.
//! let pool: SlotPool<f64, u16, 8000> = SlotPool::new();
//! assert_eq!(pool.capacity(), 999);
//!
//! let x = pool.alloc_box(1.5).unwrap();
//! let y = pool.alloc_box(2.5).unwrap();
//! assert_eq!(*x + *y, 4.0);
//!
//! drop(x);
//! drop(y);
//! assert!(pool.is_empty());
//! ```
//!
//! The index type parameter must be the smallest of `u8`/`u16`/`u32` that
//! spans the pool's byte size; a wrong choice fails at compile time with a
//! message stating the rule.

#[cfg(not(target_pointer_width = "64"))]
compile_error!("slotpool supports only 64-bit targets.");

pub(crate) mod sync;

mod allocator;
mod handle;
mod index;
mod integration;
mod pool;
mod word;

pub use allocator::PoolAllocator;
pub use handle::{Deleter, PoolBox, PoolShared};
pub use index::SlotIndex;
pub use pool::{Exhausted, SlotPool};

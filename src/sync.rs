// Unified synchronization primitive shim.
//
// Under `cfg(loom)`, re-exports from the `loom` crate so that model tests can
// explore thread interleavings.  Otherwise, re-exports from `std` and
// `portable_atomic`.
//
// **Every** file in the crate must import sync primitives through this module.
// A single direct `use std::sync::atomic::*` would bypass loom's scheduler and
// silently break exhaustive testing.
//
// `AtomicU128` is always `portable_atomic`: loom provides no 128-bit atomic,
// so pools with 4-byte indices (128-bit control words) are not
// loom-instrumented.  Model tests stick to 1- and 2-byte-index pools.
#![allow(unused_imports)]

// ---------------------------------------------------------------------------
// atomic
// ---------------------------------------------------------------------------
pub(crate) mod atomic {
    #[cfg(loom)]
    pub(crate) use loom::sync::atomic::{AtomicU32, AtomicU64, Ordering};

    #[cfg(not(loom))]
    pub(crate) use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

    pub(crate) use portable_atomic::AtomicU128;
}

// ---------------------------------------------------------------------------
// sync (Arc)
// ---------------------------------------------------------------------------
#[cfg(loom)]
pub(crate) use loom::sync::Arc;

#[cfg(not(loom))]
pub(crate) use std::sync::Arc;

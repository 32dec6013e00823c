//! Cross-module and multi-threaded tests.
//!
//! The churn tests are the racy-reuse hunters: every thread owns a window of
//! thread-specific values, repeatedly re-allocates them at pseudo-random
//! positions, and re-checks that nothing else scribbled over a slot it
//! holds.

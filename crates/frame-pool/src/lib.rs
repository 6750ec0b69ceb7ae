//! Contiguous physical frame allocation.
//!
//! Physical memory is carved into pools of fixed-size frames. Each
//! [`FramePool`] hands out contiguous runs of frames and tracks them in a
//! two-bit-per-frame state bitmap stored inside frame memory itself. A
//! process-wide registry routes [`release_frames`] calls, which carry only
//! the first frame number of a run, back to the owning pool.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod pool;
mod registry;
mod state;

pub use pool::FramePool;
pub use registry::{release_frames, MAX_POOLS};
pub use state::FrameState;

// The registry is process-wide state, so tests touching pools take this
// lock instead of racing each other through it.
#[cfg(test)]
pub(crate) mod test_lock {
    use std::sync::{Mutex, MutexGuard};

    static LOCK: Mutex<()> = Mutex::new(());

    pub fn guard() -> MutexGuard<'static, ()> {
        LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

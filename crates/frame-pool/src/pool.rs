use address::FrameNum;
use constants::FRAME_SIZE;
use log::debug;

use crate::registry::{self, PoolEntry};
use crate::state::{FrameState, StateBitmap};

/// A contiguous region of physical frames with its own allocation bitmap.
///
/// The bitmap lives inside frame memory: either in a caller-provided info
/// frame, or in the pool's own first frame, which is then self-reserved as a
/// run of length one. Every pool registers itself with the process-wide
/// registry so that [`crate::release_frames`] can route a bare frame number
/// back to its owner.
pub struct FramePool {
    base_frame: FrameNum,
    n_frames: usize,
    info_frame: Option<FrameNum>,
    bitmap: StateBitmap,
}

impl FramePool {
    /// Creates a pool over `n_frames` frames starting at `base_frame`.
    ///
    /// With `info_frame == None` the bitmap is placed in the pool's first
    /// frame; otherwise it is placed in the named frame, which the caller
    /// must have reserved (typically via [`FramePool::get_frames`] on an
    /// already-live pool sized by [`FramePool::needed_info_frames`]).
    ///
    /// Panics when the bitmap would not fit into a single info frame.
    ///
    /// # Safety
    ///
    /// The caller asserts that the frame range and the info frame refer to
    /// real, identity-mapped memory that nothing else writes to for the
    /// lifetime of the pool.
    pub unsafe fn new(
        base_frame: FrameNum,
        n_frames: usize,
        info_frame: Option<FrameNum>,
    ) -> FramePool {
        // Equivalent to `n_frames <= FRAME_SIZE * 8 / 2`: two bits per
        // frame must fit into one frame of bitmap storage.
        assert_eq!(
            Self::needed_info_frames(n_frames),
            1,
            "pool state bitmap must fit in a single info frame"
        );

        let bitmap_frame = info_frame.unwrap_or(base_frame);
        let mut pool = FramePool {
            base_frame,
            n_frames,
            info_frame,
            bitmap: StateBitmap::new(bitmap_frame.start_addr(), n_frames),
        };

        registry::register(pool.entry());

        pool.bitmap.clear_all();
        if pool.info_frame.is_none() {
            // The first frame holds the bitmap itself: reserve it as a run
            // of length one before anything can be handed out.
            pool.bitmap.set(0, FrameState::HeadOfSequence);
        }

        debug!(
            "frame pool initialized: base={}, frames={}, self-backed={}",
            pool.base_frame,
            pool.n_frames,
            pool.info_frame.is_none()
        );

        pool
    }

    /// Allocates `n_frames` contiguous free frames and returns the absolute
    /// number of the first one, or `None` when no window fits.
    ///
    /// First fit, lowest frame wins. When the scan hits an occupied frame at
    /// window offset `i`, the next candidate window starts right behind it,
    /// so occupied stretches are stepped over rather than slid across.
    pub fn get_frames(&mut self, n_frames: usize) -> Option<FrameNum> {
        debug_assert!(n_frames >= 1);

        let mut start = 0;
        'window: while start + n_frames <= self.n_frames {
            for i in 0..n_frames {
                if self.bitmap.get(start + i) != FrameState::Free {
                    start += i + 1;
                    continue 'window;
                }
            }

            self.bitmap.mark_run(start, n_frames);
            return Some(self.base_frame + start);
        }

        None
    }

    /// Forcibly reserves `n_frames` frames starting at the pool-relative
    /// index `base`, regardless of their prior state. Used internally to
    /// stamp allocations and externally to blank out known-bad ranges such
    /// as memory holes.
    pub fn mark_inaccessible(&mut self, base: usize, n_frames: usize) {
        debug_assert!(n_frames >= 1);
        debug_assert!(base + n_frames <= self.n_frames);

        self.bitmap.mark_run(base, n_frames);
    }

    /// Number of info frames needed to hold the bitmap of an `n_frames`
    /// pool. Callers reserve this many frames from another pool before
    /// constructing an externally-backed one.
    pub fn needed_info_frames(n_frames: usize) -> usize {
        (n_frames * 2).div_ceil(FRAME_SIZE * 8)
    }

    pub fn base_frame(&self) -> FrameNum {
        self.base_frame
    }

    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// State of the frame at the pool-relative index `frame`.
    pub fn frame_state(&self, frame: usize) -> FrameState {
        self.bitmap.get(frame)
    }

    /// Number of frames currently free.
    pub fn free_frames(&self) -> usize {
        (0..self.n_frames)
            .filter(|&frame| self.bitmap.get(frame) == FrameState::Free)
            .count()
    }

    pub(crate) fn entry(&self) -> PoolEntry {
        PoolEntry {
            base_frame: self.base_frame,
            n_frames: self.n_frames,
            bitmap: self.bitmap,
        }
    }
}

impl Drop for FramePool {
    // Kernel pools live forever; deregistration exists so short-lived pools
    // (host tests) cannot leave stale registry entries behind.
    fn drop(&mut self) {
        registry::unregister(self.base_frame);
    }
}

use core::alloc::Layout;
use core::ptr::NonNull;

use address::{FrameNum, FrameNumRange, PhysicalAddress};
use constants::FRAME_SIZE;

/// Frame-aligned, zeroed host memory posing as a stretch of identity-mapped
/// physical frames.
///
/// The allocation's real address range is handed to the code under test as
/// its "physical" frame range, so pools place their bitmaps and clients
/// write through returned frame numbers exactly the way the kernel would.
pub struct TestMemory {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl TestMemory {
    pub fn new(n_frames: usize) -> TestMemory {
        assert!(n_frames >= 1);

        let layout = Layout::from_size_align(n_frames * FRAME_SIZE, FRAME_SIZE).unwrap();
        let ptr = unsafe { std::alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(ptr).unwrap_or_else(|| std::alloc::handle_alloc_error(layout));

        TestMemory { ptr, layout }
    }

    pub fn base_addr(&self) -> PhysicalAddress {
        PhysicalAddress::from_ptr(self.ptr.as_ptr())
    }

    /// Number of the first frame. Exact, since the allocation is frame
    /// aligned.
    pub fn base_frame(&self) -> FrameNum {
        self.base_addr().to_floor_frame()
    }

    pub fn n_frames(&self) -> usize {
        self.layout.size() / FRAME_SIZE
    }

    pub fn frame_range(&self) -> FrameNumRange {
        FrameNumRange::from_start_count(self.base_frame(), self.n_frames())
    }
}

impl Drop for TestMemory {
    fn drop(&mut self) {
        unsafe { std::alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

#[cfg(test)]
mod test_memory_tests {
    use super::*;

    #[test]
    fn test_alignment_and_shape() {
        let mem = TestMemory::new(16);

        assert!(mem.base_addr().is_frame_aligned());
        assert_eq!(mem.n_frames(), 16);
        assert_eq!(mem.base_frame().start_addr(), mem.base_addr());
        assert_eq!(mem.frame_range().frame_count(), 16);
    }

    #[test]
    fn test_memory_is_zeroed() {
        let mem = TestMemory::new(2);
        let bytes = mem.base_addr().as_slice::<u8>(2 * FRAME_SIZE);
        assert!(bytes.iter().all(|&b| b == 0));
    }
}

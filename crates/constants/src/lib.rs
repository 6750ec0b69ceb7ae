#![no_std]

pub const FRAME_SIZE: usize = 4096;
pub const FRAME_SIZE_BITS: usize = 12;

const MIB: usize = 1 << 20;

/// Physical memory layout of the reference machine. The kernel pool sits in
/// the 2 MiB..4 MiB window, the process pool in 4 MiB..32 MiB with a 1 MiB
/// unusable hole at 15 MiB.
pub const KERNEL_POOL_BASE_FRAME: usize = (2 * MIB) / FRAME_SIZE;
pub const KERNEL_POOL_N_FRAMES: usize = (2 * MIB) / FRAME_SIZE;

pub const PROCESS_POOL_BASE_FRAME: usize = (4 * MIB) / FRAME_SIZE;
pub const PROCESS_POOL_N_FRAMES: usize = (28 * MIB) / FRAME_SIZE;

pub const MEM_HOLE_BASE_FRAME: usize = (15 * MIB) / FRAME_SIZE;
pub const MEM_HOLE_N_FRAMES: usize = MIB / FRAME_SIZE;

//! Boot-time paging bootstrap driven by the frame allocator.
//!
//! Builds the two-level page table the kernel runs on right after paging is
//! switched on: a directory, one table identity-mapping the shared prefix,
//! and further tables allocated on demand. Every frame comes from a
//! [`frame_pool::FramePool`], one at a time.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod pte;
mod table;

pub use pte::{PtEntry, PteFlags};
pub use table::{BootPageTable, ENTRIES_PER_TABLE, TABLE_SPAN_BYTES};

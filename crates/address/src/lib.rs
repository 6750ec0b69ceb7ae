#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod frame_num;
mod frame_num_range;
mod physical_address;
mod virtual_address;

pub use frame_num::*;
pub use frame_num_range::*;
pub use physical_address::*;
pub use virtual_address::*;

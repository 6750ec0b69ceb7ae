pub mod memory;

pub use memory::TestMemory;

#[cfg(feature = "test_log")]
mod logging;

//! Strategy implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;

pub use console::ConsoleStrategy;
#[cfg(feature = "file")]
pub use file::FileStrategy;
pub use memory::{MemoryRecord, MemoryStrategy};

// Re-export traits for convenience
pub use crate::core::{LogStrategy, UnifiedLog};

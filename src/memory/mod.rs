/*!
 * Memory Module
 * The key/value store shared by every core
 */

pub mod shared;

// Re-export for convenience
pub use shared::{MemorySnapshot, SharedMemory};

/*!
 * Process Module
 * Units of work: instruction sequence, execution cursor and remaining budget
 */

pub mod lifecycle;
pub mod types;

// Re-export for convenience
pub use lifecycle::Process;
pub use types::{ProcessInfo, ProcessState};

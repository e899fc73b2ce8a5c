/*!
 * Core Module
 * Identifiers, error types, limits and configuration shared by every subsystem
 */

pub mod config;
pub mod errors;
pub mod id;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::SimConfig;
pub use errors::*;
pub use id::{CoreId, CoreRegistry, IdRegistry, Pid, PidRegistry, RawId};
pub use types::*;

/*!
 * Scheduler Module
 * Dispatch policies that hand processes to cores and reclaim them
 */

pub mod round_robin;
pub mod stats;
pub mod traits;

// Re-export public API
pub use round_robin::RoundRobinDispatcher;
pub use stats::{AtomicDispatchStats, DispatchReport, DispatchStats};
pub use traits::Dispatcher;

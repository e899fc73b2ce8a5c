/*!
 * Monitoring
 * Execution log shared by all cores, and structured tracing setup
 */

mod events;
mod logger;
mod tracer;

pub use events::ExecutionEvent;
pub use logger::ExecutionLogger;
pub use tracer::{init_tracing, init_tracing_with, span_execution};

/*!
 * System Limits and Constants
 *
 * Defaults for the simulated machine, grouped by domain.
 */

use crate::core::types::MemoryBounds;

// =============================================================================
// MACHINE
// =============================================================================

/// Cores started by the demo driver when nothing else is configured
pub const DEFAULT_CORE_COUNT: usize = 4;

/// Upper bound accepted by configuration validation
pub const MAX_CORE_COUNT: usize = 256;

/// First core id handed out by the demo driver
pub const FIRST_CORE_ID: u32 = 1;

// =============================================================================
// PROCESSES
// =============================================================================

/// First process id requested by the demo driver
pub const FIRST_PID: u32 = 1;

/// Burst time granted to processes created without an explicit budget
pub const DEFAULT_BURST_TIME: u32 = 10;

/// Bounds attached to demo processes
pub const DEFAULT_MEMORY_BOUNDS: MemoryBounds = MemoryBounds::new(0, 100);

// =============================================================================
// SCHEDULING
// =============================================================================

/// Instructions a process may run per dispatch before it is preempted
pub const DEFAULT_QUANTUM: u32 = 3;

/*!
 * Dispatcher Traits
 * Interface a scheduling policy implements on top of the execution engine
 */

use super::stats::DispatchReport;
use crate::cpu::Core;
use crate::process::Process;

/// Scheduling policy
///
/// A dispatcher owns processes while they wait, lends them to cores, and
/// decides what happens when a core hands one back.
pub trait Dispatcher: Send + Sync {
    /// Queue a process for execution
    fn submit(&self, process: Process);

    /// Drive `cores` until every submitted process has been retired
    fn run(&self, cores: &[Core]) -> DispatchReport;

    /// Processes waiting for a core
    fn pending(&self) -> usize;

    /// Take back processes that stopped for lack of burst time
    ///
    /// Each keeps its program counter, so granting more burst time and
    /// submitting it again resumes where it stopped.
    fn reclaim(&self) -> Vec<Process>;
}

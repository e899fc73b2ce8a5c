/*!
 * Execution Logger
 * Append-only, ordered event sink shared by every core
 */

use super::events::ExecutionEvent;
use parking_lot::Mutex;
use std::fmt::Write as _;
use std::sync::Arc;

/// Ordered log of execution events
///
/// Clones append to the same log. Events from different cores interleave in
/// the order their `record` calls acquired the lock.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLogger {
    events: Arc<Mutex<Vec<ExecutionEvent>>>,
}

impl ExecutionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: ExecutionEvent) {
        self.events.lock().push(event);
    }

    /// Copy of every event, in append order
    pub fn events(&self) -> Vec<ExecutionEvent> {
        self.events.lock().clone()
    }

    /// Status lines, in append order
    pub fn replay(&self) -> Vec<String> {
        self.events.lock().iter().map(ToString::to_string).collect()
    }

    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&ExecutionEvent) -> bool,
    {
        self.events.lock().iter().filter(|&event| predicate(event)).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Human-readable dump of the whole log
    pub fn render(&self) -> String {
        let events = self.events.lock();
        if events.is_empty() {
            return "There are no logs.".to_string();
        }

        let mut out = String::from("Execution Logs:");
        for event in events.iter() {
            let _ = write!(out, "\n{}", event);
        }
        out
    }
}

/*!
 * Identity Tests
 * Pid and core id allocation under concurrent creation
 */

use pretty_assertions::assert_eq;
use smp_sim::{
    Core, CoreId, CoreRegistry, ExecutionLogger, MemoryBounds, Pid, PidRegistry, Process,
    SharedMemory,
};
use std::collections::HashSet;
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

#[test]
fn test_concurrent_process_ids_are_unique() {
    let registry = PidRegistry::new();

    let processes: Vec<Process> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = &registry;
                scope.spawn(move || {
                    (0..PER_THREAD)
                        .map(|_| {
                            Process::create(registry, Pid(1), ["print x"], 0, MemoryBounds::new(0, 8), 1)
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
    });

    let ids: HashSet<Pid> = processes.iter().map(Process::id).collect();
    assert_eq!(ids.len(), THREADS * PER_THREAD);
    assert_eq!(registry.len(), THREADS * PER_THREAD);

    drop(processes);
    assert!(registry.is_empty());
}

#[test]
fn test_concurrent_core_ids_are_unique() {
    let registry = CoreRegistry::new();
    let memory = SharedMemory::new();
    let logger = ExecutionLogger::new();

    let cores: Vec<Core> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let (registry, memory, logger) = (&registry, &memory, &logger);
                scope.spawn(move || {
                    (0..PER_THREAD)
                        .map(|_| Core::create(registry, CoreId(1), memory.clone(), logger.clone()).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
    });

    let ids: HashSet<CoreId> = cores.iter().map(Core::id).collect();
    assert_eq!(ids.len(), THREADS * PER_THREAD);
}

#[test]
fn test_pid_is_reusable_after_drop() {
    let registry = PidRegistry::new();
    let first = Process::create(&registry, Pid(3), ["print x"], 0, MemoryBounds::new(0, 8), 1).unwrap();
    let second = Process::create(&registry, Pid(3), ["print x"], 0, MemoryBounds::new(0, 8), 1).unwrap();
    assert_eq!(first.id(), Pid(3));
    assert_eq!(second.id(), Pid(4));

    drop(first);
    let third = Process::create(&registry, Pid(3), ["print x"], 0, MemoryBounds::new(0, 8), 1).unwrap();
    assert_eq!(third.id(), Pid(3));
}

#[test]
fn test_pid_space_exhaustion_is_reported() {
    let registry = PidRegistry::new();
    let _last = Process::create(&registry, Pid(u32::MAX), ["print x"], 0, MemoryBounds::new(0, 8), 1).unwrap();

    let err = Process::create(&registry, Pid(u32::MAX), ["print x"], 0, MemoryBounds::new(0, 8), 1)
        .unwrap_err();
    assert!(matches!(err, smp_sim::ProcessError::IdentitySpaceExhausted(_)));
}

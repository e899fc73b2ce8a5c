/*!
 * Shared Memory Tests
 * Concurrent access from many threads and many cores
 */

use pretty_assertions::assert_eq;
use smp_sim::{
    Core, CoreId, CoreRegistry, ExecutionLogger, MemoryBounds, Pid, PidRegistry, Process,
    SharedMemory,
};
use std::thread;

#[test]
fn test_concurrent_writes_to_distinct_keys_are_all_visible() {
    let memory = SharedMemory::new();

    thread::scope(|scope| {
        for t in 0..8 {
            let memory = &memory;
            scope.spawn(move || {
                for i in 0..100 {
                    memory.write(format!("t{}_{}", t, i), (t * 1000 + i) as i64);
                }
            });
        }
    });

    assert_eq!(memory.len(), 800);
    assert_eq!(memory.read("t3_42"), Some(3042));
    assert_eq!(memory.read("t7_99"), Some(7099));
}

#[test]
fn test_concurrent_writes_to_one_key_leave_a_written_value() {
    let memory = SharedMemory::new();

    thread::scope(|scope| {
        for t in 0..8i64 {
            let memory = &memory;
            scope.spawn(move || {
                for i in 0..200 {
                    memory.write("shared", t * 1000 + i);
                }
            });
        }
    });

    // The final value is some thread's last write, never a torn mix
    let value = memory.read("shared").unwrap();
    assert_eq!(value % 1000, 199);
    assert!((0..8).contains(&(value / 1000)));
}

#[test]
fn test_concurrent_updates_lose_nothing() {
    let memory = SharedMemory::new();
    memory.write("counter", 0);

    thread::scope(|scope| {
        for _ in 0..8 {
            let memory = &memory;
            scope.spawn(move || {
                for _ in 0..1000 {
                    memory.update("counter", |v| v + 1);
                }
            });
        }
    });

    assert_eq!(memory.read("counter"), Some(8000));
}

#[test]
fn test_cores_adding_to_one_variable_lose_no_updates() {
    const CORES: usize = 4;
    const ADDS: usize = 250;

    let memory = SharedMemory::new();
    let logger = ExecutionLogger::new();
    let cores_registry = CoreRegistry::new();
    let pids = PidRegistry::new();
    memory.write("total", 0);

    let cores: Vec<Core> = (0..CORES)
        .map(|_| Core::create(&cores_registry, CoreId(1), memory.clone(), logger.clone()).unwrap())
        .collect();
    let mut processes: Vec<Process> = (0..CORES)
        .map(|_| {
            let program = vec!["add total, 1"; ADDS];
            Process::create(&pids, Pid(1), program, 0, MemoryBounds::new(0, 16), ADDS as u32).unwrap()
        })
        .collect();

    thread::scope(|scope| {
        for (core, process) in cores.iter().zip(processes.iter_mut()) {
            scope.spawn(move || core.execute(Some(process)).unwrap());
        }
    });

    assert_eq!(memory.read("total"), Some((CORES * ADDS) as i64));
    assert!(processes.iter().all(Process::is_complete));
}

#[test]
fn test_snapshot_is_sorted_point_in_time_copy() {
    let memory = SharedMemory::new();
    memory.write("b", 2);
    memory.write("a", 1);

    let snapshot = memory.snapshot();
    memory.write("c", 3);

    let keys: Vec<&str> = snapshot.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(memory.len(), 3);
}

#[test]
fn test_snapshot_during_writes_sees_whole_values() {
    let memory = SharedMemory::new();
    for i in 0..16 {
        memory.write(format!("k{}", i), 0);
    }

    thread::scope(|scope| {
        let writer = &memory;
        scope.spawn(move || {
            for round in 1..=500 {
                for i in 0..16 {
                    writer.write(format!("k{}", i), round);
                }
            }
        });

        for _ in 0..50 {
            let snapshot = memory.snapshot();
            assert_eq!(snapshot.len(), 16);
            assert!(snapshot.values().all(|v| (0..=500).contains(v)));
        }
    });
}

/*!
 * Process Tests
 * Cursor and burst-time properties of a process
 */

use pretty_assertions::assert_eq;
use proptest::collection::vec;
use proptest::prelude::*;
use smp_sim::{MemoryBounds, Pid, PidRegistry, Process, ProcessState};

fn program_from(bytes: &[u8]) -> Vec<String> {
    bytes.iter().map(|b| format!("print v{}", b)).collect()
}

fn create(program: Vec<String>, start: usize, burst: u32) -> Process {
    let registry = PidRegistry::new();
    Process::create(&registry, Pid(1), program, start, MemoryBounds::new(0, 64), burst).unwrap()
}

proptest! {
    #[test]
    fn prop_cursor_never_moves_backwards(
        bytes in vec(any::<u8>(), 0..32),
        start in 0usize..40,
        fetches in 0usize..48,
    ) {
        let program = program_from(&bytes);
        let len = program.len();
        let mut process = create(program.clone(), start, 1);
        prop_assert!(process.program_counter() <= len);

        let mut last = process.program_counter();
        for _ in 0..fetches {
            let expected = program.get(last).cloned();
            let fetched = process.next_instruction().map(str::to_string);
            prop_assert_eq!(fetched, expected);

            let pc = process.program_counter();
            prop_assert!(pc >= last);
            prop_assert!(pc <= len);
            last = pc;
        }
        prop_assert_eq!(process.is_complete(), last >= len);
    }

    #[test]
    fn prop_burst_time_floors_at_zero(
        initial in any::<u32>(),
        decrements in vec(any::<u32>(), 0..16),
    ) {
        let mut process = create(vec!["print x".to_string()], 0, initial);
        let mut expected = initial;
        for n in decrements {
            process.decrease_burst_time(n);
            expected = expected.saturating_sub(n);
            prop_assert_eq!(process.burst_time(), expected);
        }
    }
}

#[test]
fn test_start_counter_is_clamped() {
    let process = create(program_from(&[1, 2, 3]), 99, 5);
    assert_eq!(process.program_counter(), 3);
    assert!(process.is_complete());
}

#[test]
fn test_instructions_are_unchanged_by_execution() {
    let program = program_from(&[4, 5, 6]);
    let mut process = create(program.clone(), 0, 5);
    while process.next_instruction().is_some() {}

    let seen: Vec<&str> = process.instructions().collect();
    assert_eq!(seen, program.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(process.len(), 3);
}

#[test]
fn test_mark_complete_is_idempotent() {
    let mut process = create(program_from(&[1, 2]), 0, 5);
    assert_eq!(process.state(), ProcessState::Ready);

    process.mark_complete();
    process.mark_complete();

    assert!(process.is_complete());
    assert_eq!(process.program_counter(), 2);
    assert_eq!(process.next_instruction(), None);
    assert_eq!(process.state(), ProcessState::Terminated);
}

#[test]
fn test_empty_program_is_complete_immediately() {
    let process = create(Vec::new(), 0, 5);
    assert!(process.is_empty());
    assert!(process.is_complete());
}

#[test]
fn test_info_reflects_process() {
    let mut process = create(program_from(&[1, 2, 3]), 1, 9);
    process.decrease_burst_time(4);

    let info = process.info();
    assert_eq!(info.pid, Pid(1));
    assert_eq!(info.program_counter, 1);
    assert_eq!(info.instruction_count, 3);
    assert_eq!(info.burst_time, 5);
    assert_eq!(info.memory_bounds, MemoryBounds::new(0, 64));
}

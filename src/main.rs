/*!
 * SMP Simulator - Main Entry Point
 *
 * Runs the demonstration workload twice:
 * - once on a single core, printing the execution log and final memory
 * - once through the round-robin dispatcher on the configured cores
 */

use anyhow::Context;
use tracing::info;

use smp_sim::core::limits::{DEFAULT_MEMORY_BOUNDS, FIRST_CORE_ID, FIRST_PID};
use smp_sim::{
    init_tracing_with, Core, CoreId, CoreRegistry, Dispatcher, ExecutionLogger, Pid, PidRegistry,
    Process, RoundRobinDispatcher, SharedMemory, SimConfig,
};

const DEMO_PROGRAM: [&str; 9] = [
    "assign x = 5",
    "print x",
    "add x, 10",
    "print x",
    "subtract x, 3",
    "print x",
    "divide x, 0",
    "multiply x, 2",
    "print x",
];

fn main() -> anyhow::Result<()> {
    let config = SimConfig::from_env().context("invalid simulator configuration")?;
    init_tracing_with(config.trace_json);

    info!("SMP simulator starting...");
    info!(
        cores = config.cores,
        quantum = config.quantum,
        default_burst = config.default_burst,
        "configuration loaded"
    );

    run_single_core(&config)?;
    run_dispatched(&config)?;

    info!("SMP simulator finished");
    Ok(())
}

fn run_single_core(config: &SimConfig) -> anyhow::Result<()> {
    let memory = SharedMemory::new();
    let logger = ExecutionLogger::new();
    let pids = PidRegistry::new();
    let cores = CoreRegistry::new();

    let core = Core::create(&cores, CoreId(FIRST_CORE_ID), memory.clone(), logger.clone())?;
    let mut process = Process::create(
        &pids,
        Pid(FIRST_PID),
        DEMO_PROGRAM,
        0,
        DEFAULT_MEMORY_BOUNDS,
        config.default_burst,
    )?;

    println!("Starting Process Execution...");
    core.execute(Some(&mut process))?;

    println!("{}", logger.render());
    println!("Final shared memory:");
    println!("{}", serde_json::to_string_pretty(&memory.snapshot())?);
    Ok(())
}

/// Same workload, one copy per core, each on its own variable
fn run_dispatched(config: &SimConfig) -> anyhow::Result<()> {
    let memory = SharedMemory::new();
    let logger = ExecutionLogger::new();
    let pids = PidRegistry::new();
    let registry = CoreRegistry::new();

    let cores = (0..config.cores)
        .map(|_| Core::create(&registry, CoreId(FIRST_CORE_ID), memory.clone(), logger.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let dispatcher = RoundRobinDispatcher::with_config(config, logger.clone());
    for n in 0..config.cores {
        let var = format!("x{}", n);
        let program = DEMO_PROGRAM.map(|line| line.replacen(" x", &format!(" {}", var), 1));
        let process = Process::create(
            &pids,
            Pid(FIRST_PID),
            program,
            0,
            DEFAULT_MEMORY_BOUNDS,
            config.default_burst,
        )?;
        dispatcher.submit(process);
    }

    println!();
    println!("Dispatching {} processes across {} cores...", config.cores, cores.len());
    let report = dispatcher.run(&cores);

    println!("{}", serde_json::to_string_pretty(&report)?);
    println!("Final shared memory:");
    println!("{}", serde_json::to_string_pretty(&memory.snapshot())?);
    Ok(())
}

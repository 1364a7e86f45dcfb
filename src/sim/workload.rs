use rand::prelude::*;

use super::process::Process;
use crate::core::Ticks;

/// Seeded Bernoulli arrival stream: at every tick in `0..ticks` a process
/// arrives with probability `p_arrival`, and is short with probability
/// `p_short`. The result is sorted by arrival and pids count up from 1.
pub fn bernoulli_processes(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            processes.push(Process::new(processes.len() as u32 + 1, t, burst_time));
        }
    }

    processes
}

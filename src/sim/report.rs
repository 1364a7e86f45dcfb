use average::{Estimate, Max, Mean};

use super::process::ProcessStats;
use crate::core::{Pid, Ticks};

/// Outcome of a completed simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Per-process results, in input order
    pub processes: Vec<ProcessStats>,
    pub total_waiting: Ticks,
    pub total_response: Ticks,
    /// Completion time of the last process to retire
    pub makespan: Ticks,
    pub dispatches: u64,
    pub preemptions: u64,
}

impl Report {
    pub(crate) fn new(processes: Vec<ProcessStats>, preemptions: u64) -> Self {
        let total_waiting = processes.iter().map(|p| p.waiting).sum();
        let total_response = processes.iter().map(|p| p.response).sum();
        let makespan = processes.iter().map(|p| p.completion).max().unwrap_or(0);
        let dispatches = processes.iter().map(|p| p.dispatches).sum();

        Self {
            processes,
            total_waiting,
            total_response,
            makespan,
            dispatches,
            preemptions,
        }
    }

    // Integer totals divided once; no intermediate rounding
    pub fn average_waiting_time(&self) -> f64 {
        self.total_waiting as f64 / self.processes.len() as f64
    }

    pub fn average_response_time(&self) -> f64 {
        self.total_response as f64 / self.processes.len() as f64
    }

    pub fn averages(&self) -> (f64, f64) {
        (self.average_waiting_time(), self.average_response_time())
    }

    pub fn average_turnaround_time(&self) -> f64 {
        let mut mean = Mean::new();
        for p in &self.processes {
            mean.add(p.turnaround() as f64);
        }
        mean.mean()
    }

    pub fn max_waiting_time(&self) -> f64 {
        let mut max = Max::new();
        for p in &self.processes {
            max.add(p.waiting as f64);
        }
        max.max()
    }

    pub fn stats(&self, pid: Pid) -> Option<&ProcessStats> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

use crate::core::{Pid, RunState, Ticks};

/// Immutable input record for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl Process {
    pub fn new(pid: u32, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            pid: Pid(pid),
            arrival_time,
            burst_time,
        }
    }
}

/// Final timing of one process once it has retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStats {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub waiting: Ticks,
    pub response: Ticks,
    pub completion: Ticks,
    pub cpu_time: Ticks,
    pub dispatches: u64,
}

impl ProcessStats {
    pub(crate) fn from_run_state(state: &RunState) -> Self {
        Self {
            pid: state.pid,
            arrival_time: state.arrival_time,
            burst_time: state.burst_time,
            waiting: state.waiting,
            response: state
                .response
                .expect("Finished process must have a response time"),
            completion: state
                .completion
                .expect("Finished process must have a completion time"),
            cpu_time: state.cpu_time,
            dispatches: state.dispatches,
        }
    }

    pub fn turnaround(&self) -> Ticks {
        self.completion - self.arrival_time
    }
}

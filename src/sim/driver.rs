use rustc_hash::FxHashSet;
use tracing::debug;

use super::{
    process::{Process, ProcessStats},
    report::Report,
};
use crate::{
    config::SimConfig,
    core::{RrCore, SchedEvent, Ticks, Tracer},
    error::SimError,
};

pub struct Sim {
    pub core: RrCore,
    pub processes: Vec<Process>,
    // Next process not yet admitted; advances monotonically
    admit_cursor: usize,
}

impl Sim {
    /// Validates the input and builds a simulation ready to step.
    ///
    /// `processes` must already be sorted by arrival time; ties keep their
    /// relative order and that order decides who is queued first.
    pub fn new(processes: Vec<Process>, config: SimConfig) -> Result<Self, SimError> {
        validate(&processes, &config)?;

        let core = RrCore::new(
            processes
                .iter()
                .map(|p| (p.pid, p.arrival_time, p.burst_time)),
            config.quantum,
            config.check_invariants,
        );

        Ok(Self {
            core,
            processes,
            admit_cursor: 0,
        })
    }

    pub fn with_tracer<F>(mut self, tracer: F) -> Self
    where
        F: FnMut(Ticks, &SchedEvent) + 'static,
    {
        self.core.set_tracer(Box::new(tracer) as Tracer);
        self
    }

    /// Runs one dispatch (or one idle skip) and returns what happened.
    pub fn step(&mut self) -> Vec<(Ticks, SchedEvent)> {
        if self.all_completed() {
            return Vec::new();
        }

        let now = self.core.now();
        self.handle_arrivals(|arrival| arrival <= now);

        match self.core.dispatch() {
            Some(slice) => {
                // Arrivals inside the slice queue up ahead of the preempted process
                self.handle_arrivals(|arrival| arrival < slice.end);
                self.core.finish_slice();
            }
            None => {
                let next = self.processes[self.admit_cursor].arrival_time;
                self.core.idle_until(next);
            }
        }

        self.core.observe();
        self.core.drain_events()
    }

    fn handle_arrivals<F>(&mut self, arrived: F)
    where
        F: Fn(Ticks) -> bool,
    {
        // Contiguous, since processes are sorted by arrival
        while let Some(process) = self.processes.get(self.admit_cursor) {
            if !arrived(process.arrival_time) {
                break;
            }
            self.core.admit(self.admit_cursor, process.arrival_time);
            self.admit_cursor += 1;
        }
    }

    pub fn all_completed(&self) -> bool {
        self.core.machine.all_finished()
    }

    pub fn run(mut self) -> Report {
        debug!(
            processes = self.processes.len(),
            quantum = self.core.quantum(),
            "starting round robin simulation"
        );

        while !self.all_completed() {
            self.step();
        }

        let stats = self
            .core
            .machine
            .procs
            .iter()
            .map(ProcessStats::from_run_state)
            .collect();
        let report = Report::new(stats, self.core.preemptions());

        debug!(
            makespan = report.makespan,
            dispatches = report.dispatches,
            preemptions = report.preemptions,
            steps = self.core.observer().steps(),
            "simulation finished"
        );
        report
    }
}

fn validate(processes: &[Process], config: &SimConfig) -> Result<(), SimError> {
    if config.quantum == 0 {
        return Err(SimError::InvalidQuantum(config.quantum));
    }
    if processes.is_empty() {
        return Err(SimError::EmptyProcessSet);
    }

    let mut seen = FxHashSet::default();
    let mut previous = 0;
    for (index, p) in processes.iter().enumerate() {
        if p.arrival_time < previous {
            return Err(SimError::UnsortedArrivals {
                index,
                pid: p.pid,
                arrival: p.arrival_time,
                previous,
            });
        }
        if p.burst_time == 0 {
            return Err(SimError::ZeroBurst(p.pid));
        }
        if !seen.insert(p.pid) {
            return Err(SimError::DuplicatePid(p.pid));
        }
        previous = p.arrival_time;
    }
    Ok(())
}

/// Replays Round Robin over `processes` and returns
/// `(average_waiting_time, average_response_time)`.
pub fn simulate(processes: &[Process], quantum: Ticks) -> Result<(f64, f64), SimError> {
    let config = SimConfig::new(quantum)?;
    let report = Sim::new(processes.to_vec(), config)?.run();
    Ok(report.averages())
}

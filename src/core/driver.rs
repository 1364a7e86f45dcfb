use super::{
    event::SchedEvent,
    observer::{Observer, Tracer},
    state::{Machine, Pid, ProcIdx, Ticks},
};

/// One dispatch of the CPU: `idx` ran over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub idx: ProcIdx,
    pub start: Ticks,
    pub end: Ticks,
}

impl Slice {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

pub struct RrCore {
    pub machine: Machine,
    quantum: Ticks,
    observer: Observer,
    pending: Vec<(Ticks, SchedEvent)>,
    preemptions: u64,
    // Process dispatched since the last observe()
    touched: Option<ProcIdx>,
}

impl RrCore {
    pub fn new<I>(procs: I, quantum: Ticks, check_invariants: bool) -> Self
    where
        I: IntoIterator<Item = (Pid, Ticks, Ticks)>,
    {
        debug_assert!(quantum > 0, "Quantum must be positive");
        Self {
            machine: Machine::new(procs),
            quantum,
            observer: Observer::new(check_invariants),
            pending: Vec::new(),
            preemptions: 0,
            touched: None,
        }
    }

    pub fn set_tracer(&mut self, tracer: Tracer) {
        self.observer.set_tracer(tracer);
    }

    // `at` is the arrival instant, which may fall inside the running slice
    pub fn admit(&mut self, idx: ProcIdx, at: Ticks) {
        self.machine.admit(idx);
        let pid = self.machine.proc(idx).pid;
        self.emit(at, SchedEvent::Admitted { pid });
    }

    /// Pop the queue head and run it for at most one quantum.
    ///
    /// Everything still queued accrues the full slice as waiting time. The
    /// process stays on the CPU until `finish_slice`, so arrivals that land
    /// inside the slice can be admitted ahead of its requeue.
    pub fn dispatch(&mut self) -> Option<Slice> {
        let idx = self.machine.set_running()?;
        self.touched = Some(idx);
        let start = self.machine.now;

        let (pid, run, first_run) = {
            let proc = self.machine.proc_mut(idx);
            let first_run = proc.response.is_none();
            if first_run {
                proc.response = Some(start - proc.arrival_time);
            }
            let run = self.quantum.min(proc.remaining);
            proc.remaining -= run;
            proc.cpu_time += run;
            proc.dispatches += 1;
            (proc.pid, run, first_run)
        };

        self.machine.accrue_waiting(run);
        self.machine.advance_time(run);
        self.emit(
            start,
            SchedEvent::Dispatched {
                pid,
                slice: run,
                first_run,
            },
        );

        Some(Slice {
            idx,
            start,
            end: self.machine.now,
        })
    }

    // Return the ProcIdx if the running process completed with this slice
    pub fn finish_slice(&mut self) -> Option<ProcIdx> {
        let idx = self.machine.current?;
        let now = self.machine.now;
        let proc = self.machine.proc(idx);
        let pid = proc.pid;

        if proc.remaining == 0 {
            let waiting = proc.waiting;
            let response = proc
                .response
                .expect("Retiring process was never dispatched");
            self.machine.retire_current();
            self.emit(
                now,
                SchedEvent::Retired {
                    pid,
                    waiting,
                    response,
                },
            );
            return Some(idx);
        }

        let remaining = proc.remaining;
        self.machine.requeue_current();
        self.preemptions += 1;
        self.emit(now, SchedEvent::Preempted { pid, remaining });
        None
    }

    // Jump over a gap with nothing runnable
    pub fn idle_until(&mut self, until: Ticks) {
        debug_assert!(self.machine.ready.is_empty(), "Idling with a non-empty queue");
        debug_assert!(until > self.machine.now, "Idle skip must move time forward");
        let now = self.machine.now;
        self.machine.advance_time(until - now);
        self.emit(now, SchedEvent::Idle { until });
    }

    pub fn observe(&mut self) {
        self.observer.observe(&self.machine, self.touched.take());
    }

    pub fn drain_events(&mut self) -> Vec<(Ticks, SchedEvent)> {
        std::mem::take(&mut self.pending)
    }

    pub fn now(&self) -> Ticks {
        self.machine.now
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }

    pub fn preemptions(&self) -> u64 {
        self.preemptions
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    fn emit(&mut self, at: Ticks, event: SchedEvent) {
        self.observer.emit(at, &event);
        self.pending.push((at, event));
    }
}

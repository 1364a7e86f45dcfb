use std::fmt;

use tracing::trace;

use super::{
    event::SchedEvent,
    state::{Machine, Phase, ProcIdx, Ticks},
};

/// Callback fired for every scheduling event, stamped with the simulated
/// time at which it happened.
pub type Tracer = Box<dyn FnMut(Ticks, &SchedEvent)>;

pub struct Observer {
    step: u64,
    check_invariants: bool,
    tracer: Option<Tracer>,
}

impl Observer {
    pub fn new(check_invariants: bool) -> Self {
        Self {
            step: 0,
            check_invariants,
            tracer: None,
        }
    }

    pub fn set_tracer(&mut self, tracer: Tracer) {
        self.tracer = Some(tracer);
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn emit(&mut self, at: Ticks, event: &SchedEvent) {
        trace!(t = at, ?event, "sched event");
        if let Some(tracer) = self.tracer.as_mut() {
            tracer(at, event);
        }
    }

    /// Checks the queue, plus the bookkeeping of `touched`, the process that
    /// ran in the step just taken. Untouched processes cannot have changed.
    pub fn observe(&mut self, machine: &Machine, touched: Option<ProcIdx>) {
        self.step += 1;
        if !self.check_invariants {
            return;
        }

        if let Some(idx) = machine.current {
            assert_eq!(
                machine.proc(idx).phase,
                Phase::Running,
                "current process {idx} must be Running"
            );
            assert!(
                !machine.ready.contains(idx),
                "Running process {idx} must not appear in the ready queue"
            );
        }

        assert_eq!(
            machine.ready.len(),
            machine.ready.membership_len(),
            "Ready queue holds duplicate entries"
        );

        for idx in machine.ready.iter() {
            let proc = machine.proc(idx);
            assert_eq!(
                proc.phase,
                Phase::Ready,
                "Queued process {idx} must be Ready, found {:?}",
                proc.phase
            );
            assert!(
                proc.remaining > 0,
                "Queued process {idx} has no remaining work"
            );
            assert!(
                proc.arrival_time <= machine.now,
                "Queued process {idx} has not arrived yet"
            );
        }

        if let Some(idx) = touched {
            let proc = machine.proc(idx);
            assert_eq!(
                proc.cpu_time + proc.remaining,
                proc.burst_time,
                "Process {idx} lost track of its burst"
            );
            if proc.phase == Phase::Finished {
                assert!(
                    proc.completion.is_some() && proc.response.is_some(),
                    "Finished process {idx} missing timing stats"
                );
            }
        }
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("step", &self.step)
            .field("check_invariants", &self.check_invariants)
            .field("tracer", &self.tracer.is_some())
            .finish()
    }
}

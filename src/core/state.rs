use rustc_hash::FxHashSet;
use std::collections::VecDeque;

// Index into the process arena; matches the position in the sorted input
pub type ProcIdx = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(pub u32);

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unarrived,
    Ready,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct RunState {
    pub idx: ProcIdx,
    pub pid: Pid,
    pub phase: Phase,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining: Ticks,
    pub waiting: Ticks,
    // None until the first dispatch; a response time of 0 is legitimate
    pub response: Option<Ticks>,
    pub cpu_time: Ticks,
    pub dispatches: u64,
    pub completion: Option<Ticks>,
}

impl RunState {
    fn new(idx: ProcIdx, pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            idx,
            pid,
            phase: Phase::Unarrived,
            arrival_time,
            burst_time,
            remaining: burst_time,
            waiting: 0,
            response: None,
            cpu_time: 0,
            dispatches: 0,
            completion: None,
        }
    }
}

/// FIFO of arena indices. `members` mirrors the deque so duplicate
/// enqueues are caught in O(1).
#[derive(Debug, Default)]
pub struct ReadyQueue {
    slots: VecDeque<ProcIdx>,
    members: FxHashSet<ProcIdx>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, idx: ProcIdx) {
        let inserted = self.members.insert(idx);
        assert!(inserted, "Process {idx} already present in the ready queue");
        self.slots.push_back(idx);
    }

    pub fn pop_front(&mut self) -> Option<ProcIdx> {
        let idx = self.slots.pop_front()?;
        let removed = self.members.remove(&idx);
        debug_assert!(removed, "Process {idx} missing queue membership");
        Some(idx)
    }

    pub fn contains(&self, idx: ProcIdx) -> bool {
        self.members.contains(&idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcIdx> + '_ {
        self.slots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn membership_len(&self) -> usize {
        self.members.len()
    }
}

#[derive(Debug)]
pub struct Machine {
    pub now: Ticks,
    pub procs: Vec<RunState>,
    pub ready: ReadyQueue,
    pub current: Option<ProcIdx>,
    pub finished: usize,
}

impl Machine {
    pub fn new<I>(procs: I) -> Self
    where
        I: IntoIterator<Item = (Pid, Ticks, Ticks)>,
    {
        let procs = procs
            .into_iter()
            .enumerate()
            .map(|(idx, (pid, arrival, burst))| RunState::new(idx, pid, arrival, burst))
            .collect();

        Self {
            now: 0,
            procs,
            ready: ReadyQueue::new(),
            current: None,
            finished: 0,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn proc(&self, idx: ProcIdx) -> &RunState {
        &self.procs[idx]
    }

    pub fn proc_mut(&mut self, idx: ProcIdx) -> &mut RunState {
        &mut self.procs[idx]
    }

    pub fn admit(&mut self, idx: ProcIdx) {
        let proc = self.proc_mut(idx);
        debug_assert_eq!(
            proc.phase,
            Phase::Unarrived,
            "Process {idx} admitted twice"
        );
        proc.phase = Phase::Ready;
        self.ready.push_back(idx);
    }

    // Pop the queue head onto the CPU
    pub fn set_running(&mut self) -> Option<ProcIdx> {
        debug_assert!(self.current.is_none(), "CPU already running a process");

        let idx = self.ready.pop_front()?;
        self.proc_mut(idx).phase = Phase::Running;
        self.current = Some(idx);
        Some(idx)
    }

    // Every process sitting in the queue waits for the whole slice
    pub fn accrue_waiting(&mut self, delta: Ticks) {
        for idx in self.ready.slots.iter().copied() {
            let proc = &mut self.procs[idx];
            proc.waiting = proc.waiting.saturating_add(delta);
        }
    }

    pub fn requeue_current(&mut self) {
        let idx = self.current.take().expect("No running process to requeue");
        let proc = self.proc_mut(idx);
        debug_assert!(proc.remaining > 0, "Requeued process {idx} has no work left");
        proc.phase = Phase::Ready;
        self.ready.push_back(idx);
    }

    pub fn retire_current(&mut self) -> ProcIdx {
        let idx = self.current.take().expect("No running process to retire");
        let now = self.now;
        let proc = self.proc_mut(idx);
        debug_assert_eq!(proc.remaining, 0, "Retiring process {idx} with work left");
        proc.phase = Phase::Finished;
        proc.completion = Some(now);
        self.finished += 1;
        idx
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn all_finished(&self) -> bool {
        self.finished == self.procs.len()
    }
}

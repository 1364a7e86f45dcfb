use crate::core::{Pid, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    // Moved from "arrived" into the ready queue
    Admitted {
        pid: Pid,
    },
    Dispatched {
        pid: Pid,
        slice: Ticks,
        first_run: bool,
    },
    // Slice expired with work left; back of the queue
    Preempted {
        pid: Pid,
        remaining: Ticks,
    },
    Retired {
        pid: Pid,
        waiting: Ticks,
        response: Ticks,
    },
    // Queue drained before the next arrival; time jumps forward
    Idle {
        until: Ticks,
    },
}

impl SchedEvent {
    pub fn pid(&self) -> Option<Pid> {
        match self {
            Self::Admitted { pid }
            | Self::Dispatched { pid, .. }
            | Self::Preempted { pid, .. }
            | Self::Retired { pid, .. } => Some(*pid),
            Self::Idle { .. } => None,
        }
    }
}

pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::{RrCore, Slice};
pub use event::SchedEvent;
pub use observer::{Observer, Tracer};
pub use state::{Machine, Phase, Pid, ProcIdx, ReadyQueue, RunState, Ticks};

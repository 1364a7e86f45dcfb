pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod sim;

pub use config::SimConfig;
pub use crate::core::{Pid, SchedEvent, Ticks};
pub use error::{InputError, SimError};
pub use sim::{Process, ProcessStats, Report, Sim, simulate};

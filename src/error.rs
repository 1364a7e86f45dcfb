use std::{io, path::PathBuf};

use thiserror::Error;

use crate::core::{Pid, Ticks};

/// Caller contract violations detected before a simulation starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Process set is empty")]
    EmptyProcessSet,

    #[error("Quantum must be at least 1, got {0}")]
    InvalidQuantum(Ticks),

    #[error(
        "Arrivals must be sorted: process {pid} at index {index} arrives at {arrival}, before {previous}"
    )]
    UnsortedArrivals {
        index: usize,
        pid: Pid,
        arrival: Ticks,
        previous: Ticks,
    },

    #[error("Duplicate process id {0}")]
    DuplicatePid(Pid),

    #[error("Process {0} has a zero burst time")]
    ZeroBurst(Pid),
}

/// Failures while loading the process list or the quantum.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Reached end of input while looking for {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("Integer at byte offset {offset} does not fit in 32 bits")]
    Overflow { offset: usize },

    #[error("Input declares zero processes")]
    NoProcesses,

    #[error("Process {0} has a zero burst time")]
    ZeroBurst(Pid),

    #[error("Invalid quantum {0:?}: expected a positive decimal integer")]
    InvalidQuantum(String),
}

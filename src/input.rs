//! Loading of process lists and quantum values.
//!
//! The process file is a loose integer stream: every maximal run of ASCII
//! digits is one integer and anything else is a delimiter. The first integer
//! is the process count, followed by `pid arrival burst` for each process.

use std::{fs, path::Path};

use crate::{
    core::{Pid, Ticks},
    error::InputError,
    sim::Process,
};

struct IntScanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> IntScanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn next_int(&mut self, expected: &'static str) -> Result<u32, InputError> {
        while self.pos < self.data.len() && !self.data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == self.data.len() {
            return Err(InputError::UnexpectedEof { expected });
        }

        let offset = self.pos;
        let mut value: u32 = 0;
        while let Some(&c) = self.data.get(self.pos) {
            if !c.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(c - b'0')))
                .ok_or(InputError::Overflow { offset })?;
            self.pos += 1;
        }
        Ok(value)
    }
}

pub fn parse_processes(text: &str) -> Result<Vec<Process>, InputError> {
    parse_process_bytes(text.as_bytes())
}

/// Raw-byte form of [`parse_processes`]; the input need not be UTF-8.
pub fn parse_process_bytes(data: &[u8]) -> Result<Vec<Process>, InputError> {
    let mut scanner = IntScanner::new(data);

    let count = scanner.next_int("process count")?;
    if count == 0 {
        return Err(InputError::NoProcesses);
    }

    // The declared count is untrusted; a record needs at least 5 bytes
    let mut processes = Vec::with_capacity((count as usize).min(data.len() / 5));
    for _ in 0..count {
        let pid = Pid(scanner.next_int("process id")?);
        let arrival_time = Ticks::from(scanner.next_int("arrival time")?);
        let burst_time = Ticks::from(scanner.next_int("burst time")?);
        if burst_time == 0 {
            return Err(InputError::ZeroBurst(pid));
        }
        processes.push(Process {
            pid,
            arrival_time,
            burst_time,
        });
    }

    Ok(processes)
}

pub fn load_processes(path: impl AsRef<Path>) -> Result<Vec<Process>, InputError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_process_bytes(&data)
}

/// Strict: only ASCII digits, and the value must be at least 1.
pub fn parse_quantum(s: &str) -> Result<Ticks, InputError> {
    let invalid = || InputError::InvalidQuantum(s.to_string());

    if s.is_empty() || !s.bytes().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    match s.parse::<Ticks>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(quantum) => Ok(quantum),
    }
}

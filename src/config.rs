use crate::{core::Ticks, error::SimError};

/// Simulation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Maximum CPU time granted per dispatch
    pub quantum: Ticks,

    /// Assert queue invariants after every step
    pub check_invariants: bool,
}

impl SimConfig {
    /// Create a configuration for the given quantum
    pub fn new(quantum: Ticks) -> Result<Self, SimError> {
        if quantum == 0 {
            return Err(SimError::InvalidQuantum(quantum));
        }
        Ok(Self {
            quantum,
            check_invariants: cfg!(debug_assertions),
        })
    }

    /// Enable/disable invariant checks
    pub fn with_invariant_checks(mut self, enable: bool) -> Self {
        self.check_invariants = enable;
        self
    }
}

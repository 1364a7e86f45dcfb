pub mod driver;
pub mod process;
pub mod report;
pub mod workload;

pub use driver::{Sim, simulate};
pub use process::{Process, ProcessStats};
pub use report::Report;
pub use workload::bernoulli_processes;

use std::{env, process::ExitCode};

use rr_model::{
    Report, Sim, SimConfig,
    input::{load_processes, parse_quantum},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: rr_model <input-file> <quantum>";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RR_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [path, quantum] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(path, quantum) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, quantum: &str) -> Result<Report, Box<dyn std::error::Error>> {
    let processes = load_processes(path)?;
    let quantum = parse_quantum(quantum)?;
    let config = SimConfig::new(quantum)?;

    // Per-event logging comes from the observer at `trace` level
    Ok(Sim::new(processes, config)?.run())
}

fn print_report(report: &Report) {
    println!("Average waiting time: {:.2}", report.average_waiting_time());
    println!("Average response time: {:.2}", report.average_response_time());

    debug!(
        "Average turnaround time: {:.2} ticks",
        report.average_turnaround_time()
    );
    debug!("Longest wait: {:.0} ticks", report.max_waiting_time());
}

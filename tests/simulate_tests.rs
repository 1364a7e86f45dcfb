use std::{cell::RefCell, rc::Rc};

use rr_model::{
    Pid, Process, Report, SchedEvent, Sim, SimConfig, SimError, Ticks, sim::bernoulli_processes,
    simulate,
};

fn procs(list: &[(u32, Ticks, Ticks)]) -> Vec<Process> {
    list.iter()
        .map(|&(pid, arrival, burst)| Process::new(pid, arrival, burst))
        .collect()
}

fn run(list: &[(u32, Ticks, Ticks)], quantum: Ticks) -> Report {
    let config = SimConfig::new(quantum)
        .unwrap()
        .with_invariant_checks(true);
    Sim::new(procs(list), config).unwrap().run()
}

#[test]
fn late_arrival_mid_slice() {
    let report = run(&[(1, 0, 5), (2, 1, 3)], 2);

    let p1 = report.stats(Pid(1)).unwrap();
    let p2 = report.stats(Pid(2)).unwrap();
    assert_eq!((p1.response, p1.waiting), (0, 3));
    assert_eq!((p2.response, p2.waiting), (1, 2));
    assert_eq!(report.averages(), (2.5, 0.5));
    assert_eq!(p2.completion, 7);
    assert_eq!(p1.completion, 8);
}

#[test]
fn single_process_never_waits() {
    assert_eq!(simulate(&procs(&[(1, 0, 10)]), 3).unwrap(), (0.0, 0.0));

    let report = run(&[(1, 0, 10)], 3);
    assert_eq!(report.processes[0].dispatches, 4);
    assert_eq!(report.preemptions, 3);
}

#[test]
fn single_process_within_one_quantum() {
    let report = run(&[(1, 4, 6)], 6);
    let p = &report.processes[0];
    assert_eq!((p.waiting, p.response), (0, 0));
    assert_eq!(p.completion, 10);
    assert_eq!(report.preemptions, 0);
}

#[test]
fn simultaneous_arrivals_keep_input_order() {
    assert_eq!(
        simulate(&procs(&[(1, 0, 4), (2, 0, 4)]), 4).unwrap(),
        (2.0, 2.0)
    );

    let report = run(&[(1, 0, 4), (2, 0, 4)], 4);
    let p2 = report.stats(Pid(2)).unwrap();
    assert_eq!((p2.response, p2.waiting), (4, 4));
}

#[test]
fn ties_are_not_reordered_by_pid_or_burst() {
    let report = run(&[(5, 0, 3), (1, 0, 1)], 1);

    assert_eq!(report.stats(Pid(5)).unwrap().response, 0);
    assert_eq!(report.stats(Pid(1)).unwrap().response, 1);
    assert_eq!(report.processes[0].pid, Pid(5));
}

#[test]
fn arrival_at_slice_end_queues_behind_preempted_process() {
    let report = run(&[(1, 0, 4), (2, 2, 1)], 2);
    let p2 = report.stats(Pid(2)).unwrap();
    assert_eq!(report.stats(Pid(1)).unwrap().completion, 4);
    assert_eq!((p2.response, p2.waiting, p2.completion), (2, 2, 5));
}

#[test]
fn arrival_inside_slice_queues_ahead_of_preempted_process() {
    let report = run(&[(1, 0, 4), (2, 1, 1)], 2);
    let p2 = report.stats(Pid(2)).unwrap();
    assert_eq!((p2.response, p2.waiting, p2.completion), (1, 0, 3));
    assert_eq!(report.stats(Pid(1)).unwrap().completion, 5);
}

#[test]
fn idle_gap_is_skipped() {
    let config = SimConfig::new(2).unwrap();
    let mut sim = Sim::new(procs(&[(1, 0, 2), (2, 10, 3)]), config).unwrap();

    let mut events = Vec::new();
    while !sim.all_completed() {
        events.extend(sim.step());
    }

    assert!(events.contains(&(2, SchedEvent::Idle { until: 10 })));
    assert!(events.contains(&(
        13,
        SchedEvent::Retired {
            pid: Pid(2),
            waiting: 0,
            response: 0
        }
    )));
    assert_eq!(sim.core.now(), 13);
}

#[test]
fn large_quantum_degrades_to_fifo() {
    let report = run(&[(1, 0, 3), (2, 1, 2), (3, 2, 4), (4, 9, 1)], 100);

    assert_eq!(report.preemptions, 0);
    assert!(report.processes.iter().all(|p| p.dispatches == 1));

    let completions: Vec<_> = report.processes.iter().map(|p| p.completion).collect();
    assert_eq!(completions, vec![3, 5, 9, 10]);
    let responses: Vec<_> = report.processes.iter().map(|p| p.response).collect();
    assert_eq!(responses, vec![0, 2, 3, 0]);
}

#[test]
fn repeated_runs_are_identical() {
    let workload = bernoulli_processes(400, 0.3, 0.4, 2, 7, 9);
    let a = simulate(&workload, 3).unwrap();
    let b = simulate(&workload, 3).unwrap();
    assert_eq!(a.0.to_bits(), b.0.to_bits());
    assert_eq!(a.1.to_bits(), b.1.to_bits());
}

#[test]
fn timing_invariants_hold_on_random_workloads() {
    for seed in 0..16 {
        let workload = bernoulli_processes(250, 0.35, 0.3, 1, 9, seed);
        if workload.is_empty() {
            continue;
        }
        for quantum in 1..=6 {
            let config = SimConfig::new(quantum)
                .unwrap()
                .with_invariant_checks(true);
            let report = Sim::new(workload.clone(), config).unwrap().run();
            let (avg_wait, avg_resp) = report.averages();
            assert!(avg_wait >= 0.0 && avg_resp >= 0.0);

            for p in &report.processes {
                assert_eq!(p.cpu_time, p.burst_time, "seed {seed} q {quantum}");
                assert!(p.turnaround() >= p.burst_time);
                assert!(p.response + p.burst_time <= p.turnaround());
                assert_eq!(p.dispatches, p.burst_time.div_ceil(quantum));
            }

            let n = report.processes.len() as u64;
            assert_eq!(report.preemptions, report.dispatches - n);
            assert_eq!(
                report.total_waiting,
                report.processes.iter().map(|p| p.waiting).sum::<u64>()
            );
        }
    }
}

#[test]
fn tracer_sees_every_step_event() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let config = SimConfig::new(2).unwrap();
    let mut sim = Sim::new(procs(&[(1, 0, 5), (2, 1, 3), (3, 12, 1)]), config)
        .unwrap()
        .with_tracer(move |t, event| sink.borrow_mut().push((t, event.clone())));

    let mut stepped = Vec::new();
    while !sim.all_completed() {
        stepped.extend(sim.step());
    }

    assert_eq!(*seen.borrow(), stepped);

    let admitted: Vec<_> = stepped
        .iter()
        .filter(|(_, e)| matches!(e, SchedEvent::Admitted { .. }))
        .map(|(t, e)| (*t, e.pid().unwrap()))
        .collect();
    assert_eq!(admitted, vec![(0, Pid(1)), (1, Pid(2)), (12, Pid(3))]);

    let first_runs = stepped
        .iter()
        .filter(|(_, e)| matches!(e, SchedEvent::Dispatched { first_run: true, .. }))
        .count();
    assert_eq!(first_runs, 3);
}

#[test]
fn step_after_completion_is_a_no_op() {
    let config = SimConfig::new(1).unwrap();
    let mut sim = Sim::new(procs(&[(1, 0, 1)]), config).unwrap();
    sim.step();
    assert!(sim.all_completed());
    assert!(sim.step().is_empty());
}

#[test]
fn contract_violations_are_distinct_errors() {
    assert_eq!(simulate(&[], 2), Err(SimError::EmptyProcessSet));
    assert_eq!(
        simulate(&procs(&[(1, 0, 1)]), 0),
        Err(SimError::InvalidQuantum(0))
    );
    assert_eq!(
        simulate(&procs(&[(1, 3, 1), (2, 1, 1)]), 1),
        Err(SimError::UnsortedArrivals {
            index: 1,
            pid: Pid(2),
            arrival: 1,
            previous: 3
        })
    );
    assert_eq!(
        simulate(&procs(&[(1, 0, 1), (1, 2, 1)]), 1),
        Err(SimError::DuplicatePid(Pid(1)))
    );
    assert_eq!(
        simulate(&procs(&[(1, 0, 1), (2, 2, 0)]), 1),
        Err(SimError::ZeroBurst(Pid(2)))
    );
}

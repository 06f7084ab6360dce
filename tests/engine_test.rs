//! End-to-end tests for benchmark runs

use parallel_sort_bench::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

fn reversed(n: i64) -> TypedDataset {
    TypedDataset::Int64((0..n).rev().collect())
}

#[test]
fn test_generated_run_sorts_everything() {
    let data = generate_dataset(10, DataKind::Int64).expect("Failed to generate");
    assert_eq!(data.len(), 10);

    let mut run = SortRun::start_default(data).expect("Failed to start run");
    while !run.poll().all_done {
        thread::sleep(Duration::from_millis(1));
    }

    for algorithm in SortAlgorithm::ALL {
        let sorted = run.snapshot_result(algorithm).expect("Task not completed");
        assert!(sorted.is_sorted(), "{} output not sorted", algorithm);
        assert_eq!(sorted.len(), 10);
    }
}

#[test]
fn test_empty_string_run_completes() {
    let mut run = SortRun::start_default(TypedDataset::empty(DataKind::String)).unwrap();
    let snapshot = run.wait();

    assert!(snapshot.all_completed());
    for task in snapshot.tasks.iter() {
        assert!(task.elapsed < Duration::from_secs(1));
    }
    for index in 0..SortAlgorithm::COUNT {
        assert!(run.snapshot_result_at(index).unwrap().is_empty());
    }
}

#[test]
fn test_duplicates_sorted_by_every_worker() {
    let mut run = SortRun::start_default(TypedDataset::Int64(vec![5, 3, 3, 1])).unwrap();
    run.wait();
    for algorithm in SortAlgorithm::ALL {
        assert_eq!(
            run.snapshot_result(algorithm).unwrap(),
            TypedDataset::Int64(vec![1, 3, 3, 5])
        );
    }
}

#[test]
fn test_every_kind_at_ten_thousand() {
    for kind in DataKind::ALL {
        let data = generate_dataset(10_000, kind).unwrap();
        let mut run = SortRun::start_default(data).unwrap();
        let snapshot = run.wait();
        assert!(snapshot.all_completed(), "{} run did not complete", kind);

        for algorithm in SortAlgorithm::ALL {
            let sorted = run.snapshot_result(algorithm).unwrap();
            assert_eq!(sorted.kind(), kind);
            assert_eq!(sorted.len(), 10_000);
            assert!(sorted.is_sorted(), "{} / {} not sorted", kind, algorithm);
        }
    }
}

#[test]
fn test_original_is_never_modified() {
    let data = generate_dataset(500, DataKind::String).unwrap();
    let before = data.clone();

    let mut run = SortRun::start_default(data).unwrap();
    run.wait();
    assert_eq!(run.original(), &before);

    let mut a = run.snapshot_result(SortAlgorithm::Bubble).unwrap();
    let b = run.snapshot_result(SortAlgorithm::Quick).unwrap();
    assert_eq!(a, b);

    if let TypedDataset::String(values) = &mut a {
        values[0].push_str("mutated");
        values.reverse();
    }
    assert_ne!(a, b);
    assert_eq!(run.snapshot_result(SortAlgorithm::Bubble).unwrap(), b);
    assert_eq!(run.original(), &before);
}

#[test]
fn test_snapshot_before_completion_is_rejected() {
    let mut run = SortRun::start_default(reversed(20_000)).unwrap();

    let err = run.snapshot_result(SortAlgorithm::Bubble).unwrap_err();
    assert!(matches!(err, BenchError::PrematureSnapshot { .. }));

    run.cancel();
}

#[test]
fn test_running_elapsed_is_monotonic() {
    let mut run = SortRun::start_default(reversed(20_000)).unwrap();

    let mut last = Duration::ZERO;
    for _ in 0..20 {
        let snapshot = run.poll();
        let bubble = snapshot.task(SortAlgorithm::Bubble);
        assert!(bubble.elapsed >= last);
        last = bubble.elapsed;
        thread::sleep(Duration::from_millis(2));
    }

    run.cancel();
    let done = run.wait();
    let frozen = done.task(SortAlgorithm::Bubble).elapsed;
    thread::sleep(Duration::from_millis(10));
    assert_eq!(run.poll().task(SortAlgorithm::Bubble).elapsed, frozen);
}

#[test]
fn test_completed_times_are_final() {
    let mut run = SortRun::start_default(generate_dataset(200, DataKind::Float64).unwrap()).unwrap();
    let first = run.wait();
    thread::sleep(Duration::from_millis(10));
    let second = run.poll();

    assert_eq!(first.tasks, second.tasks);
    assert!(second.tasks.iter().all(|t| t.elapsed_seconds() >= 0.0));
}

#[test]
fn test_progress_samples_recorded_while_running() {
    let config = EngineConfig::new().with_progress_sampling(Duration::from_millis(1), 5);
    let mut run = SortRun::start(reversed(20_000), config).unwrap();

    for _ in 0..15 {
        run.poll();
        thread::sleep(Duration::from_millis(3));
    }

    let samples = run.progress_samples(SortAlgorithm::Bubble).to_vec();
    assert!(!samples.is_empty());
    assert!(samples.len() <= 5);
    assert!(samples.windows(2).all(|w| w[0] < w[1]));

    run.cancel();
}

#[test]
fn test_display_result_follows_selection() {
    let config = EngineConfig::new().with_selected(SortAlgorithm::Insertion);
    let mut run = SortRun::start(TypedDataset::Char(vec!['q', 'a', 'm']), config).unwrap();
    assert_eq!(run.selected(), SortAlgorithm::Insertion);

    run.wait();
    assert_eq!(
        run.display_result(),
        Some(&TypedDataset::Char(vec!['a', 'm', 'q']))
    );
}

#[test]
fn test_run_ids_are_unique() {
    let mut a = SortRun::start_default(TypedDataset::Int64(vec![1])).unwrap();
    let mut b = SortRun::start_default(TypedDataset::Int64(vec![1])).unwrap();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.wait().run_id, a.id());
    b.wait();
}

#[test]
fn test_wait_timeout_expires_then_completes() {
    let mut run = SortRun::start_default(reversed(20_000)).unwrap();
    assert!(run.wait_timeout(Duration::from_millis(1)).is_none());

    run.cancel();
    let snapshot = run.wait_timeout(Duration::from_secs(10)).expect("Run did not stop");
    assert!(snapshot.all_done);
}

#[test]
fn test_drop_stops_workers_promptly() {
    let run = SortRun::start_default(reversed(30_000)).unwrap();
    let start = Instant::now();
    drop(run);
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut run = SortRun::start_default(TypedDataset::Int64(vec![2, 1])).unwrap();
    let snapshot = run.wait();
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"all_done\":true"));
    assert!(json.contains("\"Completed\""));
}

//! Benchmark run demonstration
//!
//! Generates one dataset per kind, races the four algorithms on it while
//! printing live progress, then records the timings and saves a report.
//!
//! ```text
//! cargo run --example benchmark_run -- 5000
//! RUST_LOG=debug cargo run --example benchmark_run
//! ```

use log::LevelFilter;
use parallel_sort_bench::prelude::*;
use std::io::Write;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let size = std::env::args()
        .nth(1)
        .map(|arg| {
            arg.parse::<usize>()
                .map_err(|_| BenchError::other(format!("not a dataset size: {}", arg)))
        })
        .transpose()?
        .unwrap_or(3_000);

    println!("=== Parallel Sort Benchmark ({} elements) ===\n", size);

    let mut history = PerformanceHistory::new();
    let config = EngineConfig::new().with_time_limit(Duration::from_secs(60));

    for kind in DataKind::ALL {
        println!("{}:", kind);
        let data = generate_dataset(size, kind)?;
        let mut run = SortRun::start(data, config.clone())?;

        loop {
            let snapshot = run.poll();
            let line: Vec<String> = snapshot
                .tasks
                .iter()
                .map(|t| format!("{} {}", t.algorithm.name(), format_elapsed(t.elapsed)))
                .collect();
            print!("\r   {}", line.join(" | "));
            std::io::stdout().flush()?;
            if snapshot.all_done {
                println!();
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }

        match history.record_run(&mut run) {
            Ok(entry) => println!("   ✓ fastest: {}\n", entry.fastest()),
            Err(e) => println!("   ✗ not recorded: {}\n", e),
        }

        if kind == DataKind::String {
            let path = std::env::temp_dir().join("sort_results.txt");
            BenchReport::from_run(&mut run).save(&path)?;
            println!("Report saved to {}", path.display());
        }
    }

    println!("\n=== History ===");
    for entry in history.entries() {
        let times: Vec<String> = SortAlgorithm::ALL
            .iter()
            .map(|a| format!("{}: {}", a, format_elapsed(entry.time(*a))))
            .collect();
        println!("{:>6} {:<10} {}", entry.dataset_size, entry.kind, times.join(", "));
    }

    Ok(())
}

// src/performance_test.rs
// Measures create throughput of the file-backed store and checks that ids stay unique
// when many records are created within the same millisecond.
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use proverb_store::infra::config;
use proverb_store::{FailurePolicy, Fields, RecordStore};

const WORDS: &[&str] = &[
    "still", "waters", "run", "deep", "haste", "makes", "waste", "a", "stitch", "in", "time",
    "saves", "nine", "every", "cloud", "has", "silver", "lining", "fortune", "favors", "bold",
];

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let num_items = config::perf_items()?;
    println!(
        "--- Record Store Performance Test: creating {} proverbs ---",
        num_items
    );

    let scratch = std::env::temp_dir().join(format!("proverb-store-perf-{}.json", std::process::id()));
    with_scratch(&scratch, || run(&scratch, num_items))
}

/// Runs `work`, then removes the scratch file whether it succeeded or not.
fn with_scratch<T>(scratch: &Path, work: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    let outcome = work();
    std::fs::remove_file(scratch).ok();
    outcome
}

fn run(scratch: &Path, num_items: usize) -> anyhow::Result<()> {
    let store = RecordStore::open(scratch, FailurePolicy::Propagate)?;
    let mut rng = rand::thread_rng();

    // --- Time the main loop: load, append, save for every create ---
    let start_time = Instant::now();

    for i in 0..num_items {
        let text: Vec<&str> = (0..6).filter_map(|_| WORDS.choose(&mut rng).copied()).collect();
        let mut fields = Fields::new();
        fields.insert("text".to_string(), text.join(" ").into());
        fields.insert("seq".to_string(), i.into());
        store.create(fields)?;
    }

    let duration = start_time.elapsed();
    let records = store.list()?;
    let unique: HashSet<i64> = records.iter().map(|r| r.id()).collect();
    let size = std::fs::metadata(scratch).map(|m| m.len()).unwrap_or(0);

    println!("\n--- Results ---");
    println!("Records stored: {}", records.len());
    println!("Unique ids: {}", unique.len());
    println!("File size: {} bytes", size);
    println!("\nTotal time to create {} items: {} ms", num_items, duration.as_millis());
    println!(
        "Average time per create: {:.2} µs (microseconds)",
        duration.as_micros() as f64 / num_items.max(1) as f64
    );
    println!("\nNote: every create rewrites the whole file, so cost grows with the collection.");

    if unique.len() != records.len() || records.len() != num_items {
        anyhow::bail!("id collision or lost record detected");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, with_scratch};
    use tempfile::tempdir;

    #[test]
    fn scratch_file_removed_after_success() {
        let temp = tempdir().expect("tempdir");
        let scratch = temp.path().join("perf.json");

        with_scratch(&scratch, || run(&scratch, 5)).expect("run");
        assert!(!scratch.exists());
    }

    #[test]
    fn scratch_file_removed_when_a_create_fails() {
        let temp = tempdir().expect("tempdir");
        let scratch = temp.path().join("perf.json");
        // Unparseable content makes the first create fail under Propagate.
        std::fs::write(&scratch, "not json").expect("seed");

        assert!(with_scratch(&scratch, || run(&scratch, 5)).is_err());
        assert!(!scratch.exists());
    }
}

use std::collections::HashSet;

use proverb_store::infra::config;
use proverb_store::{FailurePolicy, RecordStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--init-if-missing]\n\
         \n\
         Reads env vars (all optional):\n\
           PROVERBS_PATH, BIND_ADDR, STORAGE_FAILURE_POLICY\n"
    );
    std::process::exit(2);
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let init_if_missing = args.iter().any(|a| a == "--init-if-missing");

    // Force-read config (nice error messages if invalid)
    let path = config::proverbs_path();
    let bind_addr = config::bind_addr()?;
    let policy = config::storage_failure_policy()?;

    println!("> Preflight:");
    println!("  PROVERBS_PATH={}", path.display());
    println!("  BIND_ADDR={}", bind_addr);
    println!("  STORAGE_FAILURE_POLICY={:?}", policy);

    // Always check strictly, whatever policy the server will run with.
    let store = RecordStore::open(&path, FailurePolicy::Propagate)?;

    if !path.exists() {
        if init_if_missing {
            println!("  Storage file missing -> writing empty collection...");
            store.save(&[])?;
            println!("  Storage file initialized.");
        } else {
            println!("  Storage file missing; the server will start with an empty collection.");
            println!("  Re-run with --init-if-missing to create it now.");
        }
    }

    let records = store.load()?;
    println!("  Records: {}", records.len());

    let mut seen = HashSet::new();
    let duplicates: Vec<i64> = records
        .iter()
        .map(|r| r.id())
        .filter(|id| !seen.insert(*id))
        .collect();
    if !duplicates.is_empty() {
        return Err(anyhow::anyhow!(
            "Duplicate record ids in {}: {:?}",
            path.display(),
            duplicates
        ));
    }
    println!("  All record ids are unique.");

    println!("> Preflight OK.");
    Ok(())
}

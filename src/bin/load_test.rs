//! Load Testing Tool
//!
//! Hammers one account with concurrent transaction creates and checks that
//! the final balance equals the sum of the recorded amounts.
//!
//! Run with: cargo run --bin load_test --release -- --ops 1000 --workers 8

use std::time::Instant;

use sqlx::postgres::PgPoolOptions;

use waste_bank::{CreateTransactionCommand, Ledger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let ops: u64 = flag(&args, "--ops").unwrap_or(1000);
    let workers: u64 = flag(&args, "--workers").unwrap_or(8);
    let ops_per_worker = ops / workers.max(1);

    let database_url = std::env::var("DATABASE_URL")?;

    println!(
        "Load Test - {} creates across {} workers",
        ops_per_worker * workers,
        workers
    );
    println!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(workers as u32 + 2)
        .connect(&database_url)
        .await?;

    let account_id = uuid::Uuid::new_v4();
    sqlx::query("INSERT INTO accounts (id, balance) VALUES ($1, 0)")
        .bind(account_id)
        .execute(&pool)
        .await?;

    let ledger = Ledger::new(pool.clone());
    let start = Instant::now();

    let mut handles = Vec::new();
    for worker in 0..workers {
        let ledger = ledger.clone();
        handles.push(tokio::spawn(async move {
            let mut written = 0i64;
            let mut failures = 0u64;

            for i in 0..ops_per_worker {
                // Deterministic pseudo-varied amounts, all positive.
                let amount = ((worker * 31 + i * 7) % 97 + 1) as i64;
                let command = CreateTransactionCommand::new(account_id, amount);

                match ledger.create(&command).await {
                    Ok(_) => written += amount,
                    Err(_) => failures += 1,
                }
            }

            (written, failures)
        }));
    }

    let mut expected = 0i64;
    let mut failures = 0u64;
    for handle in handles {
        let (written, failed) = handle.await?;
        expected += written;
        failures += failed;
    }

    let elapsed = start.elapsed();
    let total = ops_per_worker * workers;
    let rate = (total - failures) as f64 / elapsed.as_secs_f64();

    let balance: i64 = sqlx::query_scalar("SELECT balance FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_one(&pool)
        .await?;

    println!("\n=== Load Test Results ===");
    println!("Total creates: {}", total);
    println!("Failed: {}", failures);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Rate: {:.0} ops/sec", rate);
    println!("Expected balance: {}", expected);
    println!("Actual balance:   {}", balance);

    if balance != expected {
        anyhow::bail!("balance drifted from the sum of recorded amounts");
    }

    println!("Balance matches the sum of recorded amounts");
    Ok(())
}

fn flag(args: &[String], name: &str) -> Option<u64> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

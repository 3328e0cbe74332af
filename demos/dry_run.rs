//! Dry run against the in-memory simulator.
//!
//! Acquires the stock line bundle, drives two full half-step cycles and
//! prints every pattern that reached the (simulated) lines, then shows a
//! failed acquisition cleaning up after itself.

use core::time::Duration;

use rotating_table::lines::sim::FailPoint;
use rotating_table::{drive, BundleConfig, LineBundle, SimProvider, StdDelay};

fn main() {
    println!("=== Rotating Table Dry Run ===\n");

    let provider = SimProvider::new();
    let config = BundleConfig::default();

    let bundle = LineBundle::acquire(&provider, &config).expect("Failed to acquire lines");
    println!(
        "Acquired lines {:?} on {} as '{}'",
        bundle.offsets().as_array(),
        config.chip_path,
        bundle.consumer()
    );
    println!("Live resources: {}", provider.live_count());

    drive(&bundle, 0, 16, &mut StdDelay, Duration::from_millis(2)).expect("Drive failed");

    println!("\nWrites (A B C D):");
    for (i, values) in provider.writes().iter().enumerate() {
        let bits: String = values.iter().map(|&on| if on { '1' } else { '0' }).collect();
        println!("  step {:>2}: {}", i, bits);
    }

    bundle.release();
    println!("\nAfter release, live resources: {}", provider.live_count());

    println!("\n--- Injected failure at the final request ---");
    provider.fail_at(FailPoint::RequestLines);
    match LineBundle::acquire(&provider, &config) {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Acquisition failed ({}): {}", e.stage(), e),
    }
    println!("Freed in order: {:?}", provider.freed());
    println!("Live resources: {}", provider.live_count());
}

use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::{step, OnFailure, EMBEDDED_TARGET};

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking driver builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    // The driver crates must stay no_std: build them for the MCU target.
    step(
        "Checking platform (no_std)",
        &["check", "-p", "platform", "--target", EMBEDDED_TARGET, "--no-default-features"],
        OnFailure::Abort,
    )?;
    step(
        "Checking es9038q2m (no_std)",
        &["check", "-p", "es9038q2m", "--target", EMBEDDED_TARGET, "--no-default-features"],
        OnFailure::Abort,
    )?;
    step(
        "Checking es9038q2m with defmt logging",
        &["check", "-p", "es9038q2m", "--target", EMBEDDED_TARGET, "--features", "defmt"],
        OnFailure::Abort,
    )?;
    step(
        "Checking es9038q2m with tracing logging (host)",
        &["check", "-p", "es9038q2m", "--features", "tracing"],
        OnFailure::Abort,
    )?;

    // Lints and formatting are reported, not enforced.
    step(
        "Running clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;
    if step("Checking formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// Embedded target the driver crates must build for.
pub const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

/// What a failing step does to the overall run.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Stop and report an error
    Abort,
    /// Print a warning and carry on
    Warn,
}

/// Run `cargo <args>` with a progress line and a timed result line.
///
/// Returns the captured output when the command succeeded, `None` when it
/// failed with [`OnFailure::Warn`].
pub fn step(label: &str, args: &[&str], on_failure: OnFailure) -> Result<Option<Output>> {
    step_with_env(label, args, &[], on_failure)
}

/// [`step`] with extra environment variables.
pub fn step_with_env(
    label: &str,
    args: &[&str],
    env: &[(&str, &str)],
    on_failure: OnFailure,
) -> Result<Option<Output>> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .envs(env.iter().copied())
        .output()
        .with_context(|| format!("Failed to run cargo for: {label}"))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
        println!();
        return Ok(Some(output));
    }

    match on_failure {
        OnFailure::Abort => {
            eprintln!("{}", format!("  ✗ {label} failed").red().bold());
            eprintln!();
            print_indented(&output.stdout);
            print_indented(&output.stderr);
            anyhow::bail!("{label} failed");
        }
        OnFailure::Warn => {
            eprintln!("{}", format!("  ⚠ {label} reported problems").yellow().bold());
            eprintln!();
            print_indented(&output.stderr);
            println!();
            Ok(None)
        }
    }
}

/// Summary line of a libtest run, e.g. `ok. 12 passed; 0 failed; ...`.
pub fn test_summary(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut passed = 0u64;
    let mut failed = 0u64;
    for line in stdout.lines() {
        let Some(result) = line.split("test result:").nth(1) else {
            continue;
        };
        passed = passed.saturating_add(count_before(result, " passed"));
        failed = failed.saturating_add(count_before(result, " failed"));
    }
    format!("{passed} passed, {failed} failed")
}

fn count_before(line: &str, marker: &str) -> u64 {
    line.split(';')
        .find(|part| part.contains(marker))
        .and_then(|part| part.split_whitespace().rev().nth(1))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn print_indented(bytes: &[u8]) {
    for line in String::from_utf8_lossy(bytes).lines() {
        eprintln!("  {line}");
    }
}

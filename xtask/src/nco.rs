use anyhow::{Context, Result};
use colored::Colorize;
use es9038q2m::clock_math::{effective_rate_millihertz, nco_ratio, nco_writes};
use platform::audio::STANDARD_RATES;

// Millihertz split and comparison on values far below u64::MAX.
#[allow(clippy::arithmetic_side_effects)]
pub fn run(clock: u32, rate: Option<u32>) -> Result<()> {
    println!();
    println!(
        "{}",
        format!("🎛  NCO values for a {clock} Hz reference clock").cyan().bold()
    );
    println!();
    println!(
        "  {:>8}  {:>12}  {:>10}  {:<31}  {:>14}",
        "rate", "ratio", "hex", "NCO_4..NCO_1", "actual (Hz)"
    );

    let rates: Vec<u32> = match rate {
        Some(rate) => vec![rate],
        None => STANDARD_RATES.to_vec(),
    };

    for rate in rates {
        let ratio = nco_ratio(rate, clock).context("reference clock must be non-zero")?;
        let bytes = nco_writes(ratio)
            .iter()
            .map(|(reg, byte)| format!("{reg:#04x}={byte:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        let actual = effective_rate_millihertz(ratio, clock);
        let line = format!(
            "  {rate:>8}  {ratio:>12}  {ratio:#010x}  {bytes:<31}  {:>10}.{:03}",
            actual / 1000,
            actual % 1000
        );
        if u64::from(rate) * 1000 == actual {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }

    println!();
    Ok(())
}

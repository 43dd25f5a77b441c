use anyhow::Result;
use colored::Colorize;

use crate::cargo::{step_with_env, OnFailure};

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    // Broken intra-doc links fail the build.
    let mut args = vec![
        "doc",
        "--no-deps",
        "-p",
        "platform",
        "-p",
        "es9038q2m",
        "--features",
        "es9038q2m/tracing",
    ];
    if open {
        args.push("--open");
    }
    step_with_env(
        "Building rustdoc",
        &args,
        &[("RUSTDOCFLAGS", "-D warnings")],
        OnFailure::Abort,
    )?;

    if !open {
        println!(
            "   {}",
            "Open target/doc/es9038q2m/index.html in your browser".dimmed()
        );
        println!(
            "   {}",
            "Or run 'cargo run -p xtask -- doc --open'".dimmed()
        );
        println!();
    }

    Ok(())
}

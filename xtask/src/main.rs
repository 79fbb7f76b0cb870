use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

/// Library modules whose unit tests can be run on their own
const MODULES: [&str; 3] = ["display", "timing", "input"];

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development tasks for nes-hal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headless CI: fmt check, clippy, tests, bench build (never opens a window)
    Ci,
    /// Run tests
    Test {
        /// Only the display module's unit tests
        #[arg(long)]
        display: bool,
        /// Only the timing module's unit tests
        #[arg(long)]
        timing: bool,
        /// Only the input module's unit tests
        #[arg(long)]
        input: bool,
    },
    /// Run the flush benchmarks
    Bench,
    /// Open the demo window
    Demo {
        /// Configuration file handed to the demo (defaults to nes_hal.toml)
        #[arg(long)]
        config: Option<String>,
        #[arg(long)]
        release: bool,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Ci => ci(),
        Commands::Test {
            display,
            timing,
            input,
        } => {
            let selected: Vec<&str> = MODULES
                .into_iter()
                .zip([display, timing, input])
                .filter_map(|(module, on)| on.then_some(module))
                .collect();
            test(&selected)
        }
        Commands::Bench => cargo("Benchmarks", &["bench", "--bench", "flush_bench"]),
        Commands::Demo { config, release } => demo(config.as_deref(), release),
    }
}

/// Every step runs without a display: the integration tests use a mock host
/// and the demo binary is only built, never started.
fn ci() -> Result<()> {
    println!("{}", "=== nes-hal CI ===".bold().blue());
    let start = Instant::now();

    cargo("Format", &["fmt", "--all", "--", "--check"])?;
    cargo(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )?;
    cargo("Unit + integration tests", &["test", "--workspace"])?;
    cargo("Bench build", &["bench", "--no-run"])?;

    println!(
        "{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn test(modules: &[&str]) -> Result<()> {
    if modules.is_empty() {
        return cargo("All tests", &["test", "--workspace"]);
    }

    let failed: Vec<&str> = modules
        .iter()
        .copied()
        .filter(|module| {
            let label = format!("{} unit tests", module);
            cargo(&label, &["test", "--lib", &format!("{}::", module)]).is_err()
        })
        .collect();

    if !failed.is_empty() {
        bail!("tests failed in: {}", failed.join(", "));
    }
    Ok(())
}

fn demo(config: Option<&str>, release: bool) -> Result<()> {
    let mut args = vec!["run", "--bin", "nes-hal"];
    if release {
        args.push("--release");
    }
    if let Some(config) = config {
        if !Path::new(config).is_file() {
            bail!("config file not found: {}", config);
        }
        args.extend(["--", config]);
    }
    cargo("Demo", &args)
}

/// Run `cargo <args>` with inherited output, reporting the step by `label`
fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("{} {}", "→".blue(), label.bold());
    let start = Instant::now();

    let status = Command::new(env!("CARGO"))
        .args(args)
        .status()
        .with_context(|| format!("failed to launch cargo {}", args.join(" ")))?;

    if !status.success() {
        println!("{} {}", "✗".red().bold(), label);
        bail!("cargo {} failed ({})", args.join(" "), status);
    }

    println!(
        "{} {} ({:.2}s)",
        "✓".green().bold(),
        label,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

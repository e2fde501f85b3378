use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Warden workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark suite once per feature configuration and compare
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

/// Baseline name and the `--features` it is built with.
const CONFIGURATIONS: &[(&str, &str)] = &[("plain", ""), ("tracing", "tracing")];

/// The baseline every other configuration is compared against.
const REFERENCE: &str = "plain";

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

#[derive(Deserialize)]
struct BenchmarkInfo {
    throughput: Option<Throughput>,
}

#[derive(Deserialize)]
enum Throughput {
    Elements(f64),
    Bytes(f64),
    BytesDecimal(f64),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running benchmark suite per feature configuration...");

    for (baseline, features) in CONFIGURATIONS {
        println!("\n>>> Benchmarking configuration: {baseline}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");
        cmd.args(["bench", "--bench", "suite", "--no-default-features"]);
        if !features.is_empty() {
            cmd.arg("--features").arg(features);
        }

        // Args for the test runner (Criterion) go after --
        cmd.arg("--");
        cmd.arg("--save-baseline").arg(baseline);

        if quick {
            cmd.args(["--measurement-time", "0.1", "--noplot", "--sample-size", "10"]);
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to run bench for {baseline}"))?;

        if status.success() {
            println!("Finished {baseline} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: Benchmark failed for {baseline}");
        }
    }

    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let mut results = BTreeMap::new();

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(report_path)
        .with_context(|| format!("Failed to create {}", report_path.display()))?;

    writeln!(file, "# Feature Configuration Benchmark Report")?;
    writeln!(file)?;

    write!(file, "| Workload |")?;
    for (baseline, _) in CONFIGURATIONS {
        write!(file, " {baseline} (Ops/s) | vs {REFERENCE} |")?;
    }
    writeln!(file)?;

    write!(file, "|---|")?;
    for _ in CONFIGURATIONS {
        write!(file, "---|---|")?;
    }
    writeln!(file)?;

    for (workload, by_baseline) in &results {
        write!(file, "| {workload} |")?;

        let reference = by_baseline.get(REFERENCE).copied().unwrap_or(0.0);

        for (baseline, _) in CONFIGURATIONS {
            match by_baseline.get(*baseline) {
                Some(&ops) => {
                    let rel = if reference > 0.0 { ops / reference } else { 0.0 };
                    write!(file, " {} | **{rel:.2}x** |", format_ops(ops))?;
                }
                None => write!(file, " N/A | - |")?,
            }
        }
        writeln!(file)?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().and_then(|s| s.to_str()).map(str::to_owned)
}

/// Walks criterion's output. Layout: `.../<workload>/<baseline>/estimates.json`.
fn collect_results(dir: &Path, results: &mut BTreeMap<String, BTreeMap<String, f64>>) -> Result<()> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Ok(());
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(&path, results)?;
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some(baseline_dir) = path.parent() else { continue };
        let Some(workload_dir) = baseline_dir.parent() else { continue };
        let (Some(baseline), Some(workload)) = (file_name(baseline_dir), file_name(workload_dir)) else {
            continue;
        };
        if baseline == "report" || workload == "report" || baseline == "new" || baseline == "base" {
            continue;
        }

        let elements = fs::read_to_string(baseline_dir.join("benchmark.json"))
            .ok()
            .and_then(|content| serde_json::from_str::<BenchmarkInfo>(&content).ok())
            .and_then(|info| info.throughput)
            .map_or(1.0, |t| match t {
                Throughput::Elements(n) | Throughput::Bytes(n) | Throughput::BytesDecimal(n) => n,
            });

        let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let estimates: Estimates =
            serde_json::from_str(&content).with_context(|| format!("Malformed {}", path.display()))?;

        let time_ns = estimates.mean.point_estimate;
        if time_ns > 0.0 {
            results
                .entry(workload)
                .or_default()
                .insert(baseline, elements * 1e9 / time_ns);
        }
    }

    Ok(())
}

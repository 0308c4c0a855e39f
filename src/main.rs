use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::process;

// Use library instead of local modules
use receipt_points::{score_breakdown, validate, PointsBreakdown, Receipt};

const USAGE: &str = "Usage: receipt-points <validate|score|report> <receipt.json>...";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("{USAGE}");
        process::exit(2);
    }

    let files = &args[2..];
    let all_ok = match args[1].as_str() {
        "validate" => run_validate(files)?,
        "score" => run_score(files)?,
        "report" => run_report(files)?,
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if !all_ok {
        process::exit(1);
    }

    Ok(())
}

fn load_receipt(path: &Path) -> Result<Receipt> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    Receipt::from_json(&content).with_context(|| format!("Failed to parse receipt JSON: {:?}", path))
}

/// Validate then score, rendering any failure as a single message
fn evaluate(path: &Path) -> std::result::Result<(Receipt, PointsBreakdown), String> {
    let receipt = load_receipt(path).map_err(|e| format!("{e:#}"))?;
    validate(&receipt).map_err(|e| e.to_string())?;
    let breakdown = score_breakdown(&receipt).map_err(|e| e.to_string())?;
    Ok((receipt, breakdown))
}

fn run_validate(files: &[String]) -> Result<bool> {
    let mut all_ok = true;

    for file in files {
        let path = Path::new(file);
        let outcome = load_receipt(path).and_then(|receipt| validate(&receipt).map_err(Into::into));

        match outcome {
            Ok(()) => println!("✓ {file}"),
            Err(e) => {
                all_ok = false;
                println!("✗ {file}: {e:#}");
            }
        }
    }

    Ok(all_ok)
}

fn run_score(files: &[String]) -> Result<bool> {
    let mut all_ok = true;

    for file in files {
        match evaluate(Path::new(file)) {
            Ok((receipt, breakdown)) => {
                println!("🧾 {file} ({})", receipt.retailer_name());
                for contribution in &breakdown.contributions {
                    println!(
                        "   {:>4}  {}",
                        contribution.points,
                        contribution.rule.description()
                    );
                }
                println!("   ━━━━");
                println!("   {}", breakdown.summary());
            }
            Err(e) => {
                all_ok = false;
                println!("✗ {file}: {e}");
            }
        }
    }

    Ok(all_ok)
}

fn run_report(files: &[String]) -> Result<bool> {
    write_report(files, io::stdout())
}

/// One CSV row per file; failures fill the error column instead of points
fn write_report<W: io::Write>(files: &[String], out: W) -> Result<bool> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["file", "retailer", "purchase_date", "points", "error"])?;

    let mut all_ok = true;

    for file in files {
        match evaluate(Path::new(file)) {
            Ok((receipt, breakdown)) => {
                let points = breakdown.total.to_string();
                writer.write_record([
                    file.as_str(),
                    receipt.retailer_name(),
                    receipt.purchase_date.as_deref().unwrap_or(""),
                    points.as_str(),
                    "",
                ])?;
            }
            Err(e) => {
                all_ok = false;
                writer.write_record([file.as_str(), "", "", "", e.as_str()])?;
            }
        }
    }

    writer.flush().context("Failed to write report")?;
    Ok(all_ok)
}

//! benford CLI - Benford's Law conformance analysis.
//!
//! Decodes a JSON array of raw cells from a file and runs the analysis
//! pipeline over it; the value-extraction duties (spreadsheet columns,
//! request payloads) belong to whatever produced the file.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]

use std::{path::PathBuf, process::ExitCode};

use benford::{
    expected_percentages, AnalysisReport, BenfordAnalyzer, Error, ValidationReport,
};
use clap::{Parser, Subcommand};

/// benford - Benford's Law Conformance Analysis in Pure Rust
#[derive(Parser)]
#[command(name = "benford")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full conformance analysis over a JSON array of values
    Analyze {
        /// Path to a JSON file holding an array of raw cells
        input: PathBuf,
        /// Decimal places for percentage output
        #[arg(long, default_value_t = 2)]
        decimals: u8,
        /// Skip validation; input must already be cleaned non-zero numbers
        #[arg(long)]
        skip_validation: bool,
        /// Significance level for the conformance verdict
        #[arg(long, default_value_t = 0.05)]
        alpha: f64,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Produce a data-quality report without running the statistics
    Validate {
        /// Path to a JSON file holding an array of raw cells
        input: PathBuf,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the theoretical Benford leading-digit percentages
    Expected {
        /// Decimal places for percentage output
        #[arg(long, default_value_t = 2)]
        decimals: u8,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            decimals,
            skip_validation,
            alpha,
            format,
        } => cmd_analyze(&input, decimals, skip_validation, alpha, &format),
        Commands::Validate { input, format } => cmd_validate(&input, &format),
        Commands::Expected { decimals, format } => cmd_expected(decimals, &format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_payload(path: &PathBuf) -> benford::Result<serde_json::Value> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
    Ok(serde_json::from_str(&text)?)
}

fn cmd_analyze(
    input: &PathBuf,
    decimals: u8,
    skip_validation: bool,
    alpha: f64,
    format: &str,
) -> benford::Result<()> {
    let payload = load_payload(input)?;
    let analyzer = BenfordAnalyzer::new()
        .with_percentage_decimals(decimals)
        .with_skip_validation(skip_validation);

    let report = match analyzer.analyze_json(&payload) {
        Ok(report) => report,
        Err(Error::InsufficientData { report }) => {
            // Show what went wrong before failing; a 4xx-style outcome
            print_quality_report(&report, format)?;
            return Err(Error::InsufficientData { report });
        }
        Err(e) => return Err(e),
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_analysis_text(input, alpha, &report);
    }

    Ok(())
}

fn print_analysis_text(input: &PathBuf, alpha: f64, report: &AnalysisReport) {
    println!("Benford's Law Analysis");
    println!("======================");
    println!("Input:   {}", input.display());
    println!("Records: {}", report.records_analyzed);
    println!();

    println!("{:<6} {:>8} {:>11} {:>11}", "DIGIT", "COUNT", "OBSERVED %", "EXPECTED %");
    println!("{}", "-".repeat(40));
    for digit in 1..=9u8 {
        println!(
            "{:<6} {:>8} {:>11} {:>11}",
            digit,
            report.digit_counts.get(&digit).copied().unwrap_or(0),
            report.actual_percentages.get(&digit).copied().unwrap_or(0.0),
            report.expected_percentages.get(&digit).copied().unwrap_or(0.0),
        );
    }
    println!();

    println!("Chi-square: {:.4} (p = {:.4})", report.chi2_stat, report.p_value);
    println!("KS:         {:.4} (p = {:.4})", report.ks_statistic, report.ks_p_value);
    println!("MAD:        {:.4} ({})", report.mad, report.conformity.name());
    println!();

    if report.conforms(alpha) {
        println!("✓ Conformant with Benford's Law (alpha = {alpha})");
    } else {
        println!("⚠️  NOT conformant with Benford's Law (alpha = {alpha})");
    }

    if !report.issues.is_empty() {
        println!();
        println!("Data issues ({}):", report.issues.len());
        for issue in &report.issues {
            println!("  - {issue}");
        }
    }
}

fn cmd_validate(input: &PathBuf, format: &str) -> benford::Result<()> {
    let payload = load_payload(input)?;
    let report = benford::validate_json(&payload);
    print_quality_report(&report, format)
}

fn print_quality_report(report: &ValidationReport, format: &str) -> benford::Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Data Quality Report");
    println!("===================");
    println!("Total records:  {}", report.total_records);
    println!(
        "Valid records:  {} ({:.2}% complete)",
        report.valid_records, report.data_completeness
    );
    println!("Missing:        {}", report.missing.count);
    println!("Invalid:        {}", report.invalid.count);

    if report.ready_for_analysis {
        println!("✓ Ready for analysis");
    } else {
        println!("⚠️  NOT ready for analysis");
    }

    if report.has_issues() {
        println!();
        println!("Issues ({}):", report.issues.len());
        for issue in &report.issues {
            println!("  - {issue}");
        }
    }

    Ok(())
}

fn cmd_expected(decimals: u8, format: &str) -> benford::Result<()> {
    let expected = expected_percentages(decimals);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&expected)?);
    } else {
        println!("Theoretical Benford percentages");
        println!("{}", "-".repeat(31));
        for (digit, pct) in &expected {
            println!("{:<6} {:>8}%", digit, pct);
        }
    }

    Ok(())
}

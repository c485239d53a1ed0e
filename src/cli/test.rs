use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::cli::{self, CliError, FileOutcome, Result, TestArgs};
use crate::huffman;

/// Per-file roundtrip report, printable or serializable with `--json`.
#[derive(Serialize, Debug)]
pub struct Report {
    pub file: String,
    pub passed: bool,
    pub original_bytes: usize,
    pub compressed_bytes: usize,
    pub ratio: f64,
    pub saved_bytes: i64,
    pub encode_us: u128,
    pub decode_us: u128,
}

pub fn test(args: TestArgs) -> usize {
    let mut reports = Vec::new();
    let mut failures = cli::run_batch(&args.inputs, |path| {
        let (outcome, report) = test_file(path)?;
        if let Some(report) = report {
            if !args.json {
                print_report(&report);
            }
            reports.push(report);
        }
        Ok(outcome)
    });

    failures += reports.iter().filter(|r| !r.passed).count();

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("failed to serialize reports: {}", CliError::Json(e));
                failures += 1;
            }
        }
    }

    failures
}

fn test_file(input: &Path) -> Result<(FileOutcome, Option<Report>)> {
    let data = fs::read(input)?;
    if data.is_empty() {
        return Ok((FileOutcome::SkippedEmpty, None));
    }

    let trip = huffman::roundtrip(&data)?;

    let original_bytes = data.len();
    let compressed_bytes = trip.compressed_len();
    let report = Report {
        file: input.display().to_string(),
        passed: trip.is_successful(),
        original_bytes,
        compressed_bytes,
        ratio: compressed_bytes as f64 / original_bytes as f64,
        saved_bytes: original_bytes as i64 - compressed_bytes as i64,
        encode_us: trip.encode_time().as_micros(),
        decode_us: trip.decode_time().as_micros(),
    };

    if_tracing! {
        tracing::info!(
            event = "test_complete",
            input = %input.display(),
            passed = report.passed,
            original_bytes,
            compressed_bytes,
            "roundtrip test finished"
        );
    }

    Ok((FileOutcome::Done, Some(report)))
}

fn print_report(report: &Report) {
    let passed_string = if report.passed { "PASSED" } else { "FAILED" };
    eprintln!(
        "======== {} {} ========\n\toriginal: {} bytes\n\tcompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes\n\tencode: {} us\n\tdecode: {} us{}",
        passed_string,
        report.file,
        report.original_bytes,
        report.compressed_bytes,
        report.ratio * 100.0,
        report.saved_bytes,
        report.encode_us,
        report.decode_us,
        if report.passed {
            String::new()
        } else {
            "\n\terror: decompressed data differs from the original".to_string()
        }
    );
}

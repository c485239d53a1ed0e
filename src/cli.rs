//! cli component of the huffpack project.
//!
//! let's define the base cases for the cli invocations of this project to base the implementation on.
//! lines starting with `> ` denote commands that should be valid under the current implementation.
//! `$exename` stands for the executable name, which is `huffpack` in linux or `huffpack.exe` on windows, or
//! whatever the user renamed the file to. `<description>` denotes a required argument, while
//! `[description]` denotes an optional argument.
//!
//! > `$exename compress <paths to files or folders>... [--suffix <name suffix>]`
//!
//! each input file is read fully, a code table is built from its own symbol frequencies, and the
//! encoded bit stream is written next to it as `{file stem}{suffix}{extension}`. the suffix defaults
//! to `_compressed` and the derivation works for arbitrary base names, with or without an extension.
//! a zero-length input is not an error: it is reported as a skip and the file is left alone, since
//! an empty frequency table cannot seed the tree build. folders are walked recursively and their
//! files are handled one by one.
//!
//! > `$exename decompress <paths to original files or folders>... [--compressed-suffix <name suffix>] [--decompressed-suffix <name suffix>]`
//!
//! decompression takes the *original* files as inputs, not the compressed ones. the code table is
//! never stored in the compressed output, so the decoder rebuilds it from the original file's
//! frequencies, reads the sibling `{file stem}_compressed{extension}` file, and writes the decoded
//! stream to `{file stem}_decompressed{extension}`. both sides of a pair therefore derive their
//! tables from the same frequency data, which is what makes them interchangeable.
//!
//! > `$exename test <paths to files or folders>... [--json]`
//!
//! the testing mode compresses each file in memory, immediately decompresses the result, and
//! compares it with the original. per-file stats (sizes, ratio, timings) are printed to stderr,
//! or emitted as a json report on stdout when `--json` is passed.
//!
//! a failure on one input never aborts the rest of a batch: it is reported, counted, and the
//! process exits nonzero once every input has been attempted.
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::huffman::HuffmanError;

pub mod compress;
pub mod decompress;
pub mod test;

/// Default suffix appended to a compressed file's stem.
pub const COMPRESSED_SUFFIX: &str = "_compressed";
/// Default suffix appended to a decompressed file's stem.
pub const DECOMPRESSED_SUFFIX: &str = "_decompressed";

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] HuffmanError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("decoded length {got} does not match the original's {expected} bytes")]
    LengthMismatch { expected: u64, got: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress files or folders
    #[command(alias = "c")]
    Compress(CompressArgs),

    /// Decompress files previously compressed from the given originals
    #[command(alias = "d")]
    Decompress(DecompressArgs),

    /// Compress and decompress in memory, verify the roundtrip, report stats
    Test(TestArgs),
}

/// Arguments specific to the compress command
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Paths to the input files or folders
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Suffix appended to each output file's stem
    #[arg(long, default_value = COMPRESSED_SUFFIX)]
    pub suffix: String,
}

/// Arguments specific to the decompress command
#[derive(Args, Debug)]
pub struct DecompressArgs {
    /// Paths to the original files or folders (the codec is rebuilt from these)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Suffix the compressed siblings were written with
    #[arg(long, default_value = COMPRESSED_SUFFIX)]
    pub compressed_suffix: String,

    /// Suffix appended to each decompressed output file's stem
    #[arg(long, default_value = DECOMPRESSED_SUFFIX)]
    pub decompressed_suffix: String,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Paths to the input files or folders
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Emit the per-file reports as JSON on stdout instead of the stderr summary
    #[arg(long)]
    pub json: bool,
}

/// What happened to one input file. `SkippedEmpty` is the degenerate-input
/// status: a zero-length input is recognized and left alone, distinct from
/// every error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    Done,
    SkippedEmpty,
}

/// Derives a sibling path by appending `suffix` to the file stem, keeping
/// the extension: `a/report.txt` + `_compressed` -> `a/report_compressed.txt`.
pub fn derive_sibling(path: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CliError::InvalidPath(path.display().to_string()))?;

    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }

    Ok(path.with_file_name(name))
}

/// Expands the given paths into a flat file list, walking folders recursively.
pub fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() || e.file_type().is_symlink())
            {
                files.push(entry.path().to_path_buf());
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Runs `per_file` over every input, reporting skips and failures as it goes.
/// One file's failure does not abort the rest; the failure count is returned
/// so the caller can set the exit status once the whole batch was attempted.
pub fn run_batch<F>(inputs: &[PathBuf], mut per_file: F) -> usize
where
    F: FnMut(&Path) -> Result<FileOutcome>,
{
    let files = collect_inputs(inputs);
    let mut failures = 0;

    for file in &files {
        match per_file(file) {
            Ok(FileOutcome::Done) => {}
            Ok(FileOutcome::SkippedEmpty) => {
                eprintln!("skipped {}: empty input, nothing to do", file.display());
            }
            Err(e) => {
                failures += 1;
                eprintln!("failed {}: {}", file.display(), e);
            }
        }
    }

    failures
}

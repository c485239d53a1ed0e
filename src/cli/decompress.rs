use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use crate::bitio::BitReader;
use crate::cli::{self, CliError, DecompressArgs, FileOutcome, Result};
use crate::huffman::codec::HuffmanCodec;
use crate::huffman::freq::FrequencyTable;

pub fn decompress(args: DecompressArgs) -> usize {
    cli::run_batch(&args.inputs, |path| {
        decompress_file(path, &args.compressed_suffix, &args.decompressed_suffix)
    })
}

/// Rebuilds the codec from the original file's frequencies, then decodes the
/// compressed sibling. The code table is never stored in the compressed
/// output, both sides derive it from the same frequency data.
fn decompress_file(
    original: &Path,
    compressed_suffix: &str,
    decompressed_suffix: &str,
) -> Result<FileOutcome> {
    let freqs = FrequencyTable::from_reader(BufReader::new(File::open(original)?))?;
    if freqs.is_empty() {
        return Ok(FileOutcome::SkippedEmpty);
    }
    let codec = HuffmanCodec::from_frequencies(&freqs)?;

    let compressed_path = cli::derive_sibling(original, compressed_suffix)?;
    let output = cli::derive_sibling(original, decompressed_suffix)?;
    let compressed = fs::read(&compressed_path)?;

    let start = Instant::now();
    let mut reader = BitReader::new(&compressed)?;
    let decoded = codec.decode(&mut reader)?;
    let elapsed = start.elapsed();

    // decoding can land on a codeword boundary and still be the wrong
    // stream for this original, the length comparison catches that
    if decoded.len() as u64 != freqs.total() {
        return Err(CliError::LengthMismatch {
            expected: freqs.total(),
            got: decoded.len() as u64,
        });
    }

    fs::write(&output, &decoded)?;

    if_tracing! {
        tracing::info!(
            event = "decompress_complete",
            input = %compressed_path.display(),
            output = %output.display(),
            compressed_len = compressed.len(),
            decompressed_len = decoded.len(),
            elapsed_us = %elapsed.as_micros(),
            "decompress finished"
        );
    }
    eprintln!(
        "decompressed {} -> {} ({} bytes -> {} bytes, {:.0?})",
        compressed_path.display(),
        output.display(),
        compressed.len(),
        decoded.len(),
        elapsed,
    );

    Ok(FileOutcome::Done)
}

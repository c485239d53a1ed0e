use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use crate::bitio::BitWriter;
use crate::cli::{self, CompressArgs, FileOutcome, Result};
use crate::huffman::codec::HuffmanCodec;

pub fn compress(args: CompressArgs) -> usize {
    cli::run_batch(&args.inputs, |path| compress_file(path, &args.suffix))
}

fn compress_file(input: &Path, suffix: &str) -> Result<FileOutcome> {
    let data = fs::read(input)?;
    if data.is_empty() {
        return Ok(FileOutcome::SkippedEmpty);
    }

    let output = cli::derive_sibling(input, suffix)?;
    let codec = HuffmanCodec::from_bytes(&data)?;

    let start = Instant::now();
    let mut writer = BitWriter::new(BufWriter::new(File::create(&output)?));
    // on an encode error the partially written file still closes on drop,
    // its content is then invalid
    codec.encode(&data, &mut writer)?;
    let bits = writer.bits_written();
    writer.finish()?;
    let elapsed = start.elapsed();

    let compressed_len = bits.div_ceil(8) + 1;
    if_tracing! {
        tracing::info!(
            event = "compress_complete",
            input = %input.display(),
            output = %output.display(),
            original_len = data.len(),
            compressed_len,
            elapsed_us = %elapsed.as_micros(),
            "compress finished"
        );
    }
    eprintln!(
        "compressed {} -> {} ({} bytes -> {} bytes, alphabet {}, {:.0?})",
        input.display(),
        output.display(),
        data.len(),
        compressed_len,
        codec.alphabet_size(),
        elapsed,
    );

    Ok(FileOutcome::Done)
}

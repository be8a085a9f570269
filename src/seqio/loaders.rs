use std::fs::File;
use std::path::Path;

use memmap2::MmapOptions;
use tracing::debug;

use crate::seqio::data::{InputMode, ReadOptions, Record};
use crate::seqio::endpoint::Endpoint;
use crate::seqio::error::Result;
use crate::seqio::fasta::{self, RecordAssembler};
use crate::seqio::tokenizer::{ChunkTokenizer, header_fragment_start};

pub fn load_records_from_path(path: &Path, mode: InputMode) -> Result<Vec<Record>> {
    load_records_with_options(path, mode, ReadOptions::default())
}

pub fn load_records_with_options(
    path: &Path,
    mode: InputMode,
    options: ReadOptions,
) -> Result<Vec<Record>> {
    let records = match mode {
        InputMode::Mmap if !is_gzip(path) => load_records_mmap(path)?,
        _ => load_records_stream(path, options)?,
    };
    debug!(path = %path.display(), ?mode, records = records.len(), "loaded fasta records");
    Ok(records)
}

fn load_records_stream(path: &Path, options: ReadOptions) -> Result<Vec<Record>> {
    fasta::read_with_options(Endpoint::path(path), options)?.collect()
}

fn load_records_mmap(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }
    let mmap = unsafe { MmapOptions::new().map(&file)? };
    Ok(parse_bytes(&mmap[..]))
}

/// Parses an in-memory FASTA image in a single pass, tokenizing `data` in
/// place.
pub fn parse_bytes(data: &[u8]) -> Vec<Record> {
    let scan_end = header_fragment_start(data, true);
    let mut assembler = RecordAssembler::new();
    let mut records = Vec::new();
    for segment in ChunkTokenizer::new(&data[..scan_end], true) {
        records.extend(assembler.push(segment));
    }
    if scan_end < data.len() {
        // final header line without a newline
        records.extend(assembler.header(data[scan_end + 1..].trim_ascii()));
    }
    records.extend(assembler.finish());
    records
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

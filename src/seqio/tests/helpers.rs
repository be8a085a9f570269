use std::io::Cursor;

use crate::seqio::{BoundaryMode, FastaReader, ReadOptions, Record, Result};

pub(super) type RecordSignature = (String, String);

pub(super) fn signatures(records: &[Record]) -> Vec<RecordSignature> {
    records
        .iter()
        .map(|r| (r.comment().to_string(), r.sequence().to_string()))
        .collect()
}

pub(super) fn read_all(input: &[u8], chunk_size: usize, boundary: BoundaryMode) -> Vec<Record> {
    let options = ReadOptions::new(chunk_size, boundary);
    FastaReader::with_options(Cursor::new(input.to_vec()), options)
        .collect::<Result<Vec<_>>>()
        .expect("reading from memory cannot fail")
}

/// Renders records the way a tidy FASTA file looks: one header line, then
/// the sequence wrapped at `width`.
pub(super) fn render_fasta(records: &[(&str, &str)], width: usize) -> String {
    let mut out = String::new();
    for (comment, sequence) in records {
        out.push('>');
        out.push_str(comment);
        out.push('\n');
        for line in sequence.as_bytes().chunks(width) {
            out.push_str(std::str::from_utf8(line).unwrap());
            out.push('\n');
        }
    }
    out
}

/// Offsets of every byte that sits inside a header line.
pub(super) fn header_spans(input: &[u8]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut line_start = 0;
    for (index, byte) in input.iter().enumerate() {
        if *byte == b'\n' {
            if input.get(line_start) == Some(&b'>') {
                spans.push((line_start, index + 1));
            }
            line_start = index + 1;
        }
    }
    spans
}

use rayon::prelude::*;
use serde::Serialize;

use crate::seqio::data::{Record, SequenceKind};

// at least 3 in 5 characters from {a,t,g,c,n}
const NUCLEOTIDE_SHARE: (usize, usize) = (3, 5);

/// Bases an IUPAC ambiguity code stands for.
pub fn ambiguity_expansion(code: char) -> Option<&'static str> {
    let bases = match code.to_ascii_uppercase() {
        'M' => "AC",
        'R' => "AG",
        'W' => "AT",
        'S' => "CG",
        'Y' => "CT",
        'K' => "GT",
        'V' => "ACG",
        'H' => "ACT",
        'D' => "AGT",
        'B' => "CGT",
        'X' | 'N' => "GATC",
        _ => return None,
    };
    Some(bases)
}

/// GC equivalent of one base: 1 for G/C, the G/C share of an ambiguity code,
/// 0 otherwise.
fn gc_weight(byte: u8) -> f64 {
    match byte.to_ascii_uppercase() {
        b'G' | b'C' | b'S' => 1.0,
        b'B' | b'V' => 2.0 / 3.0,
        b'D' | b'H' => 1.0 / 3.0,
        b'K' | b'M' | b'N' | b'R' | b'X' | b'Y' => 0.5,
        _ => 0.0,
    }
}

/// Fraction of G/C in `seq`, with ambiguity codes contributing their GC
/// share. An empty sequence has GC content 0.
pub fn gc_content(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let count: f64 = seq.bytes().map(gc_weight).sum();
    count / seq.len() as f64
}

/// [`gc_content`] as a truncated percentage.
pub fn gc_percent(seq: &str) -> u32 {
    (gc_content(seq) * 100.0) as u32
}

/// N50 of a set of lengths; `None` when there are no lengths.
pub fn n50<I>(lengths: I) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut lengths: Vec<usize> = lengths.into_iter().collect();
    if lengths.is_empty() {
        return None;
    }
    let total: usize = lengths.iter().sum();
    lengths.sort_unstable_by(|a, b| b.cmp(a));
    let mut cumulative = 0usize;
    for length in lengths {
        cumulative += length;
        if cumulative * 2 >= total {
            return Some(length);
        }
    }
    None
}

pub fn guess_sequence_type(seq: &str) -> SequenceKind {
    let nucleotides = seq
        .bytes()
        .filter(|b| matches!(b.to_ascii_lowercase(), b'a' | b't' | b'g' | b'c' | b'n'))
        .count();
    let (share, whole) = NUCLEOTIDE_SHARE;
    if nucleotides * whole >= seq.len() * share {
        SequenceKind::Nucleotide
    } else {
        SequenceKind::Protein
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordStats {
    pub comment: String,
    pub length: usize,
    pub gc_content: f64,
    pub kind: SequenceKind,
}

impl RecordStats {
    pub fn from_record(record: &Record) -> Self {
        Self {
            comment: record.comment().to_string(),
            length: record.len(),
            gc_content: gc_content(record.sequence()),
            kind: guess_sequence_type(record.sequence()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub records: usize,
    pub total_length: usize,
    pub n50: Option<usize>,
}

pub fn summarize_records(records: &[Record]) -> Vec<RecordStats> {
    records.par_iter().map(RecordStats::from_record).collect()
}

pub fn summary(stats: &[RecordStats]) -> SummaryStats {
    SummaryStats {
        records: stats.len(),
        total_length: stats.iter().map(|s| s.length).sum(),
        n50: n50(stats.iter().map(|s| s.length)),
    }
}

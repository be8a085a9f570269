use std::fmt;

use serde::Serialize;

pub const DEFAULT_CHUNK_SIZE: usize = 1 << 20;
pub const DEFAULT_LINE_WIDTH: usize = 70;

const DEBUG_FIELD_WIDTH: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Mmap,
    Stream,
}

/// How the streaming reader treats a header line cut by a chunk boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Hold the partial header back and rescan it with the next chunk.
    #[default]
    CarryOver,
    /// Tokenize every chunk alone; a split header degrades into sequence text.
    Legacy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    pub chunk_size: usize,
    pub boundary: BoundaryMode,
}

impl ReadOptions {
    pub const fn new(chunk_size: usize, boundary: BoundaryMode) -> Self {
        Self {
            chunk_size,
            boundary,
        }
    }

    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub const fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions::new(DEFAULT_CHUNK_SIZE, BoundaryMode::CarryOver)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    pub linesep: String,
    pub linewidth: usize,
}

impl WriteOptions {
    pub fn new(linesep: impl Into<String>, linewidth: usize) -> Self {
        Self {
            linesep: linesep.into(),
            linewidth,
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions::new(platform_linesep(), DEFAULT_LINE_WIDTH)
    }
}

pub fn platform_linesep() -> &'static str {
    if cfg!(windows) { "\r\n" } else { "\n" }
}

/// Placeholder comment for the `ordinal`-th record that has no header text.
pub fn anonymous_comment(ordinal: usize) -> String {
    format!("anonym.{ordinal:03}")
}

/// One sequence entry: header text, whitespace-free sequence and, for FASTQ,
/// the quality string.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    pub(crate) comment: String,
    pub(crate) sequence: String,
    pub(crate) quality: Option<String>,
}

impl Record {
    pub fn new(comment: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            sequence: sequence.into(),
            quality: None,
        }
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn quality(&self) -> Option<&str> {
        self.quality.as_deref()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">{}\n{}", self.comment, self.sequence)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        map.entry(&"comment", &Abbreviated(&self.comment));
        if let Some(quality) = &self.quality {
            map.entry(&"quality", &Abbreviated(quality));
        }
        map.entry(&"sequence", &Abbreviated(&self.sequence));
        map.finish()
    }
}

struct Abbreviated<'a>(&'a str);

impl fmt::Debug for Abbreviated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars = self.0.chars().count();
        if chars <= DEBUG_FIELD_WIDTH {
            return write!(f, "{:?}", self.0);
        }
        let head: String = self.0.chars().take(DEBUG_FIELD_WIDTH).collect();
        write!(f, "{head:?}~{chars}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SequenceKind {
    #[serde(rename = "nucl")]
    Nucleotide,
    #[serde(rename = "prot")]
    Protein,
}

impl SequenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceKind::Nucleotide => "nucl",
            SequenceKind::Protein => "prot",
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_fasta_block() {
        let rec = Record::new("seq1 desc", "ACGT");
        assert_eq!(rec.to_string(), ">seq1 desc\nACGT");
    }

    #[test]
    fn debug_abbreviates_long_sequences() {
        let rec = Record::new("long", "A".repeat(100));
        let rendered = format!("{rec:?}");
        assert!(rendered.contains("~100"));
        assert!(rendered.contains("\"long\""));
    }

    #[test]
    fn anonymous_comments_are_zero_padded() {
        assert_eq!(anonymous_comment(1), "anonym.001");
        assert_eq!(anonymous_comment(1234), "anonym.1234");
    }
}

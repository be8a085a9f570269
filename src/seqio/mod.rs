pub mod endpoint;
pub mod fasta;
pub mod fastq;
pub mod genbank;
pub mod naming;
pub mod replication;
pub mod stats;
pub mod tee;
pub mod tokenizer;
pub mod translate;
pub mod writer;

mod data;
mod error;
mod export;
mod loaders;
#[cfg(test)]
mod tests;

pub use data::{
    BoundaryMode, DEFAULT_CHUNK_SIZE, DEFAULT_LINE_WIDTH, InputMode, ReadOptions, Record,
    SequenceKind, WriteOptions, anonymous_comment, platform_linesep,
};
pub use endpoint::{Endpoint, Handle};
pub use error::{Result, SeqError};
pub use export::{render_csv_stats, render_json_stats, write_parquet_stats};
pub use fasta::{FastaReader, ReaderState};
pub use fastq::FastqReader;
pub use loaders::{load_records_from_path, load_records_with_options, parse_bytes};
pub use replication::{Alphabet, Transcoder, complement, reverse_complement};
pub use stats::{RecordStats, SummaryStats, gc_content, gc_percent, guess_sequence_type, n50};
pub use tee::{TeeCursor, tee};
pub use tokenizer::{ChunkTokenizer, Segment};
pub use translate::CodonTable;
pub use writer::FastaWriter;
